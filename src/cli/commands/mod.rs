pub mod check;
pub mod inspect;
pub mod run;

pub use check::{CheckCommands, check_command};
pub use inspect::{InspectCommands, inspect_command};
pub use run::{RunCommands, run_command};
