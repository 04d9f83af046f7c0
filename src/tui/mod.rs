pub mod app;
pub mod apps;
pub mod command;
pub mod element;
pub mod renderer;
pub mod runtime;
pub mod state;
pub mod subscription;
pub mod widgets;

pub use app::App;
pub use command::{Command, DispatchTarget};
pub use element::{Element, FocusId, LayoutConstraint};
pub use renderer::{FocusRegistry, Renderer};
pub use runtime::Runtime;
pub use state::{Theme, ThemeVariant};
pub use subscription::{KeyBinding, Subscription};
