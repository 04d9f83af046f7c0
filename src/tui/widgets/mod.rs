pub mod events;
pub mod select;
pub mod text_area;
pub mod text_input;

pub use events::SelectEvent;
pub use select::SelectState;
pub use text_area::TextAreaState;
pub use text_input::TextInputState;
