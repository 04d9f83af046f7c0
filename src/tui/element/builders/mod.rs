mod button;
mod column;
mod panel;
mod select;
mod text_area;
mod text_input;

pub use button::ButtonBuilder;
pub use column::ColumnBuilder;
pub use panel::PanelBuilder;
pub use select::SelectBuilder;
pub use text_area::TextAreaBuilder;
pub use text_input::TextInputBuilder;
