use crossterm::event::KeyCode;
use std::sync::Arc;

use crate::tui::Element;
use crate::tui::element::{Callback, FocusId};

/// Builder for multi-line text areas
pub struct TextAreaBuilder<Msg> {
    pub(crate) id: FocusId,
    pub(crate) value: String,
    pub(crate) cursor: (usize, usize),
    pub(crate) rows: u16,
    pub(crate) invalid: bool,
    pub(crate) on_change: Option<Callback<KeyCode, Msg>>,
    pub(crate) on_focus: Option<Msg>,
    pub(crate) on_blur: Option<Msg>,
}

impl<Msg> TextAreaBuilder<Msg> {
    pub fn invalid(mut self, invalid: bool) -> Self {
        self.invalid = invalid;
        self
    }

    pub fn on_change(mut self, f: impl Fn(KeyCode) -> Msg + Send + Sync + 'static) -> Self {
        self.on_change = Some(Arc::new(f));
        self
    }

    pub fn on_focus(mut self, msg: Msg) -> Self {
        self.on_focus = Some(msg);
        self
    }

    pub fn on_blur(mut self, msg: Msg) -> Self {
        self.on_blur = Some(msg);
        self
    }

    pub fn build(self) -> Element<Msg> {
        Element::TextArea {
            id: self.id,
            value: self.value,
            cursor: self.cursor,
            rows: self.rows,
            invalid: self.invalid,
            on_change: self.on_change,
            on_focus: self.on_focus,
            on_blur: self.on_blur,
        }
    }
}
