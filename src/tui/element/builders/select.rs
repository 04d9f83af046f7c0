use std::sync::Arc;

use crate::tui::Element;
use crate::tui::element::{Callback, FocusId};
use crate::tui::widgets::SelectEvent;

/// Builder for select elements
pub struct SelectBuilder<Msg> {
    pub(crate) id: FocusId,
    pub(crate) options: Vec<String>,
    pub(crate) selected: Option<usize>,
    pub(crate) is_open: bool,
    pub(crate) highlight: usize,
    pub(crate) invalid: bool,
    pub(crate) on_event: Option<Callback<SelectEvent, Msg>>,
    pub(crate) on_focus: Option<Msg>,
    pub(crate) on_blur: Option<Msg>,
}

impl<Msg> SelectBuilder<Msg> {
    pub fn selected(mut self, index: Option<usize>) -> Self {
        self.selected = index;
        self
    }

    pub fn open(mut self, is_open: bool) -> Self {
        self.is_open = is_open;
        self
    }

    pub fn highlight(mut self, index: usize) -> Self {
        self.highlight = index;
        self
    }

    pub fn invalid(mut self, invalid: bool) -> Self {
        self.invalid = invalid;
        self
    }

    pub fn on_event(mut self, f: impl Fn(SelectEvent) -> Msg + Send + Sync + 'static) -> Self {
        self.on_event = Some(Arc::new(f));
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
        Element::Select {
            id: self.id,
            options: self.options,
            selected: self.selected,
            is_open: self.is_open,
            highlight: self.highlight,
            invalid: self.invalid,
            on_event: self.on_event,
            on_focus: self.on_focus,
            on_blur: self.on_blur,
        }
    }
}
