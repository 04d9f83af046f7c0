use crossterm::event::KeyCode;
use ratatui::style::Style;
use ratatui::text::Line;
use std::fmt;
use std::sync::Arc;

use crate::tui::widgets::SelectEvent;

mod builders;
pub use builders::*;

/// Maximum option rows an open select shows below its box
pub const SELECT_VISIBLE_OPTIONS: usize = 6;

/// Stable identifier for focusable UI elements
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FocusId(String);

impl FocusId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FocusId {
    fn from(s: &str) -> Self {
        FocusId(s.to_string())
    }
}

impl From<String> for FocusId {
    fn from(s: String) -> Self {
        FocusId(s)
    }
}

impl fmt::Display for FocusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Maps a widget event to an app message. Boxed so a view can
/// capture per-field data such as the field index.
pub type Callback<T, Msg> = Arc<dyn Fn(T) -> Msg + Send + Sync>;

/// Layout constraints for sizing elements within containers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutConstraint {
    /// Fixed size (exact number of lines)
    Length(u16),
    /// Minimum size (at least this many lines)
    Min(u16),
    /// Proportional fill (weight for distributing remaining space)
    Fill(u16),
}

/// Declarative UI elements that compose to form the view
#[derive(Clone)]
pub enum Element<Msg> {
    /// Empty element that renders nothing
    None,

    /// Static text
    Text { content: String, style: Option<Style> },

    /// Styled text with multiple spans
    StyledText {
        line: Line<'static>,
        background: Option<Style>,
    },

    /// Interactive button
    Button {
        id: FocusId,
        label: String,
        on_press: Option<Msg>,
        on_focus: Option<Msg>,
        on_blur: Option<Msg>,
        style: Option<Style>,
    },

    /// Vertical layout container
    Column {
        items: Vec<(LayoutConstraint, Element<Msg>)>,
        spacing: u16,
    },

    /// Container with padding
    Container {
        child: Box<Element<Msg>>,
        padding: u16,
    },

    /// Panel with border
    Panel {
        child: Box<Element<Msg>>,
        title: Option<String>,
    },

    /// Vertical stack of fixed-height items showing the window of
    /// items that keeps `anchor` on screen
    Scroll {
        items: Vec<(u16, Element<Msg>)>,
        anchor: usize,
    },

    /// Single-line text input
    TextInput {
        id: FocusId,
        value: String,
        cursor_pos: usize,
        placeholder: Option<String>,
        invalid: bool,
        on_change: Option<Callback<KeyCode, Msg>>,
        on_submit: Option<Msg>,
        on_focus: Option<Msg>,
        on_blur: Option<Msg>,
    },

    /// Multi-line text input
    TextArea {
        id: FocusId,
        value: String,
        cursor: (usize, usize),
        rows: u16,
        invalid: bool,
        on_change: Option<Callback<KeyCode, Msg>>,
        on_focus: Option<Msg>,
        on_blur: Option<Msg>,
    },

    /// Dropdown select
    Select {
        id: FocusId,
        options: Vec<String>,
        selected: Option<usize>,
        is_open: bool,
        highlight: usize,
        invalid: bool,
        on_event: Option<Callback<SelectEvent, Msg>>,
        on_focus: Option<Msg>,
        on_blur: Option<Msg>,
    },
}

impl<Msg> Element<Msg> {
    pub fn text(content: impl Into<String>) -> Self {
        Element::Text {
            content: content.into(),
            style: None,
        }
    }

    pub fn styled_text(content: impl Into<String>, style: Style) -> Self {
        Element::Text {
            content: content.into(),
            style: Some(style),
        }
    }

    pub fn line(line: Line<'static>) -> Self {
        Element::StyledText {
            line,
            background: None,
        }
    }

    pub fn button(id: impl Into<FocusId>, label: impl Into<String>) -> ButtonBuilder<Msg> {
        ButtonBuilder {
            id: id.into(),
            label: label.into(),
            on_press: None,
            on_focus: None,
            on_blur: None,
            style: None,
        }
    }

    /// Column whose children take their natural height
    pub fn column(children: Vec<Element<Msg>>) -> ColumnBuilder<Msg> {
        let items = children
            .into_iter()
            .map(|child| (child.default_constraint(), child))
            .collect();
        ColumnBuilder::from_items(items)
    }

    pub fn container(child: Element<Msg>, padding: u16) -> Self {
        Element::Container {
            child: Box::new(child),
            padding,
        }
    }

    pub fn panel(child: Element<Msg>) -> PanelBuilder<Msg> {
        PanelBuilder {
            child: Box::new(child),
            title: None,
        }
    }

    pub fn scroll(items: Vec<Element<Msg>>, anchor: usize) -> Self {
        let items = items
            .into_iter()
            .map(|item| (item.height(), item))
            .collect();
        Element::Scroll { items, anchor }
    }

    pub fn text_input(
        id: impl Into<FocusId>,
        value: impl Into<String>,
        cursor_pos: usize,
    ) -> TextInputBuilder<Msg> {
        TextInputBuilder {
            id: id.into(),
            value: value.into(),
            cursor_pos,
            placeholder: None,
            invalid: false,
            on_change: None,
            on_submit: None,
            on_focus: None,
            on_blur: None,
        }
    }

    pub fn text_area(
        id: impl Into<FocusId>,
        value: impl Into<String>,
        cursor: (usize, usize),
        rows: u16,
    ) -> TextAreaBuilder<Msg> {
        TextAreaBuilder {
            id: id.into(),
            value: value.into(),
            cursor,
            rows: rows.max(1),
            invalid: false,
            on_change: None,
            on_focus: None,
            on_blur: None,
        }
    }

    pub fn select(id: impl Into<FocusId>, options: Vec<String>) -> SelectBuilder<Msg> {
        SelectBuilder {
            id: id.into(),
            options,
            selected: None,
            is_open: false,
            highlight: 0,
            invalid: false,
            on_event: None,
            on_focus: None,
            on_blur: None,
        }
    }

    /// Natural height in lines; fill-style elements report 0
    pub fn height(&self) -> u16 {
        match self.default_constraint() {
            LayoutConstraint::Length(n) | LayoutConstraint::Min(n) => n,
            LayoutConstraint::Fill(_) => 0,
        }
    }

    /// Get the default layout constraint for this element type
    pub fn default_constraint(&self) -> LayoutConstraint {
        match self {
            Element::None => LayoutConstraint::Length(0),
            Element::Text { content, .. } => {
                LayoutConstraint::Length(content.lines().count().max(1) as u16)
            }
            Element::StyledText { .. } => LayoutConstraint::Length(1),
            Element::Button { .. } | Element::TextInput { .. } => LayoutConstraint::Length(3),
            Element::TextArea { rows, .. } => LayoutConstraint::Length(rows + 2),
            Element::Select { options, is_open, .. } => {
                let list = if *is_open {
                    options.len().min(SELECT_VISIBLE_OPTIONS) as u16
                } else {
                    0
                };
                LayoutConstraint::Length(3 + list)
            }
            Element::Column { items, spacing } => {
                let fixed = items.iter().all(|(c, _)| matches!(c, LayoutConstraint::Length(_)));
                if fixed {
                    let total: u16 = items
                        .iter()
                        .map(|(c, _)| match c {
                            LayoutConstraint::Length(n) => *n,
                            _ => 0,
                        })
                        .sum();
                    let gaps = spacing * items.len().saturating_sub(1) as u16;
                    LayoutConstraint::Length(total + gaps)
                } else {
                    LayoutConstraint::Fill(1)
                }
            }
            Element::Container { .. } | Element::Panel { .. } | Element::Scroll { .. } => {
                LayoutConstraint::Fill(1)
            }
        }
    }
}
