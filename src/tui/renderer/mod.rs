use ratatui::{Frame, layout::Rect};

use crate::tui::element::FocusId;
use crate::tui::{Element, Theme};

mod focus_registry;
mod widgets;

pub use focus_registry::{FocusRegistry, FocusableInfo};
pub use widgets::layout::visible_window;

use widgets::*;

/// Renders elements to the terminal
pub struct Renderer;

impl Renderer {
    pub fn render<Msg: Clone + Send + 'static>(
        frame: &mut Frame,
        theme: &Theme,
        focus_registry: &mut FocusRegistry<Msg>,
        focused_id: Option<&FocusId>,
        element: &Element<Msg>,
        area: Rect,
    ) {
        Self::render_element(frame, theme, focus_registry, focused_id, element, area);
    }

    fn render_element<Msg: Clone + Send + 'static>(
        frame: &mut Frame,
        theme: &Theme,
        focus_registry: &mut FocusRegistry<Msg>,
        focused_id: Option<&FocusId>,
        element: &Element<Msg>,
        area: Rect,
    ) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        // Handle primitives (None, Text, StyledText)
        if primitives::is_primitive(element) {
            primitives::render_primitive(frame, theme, element, area);
            return;
        }

        match element {
            Element::Button {
                id,
                label,
                on_press,
                on_focus,
                on_blur,
                style,
            } => {
                button::render_button(
                    frame,
                    theme,
                    focus_registry,
                    focused_id,
                    id,
                    label,
                    on_press,
                    on_focus,
                    on_blur,
                    style,
                    area,
                );
            }

            Element::Column { items, spacing } => {
                layout::render_column(
                    frame,
                    theme,
                    focus_registry,
                    focused_id,
                    items,
                    *spacing,
                    area,
                    Self::render_element,
                );
            }

            Element::Container { child, padding } => {
                layout::render_container(
                    frame,
                    theme,
                    focus_registry,
                    focused_id,
                    child,
                    *padding,
                    area,
                    Self::render_element,
                );
            }

            Element::Panel { child, title } => {
                layout::render_panel(
                    frame,
                    theme,
                    focus_registry,
                    focused_id,
                    child,
                    title,
                    area,
                    Self::render_element,
                );
            }

            Element::Scroll { items, anchor } => {
                layout::render_scroll(
                    frame,
                    theme,
                    focus_registry,
                    focused_id,
                    items,
                    *anchor,
                    area,
                    Self::render_element,
                );
            }

            Element::TextInput {
                id,
                value,
                cursor_pos,
                placeholder,
                invalid,
                on_change,
                on_submit,
                on_focus,
                on_blur,
            } => {
                text_input::render_text_input(
                    frame,
                    theme,
                    focus_registry,
                    focused_id,
                    id,
                    value,
                    *cursor_pos,
                    placeholder,
                    *invalid,
                    on_change,
                    on_submit,
                    on_focus,
                    on_blur,
                    area,
                );
            }

            Element::TextArea {
                id,
                value,
                cursor,
                rows: _,
                invalid,
                on_change,
                on_focus,
                on_blur,
            } => {
                text_area::render_text_area(
                    frame,
                    theme,
                    focus_registry,
                    focused_id,
                    id,
                    value,
                    *cursor,
                    *invalid,
                    on_change,
                    on_focus,
                    on_blur,
                    area,
                );
            }

            Element::Select {
                id,
                options,
                selected,
                is_open,
                highlight,
                invalid,
                on_event,
                on_focus,
                on_blur,
            } => {
                select::render_select(
                    frame,
                    theme,
                    focus_registry,
                    focused_id,
                    id,
                    options,
                    *selected,
                    *is_open,
                    *highlight,
                    *invalid,
                    on_event,
                    on_focus,
                    on_blur,
                    area,
                );
            }

            Element::None | Element::Text { .. } | Element::StyledText { .. } => {}
        }
    }
}
