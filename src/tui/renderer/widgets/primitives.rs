use ratatui::{Frame, layout::Rect, style::Style, widgets::Paragraph};

use crate::tui::{Element, Theme};

/// Render primitive elements (None, Text, StyledText)
pub fn render_primitive<Msg>(frame: &mut Frame, theme: &Theme, element: &Element<Msg>, area: Rect) {
    match element {
        Element::Text { content, style } => {
            let default_style = Style::default().fg(theme.text_primary);
            let widget = Paragraph::new(content.as_str()).style(style.unwrap_or(default_style));
            frame.render_widget(widget, area);
        }

        Element::StyledText { line, background } => {
            let mut widget = Paragraph::new(line.clone());
            if let Some(bg_style) = background {
                widget = widget.style(*bg_style);
            }
            frame.render_widget(widget, area);
        }

        _ => {}
    }
}

/// Check if an element is a primitive
pub fn is_primitive<Msg>(element: &Element<Msg>) -> bool {
    matches!(element, Element::None | Element::Text { .. } | Element::StyledText { .. })
}
