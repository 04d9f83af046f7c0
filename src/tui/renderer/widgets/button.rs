use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
};

use crate::tui::Theme;
use crate::tui::command::DispatchTarget;
use crate::tui::element::FocusId;
use crate::tui::renderer::{FocusRegistry, FocusableInfo};

/// Create on_key handler for buttons (Enter or Space activates)
pub fn button_on_key<Msg: Clone + Send + 'static>(
    on_press: Option<Msg>,
) -> Box<dyn Fn(KeyEvent) -> DispatchTarget<Msg> + Send> {
    Box::new(move |key_event| match key_event.code {
        KeyCode::Enter | KeyCode::Char(' ') if key_event.modifiers.is_empty() => {
            match on_press.clone() {
                Some(msg) => DispatchTarget::AppMsg(msg),
                None => DispatchTarget::PassThrough,
            }
        }
        _ => DispatchTarget::PassThrough,
    })
}

/// Render Button element
#[allow(clippy::too_many_arguments)]
pub fn render_button<Msg: Clone + Send + 'static>(
    frame: &mut Frame,
    theme: &Theme,
    focus_registry: &mut FocusRegistry<Msg>,
    focused_id: Option<&FocusId>,
    id: &FocusId,
    label: &str,
    on_press: &Option<Msg>,
    on_focus: &Option<Msg>,
    on_blur: &Option<Msg>,
    style: &Option<Style>,
    area: Rect,
) {
    focus_registry.register_focusable(FocusableInfo {
        id: id.clone(),
        rect: area,
        on_key: button_on_key(on_press.clone()),
        on_focus: on_focus.clone(),
        on_blur: on_blur.clone(),
    });

    let is_focused = focused_id == Some(id);

    let default_style = Style::default().fg(theme.text_primary);
    let border_style = if is_focused {
        Style::default().fg(theme.accent_primary)
    } else {
        Style::default().fg(theme.border_secondary)
    };
    let block = Block::default().borders(Borders::ALL).border_style(border_style);
    let widget = Paragraph::new(label)
        .block(block)
        .alignment(Alignment::Center)
        .style(style.unwrap_or(default_style));
    frame.render_widget(widget, area);
}
