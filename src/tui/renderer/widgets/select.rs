use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::tui::Theme;
use crate::tui::command::DispatchTarget;
use crate::tui::element::{Callback, FocusId, SELECT_VISIBLE_OPTIONS};
use crate::tui::renderer::{FocusRegistry, FocusableInfo};
use crate::tui::widgets::SelectEvent;
use crate::tui::widgets::text_input::scroll_start;

/// Create on_key handler for select elements
pub fn select_on_key<Msg: Clone + Send + 'static>(
    is_open: bool,
    on_event: Option<Callback<SelectEvent, Msg>>,
) -> Box<dyn Fn(KeyEvent) -> DispatchTarget<Msg> + Send> {
    Box::new(move |key_event| {
        let Some(on_event) = &on_event else {
            return DispatchTarget::PassThrough;
        };
        if !key_event.modifiers.is_empty() {
            return DispatchTarget::PassThrough;
        }
        let handled = if is_open {
            // Open: Up/Down/Enter/Esc drive the option list
            matches!(key_event.code, KeyCode::Up | KeyCode::Down | KeyCode::Enter | KeyCode::Esc)
        } else {
            // Closed: Enter/Space open it, arrows cycle in place
            matches!(
                key_event.code,
                KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Up | KeyCode::Down
            )
        };
        if handled {
            DispatchTarget::AppMsg(on_event(SelectEvent::Navigate(key_event.code)))
        } else {
            DispatchTarget::PassThrough
        }
    })
}

/// Render Select element: a bordered box with the chosen option and,
/// when open, the option list directly below it
#[allow(clippy::too_many_arguments)]
pub fn render_select<Msg: Clone + Send + 'static>(
    frame: &mut Frame,
    theme: &Theme,
    focus_registry: &mut FocusRegistry<Msg>,
    focused_id: Option<&FocusId>,
    id: &FocusId,
    options: &[String],
    selected: Option<usize>,
    is_open: bool,
    highlight: usize,
    invalid: bool,
    on_event: &Option<Callback<SelectEvent, Msg>>,
    on_focus: &Option<Msg>,
    on_blur: &Option<Msg>,
    area: Rect,
) {
    // Closing the list on blur goes through the same event callback
    let on_blur_msg = match (on_blur, on_event) {
        (Some(msg), _) => Some(msg.clone()),
        (None, Some(f)) => Some(f(SelectEvent::Blur)),
        (None, None) => None,
    };

    let box_area = Rect { height: area.height.min(3), ..area };
    focus_registry.register_focusable(FocusableInfo {
        id: id.clone(),
        rect: box_area,
        on_key: select_on_key(is_open, on_event.clone()),
        on_focus: on_focus.clone(),
        on_blur: on_blur_msg,
    });

    let is_focused = focused_id == Some(id);
    let selected_text = selected.and_then(|i| options.get(i)).map(String::as_str);
    let arrow = if is_open { "▲" } else { "▼" };

    let (text, style) = match selected_text {
        Some(text) => (format!(" {} {}", text, arrow), Style::default().fg(theme.text_primary)),
        None => (format!(" (no options) {}", arrow), theme.placeholder_style()),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.field_border(is_focused, invalid));
    frame.render_widget(Paragraph::new(text).style(style).block(block), box_area);

    if !is_open || options.is_empty() || area.height <= 3 {
        return;
    }

    let list_area = Rect {
        y: area.y + 3,
        height: area.height - 3,
        ..area
    };
    let visible = SELECT_VISIBLE_OPTIONS.min(list_area.height as usize);
    let start = scroll_start(highlight, visible);
    let lines: Vec<Line<'static>> = options
        .iter()
        .enumerate()
        .skip(start)
        .take(visible)
        .map(|(index, option)| {
            if index == highlight {
                Line::styled(
                    format!(" › {}", option),
                    Style::default()
                        .fg(theme.accent_primary)
                        .bg(theme.bg_surface)
                        .add_modifier(Modifier::BOLD),
                )
            } else if Some(index) == selected {
                Line::styled(format!("   {}", option), Style::default().fg(theme.accent_secondary))
            } else {
                Line::styled(format!("   {}", option), Style::default().fg(theme.text_secondary))
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), list_area);
}
