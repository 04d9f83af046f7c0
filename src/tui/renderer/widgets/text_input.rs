use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
};

use super::is_navigation_key;
use crate::tui::Theme;
use crate::tui::command::DispatchTarget;
use crate::tui::element::{Callback, FocusId};
use crate::tui::renderer::{FocusRegistry, FocusableInfo};
use crate::tui::widgets::text_input::scroll_start;

/// Create on_key handler for text inputs. Enter fires on_submit,
/// editing keys go to on_change.
pub fn text_input_on_key<Msg: Clone + Send + 'static>(
    on_change: Option<Callback<KeyCode, Msg>>,
    on_submit: Option<Msg>,
) -> Box<dyn Fn(KeyEvent) -> DispatchTarget<Msg> + Send> {
    Box::new(move |key_event| {
        if is_navigation_key(&key_event) {
            return DispatchTarget::PassThrough;
        }
        match key_event.code {
            KeyCode::Enter => match on_submit.clone() {
                Some(msg) => DispatchTarget::AppMsg(msg),
                None => DispatchTarget::PassThrough,
            },
            code => match &on_change {
                Some(f) => DispatchTarget::AppMsg(f(code)),
                None => DispatchTarget::PassThrough,
            },
        }
    })
}

/// Render TextInput element
#[allow(clippy::too_many_arguments)]
pub fn render_text_input<Msg: Clone + Send + 'static>(
    frame: &mut Frame,
    theme: &Theme,
    focus_registry: &mut FocusRegistry<Msg>,
    focused_id: Option<&FocusId>,
    id: &FocusId,
    value: &str,
    cursor_pos: usize,
    placeholder: &Option<String>,
    invalid: bool,
    on_change: &Option<Callback<KeyCode, Msg>>,
    on_submit: &Option<Msg>,
    on_focus: &Option<Msg>,
    on_blur: &Option<Msg>,
    area: Rect,
) {
    focus_registry.register_focusable(FocusableInfo {
        id: id.clone(),
        rect: area,
        on_key: text_input_on_key(on_change.clone(), on_submit.clone()),
        on_focus: on_focus.clone(),
        on_blur: on_blur.clone(),
    });

    let is_focused = focused_id == Some(id);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.field_border(is_focused, invalid));
    let inner = block.inner(area);

    // One column of left padding, one reserved for the cursor
    let visible_width = inner.width.saturating_sub(2) as usize;
    let chars: Vec<char> = value.chars().collect();
    let cursor_pos = cursor_pos.min(chars.len());
    let start = if is_focused { scroll_start(cursor_pos, visible_width) } else { 0 };
    let end = (start + visible_width).min(chars.len());

    let (display_text, style) = if value.is_empty() && !is_focused {
        let text = placeholder.as_deref().unwrap_or_default();
        (format!(" {}", text), theme.placeholder_style())
    } else {
        let mut visible: Vec<char> = chars[start..end].to_vec();
        if is_focused {
            visible.insert(cursor_pos - start, '│');
        }
        let text: String = visible.into_iter().collect();
        (format!(" {}", text), Style::default().fg(theme.text_primary))
    };

    let widget = Paragraph::new(display_text).style(style).block(block);
    frame.render_widget(widget, area);
}
