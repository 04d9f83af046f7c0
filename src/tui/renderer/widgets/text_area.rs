use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use super::is_navigation_key;
use crate::tui::Theme;
use crate::tui::command::DispatchTarget;
use crate::tui::element::{Callback, FocusId};
use crate::tui::renderer::{FocusRegistry, FocusableInfo};
use crate::tui::widgets::text_area::first_visible_row;
use crate::tui::widgets::text_input::scroll_start;

/// Create on_key handler for text areas. Enter is an editing key here.
pub fn text_area_on_key<Msg: Clone + Send + 'static>(
    on_change: Option<Callback<KeyCode, Msg>>,
) -> Box<dyn Fn(KeyEvent) -> DispatchTarget<Msg> + Send> {
    Box::new(move |key_event| {
        if is_navigation_key(&key_event) {
            return DispatchTarget::PassThrough;
        }
        match &on_change {
            Some(f) => DispatchTarget::AppMsg(f(key_event.code)),
            None => DispatchTarget::PassThrough,
        }
    })
}

/// Render TextArea element
#[allow(clippy::too_many_arguments)]
pub fn render_text_area<Msg: Clone + Send + 'static>(
    frame: &mut Frame,
    theme: &Theme,
    focus_registry: &mut FocusRegistry<Msg>,
    focused_id: Option<&FocusId>,
    id: &FocusId,
    value: &str,
    cursor: (usize, usize),
    invalid: bool,
    on_change: &Option<Callback<KeyCode, Msg>>,
    on_focus: &Option<Msg>,
    on_blur: &Option<Msg>,
    area: Rect,
) {
    focus_registry.register_focusable(FocusableInfo {
        id: id.clone(),
        rect: area,
        on_key: text_area_on_key(on_change.clone()),
        on_focus: on_focus.clone(),
        on_blur: on_blur.clone(),
    });

    let is_focused = focused_id == Some(id);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.field_border(is_focused, invalid));
    let inner = block.inner(area);

    let lines: Vec<Vec<char>> = value.split('\n').map(|l| l.chars().collect()).collect();
    let (row, col) = (cursor.0.min(lines.len() - 1), cursor.1);
    let visible_width = inner.width.saturating_sub(2) as usize;
    let first_row = if is_focused { first_visible_row(row, inner.height as usize) } else { 0 };
    let first_col = if is_focused { scroll_start(col, visible_width) } else { 0 };

    let rendered: Vec<Line<'static>> = lines
        .iter()
        .enumerate()
        .skip(first_row)
        .take(inner.height as usize)
        .map(|(index, line)| {
            let start = first_col.min(line.len());
            let end = (first_col + visible_width).min(line.len());
            let mut visible: Vec<char> = line[start..end].to_vec();
            if is_focused && index == row {
                let at = col.min(line.len()).saturating_sub(start).min(visible.len());
                visible.insert(at, '│');
            }
            Line::from(format!(" {}", visible.into_iter().collect::<String>()))
        })
        .collect();

    let widget = Paragraph::new(rendered)
        .style(Style::default().fg(theme.text_primary))
        .block(block);
    frame.render_widget(widget, area);
}
