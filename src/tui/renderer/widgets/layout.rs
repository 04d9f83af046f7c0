use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
};
use std::ops::Range;

use crate::tui::element::FocusId;
use crate::tui::renderer::FocusRegistry;
use crate::tui::{Element, LayoutConstraint, Theme};

/// Signature of the recursive element renderer handed to containers
pub trait RenderFn<Msg>:
    Fn(&mut Frame, &Theme, &mut FocusRegistry<Msg>, Option<&FocusId>, &Element<Msg>, Rect)
{
}

impl<Msg, F> RenderFn<Msg> for F where
    F: Fn(&mut Frame, &Theme, &mut FocusRegistry<Msg>, Option<&FocusId>, &Element<Msg>, Rect)
{
}

/// Calculate ratatui Constraints from our LayoutConstraints
pub fn calculate_constraints<Msg>(
    items: &[(LayoutConstraint, Element<Msg>)],
    available_space: u16,
) -> Vec<Constraint> {
    let mut fixed_total = 0u16;
    let mut fill_total_weight = 0u16;

    for (constraint, _) in items {
        match constraint {
            LayoutConstraint::Length(n) | LayoutConstraint::Min(n) => {
                fixed_total = fixed_total.saturating_add(*n)
            }
            LayoutConstraint::Fill(weight) => fill_total_weight += weight,
        }
    }

    let remaining = available_space.saturating_sub(fixed_total);

    items
        .iter()
        .map(|(constraint, _)| match constraint {
            LayoutConstraint::Length(n) => Constraint::Length(*n),
            LayoutConstraint::Min(n) => Constraint::Min(*n),
            LayoutConstraint::Fill(weight) => {
                if fill_total_weight > 0 {
                    let space =
                        (remaining as u32 * *weight as u32 / fill_total_weight as u32) as u16;
                    Constraint::Length(space)
                } else {
                    Constraint::Length(0)
                }
            }
        })
        .collect()
}

/// Render Column element
#[allow(clippy::too_many_arguments)]
pub fn render_column<Msg: Clone + Send + 'static>(
    frame: &mut Frame,
    theme: &Theme,
    focus_registry: &mut FocusRegistry<Msg>,
    focused_id: Option<&FocusId>,
    items: &[(LayoutConstraint, Element<Msg>)],
    spacing: u16,
    area: Rect,
    render_fn: impl RenderFn<Msg>,
) {
    if items.is_empty() {
        return;
    }

    let constraints = calculate_constraints(items, area.height);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .spacing(spacing)
        .split(area);

    for ((_, child), chunk) in items.iter().zip(chunks.iter()) {
        render_fn(frame, theme, focus_registry, focused_id, child, *chunk);
    }
}

/// Render Container element
#[allow(clippy::too_many_arguments)]
pub fn render_container<Msg: Clone + Send + 'static>(
    frame: &mut Frame,
    theme: &Theme,
    focus_registry: &mut FocusRegistry<Msg>,
    focused_id: Option<&FocusId>,
    child: &Element<Msg>,
    padding: u16,
    area: Rect,
    render_fn: impl RenderFn<Msg>,
) {
    let padded_area = Rect {
        x: area.x + padding.min(area.width / 2),
        y: area.y + padding.min(area.height / 2),
        width: area.width.saturating_sub(padding * 2),
        height: area.height.saturating_sub(padding * 2),
    };
    render_fn(frame, theme, focus_registry, focused_id, child, padded_area);
}

/// Render Panel element
#[allow(clippy::too_many_arguments)]
pub fn render_panel<Msg: Clone + Send + 'static>(
    frame: &mut Frame,
    theme: &Theme,
    focus_registry: &mut FocusRegistry<Msg>,
    focused_id: Option<&FocusId>,
    child: &Element<Msg>,
    title: &Option<String>,
    area: Rect,
    render_fn: impl RenderFn<Msg>,
) {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_primary));
    if let Some(title) = title {
        block = block
            .title(format!(" {} ", title))
            .title_style(Style::default().fg(theme.accent_secondary));
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);
    render_fn(frame, theme, focus_registry, focused_id, child, inner);
}

/// Range of items to draw so that `anchor` is fully visible when it
/// fits. Earlier items are dropped first; the window always holds at
/// least one item.
pub fn visible_window(heights: &[u16], anchor: usize, available: u16) -> Range<usize> {
    if heights.is_empty() {
        return 0..0;
    }
    let anchor = anchor.min(heights.len() - 1);
    let available = available as u32;
    let span = |range: Range<usize>| heights[range].iter().map(|h| *h as u32).sum::<u32>();

    let mut start = 0;
    while start < anchor && span(start..anchor + 1) > available {
        start += 1;
    }

    let mut end = start;
    let mut used = 0u32;
    while end < heights.len() && used + heights[end] as u32 <= available {
        used += heights[end] as u32;
        end += 1;
    }

    start..end.max(start + 1)
}

/// Render Scroll element
#[allow(clippy::too_many_arguments)]
pub fn render_scroll<Msg: Clone + Send + 'static>(
    frame: &mut Frame,
    theme: &Theme,
    focus_registry: &mut FocusRegistry<Msg>,
    focused_id: Option<&FocusId>,
    items: &[(u16, Element<Msg>)],
    anchor: usize,
    area: Rect,
    render_fn: impl RenderFn<Msg>,
) {
    let heights: Vec<u16> = items.iter().map(|(h, _)| *h).collect();
    let window = visible_window(&heights, anchor, area.height);
    let (first, last) = (window.start, window.end);

    let bottom = area.y + area.height;
    let mut y = area.y;
    for (height, child) in &items[window] {
        if y >= bottom {
            break;
        }
        let rect = Rect {
            x: area.x,
            y,
            width: area.width.saturating_sub(1),
            height: (*height).min(bottom - y),
        };
        render_fn(frame, theme, focus_registry, focused_id, child, rect);
        y += rect.height;
    }

    // Indicators in the rightmost column
    let marker_style = Style::default().fg(theme.text_tertiary);
    let column_x = area.x + area.width.saturating_sub(1);
    if first > 0 {
        frame.render_widget(
            Paragraph::new("↑").style(marker_style),
            Rect::new(column_x, area.y, 1, 1),
        );
    }
    if last < items.len() && area.height > 0 {
        frame.render_widget(
            Paragraph::new("↓").style(marker_style),
            Rect::new(column_x, bottom - 1, 1, 1),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_from_top_when_anchor_fits() {
        assert_eq!(visible_window(&[3, 3, 3, 3], 1, 7), 0..2);
    }

    #[test]
    fn test_window_slides_to_anchor() {
        assert_eq!(visible_window(&[3, 3, 3, 3], 3, 7), 2..4);
    }

    #[test]
    fn test_oversized_anchor_still_shown() {
        assert_eq!(visible_window(&[2, 10, 2], 1, 5), 1..2);
    }

    #[test]
    fn test_anchor_clamped() {
        assert_eq!(visible_window(&[1, 1], 9, 10), 0..2);
        assert_eq!(visible_window(&[], 0, 10), 0..0);
    }
}
