use crossterm::event::KeyEvent;
use log::warn;
use ratatui::layout::Rect;

use crate::tui::command::DispatchTarget;
use crate::tui::element::FocusId;

/// Information about a focusable element
pub struct FocusableInfo<Msg> {
    pub id: FocusId,
    pub rect: Rect,
    pub on_key: Box<dyn Fn(KeyEvent) -> DispatchTarget<Msg> + Send>,
    pub on_focus: Option<Msg>,
    pub on_blur: Option<Msg>,
}

/// Focusable elements of the last rendered frame, in render order
pub struct FocusRegistry<Msg> {
    focusables: Vec<FocusableInfo<Msg>>,
}

impl<Msg> Default for FocusRegistry<Msg> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Msg> FocusRegistry<Msg> {
    pub fn new() -> Self {
        Self {
            focusables: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.focusables.clear();
    }

    pub fn register_focusable(&mut self, info: FocusableInfo<Msg>) {
        if let Some(existing) = self.focusables.iter_mut().find(|f| f.id == info.id) {
            warn!("Duplicate FocusId {} - last registration wins", info.id);
            *existing = info;
            return;
        }
        self.focusables.push(info);
    }

    pub fn find(&self, id: &FocusId) -> Option<&FocusableInfo<Msg>> {
        self.focusables.iter().find(|f| &f.id == id)
    }

    pub fn contains(&self, id: &FocusId) -> bool {
        self.find(id).is_some()
    }

    pub fn ids(&self) -> Vec<FocusId> {
        self.focusables.iter().map(|f| f.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.focusables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.focusables.is_empty()
    }

    /// Next focusable after `current`, wrapping; the first one when
    /// nothing (or something unregistered) is focused
    pub fn next_focus(&self, current: Option<&FocusId>) -> Option<FocusId> {
        if self.focusables.is_empty() {
            return None;
        }
        let next_index = current
            .and_then(|id| self.focusables.iter().position(|f| &f.id == id))
            .map(|i| (i + 1) % self.focusables.len())
            .unwrap_or(0);
        Some(self.focusables[next_index].id.clone())
    }

    /// Previous focusable before `current`, wrapping; the last one when
    /// nothing is focused
    pub fn prev_focus(&self, current: Option<&FocusId>) -> Option<FocusId> {
        if self.focusables.is_empty() {
            return None;
        }
        let last = self.focusables.len() - 1;
        let prev_index = current
            .and_then(|id| self.focusables.iter().position(|f| &f.id == id))
            .map(|i| if i == 0 { last } else { i - 1 })
            .unwrap_or(last);
        Some(self.focusables[prev_index].id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(id: &str) -> FocusableInfo<()> {
        FocusableInfo {
            id: FocusId::from(id),
            rect: Rect::default(),
            on_key: Box::new(|_| DispatchTarget::PassThrough),
            on_focus: None,
            on_blur: None,
        }
    }

    #[test]
    fn test_focus_wraps() {
        let mut registry = FocusRegistry::new();
        registry.register_focusable(info("a"));
        registry.register_focusable(info("b"));

        let a = FocusId::from("a");
        let b = FocusId::from("b");
        assert_eq!(registry.next_focus(None), Some(a.clone()));
        assert_eq!(registry.next_focus(Some(&b)), Some(a.clone()));
        assert_eq!(registry.prev_focus(Some(&a)), Some(b.clone()));
        assert_eq!(registry.prev_focus(None), Some(b));
    }

    #[test]
    fn test_duplicate_replaces() {
        let mut registry = FocusRegistry::new();
        registry.register_focusable(info("a"));
        registry.register_focusable(info("a"));
        assert_eq!(registry.len(), 1);
    }
}
