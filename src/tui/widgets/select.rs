use crossterm::event::KeyCode;

use super::events::SelectEvent;

/// Manages state for Select/Dropdown widgets
#[derive(Debug, Clone, Default)]
pub struct SelectState {
    selected_index: usize,
    is_open: bool,
    highlight_index: usize, // Keyboard position while open
    option_count: usize,
}

impl SelectState {
    /// State over `option_count` options with `selected` chosen (clamped)
    pub fn new(option_count: usize, selected: usize) -> Self {
        let selected = selected.min(option_count.saturating_sub(1));
        Self {
            selected_index: selected,
            is_open: false,
            highlight_index: selected,
            option_count,
        }
    }

    /// Currently selected index; None when there are no options
    pub fn selected(&self) -> Option<usize> {
        (self.option_count > 0).then_some(self.selected_index)
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn highlighted(&self) -> usize {
        self.highlight_index
    }

    pub fn open(&mut self) {
        if self.option_count > 0 {
            self.is_open = true;
            self.highlight_index = self.selected_index;
        }
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    pub fn toggle(&mut self) {
        if self.is_open {
            self.close();
        } else {
            self.open();
        }
    }

    pub fn select_highlighted(&mut self) {
        self.selected_index = self.highlight_index;
        self.close();
    }

    pub fn select(&mut self, index: usize) {
        if index < self.option_count {
            self.selected_index = index;
            self.highlight_index = index;
        }
    }

    pub fn navigate_next(&mut self) {
        if self.option_count > 0 {
            self.highlight_index = (self.highlight_index + 1) % self.option_count;
        }
    }

    pub fn navigate_prev(&mut self) {
        if self.option_count > 0 {
            self.highlight_index = if self.highlight_index == 0 {
                self.option_count - 1
            } else {
                self.highlight_index - 1
            };
        }
    }

    /// Cycle to next option directly (when dropdown is closed)
    pub fn cycle_next(&mut self) {
        if self.option_count > 0 {
            self.selected_index = (self.selected_index + 1) % self.option_count;
            self.highlight_index = self.selected_index;
        }
    }

    /// Cycle to previous option directly (when dropdown is closed)
    pub fn cycle_prev(&mut self) {
        if self.option_count > 0 {
            self.selected_index = if self.selected_index == 0 {
                self.option_count - 1
            } else {
                self.selected_index - 1
            };
            self.highlight_index = self.selected_index;
        }
    }

    /// Handle select event.
    /// Returns Some(selected_index) when the selection was committed.
    pub fn handle_event(&mut self, event: SelectEvent) -> Option<usize> {
        match event {
            SelectEvent::Navigate(key) if self.is_open => match key {
                KeyCode::Up => {
                    self.navigate_prev();
                    None
                }
                KeyCode::Down => {
                    self.navigate_next();
                    None
                }
                KeyCode::Enter => {
                    self.select_highlighted();
                    self.selected()
                }
                KeyCode::Esc => {
                    self.close();
                    None
                }
                _ => None,
            },
            SelectEvent::Navigate(key) => match key {
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.open();
                    None
                }
                KeyCode::Up => {
                    self.cycle_prev();
                    self.selected()
                }
                KeyCode::Down => {
                    self.cycle_next();
                    self.selected()
                }
                _ => None,
            },
            SelectEvent::Select(index) => {
                if index >= self.option_count {
                    return None;
                }
                self.select(index);
                self.close();
                self.selected()
            }
            SelectEvent::Blur => {
                self.close();
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_navigate_choose() {
        let mut state = SelectState::new(3, 0);
        assert_eq!(state.handle_event(SelectEvent::Navigate(KeyCode::Enter)), None);
        assert!(state.is_open());
        state.handle_event(SelectEvent::Navigate(KeyCode::Down));
        state.handle_event(SelectEvent::Navigate(KeyCode::Down));
        assert_eq!(state.handle_event(SelectEvent::Navigate(KeyCode::Enter)), Some(2));
        assert!(!state.is_open());
    }

    #[test]
    fn test_escape_keeps_selection() {
        let mut state = SelectState::new(3, 1);
        state.open();
        state.navigate_next();
        assert_eq!(state.handle_event(SelectEvent::Navigate(KeyCode::Esc)), None);
        assert_eq!(state.selected(), Some(1));
    }

    #[test]
    fn test_closed_arrows_cycle() {
        let mut state = SelectState::new(2, 0);
        assert_eq!(state.handle_event(SelectEvent::Navigate(KeyCode::Up)), Some(1));
        assert_eq!(state.handle_event(SelectEvent::Navigate(KeyCode::Down)), Some(0));
    }

    #[test]
    fn test_empty_options() {
        let mut state = SelectState::new(0, 0);
        state.open();
        assert!(!state.is_open());
        assert_eq!(state.selected(), None);
        assert_eq!(state.handle_event(SelectEvent::Select(0)), None);
    }
}
