use crossterm::event::KeyCode;

/// Manages text input cursor state
#[derive(Debug, Clone, Default)]
pub struct TextInputState {
    cursor_pos: usize, // Character index (0 = before first char)
}

impl TextInputState {
    pub fn new() -> Self {
        Self { cursor_pos: 0 }
    }

    /// State with the cursor after the last character of `text`
    pub fn at_end(text: &str) -> Self {
        Self {
            cursor_pos: text.chars().count(),
        }
    }

    pub fn cursor_pos(&self) -> usize {
        self.cursor_pos
    }

    /// Handle a key press against the current value.
    /// Returns Some(new_value) if text changed, None if only the cursor moved.
    pub fn handle_key(&mut self, key: KeyCode, current_value: &str) -> Option<String> {
        let char_count = current_value.chars().count();
        // Value may have been replaced underneath us (reset)
        self.cursor_pos = self.cursor_pos.min(char_count);

        match key {
            KeyCode::Char(c) => {
                let mut chars: Vec<char> = current_value.chars().collect();
                chars.insert(self.cursor_pos, c);
                self.cursor_pos += 1;
                Some(chars.into_iter().collect())
            }
            KeyCode::Backspace => {
                if self.cursor_pos > 0 {
                    let mut chars: Vec<char> = current_value.chars().collect();
                    chars.remove(self.cursor_pos - 1);
                    self.cursor_pos -= 1;
                    Some(chars.into_iter().collect())
                } else {
                    None
                }
            }
            KeyCode::Delete => {
                if self.cursor_pos < char_count {
                    let mut chars: Vec<char> = current_value.chars().collect();
                    chars.remove(self.cursor_pos);
                    Some(chars.into_iter().collect())
                } else {
                    None
                }
            }
            KeyCode::Left => {
                self.cursor_pos = self.cursor_pos.saturating_sub(1);
                None
            }
            KeyCode::Right => {
                if self.cursor_pos < char_count {
                    self.cursor_pos += 1;
                }
                None
            }
            KeyCode::Home => {
                self.cursor_pos = 0;
                None
            }
            KeyCode::End => {
                self.cursor_pos = char_count;
                None
            }
            _ => None,
        }
    }
}

/// First visible character index so that `cursor` fits in `width` columns
pub fn scroll_start(cursor: usize, width: usize) -> usize {
    if width == 0 {
        return cursor;
    }
    cursor.saturating_sub(width - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_delete() {
        let mut state = TextInputState::new();
        let v = state.handle_key(KeyCode::Char('a'), "").unwrap();
        let v = state.handle_key(KeyCode::Char('c'), &v).unwrap();
        state.handle_key(KeyCode::Left, &v);
        let v = state.handle_key(KeyCode::Char('b'), &v).unwrap();
        assert_eq!(v, "abc");
        assert_eq!(state.cursor_pos(), 2);

        let v = state.handle_key(KeyCode::Backspace, &v).unwrap();
        assert_eq!(v, "ac");
        assert_eq!(state.handle_key(KeyCode::Home, &v), None);
        assert_eq!(state.handle_key(KeyCode::Backspace, &v), None);
        assert_eq!(state.handle_key(KeyCode::Delete, &v).unwrap(), "c");
    }

    #[test]
    fn test_cursor_clamped_after_external_change() {
        let mut state = TextInputState::at_end("hello");
        let v = state.handle_key(KeyCode::Char('!'), "hi").unwrap();
        assert_eq!(v, "hi!");
    }

    #[test]
    fn test_scroll_start() {
        assert_eq!(scroll_start(3, 10), 0);
        assert_eq!(scroll_start(12, 10), 3);
    }
}
