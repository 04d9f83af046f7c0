use crossterm::event::KeyCode;

/// Cursor state for a multi-line text area. Positions are
/// (line, character) pairs over the value split on '\n'.
#[derive(Debug, Clone, Default)]
pub struct TextAreaState {
    row: usize,
    col: usize,
}

impl TextAreaState {
    pub fn new() -> Self {
        Self { row: 0, col: 0 }
    }

    /// State with the cursor after the last character of `text`
    pub fn at_end(text: &str) -> Self {
        let lines = split_lines(text);
        let row = lines.len() - 1;
        Self {
            row,
            col: lines[row].len(),
        }
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Handle a key press against the current value.
    /// Returns Some(new_value) if text changed, None if only the cursor moved.
    pub fn handle_key(&mut self, key: KeyCode, current_value: &str) -> Option<String> {
        let mut lines = split_lines(current_value);
        self.clamp(&lines);

        match key {
            KeyCode::Char(c) => {
                lines[self.row].insert(self.col, c);
                self.col += 1;
                Some(join_lines(&lines))
            }
            KeyCode::Enter => {
                let tail = lines[self.row].split_off(self.col);
                lines.insert(self.row + 1, tail);
                self.row += 1;
                self.col = 0;
                Some(join_lines(&lines))
            }
            KeyCode::Backspace => {
                if self.col > 0 {
                    lines[self.row].remove(self.col - 1);
                    self.col -= 1;
                } else if self.row > 0 {
                    let current = lines.remove(self.row);
                    self.row -= 1;
                    self.col = lines[self.row].len();
                    lines[self.row].extend(current);
                } else {
                    return None;
                }
                Some(join_lines(&lines))
            }
            KeyCode::Delete => {
                if self.col < lines[self.row].len() {
                    lines[self.row].remove(self.col);
                } else if self.row + 1 < lines.len() {
                    let next = lines.remove(self.row + 1);
                    lines[self.row].extend(next);
                } else {
                    return None;
                }
                Some(join_lines(&lines))
            }
            KeyCode::Left => {
                if self.col > 0 {
                    self.col -= 1;
                } else if self.row > 0 {
                    self.row -= 1;
                    self.col = lines[self.row].len();
                }
                None
            }
            KeyCode::Right => {
                if self.col < lines[self.row].len() {
                    self.col += 1;
                } else if self.row + 1 < lines.len() {
                    self.row += 1;
                    self.col = 0;
                }
                None
            }
            KeyCode::Up => {
                if self.row > 0 {
                    self.row -= 1;
                    self.col = self.col.min(lines[self.row].len());
                }
                None
            }
            KeyCode::Down => {
                if self.row + 1 < lines.len() {
                    self.row += 1;
                    self.col = self.col.min(lines[self.row].len());
                }
                None
            }
            KeyCode::Home => {
                self.col = 0;
                None
            }
            KeyCode::End => {
                self.col = lines[self.row].len();
                None
            }
            _ => None,
        }
    }

    fn clamp(&mut self, lines: &[Vec<char>]) {
        self.row = self.row.min(lines.len() - 1);
        self.col = self.col.min(lines[self.row].len());
    }
}

/// Always yields at least one (possibly empty) line
fn split_lines(text: &str) -> Vec<Vec<char>> {
    text.split('\n').map(|line| line.chars().collect()).collect()
}

fn join_lines(lines: &[Vec<char>]) -> String {
    lines
        .iter()
        .map(|line| line.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// First visible line so that `row` fits in `height` lines
pub fn first_visible_row(row: usize, height: usize) -> usize {
    if height == 0 {
        return row;
    }
    row.saturating_sub(height - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_inserts_newline() {
        let mut state = TextAreaState::at_end("ab");
        state.handle_key(KeyCode::Left, "ab");
        let v = state.handle_key(KeyCode::Enter, "ab").unwrap();
        assert_eq!(v, "a\nb");
        assert_eq!(state.cursor(), (1, 0));
    }

    #[test]
    fn test_backspace_joins_lines() {
        let mut state = TextAreaState::new();
        state.handle_key(KeyCode::Down, "one\ntwo");
        assert_eq!(state.cursor(), (1, 0));
        let v = state.handle_key(KeyCode::Backspace, "one\ntwo").unwrap();
        assert_eq!(v, "onetwo");
        assert_eq!(state.cursor(), (0, 3));
    }

    #[test]
    fn test_vertical_moves_clamp_column() {
        let mut state = TextAreaState::at_end("short\nmuch longer");
        state.handle_key(KeyCode::Up, "short\nmuch longer");
        assert_eq!(state.cursor(), (0, 5));
    }

    #[test]
    fn test_delete_at_end_of_last_line() {
        let mut state = TextAreaState::at_end("x");
        assert_eq!(state.handle_key(KeyCode::Delete, "x"), None);
    }

    #[test]
    fn test_first_visible_row() {
        assert_eq!(first_visible_row(1, 2), 0);
        assert_eq!(first_visible_row(4, 2), 3);
    }
}
