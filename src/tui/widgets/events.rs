use crossterm::event::KeyCode;

/// Event type for Select widget
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectEvent {
    /// Toggle or navigation key (Enter/Space/Up/Down/Esc)
    Navigate(KeyCode),
    /// Option chosen directly by index
    Select(usize),
    /// Widget lost focus (close dropdown)
    Blur,
}
