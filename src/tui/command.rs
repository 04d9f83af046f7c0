use crate::tui::element::FocusId;

/// Result of offering a key to the focused widget
pub enum DispatchTarget<Msg> {
    /// The widget produced a message for update()
    AppMsg(Msg),

    /// Not handled here, try the keyboard subscriptions
    PassThrough,
}

/// Commands represent side effects that apps want to perform.
/// They are returned from update() and executed by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Do nothing
    None,

    /// Move keyboard focus to a specific element
    SetFocus(FocusId),

    /// Quit the application
    Quit,
}
