use ratatui::text::Line;

use crate::tui::{Command, Element, Subscription, Theme};

/// The main trait that all TUI apps implement.
///
/// This follows the Elm architecture:
/// - State: data that represents the app's current state
/// - Msg: events/actions that can happen
/// - update: handles messages and returns commands
/// - view: renders the current state
/// - subscriptions: declares what inputs the app wants to receive
pub trait App: Sized + 'static {
    /// The app's state type
    type State;

    /// The app's message type
    type Msg: Clone + Send + 'static;

    /// Parameters the app is started with
    type InitParams;

    /// Build the initial state and the command to run first
    fn init(params: Self::InitParams) -> (Self::State, Command);

    /// Update the state based on a message and return a command
    fn update(state: &mut Self::State, msg: Self::Msg) -> Command;

    /// Render the current state to UI elements
    fn view(state: &mut Self::State, theme: &Theme) -> Element<Self::Msg>;

    /// Declare what inputs this app wants to receive
    fn subscriptions(state: &Self::State) -> Vec<Subscription<Self::Msg>>;

    /// Return the app's title
    fn title() -> &'static str;

    /// Return optional status text (dynamic, styled based on state)
    fn status(_state: &Self::State, _theme: &Theme) -> Option<Line<'static>> {
        None
    }
}
