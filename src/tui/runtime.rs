use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use log::debug;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use std::collections::HashMap;

use crate::tui::command::DispatchTarget;
use crate::tui::element::FocusId;
use crate::tui::renderer::FocusRegistry;
use crate::tui::{App, Command, KeyBinding, Renderer, Subscription, Theme};

/// The runtime owns one app, routes keys to it and executes its commands
pub struct Runtime<A: App> {
    /// Current app state
    state: A::State,

    theme: Theme,

    /// Focus registry filled by the last render
    focus_registry: FocusRegistry<A::Msg>,

    /// Currently focused element ID
    focused_id: Option<FocusId>,

    /// Keyboard subscriptions
    key_subscriptions: HashMap<KeyBinding, A::Msg>,

    /// Set once a command asked to quit
    quit_requested: bool,
}

impl<A: App> Runtime<A> {
    pub fn new(params: A::InitParams, theme: Theme) -> Result<Self> {
        let (state, init_command) = A::init(params);

        let mut runtime = Self {
            state,
            theme,
            focus_registry: FocusRegistry::new(),
            focused_id: None,
            key_subscriptions: HashMap::new(),
            quit_requested: false,
        };

        runtime.update_subscriptions();
        if !runtime.execute_command(init_command)? {
            runtime.quit_requested = true;
        }
        Ok(runtime)
    }

    /// Get keyboard bindings for the footer
    pub fn get_key_bindings(&self) -> Vec<(KeyBinding, String)> {
        A::subscriptions(&self.state)
            .into_iter()
            .map(|sub| match sub {
                Subscription::Keyboard { key, description, .. } => (key, description),
            })
            .collect()
    }

    pub fn get_title(&self) -> &'static str {
        A::title()
    }

    pub fn get_status(&self) -> Option<Line<'static>> {
        A::status(&self.state, &self.theme)
    }

    pub fn get_state(&self) -> &A::State {
        &self.state
    }

    pub fn is_quit_requested(&self) -> bool {
        self.quit_requested
    }

    fn update_subscriptions(&mut self) {
        self.key_subscriptions.clear();
        for sub in A::subscriptions(&self.state) {
            match sub {
                Subscription::Keyboard { key, msg, .. } => {
                    self.key_subscriptions.insert(key, msg);
                }
            }
        }
    }

    /// Feed a message to update() and run what it returns
    pub fn dispatch(&mut self, msg: A::Msg) -> Result<bool> {
        let command = A::update(&mut self.state, msg);
        let keep_running = self.execute_command(command)?;
        self.update_subscriptions();
        if !keep_running {
            self.quit_requested = true;
        }
        Ok(keep_running)
    }

    /// Handle a keyboard event. Returns false once the app wants to quit.
    pub fn handle_key(&mut self, key_event: KeyEvent) -> Result<bool> {
        if key_event.kind != KeyEventKind::Press {
            return Ok(true);
        }

        // The focused element gets the first look at the key
        let target = self
            .focused_id
            .as_ref()
            .and_then(|id| self.focus_registry.find(id))
            .map(|focusable| (focusable.on_key)(key_event));
        if let Some(DispatchTarget::AppMsg(msg)) = target {
            return self.dispatch(msg);
        }

        let binding = KeyBinding::from_event(&key_event);
        if let Some(msg) = self.key_subscriptions.get(&binding).cloned() {
            debug!("Key {} matched a subscription", binding);
            return self.dispatch(msg);
        }

        // Fallback focus traversal over what was rendered
        match key_event.code {
            KeyCode::Tab => self.focus_next()?,
            KeyCode::BackTab => self.focus_previous()?,
            _ => {}
        }
        Ok(!self.quit_requested)
    }

    /// Focus the next rendered element (Tab)
    pub fn focus_next(&mut self) -> Result<()> {
        if let Some(next_id) = self.focus_registry.next_focus(self.focused_id.as_ref()) {
            self.execute_command(Command::SetFocus(next_id))?;
        }
        Ok(())
    }

    /// Focus the previous rendered element (Shift-Tab)
    pub fn focus_previous(&mut self) -> Result<()> {
        if let Some(prev_id) = self.focus_registry.prev_focus(self.focused_id.as_ref()) {
            self.execute_command(Command::SetFocus(prev_id))?;
        }
        Ok(())
    }

    /// Run a command. Returns false when it asked to quit.
    fn execute_command(&mut self, command: Command) -> Result<bool> {
        match command {
            Command::None => Ok(true),

            Command::Quit => {
                self.quit_requested = true;
                Ok(false)
            }

            Command::SetFocus(id) => {
                if self.focused_id.as_ref() == Some(&id) {
                    return Ok(true);
                }
                debug!("Command::SetFocus({}) - current focus: {:?}", id, self.focused_id);

                // Blur the old element, then focus the new one
                if let Some(old_id) = self.focused_id.take() {
                    let on_blur = self.focus_registry.find(&old_id).and_then(|f| f.on_blur.clone());
                    if let Some(on_blur) = on_blur {
                        let cmd = A::update(&mut self.state, on_blur);
                        if !self.execute_command(cmd)? {
                            return Ok(false);
                        }
                    }
                }

                self.focused_id = Some(id.clone());
                let on_focus = self.focus_registry.find(&id).and_then(|f| f.on_focus.clone());
                if let Some(on_focus) = on_focus {
                    let cmd = A::update(&mut self.state, on_focus);
                    return self.execute_command(cmd);
                }
                Ok(true)
            }
        }
    }

    /// Render the app with a title bar and a key hint footer
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Style::default().bg(self.theme.bg_base)), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
            .split(area);

        self.render_header(frame, chunks[0]);
        self.render_to_area(frame, chunks[1]);
        self.render_footer(frame, chunks[2]);
    }

    /// Render the app's view into `area`
    pub fn render_to_area(&mut self, frame: &mut Frame, area: Rect) {
        self.focus_registry.clear();

        let view = A::view(&mut self.state, &self.theme);
        Renderer::render(
            frame,
            &self.theme,
            &mut self.focus_registry,
            self.focused_id.as_ref(),
            &view,
            area,
        );

        // Nothing focused yet: take the first focusable element
        if self.focused_id.is_none() {
            self.focused_id = self.focus_registry.next_focus(None);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            format!(" {} ", self.get_title()),
            Style::default().fg(self.theme.bg_base).bg(self.theme.accent_primary),
        )];
        if let Some(status) = self.get_status() {
            spans.push(Span::raw("  "));
            spans.extend(status.spans);
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let key_style = Style::default().fg(self.theme.accent_muted);
        let desc_style = Style::default().fg(self.theme.text_tertiary);

        let mut spans = vec![Span::raw(" ")];
        for (i, (key, description)) in self.get_key_bindings().into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", desc_style));
            }
            spans.push(Span::styled(key.to_string(), key_style));
            spans.push(Span::styled(format!(" {}", description), desc_style));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
