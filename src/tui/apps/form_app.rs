use crossterm::event::KeyCode;
use log::{debug, info, warn};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::form::{FormRenderer, SubmitOutcome, WidgetKind};
use crate::tui::widgets::{SelectEvent, SelectState, TextAreaState, TextInputState};
use crate::tui::{App, Command, Element, FocusId, LayoutConstraint, Subscription, Theme};

const SUBMIT_ID: &str = "submit";

fn field_id(index: usize) -> FocusId {
    FocusId::new(format!("field-{}", index))
}

pub struct FormApp;

/// What the form app is started with
pub struct FormParams {
    pub form: FormRenderer,
    pub submit_label: String,
}

/// Per-field editing state kept next to the engine's value
#[derive(Debug, Clone)]
pub enum WidgetState {
    Input(TextInputState),
    Area(TextAreaState),
    Select(SelectState),
}

impl WidgetState {
    fn for_value(widget: &WidgetKind, value: &str) -> Self {
        match widget {
            WidgetKind::Select { options } => {
                let selected = options.iter().position(|o| o == value).unwrap_or(0);
                WidgetState::Select(SelectState::new(options.len(), selected))
            }
            WidgetKind::TextArea { .. } => WidgetState::Area(TextAreaState::at_end(value)),
            WidgetKind::Input { .. } => WidgetState::Input(TextInputState::at_end(value)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Field(usize),
    Submit,
}

pub struct State {
    form: FormRenderer,
    widgets: Vec<WidgetState>,
    focus: FocusTarget,
    submit_label: String,
    /// Scroll the submitted values into view until focus moves again
    reveal_values: bool,
    /// Error count of the last rejected submission
    last_rejected: Option<usize>,
}

impl State {
    pub fn new(form: FormRenderer, submit_label: impl Into<String>) -> Self {
        let widgets = Self::widget_states(&form);
        let focus = if form.is_empty() { FocusTarget::Submit } else { FocusTarget::Field(0) };
        Self {
            form,
            widgets,
            focus,
            submit_label: submit_label.into(),
            reveal_values: false,
            last_rejected: None,
        }
    }

    fn widget_states(form: &FormRenderer) -> Vec<WidgetState> {
        form.instructions()
            .iter()
            .enumerate()
            .map(|(i, instruction)| {
                WidgetState::for_value(&instruction.widget, form.value(i).unwrap_or_default())
            })
            .collect()
    }

    pub fn form(&self) -> &FormRenderer {
        &self.form
    }

    pub fn focus(&self) -> FocusTarget {
        self.focus
    }

    pub fn last_rejected(&self) -> Option<usize> {
        self.last_rejected
    }

    fn targets(&self) -> Vec<FocusTarget> {
        (0..self.form.len())
            .map(FocusTarget::Field)
            .chain(std::iter::once(FocusTarget::Submit))
            .collect()
    }

    fn move_focus(&mut self, forward: bool) -> Command {
        let targets = self.targets();
        let current = targets.iter().position(|t| *t == self.focus).unwrap_or(0);
        let next = if forward {
            (current + 1) % targets.len()
        } else if current == 0 {
            targets.len() - 1
        } else {
            current - 1
        };
        self.set_focus(targets[next])
    }

    fn set_focus(&mut self, target: FocusTarget) -> Command {
        self.focus = target;
        self.reveal_values = false;
        Command::SetFocus(focus_id(target))
    }

    fn edit_field(&mut self, index: usize, key: KeyCode) {
        let Some(instruction) = self.form.instruction(index) else {
            return;
        };
        if let KeyCode::Char(c) = key {
            if !instruction.widget.accepts_char(c) {
                debug!("Field {} rejected character {:?}", instruction.key, c);
                return;
            }
        }

        let current = self.form.value(index).unwrap_or_default().to_string();
        let changed = match self.widgets.get_mut(index) {
            Some(WidgetState::Input(input)) => input.handle_key(key, &current),
            Some(WidgetState::Area(area)) => area.handle_key(key, &current),
            _ => None,
        };
        if let Some(value) = changed {
            if let Err(err) = self.form.set_value(index, value) {
                warn!("Edit dropped: {:#}", err);
            }
        }
    }

    fn select_event(&mut self, index: usize, event: SelectEvent) {
        let Some(WidgetState::Select(select)) = self.widgets.get_mut(index) else {
            return;
        };
        let Some(chosen) = select.handle_event(event) else {
            return;
        };
        let option = match self.form.instruction(index).map(|i| &i.widget) {
            Some(WidgetKind::Select { options }) => options.get(chosen).cloned(),
            _ => None,
        };
        if let Some(option) = option {
            if let Err(err) = self.form.set_value(index, option) {
                warn!("Selection dropped: {:#}", err);
            }
        }
    }

    fn submit(&mut self) -> Command {
        match self.form.submit() {
            SubmitOutcome::Accepted(values) => {
                info!("Form submitted with {} values", values.len());
                self.last_rejected = None;
                self.reveal_values = true;
                Command::None
            }
            SubmitOutcome::Rejected(errors) => {
                info!("Submission rejected: {} invalid fields", errors.len());
                self.last_rejected = Some(errors.len());
                // Move to the first field that failed
                let first_invalid = (0..self.form.len()).find(|i| self.form.error(*i).is_some());
                match first_invalid {
                    Some(index) => self.set_focus(FocusTarget::Field(index)),
                    None => Command::None,
                }
            }
        }
    }

    fn reset(&mut self) {
        self.form.reset();
        self.widgets = Self::widget_states(&self.form);
        self.last_rejected = None;
        self.reveal_values = false;
    }
}

fn focus_id(target: FocusTarget) -> FocusId {
    match target {
        FocusTarget::Field(index) => field_id(index),
        FocusTarget::Submit => FocusId::from(SUBMIT_ID),
    }
}

#[derive(Debug, Clone)]
pub enum Msg {
    InputKey(usize, KeyCode),
    SelectEvent(usize, SelectEvent),
    Focused(FocusTarget),
    Blurred(usize),
    FocusNext,
    FocusPrev,
    Submit,
    Reset,
    Quit,
}

impl App for FormApp {
    type State = State;
    type Msg = Msg;
    type InitParams = FormParams;

    fn init(params: FormParams) -> (State, Command) {
        let state = State::new(params.form, params.submit_label);
        let command = Command::SetFocus(focus_id(state.focus));
        (state, command)
    }

    fn update(state: &mut State, msg: Msg) -> Command {
        match msg {
            Msg::InputKey(index, key) => {
                state.edit_field(index, key);
                Command::None
            }
            Msg::SelectEvent(index, event) => {
                state.select_event(index, event);
                Command::None
            }
            Msg::Focused(target) => {
                if state.focus != target {
                    state.focus = target;
                    state.reveal_values = false;
                }
                Command::None
            }
            Msg::Blurred(index) => {
                if let Some(WidgetState::Select(select)) = state.widgets.get_mut(index) {
                    select.close();
                }
                state.form.blur(index);
                Command::None
            }
            Msg::FocusNext => state.move_focus(true),
            Msg::FocusPrev => state.move_focus(false),
            Msg::Submit => state.submit(),
            Msg::Reset => {
                state.reset();
                Command::None
            }
            Msg::Quit => Command::Quit,
        }
    }

    fn view(state: &mut State, theme: &Theme) -> Element<Msg> {
        let mut items: Vec<Element<Msg>> = Vec::new();

        if state.form.is_empty() {
            items.push(Element::styled_text("This form has no fields", theme.placeholder_style()));
        }
        for index in 0..state.form.len() {
            items.push(field_block(state, index, theme));
        }

        items.push(
            Element::button(SUBMIT_ID, state.submit_label.clone())
                .on_press(Msg::Submit)
                .on_focus(Msg::Focused(FocusTarget::Submit))
                .build(),
        );

        let has_values = state.form.submitted().is_some();
        if let Some(values) = state.form.submitted() {
            let mut lines = values.display_lines().into_iter();
            let mut column = Element::column(vec![]);
            if let Some(heading) = lines.next() {
                column = column.add(
                    Element::styled_text(
                        heading,
                        theme.success_style().add_modifier(Modifier::BOLD),
                    ),
                    LayoutConstraint::Length(1),
                );
            }
            for line in lines {
                column = column.add(Element::text(line), LayoutConstraint::Length(1));
            }
            items.push(Element::text(""));
            items.push(column.build());
        }

        let offset = usize::from(state.form.is_empty());
        let anchor = if state.reveal_values && has_values {
            items.len() - 1
        } else {
            match state.focus {
                FocusTarget::Field(index) => index + offset,
                FocusTarget::Submit => state.form.len() + offset,
            }
        };

        let title = state.form.title().unwrap_or("Form").to_string();
        Element::panel(Element::container(Element::scroll(items, anchor), 1))
            .title(title)
            .build()
    }

    fn subscriptions(_state: &State) -> Vec<Subscription<Msg>> {
        vec![
            Subscription::keyboard(KeyCode::Tab, "next", Msg::FocusNext),
            Subscription::keyboard(KeyCode::BackTab, "prev", Msg::FocusPrev),
            Subscription::ctrl_key(KeyCode::Char('s'), "submit", Msg::Submit),
            Subscription::ctrl_key(KeyCode::Char('r'), "reset", Msg::Reset),
            Subscription::keyboard(KeyCode::Esc, "quit", Msg::Quit),
            Subscription::ctrl_key(KeyCode::Char('q'), "quit", Msg::Quit),
        ]
    }

    fn title() -> &'static str {
        "Form"
    }

    fn status(state: &State, theme: &Theme) -> Option<Line<'static>> {
        let text = if let Some(count) = state.last_rejected {
            let noun = if count == 1 { "field needs" } else { "fields need" };
            Span::styled(format!("✗ {} {} attention", count, noun), theme.error_style())
        } else if state.form.submitted().is_some() {
            Span::styled("✓ Submitted", theme.success_style())
        } else {
            Span::styled(
                format!("{} fields", state.form.len()),
                Style::default().fg(theme.text_tertiary),
            )
        };
        Some(Line::from(text))
    }
}

/// Caption, widget and error lines for one field, followed by a gap
fn field_block(state: &State, index: usize, theme: &Theme) -> Element<Msg> {
    let Some(instruction) = state.form.instruction(index) else {
        return Element::None;
    };
    let value = state.form.value(index).unwrap_or_default().to_string();
    let messages = state.form.messages_for(index);
    let invalid = !messages.is_empty();

    let mut caption = vec![Span::styled(instruction.caption(), theme.label_style())];
    if instruction.constraints.is_required() {
        caption.push(Span::styled(" *", theme.error_style()));
    }

    let widget = match (&instruction.widget, state.widgets.get(index)) {
        (WidgetKind::Select { options }, Some(WidgetState::Select(select))) => {
            Element::select(field_id(index), options.clone())
                .selected(select.selected())
                .open(select.is_open())
                .highlight(select.highlighted())
                .invalid(invalid)
                .on_event(move |event| Msg::SelectEvent(index, event))
                .on_focus(Msg::Focused(FocusTarget::Field(index)))
                .on_blur(Msg::Blurred(index))
                .build()
        }
        (WidgetKind::TextArea { rows }, Some(WidgetState::Area(area))) => {
            Element::text_area(field_id(index), value, area.cursor(), *rows)
                .invalid(invalid)
                .on_change(move |key| Msg::InputKey(index, key))
                .on_focus(Msg::Focused(FocusTarget::Field(index)))
                .on_blur(Msg::Blurred(index))
                .build()
        }
        (WidgetKind::Input { input_type }, Some(WidgetState::Input(input))) => {
            let mut builder = Element::text_input(field_id(index), value, input.cursor_pos())
                .invalid(invalid)
                .on_change(move |key| Msg::InputKey(index, key))
                .on_submit(Msg::Submit)
                .on_focus(Msg::Focused(FocusTarget::Field(index)))
                .on_blur(Msg::Blurred(index));
            if input_type != "text" {
                builder = builder.placeholder(input_type.clone());
            }
            builder.build()
        }
        _ => Element::None,
    };

    let mut column = Element::column(vec![Element::line(Line::from(caption)), widget]);
    for message in messages {
        column = column.add(
            Element::styled_text(message, theme.error_style()),
            LayoutConstraint::Length(1),
        );
    }
    column.add(Element::text(""), LayoutConstraint::Length(1)).build()
}
