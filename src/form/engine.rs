use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::descriptor::FieldKey;
use super::dispatch::Constraints;
use super::submission::FormValues;
use super::validation::{FieldError, ValidationErrors, validate_value};

/// When per-field validation runs before the first submit attempt.
///
/// After a submit attempt every edit re-validates the edited field,
/// regardless of mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    #[default]
    OnSubmit,
    OnBlur,
    OnChange,
    /// First blur, then every change
    OnTouched,
    /// Both change and blur
    All,
}

/// Opaque handle returned by [`FormEngine::register`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldHandle(usize);

impl FieldHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Notifications delivered to subscribers, synchronously
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    ValueChanged { key: FieldKey, value: String },
    Blurred { key: FieldKey },
    ErrorsChanged,
    Submitted(FormValues),
    SubmitRejected { error_count: usize },
}

pub type Listener = Box<dyn FnMut(&FormEvent) + Send>;

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Accepted(FormValues),
    Rejected(ValidationErrors),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted(_))
    }
}

struct RegisteredField {
    key: FieldKey,
    constraints: Constraints,
    initial: String,
    value: String,
    touched: bool,
}

/// Form-state store: tracks field values and errors, runs validation and
/// hands collected values to the submit callback
pub struct FormEngine {
    mode: ValidationMode,
    fields: Vec<RegisteredField>,
    errors: ValidationErrors,
    submit_count: u32,
    listeners: Vec<Listener>,
}

impl Default for FormEngine {
    fn default() -> Self {
        Self::new(ValidationMode::default())
    }
}

impl FormEngine {
    pub fn new(mode: ValidationMode) -> Self {
        Self {
            mode,
            fields: Vec::new(),
            errors: ValidationErrors::new(),
            submit_count: 0,
            listeners: Vec::new(),
        }
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Register a field. Registering an existing key again replaces its
    /// constraints and returns the original handle.
    pub fn register(
        &mut self,
        key: FieldKey,
        constraints: Constraints,
        initial: impl Into<String>,
    ) -> FieldHandle {
        if let Some(handle) = self.handle(&key) {
            debug!("Field '{}' re-registered, updating constraints", key);
            self.fields[handle.0].constraints = constraints;
            return handle;
        }

        let initial = initial.into();
        debug!("Registering field '{}' ({})", key, constraints.summary());
        self.fields.push(RegisteredField {
            key,
            constraints,
            value: initial.clone(),
            initial,
            touched: false,
        });
        FieldHandle(self.fields.len() - 1)
    }

    pub fn handle(&self, key: &FieldKey) -> Option<FieldHandle> {
        self.fields
            .iter()
            .position(|f| &f.key == key)
            .map(FieldHandle)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn key(&self, handle: FieldHandle) -> Option<&FieldKey> {
        self.fields.get(handle.0).map(|f| &f.key)
    }

    pub fn value(&self, handle: FieldHandle) -> Option<&str> {
        self.fields.get(handle.0).map(|f| f.value.as_str())
    }

    pub fn set_value(&mut self, handle: FieldHandle, value: impl Into<String>) {
        let value = value.into();
        let Some(field) = self.fields.get_mut(handle.0) else {
            warn!("set_value on unknown field handle {}", handle.0);
            return;
        };
        if field.value == value {
            return;
        }
        field.value = value.clone();
        let key = field.key.clone();
        let touched = field.touched;

        self.emit(&FormEvent::ValueChanged { key, value });

        let validate = self.is_submitted()
            || match self.mode {
                ValidationMode::OnChange | ValidationMode::All => true,
                ValidationMode::OnTouched => touched,
                ValidationMode::OnSubmit | ValidationMode::OnBlur => false,
            };
        if validate {
            self.validate_field(handle);
        }
    }

    /// Mark a field as left by the user
    pub fn blur(&mut self, handle: FieldHandle) {
        let Some(field) = self.fields.get_mut(handle.0) else {
            return;
        };
        field.touched = true;
        let key = field.key.clone();

        self.emit(&FormEvent::Blurred { key });

        if matches!(
            self.mode,
            ValidationMode::OnBlur | ValidationMode::OnTouched | ValidationMode::All
        ) {
            self.validate_field(handle);
        }
    }

    /// Validate one field and update the error map. Returns true if valid.
    pub fn validate_field(&mut self, handle: FieldHandle) -> bool {
        let Some(field) = self.fields.get(handle.0) else {
            return true;
        };
        let error = validate_value(&field.constraints, &field.value);
        let valid = error.is_none();
        let key = field.key.clone();

        if self.errors.set(&key, error) {
            self.emit(&FormEvent::ErrorsChanged);
        }
        valid
    }

    /// Validate every field. Returns true if all pass.
    pub fn trigger(&mut self) -> bool {
        let mut changed = false;
        for field in &self.fields {
            let error = validate_value(&field.constraints, &field.value);
            changed |= self.errors.set(&field.key, error);
        }
        if changed {
            self.emit(&FormEvent::ErrorsChanged);
        }
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn error(&self, key: &FieldKey) -> Option<&FieldError> {
        self.errors.get(key)
    }

    pub fn submit_count(&self) -> u32 {
        self.submit_count
    }

    pub fn is_submitted(&self) -> bool {
        self.submit_count > 0
    }

    /// Validate all fields and, if they pass, collect their values and
    /// hand them to `on_valid`. A rejected submit commits nothing.
    pub fn handle_submit<F>(&mut self, on_valid: F) -> SubmitOutcome
    where
        F: FnOnce(&FormValues),
    {
        self.submit_count += 1;

        if !self.trigger() {
            let error_count = self.errors.len();
            debug!("Submit #{} rejected with {} errors", self.submit_count, error_count);
            self.emit(&FormEvent::SubmitRejected { error_count });
            return SubmitOutcome::Rejected(self.errors.clone());
        }

        let values = FormValues::collect(self.fields.iter().map(|f| (&f.key, f.value.as_str())));
        debug!("Submit #{} accepted with {} values", self.submit_count, values.len());
        on_valid(&values);
        self.emit(&FormEvent::Submitted(values.clone()));
        SubmitOutcome::Accepted(values)
    }

    /// Restore initial values and clear errors and submit state
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value = field.initial.clone();
            field.touched = false;
        }
        self.submit_count = 0;
        if !self.errors.is_empty() {
            self.errors.clear();
            self.emit(&FormEvent::ErrorsChanged);
        }
    }

    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&FormEvent) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    fn emit(&mut self, event: &FormEvent) {
        for listener in &mut self.listeners {
            listener(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::dispatch::REQUIRED_MESSAGE;
    use crate::form::validation::ErrorKind;
    use std::sync::{Arc, Mutex};

    fn number_constraints() -> Constraints {
        Constraints {
            required: Some(REQUIRED_MESSAGE.to_string()),
            min: Some(1.0),
            max: Some(10.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_register_is_idempotent_per_key() {
        let mut engine = FormEngine::default();
        let a = engine.register(FieldKey::positional(0), Constraints::default(), "x");
        let b = engine.register(FieldKey::positional(0), number_constraints(), "ignored");
        assert_eq!(a, b);
        assert_eq!(engine.len(), 1);
        assert_eq!(engine.value(a), Some("x"));
    }

    #[test]
    fn test_on_submit_mode_defers_validation() {
        let mut engine = FormEngine::new(ValidationMode::OnSubmit);
        let h = engine.register(FieldKey::positional(0), number_constraints(), "");

        engine.set_value(h, "50");
        engine.blur(h);
        assert!(engine.errors().is_empty());

        let outcome = engine.handle_submit(|_| panic!("must not be called"));
        assert!(!outcome.is_accepted());
        assert_eq!(engine.error(&FieldKey::positional(0)).unwrap().kind, ErrorKind::Max);

        // After a submit attempt edits re-validate immediately
        engine.set_value(h, "5");
        assert!(engine.errors().is_empty());
    }

    #[test]
    fn test_on_change_mode() {
        let mut engine = FormEngine::new(ValidationMode::OnChange);
        let h = engine.register(FieldKey::positional(0), number_constraints(), "");
        engine.set_value(h, "0");
        assert_eq!(engine.error(&FieldKey::positional(0)).unwrap().kind, ErrorKind::Min);
    }

    #[test]
    fn test_on_blur_and_on_touched_modes() {
        let mut engine = FormEngine::new(ValidationMode::OnBlur);
        let h = engine.register(FieldKey::positional(0), number_constraints(), "");
        engine.set_value(h, "0");
        assert!(engine.errors().is_empty());
        engine.blur(h);
        assert!(!engine.errors().is_empty());

        let mut engine = FormEngine::new(ValidationMode::OnTouched);
        let h = engine.register(FieldKey::positional(0), number_constraints(), "");
        engine.set_value(h, "0");
        assert!(engine.errors().is_empty());
        engine.blur(h);
        assert!(!engine.errors().is_empty());
        engine.set_value(h, "3");
        assert!(engine.errors().is_empty());
    }

    #[test]
    fn test_submit_collects_in_registration_order() {
        let mut engine = FormEngine::default();
        let a = engine.register(FieldKey::named("b"), Constraints::default(), "");
        engine.register(FieldKey::named("a"), Constraints::default(), "second");
        engine.set_value(a, "first");

        let mut received = None;
        let outcome = engine.handle_submit(|values| received = Some(values.clone()));
        let received = received.unwrap();
        assert_eq!(received.values(), vec!["first", "second"]);
        assert_eq!(outcome, SubmitOutcome::Accepted(received));
        assert_eq!(engine.submit_count(), 1);
    }

    #[test]
    fn test_listeners_receive_events() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);

        let mut engine = FormEngine::default();
        engine.subscribe(move |event| sink.lock().unwrap().push(event.clone()));
        let h = engine.register(FieldKey::positional(0), number_constraints(), "");

        engine.handle_submit(|_| {});
        engine.set_value(h, "2");
        engine.handle_submit(|_| {});

        let events = events.lock().unwrap();
        assert!(matches!(events[0], FormEvent::ErrorsChanged));
        assert!(matches!(events[1], FormEvent::SubmitRejected { error_count: 1 }));
        assert!(matches!(events[2], FormEvent::ValueChanged { .. }));
        assert!(matches!(events[3], FormEvent::ErrorsChanged));
        assert!(matches!(events[4], FormEvent::Submitted(_)));
    }

    #[test]
    fn test_reset_restores_initial_values() {
        let mut engine = FormEngine::default();
        let h = engine.register(FieldKey::positional(0), number_constraints(), "4");
        engine.set_value(h, "40");
        engine.handle_submit(|_| {});
        assert!(!engine.errors().is_empty());

        engine.reset();
        assert_eq!(engine.value(h), Some("4"));
        assert!(engine.errors().is_empty());
        assert!(!engine.is_submitted());
    }
}
