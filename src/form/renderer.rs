use anyhow::{Result, bail};
use log::{debug, info};

use super::descriptor::{FieldDescriptor, FieldKey, FormDocument};
use super::dispatch::{DEFAULT_TEXTAREA_ROWS, Dispatcher, FieldInstruction, WidgetKind};
use super::engine::{FieldHandle, FormEngine, FormEvent, SubmitOutcome, ValidationMode};
use super::presenter;
use super::submission::FormValues;
use super::validation::FieldError;

/// Knobs that shape how a form is dispatched and validated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub textarea_rows: u16,
    pub validation_mode: ValidationMode,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            textarea_rows: DEFAULT_TEXTAREA_ROWS,
            validation_mode: ValidationMode::default(),
        }
    }
}

/// One loaded form: its descriptors, the widget instruction for each,
/// the engine they are registered with and the last accepted values
pub struct FormRenderer {
    title: Option<String>,
    descriptors: Vec<FieldDescriptor>,
    instructions: Vec<FieldInstruction>,
    handles: Vec<FieldHandle>,
    engine: FormEngine,
    submitted: Option<FormValues>,
}

impl FormRenderer {
    pub fn new(document: FormDocument, options: RenderOptions) -> Self {
        let dispatcher = Dispatcher::new(options.textarea_rows);
        let instructions = dispatcher.dispatch_all(&document.fields);

        let mut engine = FormEngine::new(options.validation_mode);
        let handles = instructions
            .iter()
            .map(|i| engine.register(i.key.clone(), i.constraints.clone(), i.initial.clone()))
            .collect();

        info!(
            "Prepared form with {} fields (validation mode {:?})",
            instructions.len(),
            options.validation_mode
        );

        Self {
            title: document.title,
            descriptors: document.fields,
            instructions,
            handles,
            engine,
            submitted: None,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn instructions(&self) -> &[FieldInstruction] {
        &self.instructions
    }

    pub fn instruction(&self, index: usize) -> Option<&FieldInstruction> {
        self.instructions.get(index)
    }

    pub fn descriptor(&self, index: usize) -> Option<&FieldDescriptor> {
        self.descriptors.get(index)
    }

    pub fn engine(&self) -> &FormEngine {
        &self.engine
    }

    pub fn index_of(&self, key: &FieldKey) -> Option<usize> {
        self.instructions.iter().position(|i| &i.key == key)
    }

    pub fn value(&self, index: usize) -> Option<&str> {
        self.handles.get(index).and_then(|h| self.engine.value(*h))
    }

    /// Set the value of the field at `index`. A select only takes one
    /// of its options.
    pub fn set_value(&mut self, index: usize, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        let (Some(handle), Some(instruction)) =
            (self.handles.get(index), self.instructions.get(index))
        else {
            bail!("Form has no field at position {}", index);
        };
        if let WidgetKind::Select { options } = &instruction.widget {
            if !options.contains(&value) {
                bail!(
                    "'{}' is not an option of field '{}' (options: {})",
                    value,
                    instruction.key,
                    options.join(", ")
                );
            }
        }
        self.engine.set_value(*handle, value);
        Ok(())
    }

    /// Set a value by field key; unknown keys are an error
    pub fn set_value_by_key(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        let index = self
            .index_of(&FieldKey::from(key))
            .ok_or_else(|| anyhow::anyhow!("Form has no field with key '{}'", key))?;
        self.set_value(index, value)
    }

    pub fn blur(&mut self, index: usize) {
        if let Some(handle) = self.handles.get(index).copied() {
            self.engine.blur(handle);
        }
    }

    pub fn error(&self, index: usize) -> Option<&FieldError> {
        let instruction = self.instructions.get(index)?;
        self.engine.error(&instruction.key)
    }

    /// Error messages to render under the field at `index`
    pub fn messages_for(&self, index: usize) -> Vec<String> {
        match self.descriptors.get(index) {
            Some(descriptor) => presenter::field_messages(descriptor, self.error(index)),
            None => Vec::new(),
        }
    }

    /// Submit the form. On success the accepted values replace the
    /// previously submitted ones; on failure they stay untouched.
    pub fn submit(&mut self) -> SubmitOutcome {
        let mut accepted = None;
        let outcome = self
            .engine
            .handle_submit(|values| accepted = Some(values.clone()));

        if let Some(values) = accepted {
            self.submitted = Some(values);
        }
        debug!("Submit outcome accepted={}", outcome.is_accepted());
        outcome
    }

    pub fn submitted(&self) -> Option<&FormValues> {
        self.submitted.as_ref()
    }

    /// Restore initial values and clear errors; the last submitted
    /// values remain on display
    pub fn reset(&mut self) {
        self.engine.reset();
    }

    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&FormEvent) + Send + 'static,
    {
        self.engine.subscribe(listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::validation::ErrorKind;

    fn renderer(json: &str) -> FormRenderer {
        FormRenderer::new(FormDocument::from_json(json).unwrap(), RenderOptions::default())
    }

    #[test]
    fn test_number_range_scenario() {
        let mut form = renderer(
            r#"[
                {"type": "text"},
                {"type": "text"},
                {"type": "number", "min_value": 1, "max_value": 10}
            ]"#,
        );

        form.set_value(2, "15").unwrap();
        assert!(!form.submit().is_accepted());
        assert_eq!(form.error(2).unwrap().kind, ErrorKind::Max);
        assert_eq!(form.messages_for(2), vec!["Maximum value should be 10"]);
        assert!(form.submitted().is_none());

        form.set_value(2, "5").unwrap();
        assert!(form.submit().is_accepted());
        assert_eq!(form.submitted().unwrap().get("2"), Some("5"));
        assert!(form.messages_for(2).is_empty());
    }

    #[test]
    fn test_rejected_submit_keeps_previous_values() {
        let mut form = renderer(r#"[{"type": "number", "max_value": 3}]"#);
        form.set_value(0, "2").unwrap();
        assert!(form.submit().is_accepted());

        form.set_value(0, "9").unwrap();
        assert!(!form.submit().is_accepted());
        assert_eq!(form.submitted().unwrap().get("0"), Some("2"));
    }

    #[test]
    fn test_set_value_by_key() {
        let mut form = renderer(r#"[{"type": "text", "name": "email"}]"#);
        form.set_value_by_key("email", "a@b.c").unwrap();
        assert_eq!(form.value(0), Some("a@b.c"));
        assert!(form.set_value_by_key("missing", "x").is_err());
    }

    #[test]
    fn test_reset_keeps_submitted_values() {
        let mut form = renderer(r#"[{"type": "text", "default_value": "init"}]"#);
        form.set_value(0, "changed").unwrap();
        form.submit();
        form.reset();
        assert_eq!(form.value(0), Some("init"));
        assert_eq!(form.submitted().unwrap().get("0"), Some("changed"));
    }

    #[test]
    fn test_select_only_takes_its_options() {
        let mut form = renderer(r#"[{"type": "dropdown", "name": "size", "options": ["a", "b"]}]"#);
        form.set_value(0, "b").unwrap();

        let err = form.set_value(0, "zzz").unwrap_err().to_string();
        assert!(err.contains("size"), "{}", err);
        assert!(err.contains("a, b"), "{}", err);
        assert!(form.set_value_by_key("size", "zzz").is_err());
        assert!(form.set_value(3, "a").is_err());

        let SubmitOutcome::Accepted(values) = form.submit() else {
            panic!("a listed option should submit");
        };
        assert_eq!(values.get("size"), Some("b"));
    }
}
