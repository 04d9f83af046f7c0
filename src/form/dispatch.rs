use super::descriptor::{FieldDescriptor, FieldKey, FieldType, ValidationPattern, format_number};

/// Message attached to `required` constraints
pub const REQUIRED_MESSAGE: &str = "Field is required";

/// Visual height of multi-line text areas unless configured otherwise
pub const DEFAULT_TEXTAREA_ROWS: u16 = 2;

/// Which widget a field renders as
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetKind {
    /// Selection list populated with the descriptor's options in order
    Select { options: Vec<String> },
    /// Multi-line text area with a fixed visual height
    TextArea { rows: u16 },
    /// Generic single-value input whose native kind is the descriptor's type
    Input { input_type: String },
}

impl WidgetKind {
    pub fn name(&self) -> &str {
        match self {
            WidgetKind::Select { .. } => "select",
            WidgetKind::TextArea { .. } => "textarea",
            WidgetKind::Input { input_type } => input_type,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, WidgetKind::Input { input_type } if input_type == "number")
    }

    /// Numeric inputs only take characters that can form a number
    pub fn accepts_char(&self, c: char) -> bool {
        match self {
            WidgetKind::Select { .. } => false,
            WidgetKind::Input { .. } if self.is_numeric() => {
                c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')
            }
            _ => true,
        }
    }
}

/// Validation rules handed to the form-state engine for one field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constraints {
    /// Present (with its message) when the field is mandatory
    pub required: Option<String>,
    pub pattern: Option<ValidationPattern>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Constraints {
    /// Full constraint set for text areas and generic inputs.
    ///
    /// Any of validation/min/max makes the field mandatory, so a field
    /// that only sets `max_value` cannot be left empty.
    pub fn for_descriptor(descriptor: &FieldDescriptor) -> Self {
        Self {
            required: descriptor
                .has_constraints()
                .then(|| REQUIRED_MESSAGE.to_string()),
            pattern: descriptor.validation.clone(),
            min: descriptor.min_value,
            max: descriptor.max_value,
        }
    }

    /// Selection widgets only get the pattern check
    pub fn pattern_only(descriptor: &FieldDescriptor) -> Self {
        Self {
            pattern: descriptor.validation.clone(),
            ..Default::default()
        }
    }

    pub fn is_required(&self) -> bool {
        self.required.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.required.is_none()
            && self.pattern.is_none()
            && self.min.is_none()
            && self.max.is_none()
    }

    /// Short human-readable list, e.g. `required, pattern ^a, min 1, max 10`
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.required.is_some() {
            parts.push("required".to_string());
        }
        if let Some(pattern) = &self.pattern {
            parts.push(format!("pattern {}", pattern));
        }
        if let Some(min) = self.min {
            parts.push(format!("min {}", format_number(min)));
        }
        if let Some(max) = self.max {
            parts.push(format!("max {}", format_number(max)));
        }

        if parts.is_empty() {
            "optional".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Everything needed to draw and register one field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldInstruction {
    pub key: FieldKey,
    pub index: usize,
    pub label: Option<String>,
    pub widget: WidgetKind,
    /// Initial content; for selects this is always one of the options
    /// (or empty when there are none)
    pub initial: String,
    pub constraints: Constraints,
}

impl FieldInstruction {
    /// Index of the initial option for select widgets
    pub fn initial_option(&self) -> Option<usize> {
        match &self.widget {
            WidgetKind::Select { options } => options.iter().position(|opt| opt == &self.initial),
            _ => None,
        }
    }

    /// Caption shown above the widget
    pub fn caption(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => format!("Field {} ({})", self.key, self.widget.name()),
        }
    }
}

/// Maps descriptors to widgets and constraint sets
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher {
    textarea_rows: u16,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(DEFAULT_TEXTAREA_ROWS)
    }
}

impl Dispatcher {
    pub fn new(textarea_rows: u16) -> Self {
        Self {
            textarea_rows: textarea_rows.max(1),
        }
    }

    pub fn dispatch(&self, descriptor: &FieldDescriptor, index: usize) -> FieldInstruction {
        let key = descriptor.key(index);
        let initial = descriptor.initial_text();

        let (widget, initial, constraints) = match &descriptor.field_type {
            FieldType::Dropdown => {
                let options = descriptor.option_texts();
                // Fall back to the first option when the configured default is not offered
                let selected = initial
                    .filter(|value| options.contains(value))
                    .or_else(|| options.first().cloned())
                    .unwrap_or_default();
                (
                    WidgetKind::Select { options },
                    selected,
                    Constraints::pattern_only(descriptor),
                )
            }
            FieldType::LongText => (
                WidgetKind::TextArea {
                    rows: self.textarea_rows,
                },
                initial.unwrap_or_default(),
                Constraints::for_descriptor(descriptor),
            ),
            other => (
                WidgetKind::Input {
                    input_type: other.as_str().to_string(),
                },
                initial.unwrap_or_default(),
                Constraints::for_descriptor(descriptor),
            ),
        };

        FieldInstruction {
            key,
            index,
            label: descriptor.label.clone(),
            widget,
            initial,
            constraints,
        }
    }

    pub fn dispatch_all(&self, descriptors: &[FieldDescriptor]) -> Vec<FieldInstruction> {
        descriptors
            .iter()
            .enumerate()
            .map(|(index, descriptor)| self.dispatch(descriptor, index))
            .collect()
    }
}
