use super::descriptor::{FieldDescriptor, format_number};
use super::dispatch::REQUIRED_MESSAGE;
use super::validation::{ErrorKind, FieldError};

/// Human-readable message for one field failure
pub fn error_message(descriptor: &FieldDescriptor, error: &FieldError) -> String {
    match error.kind {
        ErrorKind::Required => error
            .message
            .clone()
            .unwrap_or_else(|| REQUIRED_MESSAGE.to_string()),
        ErrorKind::Pattern => format!(
            "Invalid input (pattern {})",
            descriptor
                .validation
                .as_ref()
                .map(|p| p.source())
                .unwrap_or_default()
        ),
        ErrorKind::Min => format!(
            "Minimum value should be {}",
            descriptor.min_value.map(format_number).unwrap_or_default()
        ),
        ErrorKind::Max => format!(
            "Maximum value should be {}",
            descriptor.max_value.map(format_number).unwrap_or_default()
        ),
    }
}

/// Messages to show under a field; empty when it has no failure
pub fn field_messages(descriptor: &FieldDescriptor, error: Option<&FieldError>) -> Vec<String> {
    error
        .map(|error| vec![error_message(descriptor, error)])
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::descriptor::{FieldType, ValidationPattern};

    fn descriptor() -> FieldDescriptor {
        FieldDescriptor {
            field_type: FieldType::Number,
            validation: Some(ValidationPattern::new(r"^\d+$").unwrap()),
            min_value: Some(1.0),
            max_value: Some(10.5),
            ..Default::default()
        }
    }

    #[test]
    fn test_required_uses_engine_message() {
        let error = FieldError::with_message(ErrorKind::Required, "Please fill this in");
        assert_eq!(error_message(&descriptor(), &error), "Please fill this in");

        let error = FieldError::new(ErrorKind::Required);
        assert_eq!(error_message(&descriptor(), &error), REQUIRED_MESSAGE);
    }

    #[test]
    fn test_synthesized_messages() {
        let d = descriptor();
        assert_eq!(
            error_message(&d, &FieldError::new(ErrorKind::Pattern)),
            r"Invalid input (pattern ^\d+$)"
        );
        assert_eq!(
            error_message(&d, &FieldError::new(ErrorKind::Min)),
            "Minimum value should be 1"
        );
        assert_eq!(
            error_message(&d, &FieldError::new(ErrorKind::Max)),
            "Maximum value should be 10.5"
        );
    }

    #[test]
    fn test_no_error_no_messages() {
        assert!(field_messages(&descriptor(), None).is_empty());
        assert_eq!(
            field_messages(&descriptor(), Some(&FieldError::new(ErrorKind::Min))).len(),
            1
        );
    }
}
