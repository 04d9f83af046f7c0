use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::descriptor::FieldKey;
use super::dispatch::Constraints;

/// The four ways a field can fail validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Required,
    Pattern,
    Min,
    Max,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Required => "required",
            ErrorKind::Pattern => "pattern",
            ErrorKind::Min => "min",
            ErrorKind::Max => "max",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field failure as reported by the engine.
///
/// Only `required` failures carry an engine-supplied message; the other
/// kinds are phrased by the error presenter from the descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub kind: ErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FieldError {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    pub fn with_message(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: Some(message.into()),
        }
    }
}

/// Current per-field failures, keyed by field identity
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    entries: BTreeMap<FieldKey, FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &FieldKey) -> Option<&FieldError> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &FieldKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldKey, &FieldError)> {
        self.entries.iter()
    }

    /// Store or clear the failure for one field.
    /// Returns true when the stored state changed.
    pub(crate) fn set(&mut self, key: &FieldKey, error: Option<FieldError>) -> bool {
        match error {
            Some(error) => {
                if self.entries.get(key) == Some(&error) {
                    return false;
                }
                self.entries.insert(key.clone(), error);
                true
            }
            None => self.entries.remove(key).is_some(),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Evaluate one value against a constraint set.
///
/// Checks run in a fixed order and the first failure wins:
/// required, then min/max for numeric values, then pattern.
/// Empty values only ever fail `required`.
pub fn validate_value(constraints: &Constraints, value: &str) -> Option<FieldError> {
    if value.is_empty() {
        return constraints
            .required
            .as_ref()
            .map(|message| FieldError::with_message(ErrorKind::Required, message.clone()));
    }

    // NaN compares false both ways, so non-numeric input skips range checks
    let number = coerce_number(value);
    if let Some(min) = constraints.min {
        if number < min {
            return Some(FieldError::new(ErrorKind::Min));
        }
    }
    if let Some(max) = constraints.max {
        if number > max {
            return Some(FieldError::new(ErrorKind::Max));
        }
    }

    if let Some(pattern) = &constraints.pattern {
        if !pattern.is_match(value) {
            return Some(FieldError::new(ErrorKind::Pattern));
        }
    }

    None
}

/// Numeric reading of a field value, NaN when it is not a number.
///
/// Follows browser form coercion: surrounding whitespace is ignored and
/// blank text reads as 0, `0x`/`0o`/`0b` prefixes are integers, and only
/// the spelled-out `Infinity` is infinite (`inf` and `nan` are not numbers).
pub fn coerce_number(value: &str) -> f64 {
    let text = value.trim();
    if text.is_empty() {
        return 0.0;
    }

    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match text.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &text[2..];
        if digits.is_empty() {
            return f64::NAN;
        }
        return digits
            .chars()
            .try_fold(0.0, |acc, c| c.to_digit(radix).map(|d| acc * radix as f64 + d as f64))
            .unwrap_or(f64::NAN);
    }

    // Decimal literals only; rules out the `inf`/`nan` spellings f64 parsing takes
    if !text.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-')) {
        return f64::NAN;
    }
    text.parse::<f64>().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::descriptor::ValidationPattern;
    use crate::form::dispatch::REQUIRED_MESSAGE;

    fn constraints(pattern: Option<&str>, min: Option<f64>, max: Option<f64>) -> Constraints {
        Constraints {
            required: Some(REQUIRED_MESSAGE.to_string()),
            pattern: pattern.map(|p| ValidationPattern::new(p).unwrap()),
            min,
            max,
        }
    }

    #[test]
    fn test_empty_value_fails_required_only() {
        let c = constraints(Some("^a"), Some(1.0), None);
        let err = validate_value(&c, "").unwrap();
        assert_eq!(err.kind, ErrorKind::Required);
        assert_eq!(err.message.as_deref(), Some(REQUIRED_MESSAGE));

        assert_eq!(validate_value(&Constraints::default(), ""), None);
    }

    #[test]
    fn test_range_checks() {
        let c = constraints(None, Some(1.0), Some(10.0));
        assert_eq!(validate_value(&c, "0").unwrap().kind, ErrorKind::Min);
        assert_eq!(validate_value(&c, "15").unwrap().kind, ErrorKind::Max);
        assert_eq!(validate_value(&c, "5"), None);
        assert_eq!(validate_value(&c, "10"), None);
        assert_eq!(validate_value(&c, " 11 ").unwrap().kind, ErrorKind::Max);
    }

    #[test]
    fn test_non_numeric_skips_range() {
        let c = constraints(None, Some(1.0), Some(10.0));
        assert_eq!(validate_value(&c, "abc"), None);
    }

    #[test]
    fn test_numeric_coercion_edges() {
        let c = constraints(None, Some(1.0), Some(10.0));
        // Blank text reads as 0
        assert_eq!(validate_value(&c, " ").unwrap().kind, ErrorKind::Min);
        // Hex is a number; `inf` is not
        assert_eq!(validate_value(&c, "0x10").unwrap().kind, ErrorKind::Max);
        assert_eq!(validate_value(&c, "inf"), None);
        assert_eq!(validate_value(&c, "nan"), None);
        assert_eq!(validate_value(&c, "Infinity").unwrap().kind, ErrorKind::Max);
        assert_eq!(validate_value(&c, " 5 "), None);
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(""), 0.0);
        assert_eq!(coerce_number("0b101"), 5.0);
        assert_eq!(coerce_number("0o17"), 15.0);
        assert_eq!(coerce_number("-.5"), -0.5);
        assert_eq!(coerce_number("1e3"), 1000.0);
        assert_eq!(coerce_number("-Infinity"), f64::NEG_INFINITY);
        assert!(coerce_number("0x").is_nan());
        assert!(coerce_number("-0x10").is_nan());
        assert!(coerce_number("infinity").is_nan());
        assert!(coerce_number("12abc").is_nan());
    }

    #[test]
    fn test_range_checked_before_pattern() {
        let c = constraints(Some("^x"), None, Some(10.0));
        assert_eq!(validate_value(&c, "50").unwrap().kind, ErrorKind::Max);
        assert_eq!(validate_value(&c, "5").unwrap().kind, ErrorKind::Pattern);
    }

    #[test]
    fn test_pattern_is_unanchored_search() {
        let c = constraints(Some("[0-9]"), None, None);
        assert_eq!(validate_value(&c, "abc1def"), None);
        assert_eq!(validate_value(&c, "abcdef").unwrap().kind, ErrorKind::Pattern);
    }

    #[test]
    fn test_errors_set_reports_changes() {
        let key = FieldKey::positional(0);
        let mut errors = ValidationErrors::new();

        assert!(errors.set(&key, Some(FieldError::new(ErrorKind::Min))));
        assert!(!errors.set(&key, Some(FieldError::new(ErrorKind::Min))));
        assert!(errors.set(&key, Some(FieldError::new(ErrorKind::Max))));
        assert_eq!(errors.get(&key).unwrap().kind, ErrorKind::Max);
        assert!(errors.set(&key, None));
        assert!(!errors.set(&key, None));
        assert!(errors.is_empty());
    }
}
