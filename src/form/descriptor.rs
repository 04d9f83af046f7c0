use anyhow::{Context, Result};
use log::{debug, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

/// Widget discriminator taken from the descriptor's `type` tag.
///
/// Unknown tags are kept verbatim so they can be forwarded as the native
/// input kind of a generic widget.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    #[default]
    Text,
    LongText,
    Dropdown,
    Number,
    Other(String),
}

impl FieldType {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "text" => FieldType::Text,
            "longtext" => FieldType::LongText,
            "dropdown" => FieldType::Dropdown,
            "number" => FieldType::Number,
            other => FieldType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Text => "text",
            FieldType::LongText => "longtext",
            FieldType::Dropdown => "dropdown",
            FieldType::Number => "number",
            FieldType::Other(tag) => tag,
        }
    }
}

impl From<String> for FieldType {
    fn from(tag: String) -> Self {
        FieldType::from_tag(&tag)
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        field_type.as_str().to_string()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A primitive JSON value used for initial values and dropdown options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Number(n) => f.write_str(&format_number(*n)),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Number(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

/// Format a number the way it appears in form values and messages:
/// integral values carry no fractional part (`5`, not `5.0`).
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Avoid rendering negative zero as "-0"
        return "0".to_string();
    }
    value.to_string()
}

/// A compiled validation pattern together with the source it was built from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ValidationPattern {
    source: String,
    regex: Regex,
}

impl ValidationPattern {
    /// Compile a pattern from its source text
    pub fn new(source: impl Into<String>) -> Result<Self, regex::Error> {
        let source = source.into();
        let regex = Regex::new(&source)?;
        Ok(Self { source, regex })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Unanchored search: a match anywhere in the value passes
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

/// Already-compiled patterns are used as-is
impl From<Regex> for ValidationPattern {
    fn from(regex: Regex) -> Self {
        Self {
            source: regex.as_str().to_string(),
            regex,
        }
    }
}

/// Patterns from form files. The `regex` syntax has no lookaround or
/// backreferences, so the error says so alongside the parser's message.
impl TryFrom<String> for ValidationPattern {
    type Error = String;

    fn try_from(source: String) -> Result<Self, Self::Error> {
        Self::new(source.as_str()).map_err(|err| {
            format!(
                "invalid validation pattern '{}': {} \
                 (lookaround and backreferences are not supported)",
                source, err
            )
        })
    }
}

impl From<ValidationPattern> for String {
    fn from(pattern: ValidationPattern) -> Self {
        pattern.source
    }
}

impl PartialEq for ValidationPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl fmt::Display for ValidationPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Identity of a field for registration and error lookup
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldKey(String);

impl FieldKey {
    /// Key derived from the field's position in the descriptor list.
    /// Reordering the list changes these keys.
    pub fn positional(index: usize) -> Self {
        Self(index.to_string())
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

/// Static description of one form field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    #[serde(rename = "type")]
    pub field_type: FieldType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Scalar>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Scalar>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationPattern>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<Scalar>>,
}

impl FieldDescriptor {
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            ..Default::default()
        }
    }

    /// Explicit name when present, otherwise the positional index
    pub fn key(&self, index: usize) -> FieldKey {
        match &self.name {
            Some(name) => FieldKey::named(name.clone()),
            None => FieldKey::positional(index),
        }
    }

    /// `value` wins over `default_value` when both are present
    pub fn initial_value(&self) -> Option<&Scalar> {
        self.value.as_ref().or(self.default_value.as_ref())
    }

    pub fn initial_text(&self) -> Option<String> {
        self.initial_value().map(|v| v.to_string())
    }

    /// Dropdown options in their display form, in configuration order
    pub fn option_texts(&self) -> Vec<String> {
        self.options
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|opt| opt.to_string())
            .collect()
    }

    pub fn has_constraints(&self) -> bool {
        self.validation.is_some() || self.min_value.is_some() || self.max_value.is_some()
    }
}

/// Object form of a form file; the bare-array form carries no title
#[derive(Deserialize)]
struct FormObject {
    #[serde(default)]
    title: Option<String>,
    fields: Vec<FieldDescriptor>,
}

/// A loaded, read-only list of field descriptors
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormDocument {
    pub title: Option<String>,
    pub fields: Vec<FieldDescriptor>,
}

impl FormDocument {
    pub fn new(fields: Vec<FieldDescriptor>) -> Result<Self> {
        let document = Self {
            title: None,
            fields,
        };
        document.check_keys()?;
        Ok(document)
    }

    /// Parse a form from JSON: either a bare descriptor array or
    /// an object with `title` and `fields`
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(json).context("Form file is not valid JSON")?;

        let document = if value.is_array() {
            let fields = serde_json::from_value(value)
                .context("Failed to parse form field descriptors")?;
            Self {
                title: None,
                fields,
            }
        } else if value.is_object() {
            let form: FormObject = serde_json::from_value(value)
                .context("Failed to parse form field descriptors")?;
            Self {
                title: form.title,
                fields: form.fields,
            }
        } else {
            anyhow::bail!(
                "Form file must contain an array of fields or an object with a 'fields' array"
            );
        };

        document.check_keys()?;
        document.warn_degraded();
        Ok(document)
    }

    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading form from: {:?}", path);

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read form file: {:?}", path))?;

        let document = Self::from_json(&content)
            .with_context(|| format!("Invalid form file: {:?}", path))?;

        debug!("Loaded form with {} fields", document.fields.len());
        Ok(document)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> Vec<FieldKey> {
        self.fields
            .iter()
            .enumerate()
            .map(|(index, field)| field.key(index))
            .collect()
    }

    fn check_keys(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for (index, key) in self.keys().into_iter().enumerate() {
            if !seen.insert(key.clone()) {
                anyhow::bail!("Duplicate field key '{}' at position {}", key, index);
            }
        }
        Ok(())
    }

    fn warn_degraded(&self) {
        if self.fields.is_empty() {
            warn!("Form has no fields");
        }
        for (index, field) in self.fields.iter().enumerate() {
            let has_options = field.options.as_ref().is_some_and(|opts| !opts.is_empty());
            if field.field_type == FieldType::Dropdown && !has_options {
                warn!("Dropdown field {} has no options, rendering an empty list", index);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_array() {
        let json = r#"[
            {"type": "text", "default_value": "hello", "validation": "^h"},
            {"type": "number", "min_value": 1, "max_value": 10},
            {"type": "dropdown", "options": ["a", "b", 3], "value": "b"},
            {"type": "date"}
        ]"#;

        let form = FormDocument::from_json(json).unwrap();
        assert_eq!(form.len(), 4);
        assert_eq!(form.title, None);
        assert_eq!(form.fields[0].field_type, FieldType::Text);
        assert_eq!(form.fields[0].validation.as_ref().unwrap().source(), "^h");
        assert_eq!(form.fields[1].min_value, Some(1.0));
        assert_eq!(form.fields[2].option_texts(), vec!["a", "b", "3"]);
        assert_eq!(form.fields[3].field_type, FieldType::Other("date".to_string()));
    }

    #[test]
    fn test_parse_document_with_title() {
        let json = r#"{"title": "Signup", "fields": [{"type": "text", "name": "email"}]}"#;

        let form = FormDocument::from_json(json).unwrap();
        assert_eq!(form.title.as_deref(), Some("Signup"));
        assert_eq!(form.keys(), vec![FieldKey::named("email")]);
    }

    #[test]
    fn test_value_takes_precedence_over_default() {
        let field = FieldDescriptor {
            value: Some(Scalar::from("v")),
            default_value: Some(Scalar::from("d")),
            ..Default::default()
        };
        assert_eq!(field.initial_text().as_deref(), Some("v"));

        let field = FieldDescriptor {
            default_value: Some(Scalar::Number(42.0)),
            ..Default::default()
        };
        assert_eq!(field.initial_text().as_deref(), Some("42"));

        assert_eq!(FieldDescriptor::default().initial_text(), None);
    }

    #[test]
    fn test_scalar_formatting() {
        assert_eq!(Scalar::Number(5.0).to_string(), "5");
        assert_eq!(Scalar::Number(2.5).to_string(), "2.5");
        assert_eq!(Scalar::Number(-0.0).to_string(), "0");
        assert_eq!(Scalar::Bool(true).to_string(), "true");
        assert_eq!(Scalar::from("x").to_string(), "x");
    }

    #[test]
    fn test_positional_and_named_keys() {
        let mut field = FieldDescriptor::new(FieldType::Text);
        assert_eq!(field.key(3), FieldKey::positional(3));
        assert_eq!(field.key(3).as_str(), "3");

        field.name = Some("age".to_string());
        assert_eq!(field.key(3).as_str(), "age");
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let json = r#"[{"type": "text", "name": "a"}, {"type": "text", "name": "a"}]"#;
        let err = FormDocument::from_json(json).unwrap_err();
        assert!(err.to_string().contains("Duplicate field key 'a'"));

        // A name that collides with another field's position is also a duplicate
        let json = r#"[{"type": "text"}, {"type": "text", "name": "0"}]"#;
        assert!(FormDocument::from_json(json).is_err());
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let json = r#"[{"type": "text", "validation": "("}]"#;
        assert!(FormDocument::from_json(json).is_err());
    }

    #[test]
    fn test_lookahead_pattern_error_names_the_limitation() {
        let json = r#"[{"type": "text", "validation": "^(?=.*\\d).+$"}]"#;
        let err = format!("{:#}", FormDocument::from_json(json).unwrap_err());
        assert!(err.contains("lookaround"), "{}", err);
        assert!(err.contains("(?=.*\\d)"), "{}", err);
    }

    #[test]
    fn test_compiled_pattern_used_as_is() {
        let regex = Regex::new(r"^\d+$").unwrap();
        let pattern = ValidationPattern::from(regex);
        assert_eq!(pattern.source(), r"^\d+$");
        assert!(pattern.is_match("123"));
        assert!(!pattern.is_match("12a"));
    }

    #[test]
    fn test_dropdown_without_options_loads() {
        let form = FormDocument::from_json(r#"[{"type": "dropdown"}]"#).unwrap();
        assert!(form.fields[0].option_texts().is_empty());
    }
}
