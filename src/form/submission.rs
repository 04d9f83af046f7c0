use serde::ser::{Serialize, SerializeMap, Serializer};

use super::descriptor::FieldKey;

/// Heading shown above the submitted values list
pub const VALUES_HEADING: &str = "Form values:";

/// Values collected by a successful submit, in registration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    entries: Vec<(FieldKey, String)>,
}

impl FormValues {
    /// Collect values from `(key, value)` pairs, keeping their order
    pub fn collect<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (&'a FieldKey, &'a str)>,
    {
        Self {
            entries: fields
                .into_iter()
                .map(|(key, value)| (key.clone(), value.to_string()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldKey, &str)> {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// Values only, without keys, in field order
    pub fn values(&self) -> Vec<&str> {
        self.entries.iter().map(|(_, v)| v.as_str()).collect()
    }

    /// Lines of the submitted values display: the heading followed by
    /// one bulleted line per value
    pub fn display_lines(&self) -> Vec<String> {
        std::iter::once(VALUES_HEADING.to_string())
            .chain(self.entries.iter().map(|(_, v)| format!("• {}", v)))
            .collect()
    }
}

/// Serializes as a JSON object whose keys keep field order
impl Serialize for FormValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FormValues {
        let keys: Vec<FieldKey> = (0..12).map(FieldKey::positional).collect();
        let values: Vec<String> = (0..12).map(|i| format!("v{}", i)).collect();
        FormValues::collect(keys.iter().zip(values.iter().map(String::as_str)))
    }

    #[test]
    fn test_collect_keeps_order() {
        let values = sample();
        assert_eq!(values.len(), 12);
        assert_eq!(values.values()[0], "v0");
        assert_eq!(values.values()[11], "v11");
        assert_eq!(values.get("10"), Some("v10"));
        assert_eq!(values.get("12"), None);
    }

    #[test]
    fn test_json_preserves_field_order() {
        let json = serde_json::to_string(&sample()).unwrap();
        // "10" must not sort before "2"
        let two = json.find("\"2\"").unwrap();
        let ten = json.find("\"10\"").unwrap();
        assert!(two < ten);
    }

    #[test]
    fn test_display_lines() {
        let keys = [FieldKey::positional(0), FieldKey::positional(1)];
        let values = FormValues::collect(keys.iter().zip(["x", "y"]));
        assert_eq!(values.display_lines(), vec!["Form values:", "• x", "• y"]);
    }
}
