use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Field values entered for one form instance, keyed by field name.
///
/// A missing key and an empty value mean the same thing: setting a field
/// to the empty string removes its key, so two records that read the same
/// also compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, String>);

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `field`, or the empty string if it was never set.
    #[must_use]
    pub fn get(&self, field: &str) -> &str {
        self.0.get(field).map_or("", String::as_str)
    }

    #[must_use]
    pub fn is_filled(&self, field: &str) -> bool {
        !self.get(field).is_empty()
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        if value.is_empty() {
            self.0.remove(&field);
        } else {
            self.0.insert(field, value);
        }
    }

    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Drop every key for which `keep` returns false, returning the dropped keys.
    pub fn retain_fields(&mut self, mut keep: impl FnMut(&str) -> bool) -> Vec<String> {
        let dropped: Vec<String> = self.0.keys().filter(|k| !keep(k)).cloned().collect();
        for key in &dropped {
            self.0.remove(key);
        }
        dropped
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (k, v) in iter {
            record.set(k, v);
        }
        record
    }
}

/// Per-field error messages produced by validation.
///
/// Empty exactly when the validated record satisfies its schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationResult(BTreeMap<String, String>);

impl ValidationResult {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub(crate) fn clear_field(&mut self, field: &str) -> bool {
        self.0.remove(field).is_some()
    }
}

impl<'a> IntoIterator for &'a ValidationResult {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for ValidationResult
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_field_reads_empty() {
        let record = Record::new();
        assert_eq!(record.get("firstName"), "");
        assert!(!record.is_filled("firstName"));
    }

    #[test]
    fn test_set_empty_removes_key() {
        let mut record = Record::new().with("firstName", "Ann");
        assert!(record.is_filled("firstName"));

        record.set("firstName", "");
        assert!(record.is_empty());
        assert_eq!(record, Record::new());
    }

    #[test]
    fn test_record_from_iter() {
        let record: Record = [("firstName", "Ann"), ("lastName", "Lee"), ("age", "")]
            .into_iter()
            .collect();
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("lastName"), "Lee");
    }

    #[test]
    fn test_retain_fields_reports_dropped_keys() {
        let mut record = Record::new().with("street", "Main").with("color", "red");
        let dropped = record.retain_fields(|k| k == "street");
        assert_eq!(dropped, vec!["color".to_string()]);
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_record_serializes_as_flat_map() {
        let record = Record::new().with("firstName", "Ann");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"firstName":"Ann"}"#);
    }

    #[test]
    fn test_validation_result_clear_field() {
        let mut result: ValidationResult =
            [("lastName", "Last Name is required.")].into_iter().collect();
        assert!(!result.is_valid());
        assert!(result.clear_field("lastName"));
        assert!(!result.clear_field("lastName"));
        assert!(result.is_valid());
    }
}
