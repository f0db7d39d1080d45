//! The outcome of running a validation suite.

use std::collections::BTreeMap;

use serde::Serialize;

/// Message keys registered by the built-in validators and rules.
///
/// Keys, not prose: the UI translates them.
pub mod keys {
    pub const REQUIRED: &str = "validation.required";
    pub const TOO_SHORT: &str = "validation.tooShort";
    pub const TOO_LONG: &str = "validation.tooLong";
    pub const WRONG_TYPE: &str = "validation.wrongType";
    pub const NOT_A_NUMBER: &str = "validation.notANumber";
    pub const TOO_SMALL: &str = "validation.tooSmall";
    pub const TOO_LARGE: &str = "validation.tooLarge";
    pub const INVALID_DATE: &str = "validation.invalidDate";
    pub const INVALID_CATEGORY: &str = "validation.invalidCategory";
    pub const NOT_A_BOOLEAN: &str = "validation.notABoolean";
    pub const DATE_ORDER: &str = "validation.dateOrder";
}

/// Violations collected for one entity snapshot, keyed by field name.
///
/// Never persisted. A field appears only when it has at least one
/// violation, so `is_valid` is simply "no fields recorded".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationResult {
    violations: BTreeMap<String, Vec<String>>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `key` under `field`. A key is recorded at most once per field.
    pub fn add(&mut self, field: &str, key: impl Into<String>) {
        let key = key.into();
        let entry = self.violations.entry(field.to_owned()).or_default();
        if !entry.contains(&key) {
            entry.push(key);
        }
    }

    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn has_errors(&self, field: &str) -> bool {
        self.violations.contains_key(field)
    }

    /// Message keys for `field` (empty when the field is fine).
    pub fn errors(&self, field: &str) -> &[String] {
        self.violations.get(field).map_or(&[], Vec::as_slice)
    }

    /// Fields that have at least one violation, in name order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.violations.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.violations
            .iter()
            .map(|(f, keys)| (f.as_str(), keys.as_slice()))
    }

    /// Total number of violations across all fields.
    pub fn len(&self) -> usize {
        self.violations.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Replace the violations of `field` with those `other` holds for it.
    ///
    /// Used to fold a single-field run into a running result.
    pub fn replace_field(&mut self, field: &str, other: &ValidationResult) {
        match other.violations.get(field) {
            Some(keys) => {
                self.violations.insert(field.to_owned(), keys.clone());
            }
            None => {
                self.violations.remove(field);
            }
        }
    }

    /// A copy holding only the violations of `field`.
    pub fn restricted_to(&self, field: &str) -> Self {
        let mut out = Self::new();
        if let Some(keys) = self.violations.get(field) {
            out.violations.insert(field.to_owned(), keys.clone());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_is_valid() {
        let r = ValidationResult::new();
        assert!(r.is_valid());
        assert_eq!(r.len(), 0);
        assert!(r.errors("name").is_empty());
    }

    #[test]
    fn add_deduplicates_keys_per_field() {
        let mut r = ValidationResult::new();
        r.add("name", keys::REQUIRED);
        r.add("name", keys::REQUIRED);
        r.add("name", keys::TOO_LONG);
        assert_eq!(r.errors("name"), [keys::REQUIRED, keys::TOO_LONG]);
        assert_eq!(r.len(), 2);
        assert!(!r.is_valid());
    }

    #[test]
    fn restricted_to_keeps_one_field() {
        let mut r = ValidationResult::new();
        r.add("name", keys::REQUIRED);
        r.add("startDate", keys::INVALID_DATE);
        let only = r.restricted_to("name");
        assert_eq!(only.fields().collect::<Vec<_>>(), ["name"]);
        assert!(r.restricted_to("other").is_valid());
    }

    #[test]
    fn replace_field_clears_fixed_fields() {
        let mut running = ValidationResult::new();
        running.add("name", keys::REQUIRED);
        running.add("price", keys::TOO_SMALL);
        running.replace_field("name", &ValidationResult::new());
        assert_eq!(running.fields().collect::<Vec<_>>(), ["price"]);

        let mut fresh = ValidationResult::new();
        fresh.add("price", keys::NOT_A_NUMBER);
        running.replace_field("price", &fresh);
        assert_eq!(running.errors("price"), [keys::NOT_A_NUMBER]);
    }

    #[test]
    fn serializes_as_plain_map() {
        let mut r = ValidationResult::new();
        r.add("dateOfExit", keys::DATE_ORDER);
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, r#"{"dateOfExit":["validation.dateOrder"]}"#);
    }
}
