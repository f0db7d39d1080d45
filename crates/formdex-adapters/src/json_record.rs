//! JSON documents as engine records.
//!
//! Lets any JSON object be validated and indexed against a registered
//! schema without a typed entity struct. Field names are the JSON keys.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use formdex_core::domain::{FieldValue, Record};

/// Why a file could not be turned into a [`JsonRecord`].
#[derive(Debug, thiserror::Error)]
pub enum JsonRecordError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("{path} holds {found}, expected a JSON object")]
    NotAnObject { path: String, found: &'static str },
}

/// One JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonRecord {
    fields: Map<String, Value>,
}

impl JsonRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Accept only objects; `origin` names the source in errors.
    pub fn from_value(value: Value, origin: &str) -> Result<Self, JsonRecordError> {
        match value {
            Value::Object(fields) => Ok(Self::new(fields)),
            other => Err(JsonRecordError::NotAnObject {
                path: origin.to_owned(),
                found: kind_of(&other),
            }),
        }
    }

    pub fn parse(raw: &str, origin: &str) -> Result<Self, JsonRecordError> {
        let value = serde_json::from_str(raw).map_err(|source| JsonRecordError::Parse {
            path: origin.to_owned(),
            source,
        })?;
        Self::from_value(value, origin)
    }

    pub fn from_path(path: &Path) -> Result<Self, JsonRecordError> {
        let origin = path.display().to_string();
        let raw = fs::read_to_string(path).map_err(|source| JsonRecordError::Read {
            path: origin.clone(),
            source,
        })?;
        debug!(path = %origin, bytes = raw.len(), "Read JSON record");
        Self::parse(&raw, &origin)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Store a derived index under `key`, as a persistence layer would.
    pub fn set_index(&mut self, key: &str, index: impl Into<String>) {
        self.fields.insert(key.to_owned(), Value::String(index.into()));
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

impl Record for JsonRecord {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match self.fields.get(name) {
            None | Some(Value::Null) => FieldValue::Absent,
            Some(Value::String(s)) => FieldValue::Text(s),
            Some(Value::Bool(b)) => FieldValue::Flag(*b),
            Some(Value::Number(n)) => n.as_f64().map_or(FieldValue::Absent, FieldValue::Number),
            Some(Value::Array(_) | Value::Object(_)) => FieldValue::Composite,
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formdex_core::domain::{SchemaRegistry, keys};
    use serde_json::json;

    fn record(value: Value) -> JsonRecord {
        JsonRecord::from_value(value, "test").unwrap()
    }

    #[test]
    fn json_values_map_to_field_values() {
        let r = record(json!({
            "name": "Board Meeting",
            "type": 1,
            "showInMenu": true,
            "sections": ["a", "b"],
            "endDate": null
        }));
        assert_eq!(r.field("name"), FieldValue::Text("Board Meeting"));
        assert_eq!(r.field("type"), FieldValue::Number(1.0));
        assert_eq!(r.field("showInMenu"), FieldValue::Flag(true));
        assert_eq!(r.field("sections"), FieldValue::Composite);
        assert_eq!(r.field("endDate"), FieldValue::Absent);
        assert_eq!(r.field("missing"), FieldValue::Absent);
    }

    #[test]
    fn non_objects_are_rejected() {
        let err = JsonRecord::parse("[1, 2]", "list.json").unwrap_err();
        assert!(matches!(err, JsonRecordError::NotAnObject { found: "an array", .. }));
        assert!(matches!(
            JsonRecord::parse("{", "broken.json"),
            Err(JsonRecordError::Parse { .. })
        ));
    }

    #[test]
    fn json_documents_validate_against_builtin_schemas() {
        let registry = SchemaRegistry::builtin().unwrap();
        let event = record(json!({
            "name": "Board Meeting",
            "startDate": "20250615",
            "endDate": "20250601",
            "type": 1
        }));
        let result = registry.validate("calendar_event", &event, None).unwrap();
        assert_eq!(result.errors("endDate"), [keys::DATE_ORDER]);
        let index = registry.build_index("calendar_event", &event).unwrap();
        assert_eq!(index.as_str(), "n:Board Meeting sd:20250615 et:BRD");
    }

    #[test]
    fn reads_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, r#"{"title": "Minutes"}"#).unwrap();
        let mut r = JsonRecord::from_path(&path).unwrap();
        r.set_index("index", "t:Minutes");
        assert_eq!(r.field("index"), FieldValue::Text("t:Minutes"));
        assert!(JsonRecord::from_path(&dir.path().join("missing.json")).is_err());
    }
}
