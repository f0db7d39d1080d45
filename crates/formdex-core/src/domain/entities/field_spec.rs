//! Field specifications: the declarative shape of one entity field.

use serde::{Deserialize, Serialize};

use crate::domain::categories::CategoryRegistry;
use crate::domain::entities::{FieldValue, ValidationResult, keys};
use crate::domain::error::DomainError;
use crate::domain::validators;
use crate::domain::value_objects::FieldKind;

/// Describes one field of a domain entity for validation purposes.
///
/// Invariants (checked by [`FieldSpec::validate`]):
/// - `min <= max` when both are present
/// - bounds only on text (length) and number (value) fields
/// - text lengths are not negative
/// - a category field names a non-empty category table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    /// Minimum length (text) or value (number).
    #[serde(default)]
    pub min: Option<f64>,
    /// Maximum length (text) or value (number).
    #[serde(default)]
    pub max: Option<f64>,
    /// Category table name, for `FieldKind::Category`.
    #[serde(default)]
    pub category: Option<String>,
}

impl FieldSpec {
    fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            min: None,
            max: None,
            category: None,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Number)
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Date)
    }

    pub fn category(name: impl Into<String>, table: impl Into<String>) -> Self {
        let mut spec = Self::new(name, FieldKind::Category);
        spec.category = Some(table.into());
        spec
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Length bounds for text fields.
    pub fn length(self, min: usize, max: usize) -> Self {
        self.min(min as f64).max(max as f64)
    }

    /// Check the declaration itself.
    pub fn validate(&self) -> Result<(), DomainError> {
        let invalid = |reason: &str| DomainError::InvalidFieldSpec {
            field: self.name.clone(),
            reason: reason.to_owned(),
        };

        if self.name.trim().is_empty() {
            return Err(invalid("field name is empty"));
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(invalid("min is greater than max"));
            }
        }
        if (self.min.is_some() || self.max.is_some()) && !self.kind.supports_bounds() {
            return Err(invalid("bounds are only allowed on string and number fields"));
        }
        let negative = |bound: Option<f64>| bound.is_some_and(|b| b < 0.0);
        if self.kind == FieldKind::Text && (negative(self.min) || negative(self.max)) {
            return Err(invalid("a length cannot be negative"));
        }
        match (&self.kind, &self.category) {
            (FieldKind::Category, None) => Err(invalid("category field without a table")),
            (FieldKind::Category, Some(t)) if t.trim().is_empty() => {
                Err(invalid("category table name is empty"))
            }
            (FieldKind::Category, Some(_)) => Ok(()),
            (_, Some(_)) => Err(invalid("only category fields may name a table")),
            (_, None) => Ok(()),
        }
    }

    /// Run the field validator matching this spec's kind.
    pub fn check(
        &self,
        result: &mut ValidationResult,
        value: FieldValue<'_>,
        categories: &CategoryRegistry,
    ) {
        let name = self.name.as_str();
        match self.kind {
            FieldKind::Text => validators::validate_string(
                result,
                name,
                value,
                self.max.map(|m| m as usize),
                self.min.map_or(0, |m| m as usize),
                self.required,
            ),
            FieldKind::Number => {
                validators::validate_number(result, name, value, self.required, self.min, self.max)
            }
            FieldKind::Date => validators::validate_date(result, name, value, self.required),
            FieldKind::Boolean => validators::validate_boolean(result, name, value, self.required),
            FieldKind::Category => {
                match self.category.as_deref().and_then(|t| categories.table(t)) {
                    Some(table) => validators::validate_category(
                        result,
                        name,
                        value,
                        table,
                        self.required,
                    ),
                    // Only reachable with a registry other than the one the
                    // schema was registered against.
                    None if value.is_blank() && !self.required => {}
                    None => result.add(name, keys::INVALID_CATEGORY),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::categories::MEMBERSHIP_CATEGORY;

    #[test]
    fn builders_set_kind_and_flags() {
        let spec = FieldSpec::text("name").length(1, 30).required();
        assert_eq!(spec.kind, FieldKind::Text);
        assert!(spec.required);
        assert_eq!((spec.min, spec.max), (Some(1.0), Some(30.0)));
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn min_greater_than_max_is_rejected() {
        let spec = FieldSpec::number("price").min(10.0).max(1.0);
        assert!(matches!(
            spec.validate(),
            Err(DomainError::InvalidFieldSpec { .. })
        ));
    }

    #[test]
    fn negative_text_length_is_rejected() {
        assert!(FieldSpec::text("code").min(-1.0).validate().is_err());
        assert!(FieldSpec::text("code").max(-1.0).validate().is_err());
        assert!(FieldSpec::number("delta").min(-5.0).max(-1.0).validate().is_ok());
    }

    #[test]
    fn category_requires_table() {
        let mut spec = FieldSpec::category("type", "");
        assert!(spec.validate().is_err());
        spec.category = None;
        assert!(spec.validate().is_err());
        assert!(FieldSpec::category("type", MEMBERSHIP_CATEGORY).validate().is_ok());
    }

    #[test]
    fn bounds_on_dates_are_rejected() {
        assert!(FieldSpec::date("d").max(3.0).validate().is_err());
    }

    #[test]
    fn check_dispatches_on_kind() {
        let registry = CategoryRegistry::builtin().unwrap();
        let mut r = ValidationResult::new();
        FieldSpec::date("d").check(&mut r, FieldValue::Text("x"), &registry);
        FieldSpec::category("c", MEMBERSHIP_CATEGORY).check(&mut r, FieldValue::Number(77.0), &registry);
        assert_eq!(r.errors("d"), [keys::INVALID_DATE]);
        assert_eq!(r.errors("c"), [keys::INVALID_CATEGORY]);
    }

    #[test]
    fn deserializes_from_manifest_shape() {
        let spec: FieldSpec = serde_json::from_str(
            r#"{"name":"title","kind":"string","max":40,"required":true}"#,
        )
        .unwrap();
        assert_eq!(spec.kind, FieldKind::Text);
        assert_eq!(spec.max, Some(40.0));
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn unknown_key_is_a_deserialization_error() {
        let parsed = serde_json::from_str::<FieldSpec>(
            r#"{"name":"title","kind":"string","requried":true}"#,
        );
        assert!(parsed.is_err());
    }
}
