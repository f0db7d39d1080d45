//! Validation suites: the field specs and cross-field rules of one entity.

use std::collections::HashSet;

use crate::domain::categories::CategoryRegistry;
use crate::domain::entities::{CrossFieldRule, FieldSpec, Record, ValidationResult};
use crate::domain::error::DomainError;

/// Ordered field checks plus cross-field rules for one entity type.
///
/// Built once through [`ValidationSuiteBuilder`], which refuses
/// declarations that are inconsistent. Running a suite never fails.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationSuite {
    entity: String,
    fields: Vec<FieldSpec>,
    rules: Vec<CrossFieldRule>,
}

impl ValidationSuite {
    pub fn builder(entity: impl Into<String>) -> ValidationSuiteBuilder {
        ValidationSuiteBuilder {
            entity: entity.into(),
            fields: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Assemble and check a suite from already-parsed parts.
    pub fn new(
        entity: impl Into<String>,
        fields: Vec<FieldSpec>,
        rules: Vec<CrossFieldRule>,
    ) -> Result<Self, DomainError> {
        ValidationSuiteBuilder {
            entity: entity.into(),
            fields,
            rules,
        }
        .build()
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn rules(&self) -> &[CrossFieldRule] {
        &self.rules
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Validate a snapshot.
    ///
    /// With `only`, just the checks owned by that field run: its own field
    /// spec and the rules that report under it. The outcome equals the full
    /// run restricted to that field.
    pub fn run(
        &self,
        record: &dyn Record,
        only: Option<&str>,
        categories: &CategoryRegistry,
    ) -> ValidationResult {
        let mut result = ValidationResult::new();
        let selected = |name: &str| only.is_none_or(|o| o == name);

        for spec in self.fields.iter().filter(|f| selected(&f.name)) {
            spec.check(&mut result, record.field(&spec.name), categories);
        }
        for rule in self.rules.iter().filter(|r| selected(r.owner())) {
            rule.check(record, &mut result);
        }
        result
    }
}

/// Collects declarations for a [`ValidationSuite`].
#[derive(Debug, Clone)]
pub struct ValidationSuiteBuilder {
    entity: String,
    fields: Vec<FieldSpec>,
    rules: Vec<CrossFieldRule>,
}

impl ValidationSuiteBuilder {
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    pub fn rule(mut self, rule: CrossFieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Fail fast on invalid field specs, duplicate fields, and rules that
    /// reference fields the suite does not declare.
    pub fn build(self) -> Result<ValidationSuite, DomainError> {
        if self.entity.trim().is_empty() {
            return Err(DomainError::InvalidValue("entity name is empty".into()));
        }

        let mut seen = HashSet::new();
        for spec in &self.fields {
            spec.validate()?;
            if !seen.insert(spec.name.as_str()) {
                return Err(DomainError::DuplicateField {
                    entity: self.entity.clone(),
                    field: spec.name.clone(),
                });
            }
        }

        for rule in &self.rules {
            rule.validate()?;
            if let Some(missing) = rule
                .referenced_fields()
                .into_iter()
                .find(|f| !seen.contains(f))
            {
                return Err(DomainError::UnknownField {
                    entity: self.entity.clone(),
                    field: missing.to_owned(),
                    context: format!("rule '{}'", rule.name),
                });
            }
        }

        Ok(ValidationSuite {
            entity: self.entity,
            fields: self.fields,
            rules: self.rules,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{FieldValue, keys};
    use crate::domain::value_objects::DateOrdering;
    use std::collections::HashMap;

    struct Doc(HashMap<&'static str, &'static str>);

    impl Record for Doc {
        fn field(&self, name: &str) -> FieldValue<'_> {
            self.0.get(name).copied().into()
        }
    }

    fn membership_suite() -> ValidationSuite {
        ValidationSuite::builder("membership")
            .field(FieldSpec::text("memberName").length(0, 30).required())
            .field(FieldSpec::date("dateOfEntry"))
            .field(FieldSpec::date("dateOfExit"))
            .rule(CrossFieldRule::date_order(
                "dateOfEntry",
                "dateOfExit",
                DateOrdering::Strict,
            ))
            .build()
            .unwrap()
    }

    #[test]
    fn collects_every_violation_in_one_pass() {
        let suite = membership_suite();
        let registry = CategoryRegistry::new();
        let doc = Doc(HashMap::from([
            ("dateOfEntry", "20230101"),
            ("dateOfExit", "20220101"),
        ]));
        let r = suite.run(&doc, None, &registry);
        assert_eq!(r.errors("memberName"), [keys::REQUIRED]);
        assert_eq!(r.errors("dateOfExit"), [keys::DATE_ORDER]);
    }

    #[test]
    fn single_field_run_equals_restricted_full_run() {
        let suite = membership_suite();
        let registry = CategoryRegistry::new();
        let doc = Doc(HashMap::from([
            ("dateOfEntry", "20230101"),
            ("dateOfExit", "20220101"),
        ]));
        let full = suite.run(&doc, None, &registry);
        for field in ["memberName", "dateOfEntry", "dateOfExit", "unknown"] {
            assert_eq!(
                suite.run(&doc, Some(field), &registry),
                full.restricted_to(field),
                "{field}"
            );
        }
    }

    #[test]
    fn duplicate_field_fails_fast() {
        let err = ValidationSuite::builder("x")
            .field(FieldSpec::text("a"))
            .field(FieldSpec::number("a"))
            .build()
            .unwrap_err();
        assert!(matches!(err, DomainError::DuplicateField { .. }));
    }

    #[test]
    fn rule_on_undeclared_field_fails_fast() {
        let err = ValidationSuite::builder("x")
            .field(FieldSpec::date("from"))
            .rule(CrossFieldRule::date_order("from", "to", DateOrdering::Strict))
            .build()
            .unwrap_err();
        match err {
            DomainError::UnknownField { field, .. } => assert_eq!(field, "to"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn invalid_field_spec_fails_fast() {
        let err = ValidationSuite::new("x", vec![FieldSpec::number("n").min(2.0).max(1.0)], vec![])
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidFieldSpec { .. }));
    }
}
