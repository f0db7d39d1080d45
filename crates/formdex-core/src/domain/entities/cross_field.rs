//! Cross-field rules: predicates spanning two fields of one entity.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Record, ValidationResult, keys};
use crate::domain::error::DomainError;
use crate::domain::value_objects::{DateOrdering, is_store_date};

/// The predicate a [`CrossFieldRule`] enforces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RuleKind {
    /// `end` must follow `start`. Omitted entirely while either date is
    /// unset, so a half-filled form can still be saved.
    DateOrder {
        start: String,
        end: String,
        ordering: DateOrdering,
    },
    /// `field` is required as soon as `trigger` has a value.
    RequiredWith { field: String, trigger: String },
    /// `field` is required while `trigger` equals `equals`.
    RequiredWhen {
        field: String,
        trigger: String,
        equals: String,
    },
}

/// A named cross-field predicate with the message key it reports.
///
/// Violations are registered under the rule's *owner*: the end date of a
/// date range, the conditionally required field otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossFieldRule {
    pub name: String,
    #[serde(flatten)]
    pub kind: RuleKind,
    pub message: String,
}

impl CrossFieldRule {
    /// Date range rule reporting [`keys::DATE_ORDER`] under `end`.
    pub fn date_order(
        start: impl Into<String>,
        end: impl Into<String>,
        ordering: DateOrdering,
    ) -> Self {
        let (start, end) = (start.into(), end.into());
        Self {
            name: format!("{end}-after-{start}"),
            kind: RuleKind::DateOrder {
                start,
                end,
                ordering,
            },
            message: keys::DATE_ORDER.into(),
        }
    }

    pub fn required_with(field: impl Into<String>, trigger: impl Into<String>) -> Self {
        let (field, trigger) = (field.into(), trigger.into());
        Self {
            name: format!("{field}-with-{trigger}"),
            kind: RuleKind::RequiredWith { field, trigger },
            message: keys::REQUIRED.into(),
        }
    }

    pub fn required_when(
        field: impl Into<String>,
        trigger: impl Into<String>,
        equals: impl Into<String>,
    ) -> Self {
        let (field, trigger, equals) = (field.into(), trigger.into(), equals.into());
        Self {
            name: format!("{field}-when-{trigger}-{equals}"),
            kind: RuleKind::RequiredWhen {
                field,
                trigger,
                equals,
            },
            message: keys::REQUIRED.into(),
        }
    }

    /// Replace the reported message key.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Field under which violations are registered.
    pub fn owner(&self) -> &str {
        match &self.kind {
            RuleKind::DateOrder { end, .. } => end,
            RuleKind::RequiredWith { field, .. } | RuleKind::RequiredWhen { field, .. } => field,
        }
    }

    /// Every field the rule reads.
    pub fn referenced_fields(&self) -> [&str; 2] {
        match &self.kind {
            RuleKind::DateOrder { start, end, .. } => [start, end],
            RuleKind::RequiredWith { field, trigger }
            | RuleKind::RequiredWhen { field, trigger, .. } => [field, trigger],
        }
    }

    /// Check the declaration itself.
    pub fn validate(&self) -> Result<(), DomainError> {
        let invalid = |reason: &str| DomainError::InvalidRule {
            rule: self.name.clone(),
            reason: reason.to_owned(),
        };
        if self.message.trim().is_empty() {
            return Err(invalid("message key is empty"));
        }
        let [a, b] = self.referenced_fields();
        if a == b {
            return Err(invalid("a rule must span two different fields"));
        }
        Ok(())
    }

    /// Evaluate the rule against a snapshot.
    pub fn check(&self, record: &dyn Record, result: &mut ValidationResult) {
        let violated = match &self.kind {
            RuleKind::DateOrder {
                start,
                end,
                ordering,
            } => {
                let (start, end) = (record.field(start), record.field(end));
                match (start.as_text().map(str::trim), end.as_text().map(str::trim)) {
                    // Malformed dates are the field validator's business.
                    (Some(s), Some(e)) if is_store_date(s) && is_store_date(e) => {
                        !ordering.holds(s, e)
                    }
                    _ => false,
                }
            }
            RuleKind::RequiredWith { field, trigger } => {
                !record.field(trigger).is_blank() && record.field(field).is_blank()
            }
            RuleKind::RequiredWhen {
                field,
                trigger,
                equals,
            } => {
                record.field(trigger).to_index_text() == equals.as_str()
                    && record.field(field).is_blank()
            }
        };
        if violated {
            result.add(self.owner(), self.message.clone());
        }
    }
}
