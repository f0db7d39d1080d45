//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Configuration defects are `DomainError` from `crate::domain`.

use thiserror::Error;

use crate::domain::ValidationResult;
use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// A write was aborted because the entity does not validate.
    ///
    /// Carries every violation so the caller can surface them.
    #[error("{entity} failed validation with {} violation(s)", .result.len())]
    ValidationFailed {
        entity: String,
        result: ValidationResult,
    },

    /// A schema manifest could not be read or parsed.
    #[error("Failed to load schema manifest {source_name}: {reason}")]
    SchemaLoad { source_name: String, reason: String },

    /// The ambient tenant context is empty.
    #[error("No tenant configured")]
    MissingTenant,

    /// The clock produced something that is not a store date.
    #[error("Clock returned '{value}', expected a YYYYMMDD date")]
    InvalidClock { value: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ValidationFailed { result, .. } => {
                let mut out: Vec<String> = result
                    .iter()
                    .map(|(field, keys)| format!("{field}: {}", keys.join(", ")))
                    .collect();
                out.push("Fix the fields above and try again".into());
                out
            }
            Self::SchemaLoad { source_name, .. } => vec![
                format!("Check the syntax of {source_name}"),
                "Every manifest needs an [entity] table with a name".into(),
            ],
            Self::MissingTenant => vec![
                "Set tenant.id in the config file".into(),
                "Or export FORMDEX__TENANT__ID".into(),
            ],
            Self::InvalidClock { .. } => vec!["This is likely a bug in the clock adapter".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationFailed { .. } => ErrorCategory::Validation,
            Self::SchemaLoad { .. } | Self::MissingTenant => ErrorCategory::Configuration,
            Self::InvalidClock { .. } => ErrorCategory::Internal,
        }
    }

    /// The violations of a rejected write, if this is one.
    pub fn violations(&self) -> Option<&ValidationResult> {
        match self {
            Self::ValidationFailed { result, .. } => Some(result),
            _ => None,
        }
    }
}
