//! Unified error handling for Formdex Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Formdex Core operations.
///
/// Bad *data* never ends up here: it is reported in a `ValidationResult`.
/// Only bad configuration, rejected writes and broken adapters do.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FormdexError {
    /// Errors from the domain layer (malformed static configuration).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),
}

impl FormdexError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Configuration => ErrorCategory::Configuration,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
        }
    }

    /// The violations of a rejected write, if this is one.
    pub fn violations(&self) -> Option<&crate::domain::ValidationResult> {
        match self {
            Self::Application(e) => e.violations(),
            Self::Domain(_) => None,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type FormdexResult<T> = Result<T, FormdexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_categories_are_mapped() {
        let err: FormdexError = DomainError::UnknownEntity {
            entity: "boat".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(err.violations().is_none());
    }
}
