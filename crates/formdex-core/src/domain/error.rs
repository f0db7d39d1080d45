// ============================================================================
// domain/error.rs - CONFIGURATION ERROR DOMAIN
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Every variant describes a defect in *static configuration* (a field
/// spec, an index spec, a category table, a schema registration). Bad user
/// data is never a `DomainError`; it is a `ValidationResult` entry.
///
/// All errors are:
/// - Cloneable (so a registry build failure can be reported and retained)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Field / rule declaration errors
    // ========================================================================
    #[error("invalid field spec '{field}': {reason}")]
    InvalidFieldSpec { field: String, reason: String },

    #[error("field '{field}' is declared twice on entity '{entity}'")]
    DuplicateField { entity: String, field: String },

    #[error("{context} on entity '{entity}' references unknown field '{field}'")]
    UnknownField {
        entity: String,
        field: String,
        context: String,
    },

    #[error("invalid rule '{rule}': {reason}")]
    InvalidRule { rule: String, reason: String },

    // ========================================================================
    // Index declaration errors
    // ========================================================================
    #[error("token '{token}' is declared twice in the index of '{entity}'")]
    DuplicateToken { entity: String, token: String },

    #[error("invalid index token '{token}': {reason}")]
    InvalidToken { token: String, reason: String },

    // ========================================================================
    // Category errors
    // ========================================================================
    #[error("invalid category table '{table}': {reason}")]
    InvalidCategoryTable { table: String, reason: String },

    #[error("unknown category table '{table}'")]
    UnknownCategoryTable { table: String },

    // ========================================================================
    // Schema registry errors
    // ========================================================================
    #[error("entity '{entity}' is registered twice")]
    DuplicateEntity { entity: String },

    #[error("no schema registered for entity '{entity}'")]
    UnknownEntity { entity: String },

    #[error("index spec for '{index}' attached to schema '{entity}'")]
    EntityMismatch { entity: String, index: String },

    // ========================================================================
    // Parsing
    // ========================================================================
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidFieldSpec { field, reason } => vec![
                format!("Fix the declaration of '{field}': {reason}"),
                "Bounds must satisfy min <= max; category fields need a table".into(),
            ],
            Self::UnknownField { entity, field, .. } => vec![
                format!("Declare '{field}' as a field of '{entity}' first"),
                "Rules and index tokens may only reference declared fields".into(),
            ],
            Self::DuplicateToken { token, .. } => vec![
                format!("Rename one of the '{token}' tokens"),
                "Tokens must be unique within one index".into(),
            ],
            Self::UnknownCategoryTable { table } => vec![
                format!("Register the category table '{table}' before the schemas using it"),
                "Try: formdex categories".into(),
            ],
            Self::UnknownEntity { entity } => vec![
                format!("'{entity}' is not a registered entity"),
                "Try: formdex entities".into(),
            ],
            Self::InvalidValue(msg) => vec![format!("Details: {msg}")],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownEntity { .. } | Self::UnknownCategoryTable { .. } => {
                ErrorCategory::NotFound
            }
            Self::InvalidValue(_) => ErrorCategory::Validation,
            _ => ErrorCategory::Configuration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    NotFound,
    Internal,
}
