//! Error handling for the Formdex CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Proper error chaining
//! - Exit code mapping

use std::error::Error;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use formdex_adapters::JsonRecordError;
use formdex_core::error::FormdexError;

// Re-export so callers only need `use crate::error::*`.
pub use formdex_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// One or more documents did not validate.
    #[error("{invalid} of {total} {entity} document(s) failed validation")]
    DocumentsInvalid {
        entity: String,
        invalid: usize,
        total: usize,
    },

    /// A document file does not exist.
    #[error("Document not found: {}", path.display())]
    DocumentNotFound { path: PathBuf },

    /// A document could not be read or parsed.
    #[error("Unreadable document: {source}")]
    UnreadableDocument {
        #[source]
        source: JsonRecordError,
    },

    /// No category table with this name.
    #[error("Unknown category table '{table}'")]
    UnknownTable { table: String },

    /// `formdex form` only knows typed, built-in entities.
    #[error("'{entity}' has no built-in form")]
    NoBuiltinForm { entity: String },

    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ── Core errors ────────────────────────────────────────────────────────
    /// An error propagated from `formdex-core` or the adapters.
    ///
    /// Wrapped here so that the CLI can attach suggestions drawn from the
    /// core error's category without touching core internals.
    #[error("{0}")]
    Core(#[from] FormdexError),

    // ── System errors ──────────────────────────────────────────────────────
    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<JsonRecordError> for CliError {
    fn from(err: JsonRecordError) -> Self {
        match err {
            JsonRecordError::Read { ref source, path }
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                CliError::DocumentNotFound { path: path.into() }
            }
            other => CliError::UnreadableDocument { source: other },
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message, .. } => vec![
                format!("Check your input: {message}"),
                "Use --help for usage information".into(),
            ],

            Self::DocumentsInvalid { entity, .. } => vec![
                "Fix the fields listed above and run the command again".into(),
                format!("Inspect the schema with: formdex entities | grep {entity}"),
            ],

            Self::DocumentNotFound { path } => vec![
                format!("No file at {}", path.display()),
                "Paths are relative to the current directory".into(),
            ],

            Self::UnreadableDocument { .. } => vec![
                "Each document must hold exactly one JSON object".into(),
                "Field names are the schema's field names, e.g. dateOfEntry".into(),
            ],

            Self::UnknownTable { table } => vec![
                format!("No category table named '{table}'"),
                "List the tables: formdex categories".into(),
            ],

            Self::NoBuiltinForm { entity } => vec![
                format!("'{entity}' is not a built-in entity"),
                "Forms exist for the entities listed by: formdex entities".into(),
                "Entities from schema manifests have no typed form".into(),
            ],

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {message}"),
                format!(
                    "Check your config file at {}",
                    crate::config::AppConfig::config_path().display()
                ),
                "Use 'formdex config init' to create a default config".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {message}"),
                "Check file permissions".into(),
            ],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. }
            | Self::DocumentsInvalid { .. }
            | Self::UnreadableDocument { .. } => ErrorCategory::UserError,
            Self::DocumentNotFound { .. }
            | Self::UnknownTable { .. }
            | Self::NoBuiltinForm { .. } => ErrorCategory::NotFound,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n\n",
            "✗".red().bold(),
            "Error:".red().bold()
        ));

        output.push_str(&format!("  {}\n", self.to_string().red()));

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "→".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {suggestion}\n"));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(), // ℹ
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`], without ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("\nError: {self}\n"));

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (invalid documents, bad arguments).
    UserError,
    /// Resource not found.
    NotFound,
    /// Configuration error.
    Configuration,
    /// Internal/system error.
    Internal,
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Extension trait to convert foreign error types into [`CliError`] at
/// call-sites with a descriptive context message.
///
/// Implemented for `Result<T, std::io::Error>`, producing
/// `CliError::IoError`.
pub trait IntoCli<T> {
    /// Convert to `CliResult` attaching a human-readable context message.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formdex_core::application::ApplicationError;
    use formdex_core::domain::DomainError;
    use std::io;

    // ── suggestions ───────────────────────────────────────────────────────

    #[test]
    fn unknown_table_points_at_categories_command() {
        let err = CliError::UnknownTable {
            table: "colour".into(),
        };
        assert!(
            err.suggestions()
                .iter()
                .any(|s| s.contains("formdex categories"))
        );
    }

    #[test]
    fn core_suggestions_are_forwarded() {
        let core: FormdexError = ApplicationError::MissingTenant.into();
        let err = CliError::Core(core.clone());
        assert_eq!(err.suggestions(), core.suggestions());
    }

    // ── exit codes ────────────────────────────────────────────────────────

    #[test]
    fn exit_code_invalid_documents() {
        let err = CliError::DocumentsInvalid {
            entity: "membership".into(),
            invalid: 1,
            total: 2,
        };
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "1 of 2 membership document(s) failed validation");
    }

    #[test]
    fn exit_code_not_found() {
        let unknown: FormdexError = DomainError::UnknownEntity {
            entity: "boat".into(),
        }
        .into();
        assert_eq!(CliError::Core(unknown).exit_code(), 3);
        assert_eq!(
            CliError::DocumentNotFound {
                path: PathBuf::from("x.json")
            }
            .exit_code(),
            3
        );
    }

    #[test]
    fn exit_code_configuration() {
        assert_eq!(
            CliError::ConfigError {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            4
        );
        let schema: FormdexError = ApplicationError::SchemaLoad {
            source_name: "boat.toml".into(),
            reason: "bad".into(),
        }
        .into();
        assert_eq!(CliError::Core(schema).exit_code(), 4);
    }

    #[test]
    fn exit_code_internal() {
        assert_eq!(
            CliError::IoError {
                message: "x".into(),
                source: io::Error::other("e"),
            }
            .exit_code(),
            1
        );
    }

    #[test]
    fn missing_document_file_is_not_found() {
        let read = JsonRecordError::Read {
            path: "gone.json".into(),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert!(matches!(
            CliError::from(read),
            CliError::DocumentNotFound { .. }
        ));
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn format_plain_contains_error_header() {
        let err = CliError::UnknownTable {
            table: "colour".into(),
        };
        let s = err.format_plain(false);
        assert!(s.contains("Error:"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("--verbose"));
    }

    #[test]
    fn format_plain_verbose_shows_cause() {
        let err = CliError::IoError {
            message: "reading a.json".into(),
            source: io::Error::other("disk on fire"),
        };
        let s = err.format_plain(true);
        assert!(s.contains("Caused by: disk on fire"));
        assert!(!s.contains("--verbose"));
    }

    // ── IntoCli ───────────────────────────────────────────────────────────

    #[test]
    fn into_cli_io_error() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let cli: CliResult<()> = result.with_cli_context(|| "reading config");
        assert!(matches!(cli, Err(CliError::IoError { .. })));
    }
}
