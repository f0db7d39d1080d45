//! Implementation of the `formdex index` command.

use serde_json::json;
use tracing::{info, instrument, warn};

use formdex_adapters::JsonRecord;

use crate::{
    cli::{GlobalArgs, IndexArgs},
    commands::entity_service,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Document key the index is stored under with `--write`.
const INDEX_KEY: &str = "index";

/// Print the search index of one document, optionally storing it.
///
/// `--write` only touches documents that validate.
#[instrument(skip_all, fields(entity = %args.entity, file = %args.file.display()))]
pub fn execute(
    args: IndexArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let service = entity_service(&global, &config)?;
    let mut record = JsonRecord::from_path(&args.file)?;
    let index = service.index_document(&args.entity, &record)?;

    if output.is_json() {
        output.json(&json!({ "entity": args.entity, "index": index }))?;
    } else {
        output.data(index.as_str())?;
    }

    if args.write {
        // Same order as any other write: index, validate, then persist.
        let violations = service.validate_document(&args.entity, &record, None)?;
        if !violations.is_valid() {
            for (field, keys) in violations.iter() {
                output.error(&format!("  {field}: {}", keys.join(", ")))?;
            }
            warn!(violations = violations.len(), "Index not written");
            return Err(CliError::DocumentsInvalid {
                entity: args.entity,
                invalid: 1,
                total: 1,
            });
        }
        record.set_index(INDEX_KEY, index.as_str());
        let text = serde_json::to_string_pretty(&record.into_value()).map_err(|e| {
            CliError::InvalidInput {
                message: "document could not be serialised".into(),
                source: Some(Box::new(e)),
            }
        })?;
        std::fs::write(&args.file, format!("{text}\n"))
            .with_cli_context(|| format!("Failed to write {}", args.file.display()))?;
        info!("Index written back");
        output.note(&format!("Stored under '{INDEX_KEY}' in {}", args.file.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use std::fs;
    use tempfile::TempDir;

    fn output() -> OutputManager {
        let args = GlobalArgs {
            quiet: true,
            output_format: OutputFormat::Plain,
            ..GlobalArgs::default()
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn write_stores_the_index_in_the_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("event.json");
        fs::write(
            &path,
            r#"{"name": "Board Meeting", "startDate": "20250615", "type": 1}"#,
        )
        .unwrap();

        execute(
            IndexArgs {
                entity: "calendar_event".into(),
                file: path.clone(),
                write: true,
            },
            GlobalArgs::default(),
            AppConfig::default(),
            output(),
        )
        .unwrap();

        let stored: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(stored["index"], "n:Board Meeting sd:20250615 et:BRD");
        assert_eq!(stored["name"], "Board Meeting");
    }

    #[test]
    fn write_leaves_an_invalid_document_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("late.json");
        let raw = r#"{"memberName": "Jane", "dateOfEntry": "20230101", "dateOfExit": "20220101"}"#;
        fs::write(&path, raw).unwrap();

        let err = execute(
            IndexArgs {
                entity: "membership".into(),
                file: path.clone(),
                write: true,
            },
            GlobalArgs::default(),
            AppConfig::default(),
            output(),
        )
        .unwrap_err();

        assert!(matches!(err, CliError::DocumentsInvalid { invalid: 1, .. }));
        assert_eq!(err.exit_code(), 2);
        assert_eq!(fs::read_to_string(&path).unwrap(), raw);
    }

    #[test]
    fn missing_document_is_not_found() {
        let err = execute(
            IndexArgs {
                entity: "calendar_event".into(),
                file: "/no/such/event.json".into(),
                write: false,
            },
            GlobalArgs::default(),
            AppConfig::default(),
            output(),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::DocumentNotFound { .. }));
    }
}
