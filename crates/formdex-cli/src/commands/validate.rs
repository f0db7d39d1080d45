//! Implementation of the `formdex validate` command.

use std::io::IsTerminal as _;
use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{info, instrument};

use formdex_adapters::JsonRecord;
use formdex_core::{domain::ValidationResult, error::FormdexError};

use crate::{
    cli::{GlobalArgs, ValidateArgs},
    commands::entity_service,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Outcome for one document.
#[derive(Debug, Serialize)]
struct FileReport {
    path: String,
    valid: bool,
    violations: ValidationResult,
}

/// Validate every file, report all of them, fail if any is invalid.
#[instrument(skip_all, fields(entity = %args.entity, files = args.files.len()))]
pub fn execute(
    args: ValidateArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let service = entity_service(&global, &config)?;
    let schema = service
        .registry()
        .require(&args.entity)
        .map_err(FormdexError::from)?;

    if let Some(field) = &args.field {
        if !schema.suite().has_field(field) {
            return Err(CliError::InvalidInput {
                message: format!("{} has no field '{field}'", args.entity),
                source: None,
            });
        }
    }

    let progress = progress_bar(args.files.len(), &output);
    let mut reports = Vec::with_capacity(args.files.len());
    for path in &args.files {
        progress.set_message(path.display().to_string());
        reports.push(check_file(&service, &args, path)?);
        progress.inc(1);
    }
    progress.finish_and_clear();

    render(&reports, &output)?;

    let invalid = reports.iter().filter(|r| !r.valid).count();
    info!(invalid, total = reports.len(), "Validation finished");
    if invalid > 0 {
        return Err(CliError::DocumentsInvalid {
            entity: args.entity,
            invalid,
            total: reports.len(),
        });
    }
    Ok(())
}

fn check_file(
    service: &formdex_core::application::EntityService,
    args: &ValidateArgs,
    path: &Path,
) -> CliResult<FileReport> {
    let record = JsonRecord::from_path(path)?;
    let violations = service.validate_document(&args.entity, &record, args.field.as_deref())?;
    Ok(FileReport {
        path: path.display().to_string(),
        valid: violations.is_valid(),
        violations,
    })
}

fn render(reports: &[FileReport], output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        output.json(&reports)?;
        return Ok(());
    }
    for report in reports {
        if report.valid {
            output.success(&report.path)?;
            continue;
        }
        output.error(&report.path)?;
        for (field, keys) in report.violations.iter() {
            output.error(&format!("  {field}: {}", keys.join(", ")))?;
        }
    }
    Ok(())
}

/// A bar on stderr for interactive multi-file runs, hidden otherwise.
fn progress_bar(len: usize, output: &OutputManager) -> ProgressBar {
    if len < 2 || output.is_quiet() || output.is_json() || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {wide_msg}")
    {
        bar.set_style(style.progress_chars("=> "));
    }
    bar
}
