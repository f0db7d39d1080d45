//! Implementation of the `formdex categories` command.

use serde::Serialize;
use tracing::instrument;

use formdex_core::domain::{CategoryRegistry, CategoryTable};

use crate::{
    cli::{CategoriesArgs, ListFormat},
    commands::{entities::csv_field, load_registry},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TableRow<'a> {
    name: &'a str,
    entries: usize,
    default_id: String,
}

impl<'a> From<&'a CategoryTable> for TableRow<'a> {
    fn from(table: &'a CategoryTable) -> Self {
        Self {
            name: table.name(),
            entries: table.len(),
            default_id: table.default_id().to_string(),
        }
    }
}

#[instrument(skip_all, fields(table = ?args.table))]
pub fn execute(args: CategoriesArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let registry = load_registry(&config)?;
    let format = if output.is_json() {
        ListFormat::Json
    } else {
        args.format
    };
    match &args.table {
        Some(name) => {
            let table = registry
                .categories()
                .table(name)
                .ok_or_else(|| CliError::UnknownTable {
                    table: name.clone(),
                })?;
            render_table(table, format, &output)
        }
        None => render_tables(registry.categories(), format, &output),
    }
}

fn render_tables(
    categories: &CategoryRegistry,
    format: ListFormat,
    output: &OutputManager,
) -> CliResult<()> {
    match format {
        ListFormat::Json => {
            let rows: Vec<TableRow<'_>> = categories.tables().map(TableRow::from).collect();
            output.json(&rows)?;
        }
        ListFormat::List => {
            for table in categories.tables() {
                output.data(table.name())?;
            }
        }
        ListFormat::Csv => {
            output.data("table,entries,default")?;
            for table in categories.tables() {
                output.data(&format!(
                    "{},{},{}",
                    table.name(),
                    table.len(),
                    csv_field(&table.default_id().to_string()),
                ))?;
            }
        }
        ListFormat::Table => {
            output.header("Category tables")?;
            output.print("")?;
            for table in categories.tables() {
                output.print(&format!(
                    "  {:<24} {:>2} entries  default {}",
                    table.name(),
                    table.len(),
                    table.default_id(),
                ))?;
            }
        }
    }
    Ok(())
}

fn render_table(table: &CategoryTable, format: ListFormat, output: &OutputManager) -> CliResult<()> {
    match format {
        ListFormat::Json => output.json(table)?,
        ListFormat::List => {
            for entry in table.entries() {
                output.data(&format!("{} {}", entry.id, entry.abbreviation))?;
            }
        }
        ListFormat::Csv => {
            output.data("id,abbreviation,name,icon,default")?;
            for entry in table.entries() {
                output.data(&format!(
                    "{},{},{},{},{}",
                    csv_field(&entry.id.to_string()),
                    csv_field(&entry.abbreviation),
                    csv_field(&entry.name),
                    csv_field(&entry.icon),
                    &entry.id == table.default_id(),
                ))?;
            }
        }
        ListFormat::Table => {
            output.header(table.name())?;
            output.print("")?;
            for entry in table.entries() {
                let marker = if &entry.id == table.default_id() { "*" } else { " " };
                output.print(&format!(
                    "{marker} {:<10} {:<5} {}",
                    entry.id.to_string(),
                    entry.abbreviation,
                    entry.name,
                ))?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{GlobalArgs, OutputFormat};

    fn output() -> OutputManager {
        let args = GlobalArgs {
            quiet: true,
            output_format: OutputFormat::Plain,
            ..GlobalArgs::default()
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn unknown_table_is_reported() {
        let err = execute(
            CategoriesArgs {
                table: Some("colour".into()),
                format: ListFormat::Table,
            },
            AppConfig::default(),
            output(),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::UnknownTable { .. }));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn table_rows_show_the_default() {
        let categories = CategoryRegistry::builtin().unwrap();
        let row = TableRow::from(categories.require("task_state").unwrap());
        assert_eq!(row.default_id, "initial");
        assert_eq!(row.entries, 5);
    }
}
