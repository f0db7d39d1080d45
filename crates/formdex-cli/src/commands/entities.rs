//! Implementation of the `formdex entities` command.

use serde::Serialize;
use tracing::instrument;

use formdex_core::domain::{
    CrossFieldRule, EmptyTokenPolicy, EntitySchema, FieldSpec, SchemaRegistry,
};

use crate::{
    cli::{EntitiesArgs, ListFormat},
    commands::load_registry,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Index token as listed: prefix and the fields it reads.
#[derive(Debug, Serialize)]
struct TokenRow<'a> {
    token: &'a str,
    fields: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EntityRow<'a> {
    entity: &'a str,
    description: &'a str,
    fields: &'a [FieldSpec],
    rules: &'a [CrossFieldRule],
    index_policy: EmptyTokenPolicy,
    index_tokens: Vec<TokenRow<'a>>,
}

impl<'a> From<&'a EntitySchema> for EntityRow<'a> {
    fn from(schema: &'a EntitySchema) -> Self {
        Self {
            entity: schema.entity(),
            description: schema.description(),
            fields: schema.suite().fields(),
            rules: schema.suite().rules(),
            index_policy: schema.index().policy(),
            index_tokens: schema
                .index()
                .tokens()
                .iter()
                .map(|t| TokenRow {
                    token: &t.token,
                    fields: t.source.fields(),
                })
                .collect(),
        }
    }
}

#[instrument(skip_all, fields(format = ?args.format))]
pub fn execute(args: EntitiesArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let registry = load_registry(&config)?;
    let format = if output.is_json() {
        ListFormat::Json
    } else {
        args.format
    };
    render(&registry, format, &output)
}

fn render(registry: &SchemaRegistry, format: ListFormat, output: &OutputManager) -> CliResult<()> {
    match format {
        ListFormat::Json => {
            let rows: Vec<EntityRow<'_>> = registry.schemas().map(EntityRow::from).collect();
            output.json(&rows)?;
        }
        ListFormat::List => {
            for schema in registry.schemas() {
                output.data(schema.entity())?;
            }
        }
        ListFormat::Csv => {
            output.data("entity,fields,rules,index_tokens,description")?;
            for schema in registry.schemas() {
                output.data(&format!(
                    "{},{},{},{},{}",
                    schema.entity(),
                    schema.suite().fields().len(),
                    schema.suite().rules().len(),
                    schema.index().tokens().len(),
                    csv_field(schema.description()),
                ))?;
            }
        }
        ListFormat::Table => {
            output.header(&format!("{} registered entities", registry.len()))?;
            output.print("")?;
            let width = registry
                .schemas()
                .map(|s| s.entity().len())
                .max()
                .unwrap_or(0);
            for schema in registry.schemas() {
                let tokens: Vec<&str> = schema
                    .index()
                    .tokens()
                    .iter()
                    .map(|t| t.token.as_str())
                    .collect();
                output.print(&format!(
                    "  {:<width$}  {:>2} fields  [{}]  {}",
                    schema.entity(),
                    schema.suite().fields().len(),
                    tokens.join(" "),
                    schema.description(),
                ))?;
            }
        }
    }
    Ok(())
}

/// Quote a CSV cell when it needs it.
pub(crate) fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_carry_fields_rules_and_tokens() {
        let registry = SchemaRegistry::builtin().unwrap();
        let membership = registry.require("membership").unwrap();
        let row = EntityRow::from(membership);
        let json = serde_json::to_value(&row).unwrap();

        assert_eq!(json["entity"], "membership");
        assert_eq!(json["indexPolicy"], "always");
        assert!(
            json["fields"]
                .as_array()
                .unwrap()
                .iter()
                .any(|f| f["name"] == "dateOfExit")
        );
        assert_eq!(json["rules"].as_array().unwrap().len(), 1);
        assert_eq!(json["indexTokens"][0]["token"], "mn");
    }

    #[test]
    fn csv_cells_are_quoted_when_needed() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a, b"), "\"a, b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
