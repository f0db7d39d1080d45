//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "formdex",
    bin_name = "formdex",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Validate and index line-of-business entities",
    long_about = "Formdex validates entity documents against category-driven \
                  schemas and builds their search indexes.",
    after_help = "EXAMPLES:\n\
        \x20 formdex validate membership jane.json\n\
        \x20 formdex validate calendar_event events/*.json --field endDate\n\
        \x20 formdex index invitation invite.json\n\
        \x20 formdex categories calendar_event_type\n\
        \x20 formdex completions bash > /usr/share/bash-completion/completions/formdex",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate JSON documents against an entity schema.
    #[command(
        visible_alias = "v",
        about = "Validate entity documents",
        after_help = "EXAMPLES:\n\
            \x20 formdex validate membership jane.json\n\
            \x20 formdex validate reservation a.json b.json\n\
            \x20 formdex validate page home.json --field accessRole"
    )]
    Validate(ValidateArgs),

    /// Build the search index of a JSON document.
    #[command(
        visible_alias = "i",
        about = "Build a document's search index",
        after_help = "EXAMPLES:\n\
            \x20 formdex index calendar_event meeting.json\n\
            \x20 formdex index document minutes.json --write"
    )]
    Index(IndexArgs),

    /// Print a blank form with every default filled in.
    #[command(
        about = "Print a defaulted form for a built-in entity",
        after_help = "EXAMPLES:\n\
            \x20 formdex form membership > jane.json\n\
            \x20 formdex --today 2025-06-15 --tenant club-1 form calendar_event"
    )]
    Form(FormArgs),

    /// List registered entities.
    #[command(
        visible_alias = "ls",
        about = "List registered entities",
        after_help = "EXAMPLES:\n\
            \x20 formdex entities\n\
            \x20 formdex entities --format json\n\
            \x20 formdex --schemas ./schemas entities"
    )]
    Entities(EntitiesArgs),

    /// Show category tables.
    #[command(
        about = "Show category tables",
        after_help = "EXAMPLES:\n\
            \x20 formdex categories\n\
            \x20 formdex categories task_state\n\
            \x20 formdex categories priority --format csv"
    )]
    Categories(CategoriesArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 formdex completions bash > ~/.local/share/bash-completion/completions/formdex\n\
            \x20 formdex completions zsh  > ~/.zfunc/_formdex\n\
            \x20 formdex completions fish > ~/.config/fish/completions/formdex.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the Formdex configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 formdex config get tenant.id\n\
            \x20 formdex config list\n\
            \x20 formdex config init"
    )]
    Config(ConfigCommands),
}

// ── validate ──────────────────────────────────────────────────────────────────

/// Arguments for `formdex validate`.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Registered entity name, e.g. `membership`.
    #[arg(value_name = "ENTITY", help = "Entity schema to validate against")]
    pub entity: String,

    /// JSON files holding one object each.
    #[arg(value_name = "FILE", required = true, num_args = 1.., help = "JSON documents")]
    pub files: Vec<PathBuf>,

    /// Only run the checks of one field.
    #[arg(
        short = 'f',
        long = "field",
        value_name = "FIELD",
        help = "Validate a single field only"
    )]
    pub field: Option<String>,
}

// ── index ─────────────────────────────────────────────────────────────────────

/// Arguments for `formdex index`.
#[derive(Debug, Args)]
pub struct IndexArgs {
    /// Registered entity name.
    #[arg(value_name = "ENTITY", help = "Entity schema to index with")]
    pub entity: String,

    /// JSON file holding one object.
    #[arg(value_name = "FILE", help = "JSON document")]
    pub file: PathBuf,

    /// Store the index back into the document.
    #[arg(
        short = 'w',
        long = "write",
        help = "Write the index into the document's `index` key"
    )]
    pub write: bool,
}

// ── form ──────────────────────────────────────────────────────────────────────

/// Arguments for `formdex form`.
#[derive(Debug, Args)]
pub struct FormArgs {
    /// Built-in entity name.
    #[arg(value_name = "ENTITY", help = "Built-in entity")]
    pub entity: String,
}

// ── entities / categories ─────────────────────────────────────────────────────

/// Arguments for `formdex entities`.
#[derive(Debug, Args)]
pub struct EntitiesArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Arguments for `formdex categories`.
#[derive(Debug, Args)]
pub struct CategoriesArgs {
    /// Show one table's entries instead of the table list.
    #[arg(value_name = "TABLE", help = "Category table to show")]
    pub table: Option<String>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for listing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `formdex completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `formdex config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `tenant.id`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
    /// Write a default configuration file.
    Init {
        /// Overwrite an existing config file.
        #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
        force: bool,
    },
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_validate_command() {
        let cli = Cli::parse_from([
            "formdex",
            "validate",
            "membership",
            "a.json",
            "b.json",
            "--field",
            "dateOfExit",
        ]);
        let Commands::Validate(args) = cli.command else {
            panic!("expected Validate command");
        };
        assert_eq!(args.entity, "membership");
        assert_eq!(args.files.len(), 2);
        assert_eq!(args.field.as_deref(), Some("dateOfExit"));
    }

    #[test]
    fn validate_needs_a_file() {
        assert!(Cli::try_parse_from(["formdex", "validate", "membership"]).is_err());
    }

    #[test]
    fn global_flags_work_after_the_subcommand() {
        let cli = Cli::parse_from(["formdex", "entities", "--tenant", "club-1", "-vv"]);
        assert_eq!(cli.global.tenant.as_deref(), Some("club-1"));
        assert_eq!(cli.global.verbose, 2);
    }

    #[test]
    fn categories_table_is_optional() {
        let cli = Cli::parse_from(["formdex", "categories", "--format", "csv"]);
        let Commands::Categories(args) = cli.command else {
            panic!("expected Categories command");
        };
        assert!(args.table.is_none());
        assert_eq!(args.format, ListFormat::Csv);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        // clap should reject --quiet --verbose together
        let result = Cli::try_parse_from(["formdex", "--quiet", "--verbose", "entities"]);
        assert!(result.is_err());
    }
}
