//! Filesystem-based schema manifest loader.
//!
//! Discovers `*.toml` manifests under a directory tree and turns each into
//! an [`EntitySchema`] (plus any category tables it declares), ready to be
//! registered next to the built-in entities.
//!
//! # Directory layout expected
//!
//! ```text
//! schemas/
//! ├── boat.toml
//! └── fleet/
//!     └── trailer.toml
//! ```
//!
//! # Manifest format
//!
//! ```toml
//! [entity]
//! name        = "boat"
//! description = "Boats of the club fleet"     # optional
//!
//! [[categories]]                               # optional, zero or more
//! name    = "boat_type"
//! default = 0
//! entries = [
//!   { id = 0, abbreviation = "ROW", name = "boatType.rowing" },
//!   { id = 1, abbreviation = "SAI", name = "boatType.sailing", icon = "boat-outline" },
//! ]
//!
//! [[fields]]
//! name     = "name"
//! kind     = "string"                          # string | number | date | category | boolean
//! required = true
//! max      = 30
//!
//! [[fields]]
//! name     = "type"
//! kind     = "category"
//! category = "boat_type"
//!
//! [[rules]]
//! type     = "date-order"                      # date-order | required-with | required-when
//! start    = "builtOn"
//! end      = "retiredOn"
//! ordering = "strict"                          # strict | allow-equal
//!
//! [index]
//! policy = "skip-empty"                        # skip-empty | always
//! tokens = [
//!   { token = "n", field = "name" },
//!   { token = "bt", field = "type", table = "boat_type" },
//!   { token = "o", fields = ["ownerFirstName", "ownerLastName"] },
//! ]
//! ```
//!
//! Loading is fail-fast: one malformed manifest aborts the whole load, so a
//! process never starts with a partial schema set.

use std::{
    borrow::Cow,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{debug, info, instrument};
use walkdir::WalkDir;

use formdex_core::{
    application::ApplicationError,
    domain::{
        Category, CategoryId, CategoryTable, CrossFieldRule, DateOrdering, DomainError,
        EmptyTokenPolicy, EntitySchema, FieldSpec, IndexSpec, SchemaRegistry, ValidationSuite,
    },
    error::FormdexResult,
};

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised representation of one schema manifest.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct SchemaManifest {
    pub entity: EntitySection,
    #[serde(default)]
    pub categories: Vec<CategoryEntry>,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    #[serde(default)]
    pub rules: Vec<RuleEntry>,
    #[serde(default)]
    pub index: IndexSection,
}

/// `[entity]` section.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct EntitySection {
    pub name: String,
    pub description: Option<String>,
}

/// One `[[categories]]` table.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct CategoryEntry {
    pub name: String,
    pub default: CategoryId,
    pub entries: Vec<CategoryItem>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct CategoryItem {
    pub id: CategoryId,
    pub abbreviation: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
}

/// One `[[rules]]` entry. `name` and `message` fall back to the rule's
/// defaults.
#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "type", rename_all = "kebab-case", deny_unknown_fields)]
pub enum RuleEntry {
    DateOrder {
        start: String,
        end: String,
        #[serde(default = "strict")]
        ordering: DateOrdering,
        name: Option<String>,
        message: Option<String>,
    },
    RequiredWith {
        field: String,
        trigger: String,
        name: Option<String>,
        message: Option<String>,
    },
    RequiredWhen {
        field: String,
        trigger: String,
        equals: String,
        name: Option<String>,
        message: Option<String>,
    },
}

fn strict() -> DateOrdering {
    DateOrdering::Strict
}

/// `[index]` section.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct IndexSection {
    #[serde(default)]
    pub policy: EmptyTokenPolicy,
    #[serde(default)]
    pub tokens: Vec<TokenEntry>,
}

/// One index token: a plain field, a category field (`table` set) or
/// several fields joined with spaces (`fields` set).
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct TokenEntry {
    pub token: String,
    pub field: Option<String>,
    pub table: Option<String>,
    pub fields: Option<Vec<String>>,
}

impl RuleEntry {
    fn into_rule(self) -> CrossFieldRule {
        let (mut rule, name, message) = match self {
            Self::DateOrder {
                start,
                end,
                ordering,
                name,
                message,
            } => (CrossFieldRule::date_order(start, end, ordering), name, message),
            Self::RequiredWith {
                field,
                trigger,
                name,
                message,
            } => (CrossFieldRule::required_with(field, trigger), name, message),
            Self::RequiredWhen {
                field,
                trigger,
                equals,
                name,
                message,
            } => (
                CrossFieldRule::required_when(field, trigger, equals),
                name,
                message,
            ),
        };
        if let Some(name) = name {
            rule.name = name;
        }
        if let Some(message) = message {
            rule = rule.with_message(message);
        }
        rule
    }
}

impl CategoryEntry {
    fn into_table(self) -> Result<CategoryTable, DomainError> {
        let entries: Vec<Category> = self
            .entries
            .into_iter()
            .map(|item| Category {
                id: item.id,
                abbreviation: Cow::Owned(item.abbreviation),
                name: Cow::Owned(item.name),
                icon: Cow::Owned(item.icon),
            })
            .collect();
        CategoryTable::new(self.name, entries, self.default)
    }
}

impl SchemaManifest {
    /// Parse a manifest; `source_name` names it in errors.
    pub fn parse(raw: &str, source_name: &str) -> Result<Self, ApplicationError> {
        toml::from_str(raw).map_err(|e| load_error(source_name, e))
    }

    /// Split into category tables and the entity schema.
    pub fn into_parts(self) -> Result<(Vec<CategoryTable>, EntitySchema), DomainError> {
        let tables = self
            .categories
            .into_iter()
            .map(CategoryEntry::into_table)
            .collect::<Result<Vec<_>, _>>()?;

        let entity = self.entity.name;
        let suite = ValidationSuite::new(
            entity.clone(),
            self.fields,
            self.rules.into_iter().map(RuleEntry::into_rule).collect(),
        )?;

        let mut index = IndexSpec::builder(entity).policy(self.index.policy);
        for entry in &self.index.tokens {
            index = match (&entry.field, &entry.table, &entry.fields) {
                (Some(field), None, None) => index.field(&entry.token, field),
                (Some(field), Some(table), None) => index.category(&entry.token, field, table),
                (None, None, Some(fields)) => {
                    let fields: Vec<&str> = fields.iter().map(String::as_str).collect();
                    index.joined(&entry.token, &fields)
                }
                _ => {
                    return Err(DomainError::InvalidToken {
                        token: entry.token.clone(),
                        reason: "set either `field` (with an optional `table`) or `fields`"
                            .into(),
                    });
                }
            };
        }

        let mut schema = EntitySchema::new(suite, index.build()?)?;
        if let Some(description) = self.entity.description {
            schema = schema.with_description(description);
        }
        Ok((tables, schema))
    }
}

fn load_error(source_name: &str, reason: impl std::fmt::Display) -> ApplicationError {
    ApplicationError::SchemaLoad {
        source_name: source_name.to_owned(),
        reason: reason.to_string(),
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Loads schema manifests from a directory tree.
///
/// # Example
///
/// ```no_run
/// use formdex_adapters::SchemaManifestLoader;
/// use formdex_core::domain::SchemaRegistry;
///
/// let mut registry = SchemaRegistry::builtin()?;
/// let added = SchemaManifestLoader::new("./schemas").load_into(&mut registry)?;
/// println!("Loaded {added} extra schemas");
/// # Ok::<(), formdex_core::error::FormdexError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SchemaManifestLoader {
    dir: PathBuf,
}

impl SchemaManifestLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Every `*.toml` file under the directory, sorted by path.
    pub fn manifest_paths(&self) -> Result<Vec<PathBuf>, ApplicationError> {
        let source = self.dir.display().to_string();
        if !self.dir.is_dir() {
            return Err(load_error(&source, "schema directory not found"));
        }

        let mut paths = Vec::new();
        for entry in WalkDir::new(&self.dir).sort_by_file_name() {
            let entry = entry.map_err(|e| load_error(&source, e))?;
            let is_toml = entry.path().extension().is_some_and(|ext| ext == "toml");
            if entry.file_type().is_file() && is_toml {
                paths.push(entry.into_path());
            }
        }
        Ok(paths)
    }

    /// Parse every manifest. The first failure aborts the load.
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    pub fn load_all(&self) -> Result<Vec<SchemaManifest>, ApplicationError> {
        let mut manifests = Vec::new();
        for path in self.manifest_paths()? {
            let source = path.display().to_string();
            let raw = fs::read_to_string(&path).map_err(|e| load_error(&source, e))?;
            let manifest = SchemaManifest::parse(&raw, &source)?;
            debug!(entity = %manifest.entity.name, path = %source, "Parsed schema manifest");
            manifests.push(manifest);
        }
        Ok(manifests)
    }

    /// Register every manifest's category tables, then every schema.
    ///
    /// Tables go first so a manifest may use a table declared in another.
    /// Returns the number of schemas added.
    #[instrument(skip_all, fields(dir = %self.dir.display()))]
    pub fn load_into(&self, registry: &mut SchemaRegistry) -> FormdexResult<usize> {
        let mut schemas = Vec::new();
        for manifest in self.load_all()? {
            let name = manifest.entity.name.clone();
            let (tables, schema) = manifest.into_parts().map_err(|e| load_error(&name, e))?;
            for table in tables {
                registry
                    .register_table(table)
                    .map_err(|e| load_error(&name, e))?;
            }
            schemas.push(schema);
        }

        let count = schemas.len();
        for schema in schemas {
            let name = schema.entity().to_owned();
            registry.register(schema).map_err(|e| load_error(&name, e))?;
        }
        info!(count, "Schema manifests loaded");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formdex_core::domain::keys;
    use std::collections::HashMap;
    use tempfile::TempDir;

    const BOAT: &str = r#"
        [entity]
        name = "boat"
        description = "Boats of the club fleet"

        [[categories]]
        name = "boat_type"
        default = 0
        entries = [
          { id = 0, abbreviation = "ROW", name = "boatType.rowing" },
          { id = 1, abbreviation = "SAI", name = "boatType.sailing" },
        ]

        [[fields]]
        name = "name"
        kind = "string"
        required = true
        max = 30

        [[fields]]
        name = "type"
        kind = "category"
        category = "boat_type"

        [[fields]]
        name = "builtOn"
        kind = "date"

        [[fields]]
        name = "retiredOn"
        kind = "date"

        [[rules]]
        type = "date-order"
        start = "builtOn"
        end = "retiredOn"

        [index]
        policy = "always"
        tokens = [
          { token = "n", field = "name" },
          { token = "bt", field = "type", table = "boat_type" },
        ]
    "#;

    fn write(dir: &TempDir, name: &str, raw: &str) {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, raw).unwrap();
    }

    fn doc(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn manifest_becomes_a_working_schema() {
        let dir = TempDir::new().unwrap();
        write(&dir, "boat.toml", BOAT);
        let mut registry = SchemaRegistry::builtin().unwrap();

        let added = SchemaManifestLoader::new(dir.path())
            .load_into(&mut registry)
            .unwrap();
        assert_eq!(added, 1);
        assert_eq!(registry.require("boat").unwrap().description(), "Boats of the club fleet");

        let boat = doc(&[
            ("name", "Vega"),
            ("type", "1"),
            ("builtOn", "20100101"),
            ("retiredOn", "20090101"),
        ]);
        let result = registry.validate("boat", &boat, None).unwrap();
        assert_eq!(result.errors("retiredOn"), [keys::DATE_ORDER]);
        assert_eq!(registry.build_index("boat", &boat).unwrap().as_str(), "n:Vega bt:SAI");
    }

    #[test]
    fn nested_manifests_are_found_and_other_files_ignored() {
        let dir = TempDir::new().unwrap();
        write(&dir, "fleet/boat.toml", BOAT);
        write(&dir, "README.md", "# schemas");
        let loader = SchemaManifestLoader::new(dir.path());
        assert_eq!(loader.manifest_paths().unwrap().len(), 1);
    }

    #[test]
    fn broken_manifest_fails_the_whole_load() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.toml", BOAT);
        write(&dir, "b.toml", "[entity]\nname = ");
        let err = SchemaManifestLoader::new(dir.path()).load_all().unwrap_err();
        assert!(matches!(err, ApplicationError::SchemaLoad { ref source_name, .. } if source_name.ends_with("b.toml")));
    }

    #[test]
    fn unknown_index_field_is_rejected() {
        let raw = BOAT.replace(r#"{ token = "n", field = "name" }"#, r#"{ token = "n", field = "title" }"#);
        let manifest = SchemaManifest::parse(&raw, "boat.toml").unwrap();
        assert!(matches!(
            manifest.into_parts(),
            Err(DomainError::UnknownField { .. })
        ));
    }

    #[test]
    fn misspelled_key_fails_the_load() {
        for (from, to) in [
            ("required = true", "requried = true"),
            (r#"description = "Boats"#, r#"descripton = "Boats"#),
            (r#"{ token = "n", field = "name" }"#, r#"{ token = "n", feild = "name" }"#),
            (r#"end = "retiredOn""#, "end = \"retiredOn\"\nordring = \"strict\""),
            (r#"name = "boatType.rowing" }"#, r#"name = "boatType.rowing", icn = "oar" }"#),
        ] {
            let raw = BOAT.replace(from, to);
            assert_ne!(raw, BOAT, "{from} not found in manifest");
            let err = SchemaManifest::parse(&raw, "boat.toml").unwrap_err();
            assert!(matches!(err, ApplicationError::SchemaLoad { .. }), "{to}");
        }
    }

    #[test]
    fn ambiguous_token_is_rejected() {
        let raw = BOAT.replace(
            r#"{ token = "n", field = "name" }"#,
            r#"{ token = "n", field = "name", fields = ["name"] }"#,
        );
        let manifest = SchemaManifest::parse(&raw, "boat.toml").unwrap();
        assert!(matches!(
            manifest.into_parts(),
            Err(DomainError::InvalidToken { .. })
        ));
    }

    #[test]
    fn builtin_entity_names_cannot_be_reused() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "task.toml",
            "[entity]\nname = \"task\"\n[[fields]]\nname = \"name\"\nkind = \"string\"\n",
        );
        let mut registry = SchemaRegistry::builtin().unwrap();
        assert!(
            SchemaManifestLoader::new(dir.path())
                .load_into(&mut registry)
                .is_err()
        );
    }

    #[test]
    fn missing_directory_is_a_load_error() {
        let loader = SchemaManifestLoader::new("/definitely/not/here");
        assert!(matches!(
            loader.load_all(),
            Err(ApplicationError::SchemaLoad { .. })
        ));
    }
}
