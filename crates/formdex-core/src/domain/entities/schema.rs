//! Entity schemas and the registry that holds them.

use std::collections::BTreeMap;

use crate::domain::categories::{CategoryRegistry, CategoryTable};
use crate::domain::entities::{
    Entity, IndexSpec, Record, SearchIndex, TokenSource, ValidationResult, ValidationSuite,
};
use crate::domain::error::DomainError;
use crate::domain::value_objects::FieldKind;

// ── EntitySchema ─────────────────────────────────────────────────────────────

/// Validation suite and index spec of one entity type.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySchema {
    suite: ValidationSuite,
    index: IndexSpec,
    description: String,
}

impl EntitySchema {
    /// Pair a suite with an index spec.
    ///
    /// Both must describe the same entity, and every field an index token
    /// reads must be a declared field of the suite.
    pub fn new(suite: ValidationSuite, index: IndexSpec) -> Result<Self, DomainError> {
        if suite.entity() != index.entity() {
            return Err(DomainError::EntityMismatch {
                entity: suite.entity().to_owned(),
                index: index.entity().to_owned(),
            });
        }
        for token in index.tokens() {
            if let Some(missing) = token
                .source
                .fields()
                .into_iter()
                .find(|f| !suite.has_field(f))
            {
                return Err(DomainError::UnknownField {
                    entity: suite.entity().to_owned(),
                    field: missing.to_owned(),
                    context: format!("index token '{}'", token.token),
                });
            }
        }
        Ok(Self {
            suite,
            index,
            description: String::new(),
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn entity(&self) -> &str {
        self.suite.entity()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn suite(&self) -> &ValidationSuite {
        &self.suite
    }

    pub fn index(&self) -> &IndexSpec {
        &self.index
    }

    /// Every category table the schema depends on.
    pub fn category_tables(&self) -> impl Iterator<Item = &str> {
        let from_fields = self
            .suite
            .fields()
            .iter()
            .filter(|f| f.kind == FieldKind::Category)
            .filter_map(|f| f.category.as_deref());
        let from_tokens = self.index.tokens().iter().filter_map(|t| match &t.source {
            TokenSource::Category { table, .. } => Some(table.as_str()),
            _ => None,
        });
        from_fields.chain(from_tokens)
    }
}

// ── SchemaRegistry ───────────────────────────────────────────────────────────

/// Every entity schema of the process plus the category tables they use.
///
/// Constructed once at startup, then shared read-only. Registration fails
/// fast on any inconsistency, so a registry that exists is sound.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    categories: CategoryRegistry,
    schemas: BTreeMap<String, EntitySchema>,
}

impl SchemaRegistry {
    pub fn new(categories: CategoryRegistry) -> Self {
        Self {
            categories,
            schemas: BTreeMap::new(),
        }
    }

    /// Built-in category tables and the schemas of every built-in entity.
    pub fn builtin() -> Result<Self, DomainError> {
        let mut registry = Self::new(CategoryRegistry::builtin()?);
        for schema in crate::domain::records::builtin_schemas()? {
            registry.register(schema)?;
        }
        Ok(registry)
    }

    /// Add a category table. Must happen before schemas that use it.
    pub fn register_table(&mut self, table: CategoryTable) -> Result<(), DomainError> {
        self.categories.register(table)
    }

    pub fn register(&mut self, schema: EntitySchema) -> Result<(), DomainError> {
        if self.schemas.contains_key(schema.entity()) {
            return Err(DomainError::DuplicateEntity {
                entity: schema.entity().to_owned(),
            });
        }
        for table in schema.category_tables() {
            self.categories.require(table)?;
        }
        self.schemas.insert(schema.entity().to_owned(), schema);
        Ok(())
    }

    pub fn categories(&self) -> &CategoryRegistry {
        &self.categories
    }

    pub fn schema(&self, entity: &str) -> Option<&EntitySchema> {
        self.schemas.get(entity)
    }

    pub fn require(&self, entity: &str) -> Result<&EntitySchema, DomainError> {
        self.schema(entity)
            .ok_or_else(|| DomainError::UnknownEntity {
                entity: entity.to_owned(),
            })
    }

    /// Registered schemas in entity name order.
    pub fn schemas(&self) -> impl Iterator<Item = &EntitySchema> {
        self.schemas.values()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Run the suite of `entity` against a snapshot.
    ///
    /// Only an unregistered entity name is an error.
    pub fn validate(
        &self,
        entity: &str,
        record: &dyn Record,
        only: Option<&str>,
    ) -> Result<ValidationResult, DomainError> {
        Ok(self.require(entity)?.suite().run(record, only, &self.categories))
    }

    pub fn build_index(&self, entity: &str, record: &dyn Record) -> Result<SearchIndex, DomainError> {
        Ok(self.require(entity)?.index().build(record, &self.categories))
    }

    pub fn validate_entity<E: Entity>(
        &self,
        entity: &E,
        only: Option<&str>,
    ) -> Result<ValidationResult, DomainError> {
        self.validate(E::ENTITY, entity, only)
    }

    /// Rebuild the index of a typed entity and store it on the entity.
    pub fn index_entity<E: Entity>(&self, entity: &mut E) -> Result<SearchIndex, DomainError> {
        let index = self.build_index(E::ENTITY, &*entity)?;
        entity.set_index(index.as_str().to_owned());
        Ok(index)
    }
}
