//! Core domain layer for Formdex.
//!
//! This module contains the validation and indexing engine with ZERO I/O.
//! Clocks, tenants and storage are reached through ports defined in the
//! application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No logging**: Failures surface as values, never as events
//! - **Immutable configuration**: Suites, index specs and registries are built
//!   once and only read afterwards
//! - **Data over code**: Per-entity behaviour is declared, not programmed

pub mod categories;
pub mod entities;
pub mod error;
pub mod records;
pub mod validators;
pub mod value_objects;

pub use categories::{Category, CategoryId, CategoryRegistry, CategoryTable};

pub use entities::{
    CrossFieldRule, Entity, EntitySchema, FieldSpec, FieldValue, IndexSpec, IndexToken, Record,
    RuleKind, SchemaRegistry, SearchIndex, TokenSource, ValidationResult, ValidationSuite, keys,
};

pub use error::{DomainError, ErrorCategory};

pub use records::{FormMapping, FormModel, MappingContext};

pub use value_objects::{
    AccessRole, DateOrdering, EmptyTokenPolicy, FieldKind, OPEN_END_DATE, is_store_date,
};
