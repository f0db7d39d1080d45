pub mod cross_field;
pub mod field_spec;
pub mod index_spec;
pub mod record;
pub mod schema;
pub mod suite;
pub mod validation_result;

pub use cross_field::{CrossFieldRule, RuleKind};
pub use field_spec::FieldSpec;
pub use index_spec::{IndexSpec, IndexSpecBuilder, IndexToken, SearchIndex, TokenSource};
pub use record::{Entity, FieldValue, Record, format_number};
pub use schema::{EntitySchema, SchemaRegistry};
pub use suite::{ValidationSuite, ValidationSuiteBuilder};
pub use validation_result::{ValidationResult, keys};
