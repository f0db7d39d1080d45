//! Infrastructure adapters for Formdex.
//!
//! This crate implements the ports defined in `formdex-core::application::ports`
//! and everything else that touches the outside world: the clock, the
//! tenant context, JSON documents and TOML schema manifests.

pub mod clock;
pub mod json_record;
pub mod schema_loader;
pub mod tenant;

// Re-export commonly used adapters
pub use clock::{FixedClock, SystemClock};
pub use json_record::{JsonRecord, JsonRecordError};
pub use schema_loader::{SchemaManifest, SchemaManifestLoader};
pub use tenant::StaticTenant;
