//! Formdex Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers of Formdex, a
//! category-driven validation and search-index engine for tenant-owned
//! records, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           formdex-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │      (EntityService, FormService)       │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │        (Driven: Clock, Tenant)          │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     formdex-adapters (Infrastructure)   │
//! │  (SystemClock, JsonRecord, Manifests)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (Categories, Suites, Index Specs, Forms)│
//! │         No External Dependencies        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use formdex_core::prelude::*;
//! use formdex_core::domain::records::{Membership, MembershipForm};
//!
//! # fn run(clock: Arc<dyn Clock>, tenant: Arc<dyn TenantContext>) -> FormdexResult<()> {
//! // 1. Build the registry once at startup
//! let registry = Arc::new(SchemaRegistry::builtin()?);
//!
//! // 2. Inject it together with the adapters
//! let service = EntityService::new(registry, clock, tenant);
//!
//! // 3. Map, index and validate before the write
//! let form = MembershipForm {
//!     member_name: Some("Jane Doe".into()),
//!     ..service.new_form::<Membership>()?
//! };
//! let membership: Membership = service.create_from_form(&form)?;
//! println!("{}", membership.index);
//! # Ok(())
//! # }
//! ```

// Domain layer (stable, well-defined API)
pub mod domain;

// Application layer (orchestration logic)
pub mod application;

// Error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, EntityService, FormService, FormSession,
        ports::{Clock, TenantContext},
    };
    pub use crate::domain::{
        AccessRole, Category, CategoryId, CategoryRegistry, CategoryTable, CrossFieldRule,
        DateOrdering, DomainError, EmptyTokenPolicy, Entity, EntitySchema, FieldKind, FieldSpec,
        FieldValue, FormMapping, FormModel, IndexSpec, MappingContext, Record, SchemaRegistry,
        SearchIndex, ValidationResult, ValidationSuite, keys,
    };
    pub use crate::error::{FormdexError, FormdexResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
