//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `formdex-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Clock`: today's date for defaulted date fields
//!   - `TenantContext`: the tenant new entities belong to
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (The services in `crate::application::services`)

pub mod output;

pub use output::{Clock, TenantContext};

#[cfg(test)]
pub use output::{MockClock, MockTenantContext};
