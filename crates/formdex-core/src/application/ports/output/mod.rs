//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from its surroundings.
//! The `formdex-adapters` crate provides implementations.

/// Port for the current date.
///
/// Implemented by:
/// - `formdex_adapters::clock::SystemClock` (production)
/// - `formdex_adapters::clock::FixedClock` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    /// Today as a `YYYYMMDD` store date.
    fn today(&self) -> String;
}

/// Port for the ambient tenant.
///
/// Mappers read the tenant id when creating entities but never change it.
///
/// Implemented by:
/// - `formdex_adapters::tenant::StaticTenant`
#[cfg_attr(test, mockall::automock)]
pub trait TenantContext: Send + Sync {
    /// Identifier of the tenant new entities belong to.
    fn tenant_id(&self) -> String;
}
