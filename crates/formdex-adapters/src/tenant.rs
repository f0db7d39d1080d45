//! Tenant context adapters.

use formdex_core::application::ports::TenantContext;

/// A tenant fixed for the lifetime of the process, usually from config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticTenant {
    id: String,
}

impl StaticTenant {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl TenantContext for StaticTenant {
    fn tenant_id(&self) -> String {
        self.id.clone()
    }
}
