//! Entity Service - the persistence boundary.
//!
//! Before any create or update the persistence layer hands the entity to
//! this service, which:
//! 1. Rebuilds the search index and stores it on the entity
//! 2. Runs the full validation suite
//! 3. Rejects the write with every violation when the entity is invalid

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Clock, TenantContext},
    },
    domain::{
        Entity, FormMapping, FormModel, MappingContext, Record, SchemaRegistry, SearchIndex,
        ValidationResult, is_store_date,
    },
    error::FormdexResult,
};

/// Validates, indexes and maps entities against a shared schema registry.
///
/// Cheap to clone: the registry and ports are shared.
#[derive(Clone)]
pub struct EntityService {
    registry: Arc<SchemaRegistry>,
    clock: Arc<dyn Clock>,
    tenant: Arc<dyn TenantContext>,
}

impl EntityService {
    /// Create a new entity service with the given registry and adapters.
    pub fn new(
        registry: Arc<SchemaRegistry>,
        clock: Arc<dyn Clock>,
        tenant: Arc<dyn TenantContext>,
    ) -> Self {
        Self {
            registry,
            clock,
            tenant,
        }
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// The ambient values mappers read, taken from the ports.
    pub fn mapping_context(&self) -> FormdexResult<MappingContext> {
        let tenant = self.tenant.tenant_id();
        if tenant.trim().is_empty() {
            return Err(ApplicationError::MissingTenant.into());
        }
        let today = self.clock.today();
        if !is_store_date(&today) {
            return Err(ApplicationError::InvalidClock { value: today }.into());
        }
        Ok(MappingContext::new(tenant, today))
    }

    // ── Loose documents ──────────────────────────────────────────────────

    /// Validate any record against the schema registered as `entity`.
    #[instrument(skip_all, fields(entity = %entity, only = ?only))]
    pub fn validate_document(
        &self,
        entity: &str,
        record: &dyn Record,
        only: Option<&str>,
    ) -> FormdexResult<ValidationResult> {
        let result = self.registry.validate(entity, record, only)?;
        debug!(violations = result.len(), "Document validated");
        Ok(result)
    }

    /// Build the search index of any record registered as `entity`.
    #[instrument(skip_all, fields(entity = %entity))]
    pub fn index_document(&self, entity: &str, record: &dyn Record) -> FormdexResult<SearchIndex> {
        Ok(self.registry.build_index(entity, record)?)
    }

    // ── Typed entities ───────────────────────────────────────────────────

    pub fn validate<E: Entity>(
        &self,
        entity: &E,
        only: Option<&str>,
    ) -> FormdexResult<ValidationResult> {
        Ok(self.registry.validate_entity(entity, only)?)
    }

    /// Assign a fresh index, then validate the whole entity.
    ///
    /// The index is assigned even when validation fails, so the entity
    /// always reflects its current state.
    #[instrument(skip_all, fields(entity = E::ENTITY))]
    pub fn prepare_write<E: Entity>(&self, entity: &mut E) -> FormdexResult<SearchIndex> {
        let index = self.registry.index_entity(entity)?;
        let result = self.registry.validate_entity(&*entity, None)?;

        if !result.is_valid() {
            warn!(
                violations = result.len(),
                fields = ?result.fields().collect::<Vec<_>>(),
                "Write rejected"
            );
            return Err(ApplicationError::ValidationFailed {
                entity: E::ENTITY.to_owned(),
                result,
            }
            .into());
        }

        debug!(index = %index, "Entity ready for write");
        Ok(index)
    }

    /// Map a form onto a fresh entity of the current tenant and prepare it.
    #[instrument(skip_all, fields(entity = E::ENTITY))]
    pub fn create_from_form<E: FormMapping>(&self, form: &E::Form) -> FormdexResult<E> {
        let ctx = self.mapping_context()?;
        let mut entity = E::to_entity(form, None, &ctx);
        self.prepare_write(&mut entity)?;
        info!(tenant = ctx.tenant(), "Entity created");
        Ok(entity)
    }

    /// Map a form onto an existing entity and prepare the result.
    #[instrument(skip_all, fields(entity = E::ENTITY))]
    pub fn update_from_form<E: FormMapping>(
        &self,
        form: &E::Form,
        existing: &E,
    ) -> FormdexResult<E> {
        let ctx = self.mapping_context()?;
        let mut entity = E::to_entity(form, Some(existing), &ctx);
        self.prepare_write(&mut entity)?;
        info!("Entity updated");
        Ok(entity)
    }

    /// A blank form with every default filled in.
    pub fn new_form<E: FormMapping>(&self) -> FormdexResult<E::Form> {
        Ok(E::Form::with_defaults(&self.mapping_context()?))
    }
}

impl std::fmt::Debug for EntityService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityService")
            .field("entities", &self.registry.len())
            .finish_non_exhaustive()
    }
}
