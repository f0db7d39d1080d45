//! Built-in entities: typed records, their form models and mappers.
//!
//! Each submodule declares one entity as data (a [`ValidationSuite`] and an
//! [`IndexSpec`] in its `schema()` function) next to the typed entity
//! struct, its form model, and the conversions between the two.
//!
//! # Adding a New Entity
//!
//! 1. Add a submodule with the entity, its form and `schema()`
//! 2. Implement [`Record`] for both, [`Entity`] and [`FormMapping`]
//! 3. Add its schema to [`builtin_schemas`]
//!
//! [`ValidationSuite`]: crate::domain::entities::ValidationSuite
//! [`IndexSpec`]: crate::domain::entities::IndexSpec
//! [`Record`]: crate::domain::entities::Record

pub mod calendar_event;
pub mod document;
pub mod invitation;
pub mod membership;
pub mod ownership;
pub mod page;
pub mod reservation;
pub mod section;
pub mod task;
pub mod work_relationship;

use std::fmt;

use crate::domain::entities::{Entity, EntitySchema, Record};
use crate::domain::error::DomainError;

pub use calendar_event::{CalendarEvent, CalendarEventForm};
pub use document::{Document, DocumentForm};
pub use invitation::{Invitation, InvitationForm};
pub use membership::{Membership, MembershipForm};
pub use ownership::{Ownership, OwnershipForm};
pub use page::{Page, PageForm};
pub use reservation::{Reservation, ReservationForm};
pub use section::{Section, SectionForm};
pub use task::{Task, TaskForm};
pub use work_relationship::{WorkRelationship, WorkRelationshipForm};

/// Schemas of every built-in entity.
pub fn builtin_schemas() -> Result<Vec<EntitySchema>, DomainError> {
    Ok(vec![
        calendar_event::schema()?,
        document::schema()?,
        invitation::schema()?,
        membership::schema()?,
        ownership::schema()?,
        page::schema()?,
        reservation::schema()?,
        section::schema()?,
        task::schema()?,
        work_relationship::schema()?,
    ])
}

// ── Mapping ──────────────────────────────────────────────────────────────────

/// Ambient values the mappers read: the current tenant and today's date.
///
/// Supplied by the caller so that mapping stays free of I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingContext {
    tenant: String,
    today: String,
}

impl MappingContext {
    /// `today` is a `YYYYMMDD` store date.
    pub fn new(tenant: impl Into<String>, today: impl Into<String>) -> Self {
        Self {
            tenant: tenant.into(),
            today: today.into(),
        }
    }

    pub fn tenant(&self) -> &str {
        &self.tenant
    }

    pub fn today(&self) -> &str {
        &self.today
    }
}

/// The editable projection of an entity: every field optional.
pub trait FormModel: Record + Clone + Default + fmt::Debug {
    /// A blank form with every field at its documented default.
    fn with_defaults(ctx: &MappingContext) -> Self;
}

/// Conversions between a persisted entity and its form model.
pub trait FormMapping: Entity + Clone {
    type Form: FormModel;

    /// A new entity of the context's tenant with safe defaults everywhere.
    fn fresh(ctx: &MappingContext) -> Self;

    /// Project the entity for editing. Total: empty fields get defaults.
    fn to_form(&self, ctx: &MappingContext) -> Self::Form;

    /// Copy every value set on `form` onto `self`.
    fn apply_form(&mut self, form: &Self::Form);

    /// Merge a form onto `base` (an existing entity when editing) or onto a
    /// fresh entity of the context's tenant.
    fn to_entity(form: &Self::Form, base: Option<&Self>, ctx: &MappingContext) -> Self {
        let mut entity = base.cloned().unwrap_or_else(|| Self::fresh(ctx));
        entity.apply_form(form);
        entity
    }
}

// ── Helpers shared by the entity modules ─────────────────────────────────────

/// Overwrite `target` when the form carries a value.
pub(crate) fn merge<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(v) = value {
        target.clone_from(v);
    }
}

/// Like [`merge`] for optional entity numbers.
pub(crate) fn merge_opt(target: &mut Option<f64>, value: &Option<f64>) {
    if value.is_some() {
        *target = *value;
    }
}

/// `value`, or `default` when `value` is blank.
pub(crate) fn or_default(value: &str, default: &str) -> Option<String> {
    if value.trim().is_empty() {
        Some(default.to_owned())
    } else {
        Some(value.to_owned())
    }
}
