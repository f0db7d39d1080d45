//! Application services - orchestrate use cases.
//!
//! Services sit between the schema registry and the outside world: the
//! persistence boundary ("prepare this entity for a write") and the form
//! boundary ("let a user edit this entity").

pub mod entity_service;
pub mod form_service;

pub use entity_service::EntityService;
pub use form_service::{FormService, FormSession};
