//! Form Service - the form UI boundary.
//!
//! A [`FormSession`] lives exactly as long as one editing interaction. It
//! owns the form model, tracks whether the user changed anything, and keeps
//! the latest validation outcome for display:
//! 1. Every edit re-validates only the edited field
//! 2. Saving is possible once the form is dirty and fully valid
//! 3. Submitting maps, indexes and validates the entity for the write
//! 4. Cancelling drops everything

use tracing::{debug, instrument};

use crate::{
    application::services::EntityService,
    domain::{EntitySchema, FormMapping, FormModel, MappingContext, ValidationResult},
    error::FormdexResult,
};

/// Opens form sessions for typed entities.
#[derive(Debug, Clone)]
pub struct FormService {
    entities: EntityService,
}

impl FormService {
    pub fn new(entities: EntityService) -> Self {
        Self { entities }
    }

    pub fn entities(&self) -> &EntityService {
        &self.entities
    }

    /// A session for a new entity, starting from the default form.
    #[instrument(skip_all, fields(entity = E::ENTITY))]
    pub fn create<E: FormMapping>(&self) -> FormdexResult<FormSession<'_, E>> {
        let ctx = self.entities.mapping_context()?;
        let form = E::Form::with_defaults(&ctx);
        self.open_with(form, None, ctx)
    }

    /// A session editing `existing`.
    #[instrument(skip_all, fields(entity = E::ENTITY))]
    pub fn edit<E: FormMapping>(&self, existing: E) -> FormdexResult<FormSession<'_, E>> {
        let ctx = self.entities.mapping_context()?;
        let form = existing.to_form(&ctx);
        self.open_with(form, Some(existing), ctx)
    }

    fn open_with<E: FormMapping>(
        &self,
        form: E::Form,
        base: Option<E>,
        ctx: MappingContext,
    ) -> FormdexResult<FormSession<'_, E>> {
        let schema = self.entities.registry().require(E::ENTITY)?;
        debug!("Form session opened");
        Ok(FormSession {
            entities: &self.entities,
            schema,
            ctx,
            form,
            base,
            dirty: false,
            result: ValidationResult::new(),
        })
    }
}

/// One editing interaction over an entity's form model.
#[derive(Debug)]
pub struct FormSession<'s, E: FormMapping> {
    entities: &'s EntityService,
    schema: &'s EntitySchema,
    ctx: MappingContext,
    form: E::Form,
    base: Option<E>,
    dirty: bool,
    result: ValidationResult,
}

impl<'s, E: FormMapping> FormSession<'s, E> {
    pub fn form(&self) -> &E::Form {
        &self.form
    }

    /// The entity being edited, `None` when creating.
    pub fn base(&self) -> Option<&E> {
        self.base.as_ref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Violations gathered so far by edits and full validations.
    pub fn result(&self) -> &ValidationResult {
        &self.result
    }

    /// Change the form and re-validate the edited field only.
    pub fn edit(&mut self, field: &str, change: impl FnOnce(&mut E::Form)) -> &ValidationResult {
        change(&mut self.form);
        self.dirty = true;
        let partial = self.run(Some(field));
        self.result.replace_field(field, &partial);
        &self.result
    }

    /// Run the whole suite against the current form.
    pub fn validate(&mut self) -> &ValidationResult {
        self.result = self.run(None);
        &self.result
    }

    /// Whether a save action should be enabled.
    pub fn can_save(&self) -> bool {
        self.dirty && self.run(None).is_valid()
    }

    /// Convert the form into an entity ready to be written.
    ///
    /// On rejection the session keeps the violations and stays open.
    pub fn submit(&mut self) -> FormdexResult<E> {
        let mut entity = E::to_entity(&self.form, self.base.as_ref(), &self.ctx);
        match self.entities.prepare_write(&mut entity) {
            Ok(_) => {
                self.dirty = false;
                self.result = ValidationResult::new();
                Ok(entity)
            }
            Err(e) => {
                if let Some(violations) = e.violations() {
                    self.result = violations.clone();
                }
                Err(e)
            }
        }
    }

    /// Discard the session and every unsaved change.
    pub fn cancel(self) {
        debug!(entity = E::ENTITY, dirty = self.dirty, "Form session cancelled");
    }

    fn run(&self, only: Option<&str>) -> ValidationResult {
        self.schema
            .suite()
            .run(&self.form, only, self.entities.registry().categories())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockClock, MockTenantContext};
    use crate::domain::records::{Membership, Task};
    use crate::domain::{SchemaRegistry, keys};
    use std::sync::Arc;

    fn forms() -> FormService {
        let mut clock = MockClock::new();
        clock.expect_today().returning(|| "20250301".to_owned());
        let mut tenant = MockTenantContext::new();
        tenant.expect_tenant_id().returning(|| "club-1".to_owned());
        FormService::new(EntityService::new(
            Arc::new(SchemaRegistry::builtin().unwrap()),
            Arc::new(clock),
            Arc::new(tenant),
        ))
    }

    #[test]
    fn new_session_is_clean_and_cannot_save() {
        let forms = forms();
        let session = forms.create::<Membership>().unwrap();
        assert!(!session.is_dirty());
        assert!(!session.can_save());
        assert_eq!(session.form().date_of_entry.as_deref(), Some("20250301"));
    }

    #[test]
    fn edit_validates_only_the_edited_field() {
        let forms = forms();
        let mut session = forms.create::<Membership>().unwrap();
        let result = session.edit("dateOfExit", |f| f.date_of_exit = Some("20200101".into()));
        assert_eq!(result.errors("dateOfExit"), [keys::DATE_ORDER]);
        assert!(!result.has_errors("memberName"));

        let result = session.edit("dateOfExit", |f| f.date_of_exit = Some(String::new()));
        assert!(result.is_valid());
        assert!(session.is_dirty());
    }

    #[test]
    fn dirty_and_valid_form_can_be_saved_and_submitted() {
        let forms = forms();
        let mut session = forms.create::<Task>().unwrap();
        session.edit("name", |f| f.name = Some("Mow the lawn".into()));
        assert!(session.can_save());

        let task = session.submit().unwrap();
        assert_eq!(task.tenant, "club-1");
        assert_eq!(task.index, "n:Mow the lawn s:INI p:M");
        assert!(!session.is_dirty());
    }

    #[test]
    fn rejected_submit_keeps_violations() {
        let forms = forms();
        let mut session = forms.create::<Task>().unwrap();
        session.edit("state", |f| f.state = Some("done".into()));
        assert!(!session.can_save());
        assert!(session.submit().is_err());
        assert!(session.result().has_errors("name"));
        assert!(session.result().has_errors("completionDate"));
        session.cancel();
    }

    #[test]
    fn editing_an_entity_merges_onto_it() {
        let forms = forms();
        let existing = Task {
            id: "t-7".into(),
            tenant: "club-2".into(),
            name: "Old".into(),
            state: "doing".into(),
            priority: 0,
            ..Task::default()
        };
        let mut session = forms.edit(existing).unwrap();
        session.edit("name", |f| f.name = Some("New".into()));
        let task = session.submit().unwrap();
        assert_eq!(task.id, "t-7");
        assert_eq!(task.tenant, "club-2");
        assert_eq!(task.name, "New");
    }
}
