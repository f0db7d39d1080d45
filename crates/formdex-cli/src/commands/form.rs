//! Implementation of the `formdex form` command.
//!
//! Opens a create session for a built-in entity and prints its defaulted
//! form, so a new document can start from it.

use serde::Serialize;
use tracing::instrument;

use formdex_core::{
    application::FormService,
    domain::{FormMapping, records},
    error::FormdexError,
};

use crate::{
    cli::{FormArgs, GlobalArgs},
    commands::entity_service,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(entity = %args.entity))]
pub fn execute(
    args: FormArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let forms = FormService::new(entity_service(&global, &config)?);
    forms
        .entities()
        .registry()
        .require(&args.entity)
        .map_err(FormdexError::from)?;

    match args.entity.as_str() {
        records::calendar_event::ENTITY => print_form::<records::CalendarEvent>(&forms, &output),
        records::document::ENTITY => print_form::<records::Document>(&forms, &output),
        records::invitation::ENTITY => print_form::<records::Invitation>(&forms, &output),
        records::membership::ENTITY => print_form::<records::Membership>(&forms, &output),
        records::ownership::ENTITY => print_form::<records::Ownership>(&forms, &output),
        records::page::ENTITY => print_form::<records::Page>(&forms, &output),
        records::reservation::ENTITY => print_form::<records::Reservation>(&forms, &output),
        records::section::ENTITY => print_form::<records::Section>(&forms, &output),
        records::task::ENTITY => print_form::<records::Task>(&forms, &output),
        records::work_relationship::ENTITY => {
            print_form::<records::WorkRelationship>(&forms, &output)
        }
        _ => Err(CliError::NoBuiltinForm {
            entity: args.entity,
        }),
    }
}

fn print_form<E>(forms: &FormService, output: &OutputManager) -> CliResult<()>
where
    E: FormMapping,
    E::Form: Serialize,
{
    let mut session = forms.create::<E>()?;
    let pending: Vec<String> = session.validate().fields().map(str::to_owned).collect();
    output.json(session.form())?;
    if !pending.is_empty() {
        output.note(&format!("Still to fill in: {}", pending.join(", ")))?;
    }
    session.cancel();
    Ok(())
}
