//! Calendar events.

use serde::{Deserialize, Serialize};

use super::{FormMapping, FormModel, MappingContext, merge, or_default};
use crate::domain::categories::{CALENDAR_EVENT_TYPE, DEFAULT_CALENDAR_EVENT_TYPE};
use crate::domain::entities::{
    CrossFieldRule, Entity, EntitySchema, FieldSpec, FieldValue, IndexSpec, Record,
    ValidationSuite,
};
use crate::domain::error::DomainError;
use crate::domain::value_objects::{DateOrdering, EmptyTokenPolicy};

pub const ENTITY: &str = "calendar_event";

/// `n:` name, `sd:` start date, `et:` event type abbreviation.
pub fn schema() -> Result<EntitySchema, DomainError> {
    let suite = ValidationSuite::builder(ENTITY)
        .field(FieldSpec::text("name").length(0, 30).required())
        .field(FieldSpec::text("description").max(1000.0))
        .field(FieldSpec::category("type", CALENDAR_EVENT_TYPE).required())
        .field(FieldSpec::date("startDate").required())
        .field(FieldSpec::text("startTime").length(0, 5))
        .field(FieldSpec::date("endDate"))
        .field(FieldSpec::text("endTime").length(0, 5))
        .field(FieldSpec::text("location").max(100.0))
        .field(FieldSpec::text("url").max(1000.0))
        .rule(CrossFieldRule::date_order("startDate", "endDate", DateOrdering::AllowEqual))
        .rule(CrossFieldRule::required_with("startTime", "endTime"))
        .build()?;
    let index = IndexSpec::builder(ENTITY)
        .field("n", "name")
        .field("sd", "startDate")
        .category("et", "type", CALENDAR_EVENT_TYPE)
        .policy(EmptyTokenPolicy::SkipEmpty)
        .build()?;
    Ok(EntitySchema::new(suite, index)?.with_description("Calendar events of a tenant"))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalendarEvent {
    pub id: String,
    pub tenant: String,
    pub index: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub event_type: i64,
    pub start_date: String,
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
    pub location: String,
    pub url: String,
}

impl Record for CalendarEvent {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "name" => (&self.name).into(),
            "description" => (&self.description).into(),
            "type" => self.event_type.into(),
            "startDate" => (&self.start_date).into(),
            "startTime" => (&self.start_time).into(),
            "endDate" => (&self.end_date).into(),
            "endTime" => (&self.end_time).into(),
            "location" => (&self.location).into(),
            "url" => (&self.url).into(),
            _ => FieldValue::Absent,
        }
    }
}

impl Entity for CalendarEvent {
    const ENTITY: &'static str = ENTITY;

    fn tenant(&self) -> &str {
        &self.tenant
    }

    fn set_index(&mut self, index: String) {
        self.index = index;
    }

    fn index(&self) -> &str {
        &self.index
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventForm {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<i64>,
    pub start_date: Option<String>,
    pub start_time: Option<String>,
    pub end_date: Option<String>,
    pub end_time: Option<String>,
    pub location: Option<String>,
    pub url: Option<String>,
}

impl Record for CalendarEventForm {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "name" => self.name.as_ref().into(),
            "description" => self.description.as_ref().into(),
            "type" => self.event_type.into(),
            "startDate" => self.start_date.as_ref().into(),
            "startTime" => self.start_time.as_ref().into(),
            "endDate" => self.end_date.as_ref().into(),
            "endTime" => self.end_time.as_ref().into(),
            "location" => self.location.as_ref().into(),
            "url" => self.url.as_ref().into(),
            _ => FieldValue::Absent,
        }
    }
}

impl FormModel for CalendarEventForm {
    /// Text empty, type "other", starting today.
    fn with_defaults(ctx: &MappingContext) -> Self {
        Self {
            name: Some(String::new()),
            description: Some(String::new()),
            event_type: Some(DEFAULT_CALENDAR_EVENT_TYPE),
            start_date: Some(ctx.today().to_owned()),
            start_time: Some(String::new()),
            end_date: Some(String::new()),
            end_time: Some(String::new()),
            location: Some(String::new()),
            url: Some(String::new()),
        }
    }
}

impl FormMapping for CalendarEvent {
    type Form = CalendarEventForm;

    fn fresh(ctx: &MappingContext) -> Self {
        Self {
            tenant: ctx.tenant().to_owned(),
            event_type: DEFAULT_CALENDAR_EVENT_TYPE,
            ..Self::default()
        }
    }

    fn to_form(&self, ctx: &MappingContext) -> CalendarEventForm {
        CalendarEventForm {
            name: Some(self.name.clone()),
            description: Some(self.description.clone()),
            event_type: Some(self.event_type),
            start_date: or_default(&self.start_date, ctx.today()),
            start_time: Some(self.start_time.clone()),
            end_date: Some(self.end_date.clone()),
            end_time: Some(self.end_time.clone()),
            location: Some(self.location.clone()),
            url: Some(self.url.clone()),
        }
    }

    fn apply_form(&mut self, form: &CalendarEventForm) {
        merge(&mut self.name, &form.name);
        merge(&mut self.description, &form.description);
        merge(&mut self.event_type, &form.event_type);
        merge(&mut self.start_date, &form.start_date);
        merge(&mut self.start_time, &form.start_time);
        merge(&mut self.end_date, &form.end_date);
        merge(&mut self.end_time, &form.end_time);
        merge(&mut self.location, &form.location);
        merge(&mut self.url, &form.url);
    }
}
