//! Reservations of a resource (a room, a boat, a seat) by a person.

use serde::{Deserialize, Serialize};

use super::{FormMapping, FormModel, MappingContext, merge, merge_opt, or_default};
use crate::domain::categories::{DEFAULT_RESERVATION_TYPE, RESERVATION_TYPE};
use crate::domain::entities::{
    CrossFieldRule, Entity, EntitySchema, FieldSpec, FieldValue, IndexSpec, Record,
    ValidationSuite,
};
use crate::domain::error::DomainError;
use crate::domain::value_objects::{DateOrdering, EmptyTokenPolicy};

pub const ENTITY: &str = "reservation";

/// A reservation may end on the day it starts.
pub fn schema() -> Result<EntitySchema, DomainError> {
    let suite = ValidationSuite::builder(ENTITY)
        .field(FieldSpec::text("reserverKey").required())
        .field(FieldSpec::text("reserverName").length(0, 50).required())
        .field(FieldSpec::text("resourceKey").required())
        .field(FieldSpec::text("resourceName").length(0, 50).required())
        .field(FieldSpec::category("type", RESERVATION_TYPE).required())
        .field(FieldSpec::date("startDate").required())
        .field(FieldSpec::text("startTime").length(0, 5))
        .field(FieldSpec::date("endDate"))
        .field(FieldSpec::text("endTime").length(0, 5))
        .field(FieldSpec::number("numberOfParticipants").min(1.0).max(1000.0))
        .field(FieldSpec::text("comment").max(1000.0))
        .rule(CrossFieldRule::date_order("startDate", "endDate", DateOrdering::AllowEqual))
        .rule(CrossFieldRule::required_with("endDate", "endTime"))
        .build()?;
    let index = IndexSpec::builder(ENTITY)
        .field("rn", "reserverName")
        .field("rs", "resourceName")
        .category("rt", "type", RESERVATION_TYPE)
        .field("sd", "startDate")
        .policy(EmptyTokenPolicy::SkipEmpty)
        .build()?;
    Ok(EntitySchema::new(suite, index)?.with_description("Reservations of shared resources"))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Reservation {
    pub id: String,
    pub tenant: String,
    pub index: String,
    pub reserver_key: String,
    pub reserver_name: String,
    pub resource_key: String,
    pub resource_name: String,
    #[serde(rename = "type")]
    pub reservation_type: i64,
    pub start_date: String,
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
    pub number_of_participants: Option<f64>,
    pub comment: String,
}

impl Record for Reservation {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "reserverKey" => (&self.reserver_key).into(),
            "reserverName" => (&self.reserver_name).into(),
            "resourceKey" => (&self.resource_key).into(),
            "resourceName" => (&self.resource_name).into(),
            "type" => self.reservation_type.into(),
            "startDate" => (&self.start_date).into(),
            "startTime" => (&self.start_time).into(),
            "endDate" => (&self.end_date).into(),
            "endTime" => (&self.end_time).into(),
            "numberOfParticipants" => self.number_of_participants.into(),
            "comment" => (&self.comment).into(),
            _ => FieldValue::Absent,
        }
    }
}

impl Entity for Reservation {
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
pub struct ReservationForm {
    pub reserver_key: Option<String>,
    pub reserver_name: Option<String>,
    pub resource_key: Option<String>,
    pub resource_name: Option<String>,
    #[serde(rename = "type")]
    pub reservation_type: Option<i64>,
    pub start_date: Option<String>,
    pub start_time: Option<String>,
    pub end_date: Option<String>,
    pub end_time: Option<String>,
    pub number_of_participants: Option<f64>,
    pub comment: Option<String>,
}

impl Record for ReservationForm {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "reserverKey" => self.reserver_key.as_ref().into(),
            "reserverName" => self.reserver_name.as_ref().into(),
            "resourceKey" => self.resource_key.as_ref().into(),
            "resourceName" => self.resource_name.as_ref().into(),
            "type" => self.reservation_type.into(),
            "startDate" => self.start_date.as_ref().into(),
            "startTime" => self.start_time.as_ref().into(),
            "endDate" => self.end_date.as_ref().into(),
            "endTime" => self.end_time.as_ref().into(),
            "numberOfParticipants" => self.number_of_participants.into(),
            "comment" => self.comment.as_ref().into(),
            _ => FieldValue::Absent,
        }
    }
}

impl FormModel for ReservationForm {
    fn with_defaults(ctx: &MappingContext) -> Self {
        Self {
            reserver_key: Some(String::new()),
            reserver_name: Some(String::new()),
            resource_key: Some(String::new()),
            resource_name: Some(String::new()),
            reservation_type: Some(DEFAULT_RESERVATION_TYPE),
            start_date: Some(ctx.today().to_owned()),
            start_time: Some(String::new()),
            end_date: Some(ctx.today().to_owned()),
            end_time: Some(String::new()),
            number_of_participants: Some(1.0),
            comment: Some(String::new()),
        }
    }
}

impl FormMapping for Reservation {
    type Form = ReservationForm;

    fn fresh(ctx: &MappingContext) -> Self {
        Self {
            tenant: ctx.tenant().to_owned(),
            reservation_type: DEFAULT_RESERVATION_TYPE,
            ..Self::default()
        }
    }

    fn to_form(&self, ctx: &MappingContext) -> ReservationForm {
        ReservationForm {
            reserver_key: Some(self.reserver_key.clone()),
            reserver_name: Some(self.reserver_name.clone()),
            resource_key: Some(self.resource_key.clone()),
            resource_name: Some(self.resource_name.clone()),
            reservation_type: Some(self.reservation_type),
            start_date: or_default(&self.start_date, ctx.today()),
            start_time: Some(self.start_time.clone()),
            end_date: Some(self.end_date.clone()),
            end_time: Some(self.end_time.clone()),
            number_of_participants: Some(self.number_of_participants.unwrap_or(1.0)),
            comment: Some(self.comment.clone()),
        }
    }

    fn apply_form(&mut self, form: &ReservationForm) {
        merge(&mut self.reserver_key, &form.reserver_key);
        merge(&mut self.reserver_name, &form.reserver_name);
        merge(&mut self.resource_key, &form.resource_key);
        merge(&mut self.resource_name, &form.resource_name);
        merge(&mut self.reservation_type, &form.reservation_type);
        merge(&mut self.start_date, &form.start_date);
        merge(&mut self.start_time, &form.start_time);
        merge(&mut self.end_date, &form.end_date);
        merge(&mut self.end_time, &form.end_time);
        merge_opt(&mut self.number_of_participants, &form.number_of_participants);
        merge(&mut self.comment, &form.comment);
    }
}
