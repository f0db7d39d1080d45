//! Working relationships between a person and an organization.

use serde::{Deserialize, Serialize};

use super::{FormMapping, FormModel, MappingContext, merge, merge_opt, or_default};
use crate::domain::categories::{DEFAULT_WORK_RELATIONSHIP_TYPE, WORK_RELATIONSHIP_TYPE};
use crate::domain::entities::{
    CrossFieldRule, Entity, EntitySchema, FieldSpec, FieldValue, IndexSpec, Record,
    ValidationSuite,
};
use crate::domain::error::DomainError;
use crate::domain::value_objects::{DateOrdering, EmptyTokenPolicy, OPEN_END_DATE};

pub const ENTITY: &str = "work_relationship";

/// A one-day engagement may end the day it starts.
pub fn schema() -> Result<EntitySchema, DomainError> {
    let suite = ValidationSuite::builder(ENTITY)
        .field(FieldSpec::text("subjectKey").required())
        .field(FieldSpec::text("subjectName").length(0, 50).required())
        .field(FieldSpec::text("objectKey").required())
        .field(FieldSpec::text("objectName").length(0, 50).required())
        .field(FieldSpec::category("type", WORK_RELATIONSHIP_TYPE).required())
        .field(FieldSpec::text("label").max(50.0))
        .field(FieldSpec::date("validFrom").required())
        .field(FieldSpec::date("validTo"))
        .field(FieldSpec::number("price").min(0.0))
        .field(FieldSpec::text("url").max(1000.0))
        .rule(CrossFieldRule::date_order("validFrom", "validTo", DateOrdering::AllowEqual))
        .build()?;
    let index = IndexSpec::builder(ENTITY)
        .field("sn", "subjectName")
        .field("on", "objectName")
        .category("wt", "type", WORK_RELATIONSHIP_TYPE)
        .field("vf", "validFrom")
        .policy(EmptyTokenPolicy::Always)
        .build()?;
    Ok(EntitySchema::new(suite, index)?.with_description("Employment and volunteering"))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkRelationship {
    pub id: String,
    pub tenant: String,
    pub index: String,
    pub subject_key: String,
    pub subject_name: String,
    pub object_key: String,
    pub object_name: String,
    #[serde(rename = "type")]
    pub relationship_type: i64,
    pub label: String,
    pub valid_from: String,
    pub valid_to: String,
    pub price: Option<f64>,
    pub url: String,
}

impl Record for WorkRelationship {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "subjectKey" => (&self.subject_key).into(),
            "subjectName" => (&self.subject_name).into(),
            "objectKey" => (&self.object_key).into(),
            "objectName" => (&self.object_name).into(),
            "type" => self.relationship_type.into(),
            "label" => (&self.label).into(),
            "validFrom" => (&self.valid_from).into(),
            "validTo" => (&self.valid_to).into(),
            "price" => self.price.into(),
            "url" => (&self.url).into(),
            _ => FieldValue::Absent,
        }
    }
}

impl Entity for WorkRelationship {
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
pub struct WorkRelationshipForm {
    pub subject_key: Option<String>,
    pub subject_name: Option<String>,
    pub object_key: Option<String>,
    pub object_name: Option<String>,
    #[serde(rename = "type")]
    pub relationship_type: Option<i64>,
    pub label: Option<String>,
    pub valid_from: Option<String>,
    pub valid_to: Option<String>,
    pub price: Option<f64>,
    pub url: Option<String>,
}

impl Record for WorkRelationshipForm {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "subjectKey" => self.subject_key.as_ref().into(),
            "subjectName" => self.subject_name.as_ref().into(),
            "objectKey" => self.object_key.as_ref().into(),
            "objectName" => self.object_name.as_ref().into(),
            "type" => self.relationship_type.into(),
            "label" => self.label.as_ref().into(),
            "validFrom" => self.valid_from.as_ref().into(),
            "validTo" => self.valid_to.as_ref().into(),
            "price" => self.price.into(),
            "url" => self.url.as_ref().into(),
            _ => FieldValue::Absent,
        }
    }
}

impl FormModel for WorkRelationshipForm {
    fn with_defaults(ctx: &MappingContext) -> Self {
        Self {
            subject_key: Some(String::new()),
            subject_name: Some(String::new()),
            object_key: Some(String::new()),
            object_name: Some(String::new()),
            relationship_type: Some(DEFAULT_WORK_RELATIONSHIP_TYPE),
            label: Some(String::new()),
            valid_from: Some(ctx.today().to_owned()),
            valid_to: Some(OPEN_END_DATE.to_owned()),
            price: Some(0.0),
            url: Some(String::new()),
        }
    }
}

impl FormMapping for WorkRelationship {
    type Form = WorkRelationshipForm;

    fn fresh(ctx: &MappingContext) -> Self {
        Self {
            tenant: ctx.tenant().to_owned(),
            relationship_type: DEFAULT_WORK_RELATIONSHIP_TYPE,
            valid_to: OPEN_END_DATE.to_owned(),
            ..Self::default()
        }
    }

    fn to_form(&self, ctx: &MappingContext) -> WorkRelationshipForm {
        WorkRelationshipForm {
            subject_key: Some(self.subject_key.clone()),
            subject_name: Some(self.subject_name.clone()),
            object_key: Some(self.object_key.clone()),
            object_name: Some(self.object_name.clone()),
            relationship_type: Some(self.relationship_type),
            label: Some(self.label.clone()),
            valid_from: or_default(&self.valid_from, ctx.today()),
            valid_to: or_default(&self.valid_to, OPEN_END_DATE),
            price: Some(self.price.unwrap_or(0.0)),
            url: Some(self.url.clone()),
        }
    }

    fn apply_form(&mut self, form: &WorkRelationshipForm) {
        merge(&mut self.subject_key, &form.subject_key);
        merge(&mut self.subject_name, &form.subject_name);
        merge(&mut self.object_key, &form.object_key);
        merge(&mut self.object_name, &form.object_name);
        merge(&mut self.relationship_type, &form.relationship_type);
        merge(&mut self.label, &form.label);
        merge(&mut self.valid_from, &form.valid_from);
        merge(&mut self.valid_to, &form.valid_to);
        merge_opt(&mut self.price, &form.price);
        merge(&mut self.url, &form.url);
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;

    #[test]
    fn one_day_engagement_is_valid() {
        let rel = WorkRelationship {
            subject_key: "p1".into(),
            subject_name: "Jane Doe".into(),
            object_key: "o1".into(),
            object_name: "Acme".into(),
            relationship_type: 3,
            valid_from: "20250601".into(),
            valid_to: "20250601".into(),
            ..WorkRelationship::default()
        };
        assert!(registry().validate_entity(&rel, None).unwrap().is_valid());
    }

    #[test]
    fn unknown_type_is_rejected() {
        let form = WorkRelationshipForm {
            relationship_type: Some(42),
            ..WorkRelationshipForm::with_defaults(&ctx())
        };
        let result = registry().validate(ENTITY, &form, Some("type")).unwrap();
        assert!(result.has_errors("type"));
    }
}
