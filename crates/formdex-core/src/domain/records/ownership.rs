//! Ownerships: who owns, leases or uses a resource, and for how long.

use serde::{Deserialize, Serialize};

use super::{FormMapping, FormModel, MappingContext, merge, merge_opt, or_default};
use crate::domain::categories::{DEFAULT_OWNERSHIP_TYPE, OWNERSHIP_TYPE};
use crate::domain::entities::{
    CrossFieldRule, Entity, EntitySchema, FieldSpec, FieldValue, IndexSpec, Record,
    ValidationSuite,
};
use crate::domain::error::DomainError;
use crate::domain::value_objects::{DateOrdering, EmptyTokenPolicy, OPEN_END_DATE};

pub const ENTITY: &str = "ownership";

pub fn schema() -> Result<EntitySchema, DomainError> {
    let suite = ValidationSuite::builder(ENTITY)
        .field(FieldSpec::text("ownerKey").required())
        .field(FieldSpec::text("ownerName").length(0, 50).required())
        .field(FieldSpec::text("resourceKey").required())
        .field(FieldSpec::text("resourceName").length(0, 50).required())
        .field(FieldSpec::category("type", OWNERSHIP_TYPE).required())
        .field(FieldSpec::date("validFrom").required())
        .field(FieldSpec::date("validTo"))
        .field(FieldSpec::number("price").min(0.0))
        .rule(CrossFieldRule::date_order("validFrom", "validTo", DateOrdering::Strict))
        .build()?;
    let index = IndexSpec::builder(ENTITY)
        .field("on", "ownerName")
        .field("rn", "resourceName")
        .category("ot", "type", OWNERSHIP_TYPE)
        .field("vf", "validFrom")
        .policy(EmptyTokenPolicy::Always)
        .build()?;
    Ok(EntitySchema::new(suite, index)?.with_description("Ownership and usage of resources"))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Ownership {
    pub id: String,
    pub tenant: String,
    pub index: String,
    pub owner_key: String,
    pub owner_name: String,
    pub resource_key: String,
    pub resource_name: String,
    #[serde(rename = "type")]
    pub ownership_type: i64,
    pub valid_from: String,
    pub valid_to: String,
    pub price: Option<f64>,
}

impl Record for Ownership {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "ownerKey" => (&self.owner_key).into(),
            "ownerName" => (&self.owner_name).into(),
            "resourceKey" => (&self.resource_key).into(),
            "resourceName" => (&self.resource_name).into(),
            "type" => self.ownership_type.into(),
            "validFrom" => (&self.valid_from).into(),
            "validTo" => (&self.valid_to).into(),
            "price" => self.price.into(),
            _ => FieldValue::Absent,
        }
    }
}

impl Entity for Ownership {
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
pub struct OwnershipForm {
    pub owner_key: Option<String>,
    pub owner_name: Option<String>,
    pub resource_key: Option<String>,
    pub resource_name: Option<String>,
    #[serde(rename = "type")]
    pub ownership_type: Option<i64>,
    pub valid_from: Option<String>,
    pub valid_to: Option<String>,
    pub price: Option<f64>,
}

impl Record for OwnershipForm {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "ownerKey" => self.owner_key.as_ref().into(),
            "ownerName" => self.owner_name.as_ref().into(),
            "resourceKey" => self.resource_key.as_ref().into(),
            "resourceName" => self.resource_name.as_ref().into(),
            "type" => self.ownership_type.into(),
            "validFrom" => self.valid_from.as_ref().into(),
            "validTo" => self.valid_to.as_ref().into(),
            "price" => self.price.into(),
            _ => FieldValue::Absent,
        }
    }
}

impl FormModel for OwnershipForm {
    fn with_defaults(ctx: &MappingContext) -> Self {
        Self {
            owner_key: Some(String::new()),
            owner_name: Some(String::new()),
            resource_key: Some(String::new()),
            resource_name: Some(String::new()),
            ownership_type: Some(DEFAULT_OWNERSHIP_TYPE),
            valid_from: Some(ctx.today().to_owned()),
            valid_to: Some(OPEN_END_DATE.to_owned()),
            price: Some(0.0),
        }
    }
}

impl FormMapping for Ownership {
    type Form = OwnershipForm;

    fn fresh(ctx: &MappingContext) -> Self {
        Self {
            tenant: ctx.tenant().to_owned(),
            ownership_type: DEFAULT_OWNERSHIP_TYPE,
            valid_to: OPEN_END_DATE.to_owned(),
            ..Self::default()
        }
    }

    fn to_form(&self, ctx: &MappingContext) -> OwnershipForm {
        OwnershipForm {
            owner_key: Some(self.owner_key.clone()),
            owner_name: Some(self.owner_name.clone()),
            resource_key: Some(self.resource_key.clone()),
            resource_name: Some(self.resource_name.clone()),
            ownership_type: Some(self.ownership_type),
            valid_from: or_default(&self.valid_from, ctx.today()),
            valid_to: or_default(&self.valid_to, OPEN_END_DATE),
            price: Some(self.price.unwrap_or(0.0)),
        }
    }

    fn apply_form(&mut self, form: &OwnershipForm) {
        merge(&mut self.owner_key, &form.owner_key);
        merge(&mut self.owner_name, &form.owner_name);
        merge(&mut self.resource_key, &form.resource_key);
        merge(&mut self.resource_name, &form.resource_name);
        merge(&mut self.ownership_type, &form.ownership_type);
        merge(&mut self.valid_from, &form.valid_from);
        merge(&mut self.valid_to, &form.valid_to);
        merge_opt(&mut self.price, &form.price);
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;

    #[test]
    fn lease_index_and_validation() {
        let registry = registry();
        let mut lease = Ownership {
            owner_key: "p1".into(),
            owner_name: "Jane Doe".into(),
            resource_key: "a7".into(),
            resource_name: "Flat 7".into(),
            ownership_type: 2,
            valid_from: "20240101".into(),
            valid_to: "20231231".into(),
            ..Ownership::default()
        };
        let index = registry.index_entity(&mut lease).unwrap();
        assert_eq!(index.as_str(), "on:Jane Doe rn:Flat 7 ot:LSE vf:20240101");
        let result = registry.validate_entity(&lease, None).unwrap();
        assert_eq!(result.fields().collect::<Vec<_>>(), ["validTo"]);
    }

    #[test]
    fn negative_price_is_rejected() {
        let form = OwnershipForm {
            price: Some(-5.0),
            ..OwnershipForm::with_defaults(&ctx())
        };
        let result = registry().validate(ENTITY, &form, Some("price")).unwrap();
        assert!(result.has_errors("price"));
    }
}
