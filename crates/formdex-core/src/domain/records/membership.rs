//! Memberships: a person (or organization) belonging to an organization.

use serde::{Deserialize, Serialize};

use super::{FormMapping, FormModel, MappingContext, merge, merge_opt, or_default};
use crate::domain::categories::{DEFAULT_MEMBERSHIP_CATEGORY, MEMBERSHIP_CATEGORY};
use crate::domain::entities::{
    CrossFieldRule, Entity, EntitySchema, FieldSpec, FieldValue, IndexSpec, Record,
    ValidationSuite,
};
use crate::domain::error::DomainError;
use crate::domain::value_objects::{DateOrdering, EmptyTokenPolicy, OPEN_END_DATE};

pub const ENTITY: &str = "membership";

/// Exit must be strictly after entry. Every token is always emitted.
pub fn schema() -> Result<EntitySchema, DomainError> {
    let suite = ValidationSuite::builder(ENTITY)
        .field(FieldSpec::text("memberKey").required())
        .field(FieldSpec::text("memberName").length(0, 50).required())
        .field(FieldSpec::text("orgKey").required())
        .field(FieldSpec::text("orgName").length(0, 50).required())
        .field(FieldSpec::text("memberId").max(30.0))
        .field(FieldSpec::category("category", MEMBERSHIP_CATEGORY).required())
        .field(FieldSpec::date("dateOfEntry").required())
        .field(FieldSpec::date("dateOfExit"))
        .field(FieldSpec::number("price").min(0.0).max(1_000_000.0))
        .rule(CrossFieldRule::date_order("dateOfEntry", "dateOfExit", DateOrdering::Strict))
        .build()?;
    let index = IndexSpec::builder(ENTITY)
        .field("mn", "memberName")
        .field("on", "orgName")
        .category("c", "category", MEMBERSHIP_CATEGORY)
        .field("de", "dateOfEntry")
        .policy(EmptyTokenPolicy::Always)
        .build()?;
    Ok(EntitySchema::new(suite, index)?.with_description("Members of an organization"))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Membership {
    pub id: String,
    pub tenant: String,
    pub index: String,
    pub member_key: String,
    pub member_name: String,
    pub org_key: String,
    pub org_name: String,
    pub member_id: String,
    pub category: i64,
    pub date_of_entry: String,
    pub date_of_exit: String,
    pub price: Option<f64>,
}

impl Record for Membership {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "memberKey" => (&self.member_key).into(),
            "memberName" => (&self.member_name).into(),
            "orgKey" => (&self.org_key).into(),
            "orgName" => (&self.org_name).into(),
            "memberId" => (&self.member_id).into(),
            "category" => self.category.into(),
            "dateOfEntry" => (&self.date_of_entry).into(),
            "dateOfExit" => (&self.date_of_exit).into(),
            "price" => self.price.into(),
            _ => FieldValue::Absent,
        }
    }
}

impl Entity for Membership {
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
pub struct MembershipForm {
    pub member_key: Option<String>,
    pub member_name: Option<String>,
    pub org_key: Option<String>,
    pub org_name: Option<String>,
    pub member_id: Option<String>,
    pub category: Option<i64>,
    pub date_of_entry: Option<String>,
    pub date_of_exit: Option<String>,
    pub price: Option<f64>,
}

impl Record for MembershipForm {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "memberKey" => self.member_key.as_ref().into(),
            "memberName" => self.member_name.as_ref().into(),
            "orgKey" => self.org_key.as_ref().into(),
            "orgName" => self.org_name.as_ref().into(),
            "memberId" => self.member_id.as_ref().into(),
            "category" => self.category.into(),
            "dateOfEntry" => self.date_of_entry.as_ref().into(),
            "dateOfExit" => self.date_of_exit.as_ref().into(),
            "price" => self.price.into(),
            _ => FieldValue::Absent,
        }
    }
}

impl FormModel for MembershipForm {
    /// Entering today, open-ended, in the default category.
    fn with_defaults(ctx: &MappingContext) -> Self {
        Self {
            member_key: Some(String::new()),
            member_name: Some(String::new()),
            org_key: Some(String::new()),
            org_name: Some(String::new()),
            member_id: Some(String::new()),
            category: Some(DEFAULT_MEMBERSHIP_CATEGORY),
            date_of_entry: Some(ctx.today().to_owned()),
            date_of_exit: Some(OPEN_END_DATE.to_owned()),
            price: Some(0.0),
        }
    }
}

impl FormMapping for Membership {
    type Form = MembershipForm;

    fn fresh(ctx: &MappingContext) -> Self {
        Self {
            tenant: ctx.tenant().to_owned(),
            category: DEFAULT_MEMBERSHIP_CATEGORY,
            date_of_exit: OPEN_END_DATE.to_owned(),
            ..Self::default()
        }
    }

    fn to_form(&self, ctx: &MappingContext) -> MembershipForm {
        MembershipForm {
            member_key: Some(self.member_key.clone()),
            member_name: Some(self.member_name.clone()),
            org_key: Some(self.org_key.clone()),
            org_name: Some(self.org_name.clone()),
            member_id: Some(self.member_id.clone()),
            category: Some(self.category),
            date_of_entry: or_default(&self.date_of_entry, ctx.today()),
            date_of_exit: or_default(&self.date_of_exit, OPEN_END_DATE),
            price: Some(self.price.unwrap_or(0.0)),
        }
    }

    fn apply_form(&mut self, form: &MembershipForm) {
        merge(&mut self.member_key, &form.member_key);
        merge(&mut self.member_name, &form.member_name);
        merge(&mut self.org_key, &form.org_key);
        merge(&mut self.org_name, &form.org_name);
        merge(&mut self.member_id, &form.member_id);
        merge(&mut self.category, &form.category);
        merge(&mut self.date_of_entry, &form.date_of_entry);
        merge(&mut self.date_of_exit, &form.date_of_exit);
        merge_opt(&mut self.price, &form.price);
    }
}
