//! Invitations of a person to join a tenant or an organization.

use serde::{Deserialize, Serialize};

use super::{FormMapping, FormModel, MappingContext, merge, or_default};
use crate::domain::categories::{DEFAULT_INVITATION_STATE, INVITATION_STATE};
use crate::domain::entities::{
    Entity, EntitySchema, FieldSpec, FieldValue, IndexSpec, Record, ValidationSuite,
};
use crate::domain::error::DomainError;
use crate::domain::value_objects::EmptyTokenPolicy;

pub const ENTITY: &str = "invitation";

/// `d:` date, `ir:` inviter and `ie:` invitee full names.
pub fn schema() -> Result<EntitySchema, DomainError> {
    let suite = ValidationSuite::builder(ENTITY)
        .field(FieldSpec::text("inviterKey").required())
        .field(FieldSpec::text("inviterFirstName").length(0, 30))
        .field(FieldSpec::text("inviterLastName").length(0, 30).required())
        .field(FieldSpec::text("inviteeFirstName").length(0, 30))
        .field(FieldSpec::text("inviteeLastName").length(0, 30).required())
        .field(FieldSpec::text("inviteeEmail").length(3, 50).required())
        .field(FieldSpec::text("orgKey"))
        .field(FieldSpec::text("orgName").max(50.0))
        .field(FieldSpec::date("date").required())
        .field(FieldSpec::category("state", INVITATION_STATE).required())
        .field(FieldSpec::text("message").max(1000.0))
        .build()?;
    let index = IndexSpec::builder(ENTITY)
        .field("d", "date")
        .joined("ir", &["inviterFirstName", "inviterLastName"])
        .joined("ie", &["inviteeFirstName", "inviteeLastName"])
        .policy(EmptyTokenPolicy::SkipEmpty)
        .build()?;
    Ok(EntitySchema::new(suite, index)?.with_description("Invitations to join an organization"))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Invitation {
    pub id: String,
    pub tenant: String,
    pub index: String,
    pub inviter_key: String,
    pub inviter_first_name: String,
    pub inviter_last_name: String,
    pub invitee_first_name: String,
    pub invitee_last_name: String,
    pub invitee_email: String,
    pub org_key: String,
    pub org_name: String,
    pub date: String,
    pub state: i64,
    pub message: String,
}

impl Record for Invitation {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "inviterKey" => (&self.inviter_key).into(),
            "inviterFirstName" => (&self.inviter_first_name).into(),
            "inviterLastName" => (&self.inviter_last_name).into(),
            "inviteeFirstName" => (&self.invitee_first_name).into(),
            "inviteeLastName" => (&self.invitee_last_name).into(),
            "inviteeEmail" => (&self.invitee_email).into(),
            "orgKey" => (&self.org_key).into(),
            "orgName" => (&self.org_name).into(),
            "date" => (&self.date).into(),
            "state" => self.state.into(),
            "message" => (&self.message).into(),
            _ => FieldValue::Absent,
        }
    }
}

impl Entity for Invitation {
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
pub struct InvitationForm {
    pub inviter_key: Option<String>,
    pub inviter_first_name: Option<String>,
    pub inviter_last_name: Option<String>,
    pub invitee_first_name: Option<String>,
    pub invitee_last_name: Option<String>,
    pub invitee_email: Option<String>,
    pub org_key: Option<String>,
    pub org_name: Option<String>,
    pub date: Option<String>,
    pub state: Option<i64>,
    pub message: Option<String>,
}

impl Record for InvitationForm {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "inviterKey" => self.inviter_key.as_ref().into(),
            "inviterFirstName" => self.inviter_first_name.as_ref().into(),
            "inviterLastName" => self.inviter_last_name.as_ref().into(),
            "inviteeFirstName" => self.invitee_first_name.as_ref().into(),
            "inviteeLastName" => self.invitee_last_name.as_ref().into(),
            "inviteeEmail" => self.invitee_email.as_ref().into(),
            "orgKey" => self.org_key.as_ref().into(),
            "orgName" => self.org_name.as_ref().into(),
            "date" => self.date.as_ref().into(),
            "state" => self.state.into(),
            "message" => self.message.as_ref().into(),
            _ => FieldValue::Absent,
        }
    }
}

impl FormModel for InvitationForm {
    /// Pending, dated today.
    fn with_defaults(ctx: &MappingContext) -> Self {
        Self {
            inviter_key: Some(String::new()),
            inviter_first_name: Some(String::new()),
            inviter_last_name: Some(String::new()),
            invitee_first_name: Some(String::new()),
            invitee_last_name: Some(String::new()),
            invitee_email: Some(String::new()),
            org_key: Some(String::new()),
            org_name: Some(String::new()),
            date: Some(ctx.today().to_owned()),
            state: Some(DEFAULT_INVITATION_STATE),
            message: Some(String::new()),
        }
    }
}

impl FormMapping for Invitation {
    type Form = InvitationForm;

    fn fresh(ctx: &MappingContext) -> Self {
        Self {
            tenant: ctx.tenant().to_owned(),
            state: DEFAULT_INVITATION_STATE,
            ..Self::default()
        }
    }

    fn to_form(&self, ctx: &MappingContext) -> InvitationForm {
        InvitationForm {
            inviter_key: Some(self.inviter_key.clone()),
            inviter_first_name: Some(self.inviter_first_name.clone()),
            inviter_last_name: Some(self.inviter_last_name.clone()),
            invitee_first_name: Some(self.invitee_first_name.clone()),
            invitee_last_name: Some(self.invitee_last_name.clone()),
            invitee_email: Some(self.invitee_email.clone()),
            org_key: Some(self.org_key.clone()),
            org_name: Some(self.org_name.clone()),
            date: or_default(&self.date, ctx.today()),
            state: Some(self.state),
            message: Some(self.message.clone()),
        }
    }

    fn apply_form(&mut self, form: &InvitationForm) {
        merge(&mut self.inviter_key, &form.inviter_key);
        merge(&mut self.inviter_first_name, &form.inviter_first_name);
        merge(&mut self.inviter_last_name, &form.inviter_last_name);
        merge(&mut self.invitee_first_name, &form.invitee_first_name);
        merge(&mut self.invitee_last_name, &form.invitee_last_name);
        merge(&mut self.invitee_email, &form.invitee_email);
        merge(&mut self.org_key, &form.org_key);
        merge(&mut self.org_name, &form.org_name);
        merge(&mut self.date, &form.date);
        merge(&mut self.state, &form.state);
        merge(&mut self.message, &form.message);
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;

    fn invitation() -> Invitation {
        Invitation {
            inviter_key: "u1".into(),
            inviter_first_name: "John".into(),
            inviter_last_name: "Smith".into(),
            invitee_first_name: "Jane".into(),
            invitee_last_name: "Doe".into(),
            invitee_email: "jane@example.org".into(),
            date: "20251201".into(),
            ..Invitation::default()
        }
    }

    #[test]
    fn index_joins_full_names() {
        let mut inv = invitation();
        let index = registry().index_entity(&mut inv).unwrap();
        assert_eq!(index.as_str(), "d:20251201 ir:John Smith ie:Jane Doe");
        assert!(index.matches_token("ie", "doe"));
    }

    #[test]
    fn missing_first_name_leaves_no_gap() {
        let mut inv = invitation();
        inv.invitee_first_name.clear();
        let index = registry().index_entity(&mut inv).unwrap();
        assert_eq!(index.as_str(), "d:20251201 ir:John Smith ie:Doe");
    }

    #[test]
    fn complete_invitation_is_valid() {
        let result = registry().validate_entity(&invitation(), None).unwrap();
        assert!(result.is_valid(), "{result:?}");
    }
}
