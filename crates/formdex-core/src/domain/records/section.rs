//! Page sections: articles, albums, embedded lists and the like.

use serde::{Deserialize, Serialize};

use super::{FormMapping, FormModel, MappingContext, merge};
use crate::domain::AccessRole;
use crate::domain::categories::{ACCESS_ROLE, DEFAULT_SECTION_TYPE, SECTION_TYPE};
use crate::domain::entities::{
    Entity, EntitySchema, FieldSpec, FieldValue, IndexSpec, Record, ValidationSuite,
};
use crate::domain::error::DomainError;
use crate::domain::value_objects::EmptyTokenPolicy;

pub const ENTITY: &str = "section";

pub fn schema() -> Result<EntitySchema, DomainError> {
    let suite = ValidationSuite::builder(ENTITY)
        .field(FieldSpec::text("name").length(0, 30).required())
        .field(FieldSpec::text("title").max(50.0))
        .field(FieldSpec::category("type", SECTION_TYPE).required())
        .field(FieldSpec::text("content").max(10_000.0))
        .field(FieldSpec::text("color").max(20.0))
        .field(FieldSpec::text("url").max(1000.0))
        .field(FieldSpec::category("accessRole", ACCESS_ROLE).required())
        .build()?;
    let index = IndexSpec::builder(ENTITY)
        .field("n", "name")
        .category("st", "type", SECTION_TYPE)
        .policy(EmptyTokenPolicy::Always)
        .build()?;
    Ok(EntitySchema::new(suite, index)?.with_description("Sections of content pages"))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Section {
    pub id: String,
    pub tenant: String,
    pub index: String,
    pub name: String,
    pub title: String,
    #[serde(rename = "type")]
    pub section_type: i64,
    pub content: String,
    pub color: String,
    pub url: String,
    pub access_role: AccessRole,
}

impl Record for Section {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "name" => (&self.name).into(),
            "title" => (&self.title).into(),
            "type" => self.section_type.into(),
            "content" => (&self.content).into(),
            "color" => (&self.color).into(),
            "url" => (&self.url).into(),
            "accessRole" => self.access_role.as_str().into(),
            _ => FieldValue::Absent,
        }
    }
}

impl Entity for Section {
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
pub struct SectionForm {
    pub name: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub section_type: Option<i64>,
    pub content: Option<String>,
    pub color: Option<String>,
    pub url: Option<String>,
    pub access_role: Option<AccessRole>,
}

impl Record for SectionForm {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "name" => self.name.as_ref().into(),
            "title" => self.title.as_ref().into(),
            "type" => self.section_type.into(),
            "content" => self.content.as_ref().into(),
            "color" => self.color.as_ref().into(),
            "url" => self.url.as_ref().into(),
            "accessRole" => self.access_role.map(|r| r.as_str()).into(),
            _ => FieldValue::Absent,
        }
    }
}

impl FormModel for SectionForm {
    fn with_defaults(_ctx: &MappingContext) -> Self {
        Self {
            name: Some(String::new()),
            title: Some(String::new()),
            section_type: Some(DEFAULT_SECTION_TYPE),
            content: Some(String::new()),
            color: Some(String::new()),
            url: Some(String::new()),
            access_role: Some(AccessRole::most_restrictive()),
        }
    }
}

impl FormMapping for Section {
    type Form = SectionForm;

    fn fresh(ctx: &MappingContext) -> Self {
        Self {
            tenant: ctx.tenant().to_owned(),
            section_type: DEFAULT_SECTION_TYPE,
            access_role: AccessRole::most_restrictive(),
            ..Self::default()
        }
    }

    fn to_form(&self, _ctx: &MappingContext) -> SectionForm {
        SectionForm {
            name: Some(self.name.clone()),
            title: Some(self.title.clone()),
            section_type: Some(self.section_type),
            content: Some(self.content.clone()),
            color: Some(self.color.clone()),
            url: Some(self.url.clone()),
            access_role: Some(self.access_role),
        }
    }

    fn apply_form(&mut self, form: &SectionForm) {
        merge(&mut self.name, &form.name);
        merge(&mut self.title, &form.title);
        merge(&mut self.section_type, &form.section_type);
        merge(&mut self.content, &form.content);
        merge(&mut self.color, &form.color);
        merge(&mut self.url, &form.url);
        merge(&mut self.access_role, &form.access_role);
    }
}
