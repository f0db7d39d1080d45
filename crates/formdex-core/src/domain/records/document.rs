//! Documents: uploaded files with metadata. Only the metadata lives here.

use serde::{Deserialize, Serialize};

use super::{FormMapping, FormModel, MappingContext, merge, merge_opt, or_default};
use crate::domain::AccessRole;
use crate::domain::categories::{ACCESS_ROLE, DEFAULT_DOCUMENT_TYPE, DOCUMENT_TYPE};
use crate::domain::entities::{
    CrossFieldRule, Entity, EntitySchema, FieldSpec, FieldValue, IndexSpec, Record,
    ValidationSuite,
};
use crate::domain::error::DomainError;
use crate::domain::value_objects::{DateOrdering, EmptyTokenPolicy};

pub const ENTITY: &str = "document";

pub fn schema() -> Result<EntitySchema, DomainError> {
    let suite = ValidationSuite::builder(ENTITY)
        .field(FieldSpec::text("title").length(0, 100).required())
        .field(FieldSpec::text("description").max(1000.0))
        .field(FieldSpec::category("type", DOCUMENT_TYPE).required())
        .field(FieldSpec::text("fileName").length(0, 255).required())
        .field(FieldSpec::number("size").min(0.0))
        .field(FieldSpec::text("version").max(20.0))
        .field(FieldSpec::date("dateOfDocument").required())
        .field(FieldSpec::date("dateOfExpiry"))
        .field(FieldSpec::text("authorName").max(50.0))
        .field(FieldSpec::category("accessRole", ACCESS_ROLE).required())
        .rule(CrossFieldRule::date_order(
            "dateOfDocument",
            "dateOfExpiry",
            DateOrdering::Strict,
        ))
        .build()?;
    let index = IndexSpec::builder(ENTITY)
        .field("t", "title")
        .category("dt", "type", DOCUMENT_TYPE)
        .field("f", "fileName")
        .field("d", "dateOfDocument")
        .field("a", "authorName")
        .policy(EmptyTokenPolicy::SkipEmpty)
        .build()?;
    Ok(EntitySchema::new(suite, index)?.with_description("Document metadata"))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    pub id: String,
    pub tenant: String,
    pub index: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub document_type: i64,
    pub file_name: String,
    pub size: Option<f64>,
    pub version: String,
    pub date_of_document: String,
    pub date_of_expiry: String,
    pub author_name: String,
    pub access_role: AccessRole,
}

impl Record for Document {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "title" => (&self.title).into(),
            "description" => (&self.description).into(),
            "type" => self.document_type.into(),
            "fileName" => (&self.file_name).into(),
            "size" => self.size.into(),
            "version" => (&self.version).into(),
            "dateOfDocument" => (&self.date_of_document).into(),
            "dateOfExpiry" => (&self.date_of_expiry).into(),
            "authorName" => (&self.author_name).into(),
            "accessRole" => self.access_role.as_str().into(),
            _ => FieldValue::Absent,
        }
    }
}

impl Entity for Document {
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
pub struct DocumentForm {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub document_type: Option<i64>,
    pub file_name: Option<String>,
    pub size: Option<f64>,
    pub version: Option<String>,
    pub date_of_document: Option<String>,
    pub date_of_expiry: Option<String>,
    pub author_name: Option<String>,
    pub access_role: Option<AccessRole>,
}

impl Record for DocumentForm {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "title" => self.title.as_ref().into(),
            "description" => self.description.as_ref().into(),
            "type" => self.document_type.into(),
            "fileName" => self.file_name.as_ref().into(),
            "size" => self.size.into(),
            "version" => self.version.as_ref().into(),
            "dateOfDocument" => self.date_of_document.as_ref().into(),
            "dateOfExpiry" => self.date_of_expiry.as_ref().into(),
            "authorName" => self.author_name.as_ref().into(),
            "accessRole" => self.access_role.map(|r| r.as_str()).into(),
            _ => FieldValue::Absent,
        }
    }
}

impl FormModel for DocumentForm {
    /// Dated today, privileged, no expiry.
    fn with_defaults(ctx: &MappingContext) -> Self {
        Self {
            title: Some(String::new()),
            description: Some(String::new()),
            document_type: Some(DEFAULT_DOCUMENT_TYPE),
            file_name: Some(String::new()),
            size: Some(0.0),
            version: Some(String::new()),
            date_of_document: Some(ctx.today().to_owned()),
            date_of_expiry: Some(String::new()),
            author_name: Some(String::new()),
            access_role: Some(AccessRole::most_restrictive()),
        }
    }
}

impl FormMapping for Document {
    type Form = DocumentForm;

    fn fresh(ctx: &MappingContext) -> Self {
        Self {
            tenant: ctx.tenant().to_owned(),
            document_type: DEFAULT_DOCUMENT_TYPE,
            access_role: AccessRole::most_restrictive(),
            ..Self::default()
        }
    }

    fn to_form(&self, ctx: &MappingContext) -> DocumentForm {
        DocumentForm {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            document_type: Some(self.document_type),
            file_name: Some(self.file_name.clone()),
            size: Some(self.size.unwrap_or(0.0)),
            version: Some(self.version.clone()),
            date_of_document: or_default(&self.date_of_document, ctx.today()),
            date_of_expiry: Some(self.date_of_expiry.clone()),
            author_name: Some(self.author_name.clone()),
            access_role: Some(self.access_role),
        }
    }

    fn apply_form(&mut self, form: &DocumentForm) {
        merge(&mut self.title, &form.title);
        merge(&mut self.description, &form.description);
        merge(&mut self.document_type, &form.document_type);
        merge(&mut self.file_name, &form.file_name);
        merge_opt(&mut self.size, &form.size);
        merge(&mut self.version, &form.version);
        merge(&mut self.date_of_document, &form.date_of_document);
        merge(&mut self.date_of_expiry, &form.date_of_expiry);
        merge(&mut self.author_name, &form.author_name);
        merge(&mut self.access_role, &form.access_role);
    }
}
