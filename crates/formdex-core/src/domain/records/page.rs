//! Content pages. A page is an ordered list of sections behind an access role.

use serde::{Deserialize, Serialize};

use super::{FormMapping, FormModel, MappingContext, merge};
use crate::domain::AccessRole;
use crate::domain::categories::ACCESS_ROLE;
use crate::domain::entities::{
    Entity, EntitySchema, FieldSpec, FieldValue, IndexSpec, Record, ValidationSuite,
};
use crate::domain::error::DomainError;
use crate::domain::value_objects::EmptyTokenPolicy;

pub const ENTITY: &str = "page";

pub fn schema() -> Result<EntitySchema, DomainError> {
    let suite = ValidationSuite::builder(ENTITY)
        .field(FieldSpec::text("name").length(0, 20).required())
        .field(FieldSpec::text("title").max(50.0))
        .field(FieldSpec::text("abstract").max(255.0))
        .field(FieldSpec::text("content").max(10_000.0))
        .field(FieldSpec::category("accessRole", ACCESS_ROLE).required())
        .field(FieldSpec::boolean("showInMenu"))
        .build()?;
    let index = IndexSpec::builder(ENTITY)
        .field("n", "name")
        .field("t", "title")
        .category("r", "accessRole", ACCESS_ROLE)
        .policy(EmptyTokenPolicy::SkipEmpty)
        .build()?;
    Ok(EntitySchema::new(suite, index)?.with_description("Content pages"))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Page {
    pub id: String,
    pub tenant: String,
    pub index: String,
    pub name: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub summary: String,
    pub content: String,
    pub access_role: AccessRole,
    pub show_in_menu: bool,
    /// Keys of the page's sections, in display order.
    pub sections: Vec<String>,
}

impl Record for Page {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "name" => (&self.name).into(),
            "title" => (&self.title).into(),
            "abstract" => (&self.summary).into(),
            "content" => (&self.content).into(),
            "accessRole" => self.access_role.as_str().into(),
            "showInMenu" => self.show_in_menu.into(),
            "sections" => FieldValue::Composite,
            _ => FieldValue::Absent,
        }
    }
}

impl Entity for Page {
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
pub struct PageForm {
    pub name: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "abstract")]
    pub summary: Option<String>,
    pub content: Option<String>,
    pub access_role: Option<AccessRole>,
    pub show_in_menu: Option<bool>,
    pub sections: Option<Vec<String>>,
}

impl Record for PageForm {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "name" => self.name.as_ref().into(),
            "title" => self.title.as_ref().into(),
            "abstract" => self.summary.as_ref().into(),
            "content" => self.content.as_ref().into(),
            "accessRole" => self.access_role.map(|r| r.as_str()).into(),
            "showInMenu" => self.show_in_menu.into(),
            "sections" if self.sections.is_some() => FieldValue::Composite,
            _ => FieldValue::Absent,
        }
    }
}

impl FormModel for PageForm {
    /// Restricted to privileged members until someone opens it up.
    fn with_defaults(_ctx: &MappingContext) -> Self {
        Self {
            name: Some(String::new()),
            title: Some(String::new()),
            summary: Some(String::new()),
            content: Some(String::new()),
            access_role: Some(AccessRole::most_restrictive()),
            show_in_menu: Some(false),
            sections: Some(Vec::new()),
        }
    }
}

impl FormMapping for Page {
    type Form = PageForm;

    fn fresh(ctx: &MappingContext) -> Self {
        Self {
            tenant: ctx.tenant().to_owned(),
            access_role: AccessRole::most_restrictive(),
            ..Self::default()
        }
    }

    fn to_form(&self, _ctx: &MappingContext) -> PageForm {
        PageForm {
            name: Some(self.name.clone()),
            title: Some(self.title.clone()),
            summary: Some(self.summary.clone()),
            content: Some(self.content.clone()),
            access_role: Some(self.access_role),
            show_in_menu: Some(self.show_in_menu),
            sections: Some(self.sections.clone()),
        }
    }

    fn apply_form(&mut self, form: &PageForm) {
        merge(&mut self.name, &form.name);
        merge(&mut self.title, &form.title);
        merge(&mut self.summary, &form.summary);
        merge(&mut self.content, &form.content);
        merge(&mut self.access_role, &form.access_role);
        merge(&mut self.show_in_menu, &form.show_in_menu);
        merge(&mut self.sections, &form.sections);
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;

    #[test]
    fn page_without_role_is_privileged() {
        let page = Page::to_entity(&PageForm::default(), None, &ctx());
        assert_eq!(page.access_role, AccessRole::Privileged);
    }

    #[test]
    fn unset_role_keeps_the_existing_one() {
        let ctx = ctx();
        let public = Page {
            access_role: AccessRole::Public,
            ..Page::fresh(&ctx)
        };
        let edited = Page::to_entity(&PageForm::default(), Some(&public), &ctx);
        assert_eq!(edited.access_role, AccessRole::Public);
    }

    #[test]
    fn index_carries_role_code() {
        let mut page = Page {
            name: "home".into(),
            title: "Welcome".into(),
            access_role: AccessRole::Public,
            ..Page::default()
        };
        let index = registry().index_entity(&mut page).unwrap();
        assert_eq!(index.as_str(), "n:home t:Welcome r:PUB");
    }

    #[test]
    fn deserializes_with_missing_role() {
        let page: Page = serde_json::from_str(r#"{"name":"about","abstract":"Who we are"}"#).unwrap();
        assert_eq!(page.access_role, AccessRole::Privileged);
        assert_eq!(page.summary, "Who we are");
        assert!(registry().validate_entity(&page, None).unwrap().is_valid());
    }
}
