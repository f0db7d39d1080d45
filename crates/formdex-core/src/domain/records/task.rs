//! Tasks with a workflow state, a priority and an optional assignee.

use serde::{Deserialize, Serialize};

use super::{FormMapping, FormModel, MappingContext, merge};
use crate::domain::categories::{DEFAULT_PRIORITY, DEFAULT_TASK_STATE, PRIORITY, TASK_STATE};
use crate::domain::entities::{
    CrossFieldRule, Entity, EntitySchema, FieldSpec, FieldValue, IndexSpec, Record,
    ValidationSuite,
};
use crate::domain::error::DomainError;
use crate::domain::value_objects::EmptyTokenPolicy;

pub const ENTITY: &str = "task";

/// A finished task must carry its completion date.
pub fn schema() -> Result<EntitySchema, DomainError> {
    let suite = ValidationSuite::builder(ENTITY)
        .field(FieldSpec::text("name").length(0, 50).required())
        .field(FieldSpec::text("notes").max(1000.0))
        .field(FieldSpec::category("state", TASK_STATE).required())
        .field(FieldSpec::category("priority", PRIORITY).required())
        .field(FieldSpec::date("dueDate"))
        .field(FieldSpec::date("completionDate"))
        .field(FieldSpec::text("assigneeKey"))
        .field(FieldSpec::text("assigneeName").max(50.0))
        .rule(CrossFieldRule::required_when("completionDate", "state", "done"))
        .rule(CrossFieldRule::required_with("assigneeKey", "assigneeName"))
        .build()?;
    let index = IndexSpec::builder(ENTITY)
        .field("n", "name")
        .category("s", "state", TASK_STATE)
        .category("p", "priority", PRIORITY)
        .field("a", "assigneeName")
        .field("dd", "dueDate")
        .policy(EmptyTokenPolicy::SkipEmpty)
        .build()?;
    Ok(EntitySchema::new(suite, index)?.with_description("Tasks and to-dos"))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Task {
    pub id: String,
    pub tenant: String,
    pub index: String,
    pub name: String,
    pub notes: String,
    pub state: String,
    pub priority: i64,
    pub due_date: String,
    pub completion_date: String,
    pub assignee_key: String,
    pub assignee_name: String,
}

impl Record for Task {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "name" => (&self.name).into(),
            "notes" => (&self.notes).into(),
            "state" => (&self.state).into(),
            "priority" => self.priority.into(),
            "dueDate" => (&self.due_date).into(),
            "completionDate" => (&self.completion_date).into(),
            "assigneeKey" => (&self.assignee_key).into(),
            "assigneeName" => (&self.assignee_name).into(),
            _ => FieldValue::Absent,
        }
    }
}

impl Entity for Task {
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
pub struct TaskForm {
    pub name: Option<String>,
    pub notes: Option<String>,
    pub state: Option<String>,
    pub priority: Option<i64>,
    pub due_date: Option<String>,
    pub completion_date: Option<String>,
    pub assignee_key: Option<String>,
    pub assignee_name: Option<String>,
}

impl Record for TaskForm {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "name" => self.name.as_ref().into(),
            "notes" => self.notes.as_ref().into(),
            "state" => self.state.as_ref().into(),
            "priority" => self.priority.into(),
            "dueDate" => self.due_date.as_ref().into(),
            "completionDate" => self.completion_date.as_ref().into(),
            "assigneeKey" => self.assignee_key.as_ref().into(),
            "assigneeName" => self.assignee_name.as_ref().into(),
            _ => FieldValue::Absent,
        }
    }
}

impl FormModel for TaskForm {
    /// Initial state, medium priority, no dates.
    fn with_defaults(_ctx: &MappingContext) -> Self {
        Self {
            name: Some(String::new()),
            notes: Some(String::new()),
            state: Some(DEFAULT_TASK_STATE.to_owned()),
            priority: Some(DEFAULT_PRIORITY),
            due_date: Some(String::new()),
            completion_date: Some(String::new()),
            assignee_key: Some(String::new()),
            assignee_name: Some(String::new()),
        }
    }
}

impl FormMapping for Task {
    type Form = TaskForm;

    fn fresh(ctx: &MappingContext) -> Self {
        Self {
            tenant: ctx.tenant().to_owned(),
            state: DEFAULT_TASK_STATE.to_owned(),
            priority: DEFAULT_PRIORITY,
            ..Self::default()
        }
    }

    fn to_form(&self, _ctx: &MappingContext) -> TaskForm {
        let state = if self.state.trim().is_empty() {
            DEFAULT_TASK_STATE.to_owned()
        } else {
            self.state.clone()
        };
        TaskForm {
            name: Some(self.name.clone()),
            notes: Some(self.notes.clone()),
            state: Some(state),
            priority: Some(self.priority),
            due_date: Some(self.due_date.clone()),
            completion_date: Some(self.completion_date.clone()),
            assignee_key: Some(self.assignee_key.clone()),
            assignee_name: Some(self.assignee_name.clone()),
        }
    }

    fn apply_form(&mut self, form: &TaskForm) {
        merge(&mut self.name, &form.name);
        merge(&mut self.notes, &form.notes);
        merge(&mut self.state, &form.state);
        merge(&mut self.priority, &form.priority);
        merge(&mut self.due_date, &form.due_date);
        merge(&mut self.completion_date, &form.completion_date);
        merge(&mut self.assignee_key, &form.assignee_key);
        merge(&mut self.assignee_name, &form.assignee_name);
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;
    use crate::domain::entities::keys;

    fn task(state: &str) -> Task {
        Task {
            name: "Repaint hall".into(),
            state: state.into(),
            priority: 2,
            ..Task::default()
        }
    }

    #[test]
    fn done_task_needs_completion_date() {
        let registry = registry();
        let result = registry.validate_entity(&task("done"), None).unwrap();
        assert_eq!(result.errors("completionDate"), [keys::REQUIRED]);

        let mut finished = task("done");
        finished.completion_date = "20250301".into();
        assert!(registry.validate_entity(&finished, None).unwrap().is_valid());
        assert!(registry.validate_entity(&task("doing"), None).unwrap().is_valid());
    }

    #[test]
    fn unknown_state_is_rejected() {
        let result = registry()
            .validate_entity(&task("archived"), Some("state"))
            .unwrap();
        assert_eq!(result.errors("state"), [keys::INVALID_CATEGORY]);
    }

    #[test]
    fn index_uses_state_and_priority_codes() {
        let mut t = task("doing");
        t.assignee_name = "Jane".into();
        let index = registry().index_entity(&mut t).unwrap();
        assert_eq!(index.as_str(), "n:Repaint hall s:DOI p:H a:Jane");
    }

    #[test]
    fn empty_form_gets_initial_state() {
        let (entity, form) = empty_form_round_trip::<Task>();
        assert_eq!(entity.state, DEFAULT_TASK_STATE);
        assert_eq!(form.priority, Some(DEFAULT_PRIORITY));
    }
}
