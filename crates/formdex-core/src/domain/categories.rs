//! Category tables and the category registry.
//!
//! # Design
//!
//! Each enumeration of the application (event types, membership
//! categories, task states, ...) is described exactly once as a static
//! slice of [`Category`] entries. The slices are plain data. At startup
//! they are assembled into a [`CategoryRegistry`], which is built once,
//! checked for integrity, and then passed by reference to every validator
//! and index builder that needs it. Nothing reads the static slices
//! directly at validation time.
//!
//! # Adding a New Enumeration
//!
//! 1. Add a `pub static` slice below
//! 2. Add its table name constant and default id
//! 3. Register it in [`CategoryRegistry::builtin`]
//! 4. Validators and index tokens then find it by name

use std::borrow::Cow;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::entities::FieldValue;
use crate::domain::error::DomainError;

// ── Category ids ─────────────────────────────────────────────────────────────

/// Identifier of one category entry: numeric in most tables, a string key
/// in a few (access roles, task states).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryId {
    Num(i64),
    Key(Cow<'static, str>),
}

impl CategoryId {
    /// Whether a field value denotes this id.
    ///
    /// Numeric ids also accept numeric text, since form inputs are strings.
    pub fn matches(&self, value: &FieldValue<'_>) -> bool {
        match (self, value) {
            (Self::Num(id), FieldValue::Number(n)) => (*id as f64) == *n,
            (Self::Num(id), FieldValue::Text(s)) => s.trim().parse::<i64>() == Ok(*id),
            (Self::Key(key), FieldValue::Text(s)) => key.as_ref() == s.trim(),
            _ => false,
        }
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => write!(f, "{n}"),
            Self::Key(k) => f.write_str(k),
        }
    }
}

impl From<i64> for CategoryId {
    fn from(n: i64) -> Self {
        Self::Num(n)
    }
}

impl From<&'static str> for CategoryId {
    fn from(s: &'static str) -> Self {
        Self::Key(Cow::Borrowed(s))
    }
}

impl From<String> for CategoryId {
    fn from(s: String) -> Self {
        Self::Key(Cow::Owned(s))
    }
}

// ── Category ─────────────────────────────────────────────────────────────────

/// One entry of an enumeration: `{id, abbreviation, name, icon}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    /// Short code used in search indexes (e.g. `BRD`).
    pub abbreviation: Cow<'static, str>,
    /// Display name (or its i18n key).
    pub name: Cow<'static, str>,
    pub icon: Cow<'static, str>,
}

impl Category {
    pub const fn numbered(
        id: i64,
        abbreviation: &'static str,
        name: &'static str,
        icon: &'static str,
    ) -> Self {
        Self {
            id: CategoryId::Num(id),
            abbreviation: Cow::Borrowed(abbreviation),
            name: Cow::Borrowed(name),
            icon: Cow::Borrowed(icon),
        }
    }

    pub const fn keyed(
        id: &'static str,
        abbreviation: &'static str,
        name: &'static str,
        icon: &'static str,
    ) -> Self {
        Self {
            id: CategoryId::Key(Cow::Borrowed(id)),
            abbreviation: Cow::Borrowed(abbreviation),
            name: Cow::Borrowed(name),
            icon: Cow::Borrowed(icon),
        }
    }
}

// ── CategoryTable ────────────────────────────────────────────────────────────

/// A named, non-empty enumeration with a designated default member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTable {
    name: String,
    entries: Vec<Category>,
    default_id: CategoryId,
}

impl CategoryTable {
    /// Build a table, failing fast on empty tables, duplicate ids or
    /// abbreviations, and a default that is not a member.
    pub fn new(
        name: impl Into<String>,
        entries: impl Into<Vec<Category>>,
        default_id: impl Into<CategoryId>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        let entries = entries.into();
        let default_id = default_id.into();
        let invalid = |reason: String| DomainError::InvalidCategoryTable {
            table: name.clone(),
            reason,
        };

        if name.trim().is_empty() {
            return Err(invalid("table name is empty".into()));
        }
        if entries.is_empty() {
            return Err(invalid("table has no entries".into()));
        }

        let mut ids = HashSet::new();
        let mut abbreviations = HashSet::new();
        for entry in &entries {
            if !ids.insert(&entry.id) {
                return Err(invalid(format!("duplicate id {}", entry.id)));
            }
            if entry.abbreviation.is_empty() {
                return Err(invalid(format!("entry {} has no abbreviation", entry.id)));
            }
            if !abbreviations.insert(entry.abbreviation.as_ref()) {
                return Err(invalid(format!(
                    "duplicate abbreviation {}",
                    entry.abbreviation
                )));
            }
        }
        if !ids.contains(&default_id) {
            return Err(invalid(format!("default {default_id} is not a member")));
        }

        Ok(Self {
            name,
            entries,
            default_id,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[Category] {
        &self.entries
    }

    pub fn default_id(&self) -> &CategoryId {
        &self.default_id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry a field value denotes, if any.
    pub fn find(&self, value: &FieldValue<'_>) -> Option<&Category> {
        self.entries.iter().find(|c| c.id.matches(value))
    }

    pub fn get(&self, id: &CategoryId) -> Option<&Category> {
        self.entries.iter().find(|c| &c.id == id)
    }

    pub fn contains(&self, value: &FieldValue<'_>) -> bool {
        self.find(value).is_some()
    }

    /// Abbreviation for a field value; `None` for non-members.
    pub fn abbreviation(&self, value: &FieldValue<'_>) -> Option<&str> {
        self.find(value).map(|c| c.abbreviation.as_ref())
    }
}

// ── CategoryRegistry ─────────────────────────────────────────────────────────

/// All category tables known to the process, keyed by table name.
///
/// Built once, read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryRegistry {
    tables: BTreeMap<String, CategoryTable>,
}

impl CategoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table. Re-registering a name is a configuration error.
    pub fn register(&mut self, table: CategoryTable) -> Result<(), DomainError> {
        if self.tables.contains_key(table.name()) {
            return Err(DomainError::InvalidCategoryTable {
                table: table.name().to_owned(),
                reason: "registered twice".into(),
            });
        }
        self.tables.insert(table.name().to_owned(), table);
        Ok(())
    }

    pub fn table(&self, name: &str) -> Option<&CategoryTable> {
        self.tables.get(name)
    }

    /// Like [`Self::table`] but a missing table is an error.
    pub fn require(&self, name: &str) -> Result<&CategoryTable, DomainError> {
        self.table(name)
            .ok_or_else(|| DomainError::UnknownCategoryTable {
                table: name.to_owned(),
            })
    }

    pub fn tables(&self) -> impl Iterator<Item = &CategoryTable> {
        self.tables.values()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Abbreviation of `value` in `table`, or `""` when either is unknown.
    pub fn abbreviation<'r>(&'r self, table: &str, value: &FieldValue<'_>) -> &'r str {
        self.table(table)
            .and_then(|t| t.abbreviation(value))
            .unwrap_or("")
    }

    /// The registry of every built-in enumeration.
    pub fn builtin() -> Result<Self, DomainError> {
        let mut registry = Self::new();
        for (name, entries, default_id) in builtin_tables() {
            registry.register(CategoryTable::new(name, entries.to_vec(), default_id)?)?;
        }
        Ok(registry)
    }
}

// ── Built-in tables ──────────────────────────────────────────────────────────

pub const CALENDAR_EVENT_TYPE: &str = "calendar_event_type";
pub const MEMBERSHIP_CATEGORY: &str = "membership_category";
pub const RESERVATION_TYPE: &str = "reservation_type";
pub const OWNERSHIP_TYPE: &str = "ownership_type";
pub const INVITATION_STATE: &str = "invitation_state";
pub const SECTION_TYPE: &str = "section_type";
pub const DOCUMENT_TYPE: &str = "document_type";
pub const TASK_STATE: &str = "task_state";
pub const PRIORITY: &str = "priority";
pub const WORK_RELATIONSHIP_TYPE: &str = "work_relationship_type";
pub const ACCESS_ROLE: &str = "access_role";

pub const DEFAULT_CALENDAR_EVENT_TYPE: i64 = 0;
pub const DEFAULT_MEMBERSHIP_CATEGORY: i64 = 0;
pub const DEFAULT_RESERVATION_TYPE: i64 = 0;
pub const DEFAULT_OWNERSHIP_TYPE: i64 = 0;
pub const DEFAULT_INVITATION_STATE: i64 = 0;
pub const DEFAULT_SECTION_TYPE: i64 = 0;
pub const DEFAULT_DOCUMENT_TYPE: i64 = 0;
pub const DEFAULT_TASK_STATE: &str = "initial";
pub const DEFAULT_PRIORITY: i64 = 1;
pub const DEFAULT_WORK_RELATIONSHIP_TYPE: i64 = 0;

pub static CALENDAR_EVENT_TYPES: &[Category] = &[
    Category::numbered(0, "OTH", "calendarEventType.other", "calendar-outline"),
    Category::numbered(1, "BRD", "calendarEventType.boardMeeting", "people-outline"),
    Category::numbered(2, "GA", "calendarEventType.generalAssembly", "megaphone-outline"),
    Category::numbered(3, "TRN", "calendarEventType.training", "barbell-outline"),
    Category::numbered(4, "CMP", "calendarEventType.competition", "trophy-outline"),
    Category::numbered(5, "SOC", "calendarEventType.social", "beer-outline"),
    Category::numbered(6, "HOL", "calendarEventType.holiday", "sunny-outline"),
];

pub static MEMBERSHIP_CATEGORIES: &[Category] = &[
    Category::numbered(0, "A", "membershipCategory.active", "person-outline"),
    Category::numbered(1, "P", "membershipCategory.passive", "person-remove-outline"),
    Category::numbered(2, "J", "membershipCategory.junior", "happy-outline"),
    Category::numbered(3, "S", "membershipCategory.senior", "accessibility-outline"),
    Category::numbered(4, "H", "membershipCategory.honorary", "ribbon-outline"),
    Category::numbered(5, "F", "membershipCategory.free", "gift-outline"),
];

pub static RESERVATION_TYPES: &[Category] = &[
    Category::numbered(0, "RES", "reservationType.reservation", "calendar-number-outline"),
    Category::numbered(1, "RNT", "reservationType.rental", "key-outline"),
    Category::numbered(2, "REG", "reservationType.registration", "create-outline"),
    Category::numbered(3, "SGN", "reservationType.signUp", "hand-right-outline"),
];

pub static OWNERSHIP_TYPES: &[Category] = &[
    Category::numbered(0, "INH", "ownershipType.inhabitant", "home-outline"),
    Category::numbered(1, "OWN", "ownershipType.owner", "key-outline"),
    Category::numbered(2, "LSE", "ownershipType.lease", "document-text-outline"),
    Category::numbered(3, "USE", "ownershipType.user", "person-outline"),
];

pub static INVITATION_STATES: &[Category] = &[
    Category::numbered(0, "PEN", "invitationState.pending", "hourglass-outline"),
    Category::numbered(1, "ACC", "invitationState.accepted", "checkmark-outline"),
    Category::numbered(2, "DEC", "invitationState.declined", "close-outline"),
    Category::numbered(3, "REV", "invitationState.revoked", "trash-outline"),
];

pub static SECTION_TYPES: &[Category] = &[
    Category::numbered(0, "ART", "sectionType.article", "newspaper-outline"),
    Category::numbered(1, "ALB", "sectionType.album", "images-outline"),
    Category::numbered(2, "CAL", "sectionType.calendar", "calendar-outline"),
    Category::numbered(3, "CHT", "sectionType.chart", "bar-chart-outline"),
    Category::numbered(4, "LST", "sectionType.list", "list-outline"),
    Category::numbered(5, "MAP", "sectionType.map", "map-outline"),
    Category::numbered(6, "VID", "sectionType.video", "videocam-outline"),
];

pub static DOCUMENT_TYPES: &[Category] = &[
    Category::numbered(0, "DOC", "documentType.document", "document-outline"),
    Category::numbered(1, "IMG", "documentType.image", "image-outline"),
    Category::numbered(2, "CTR", "documentType.contract", "document-lock-outline"),
    Category::numbered(3, "INV", "documentType.invoice", "receipt-outline"),
    Category::numbered(4, "MIN", "documentType.minutes", "reader-outline"),
];

pub static TASK_STATES: &[Category] = &[
    Category::keyed("initial", "INI", "taskState.initial", "ellipse-outline"),
    Category::keyed("planned", "PLN", "taskState.planned", "calendar-outline"),
    Category::keyed("doing", "DOI", "taskState.doing", "play-outline"),
    Category::keyed("waiting", "WAI", "taskState.waiting", "pause-outline"),
    Category::keyed("done", "DON", "taskState.done", "checkmark-done-outline"),
];

pub static PRIORITIES: &[Category] = &[
    Category::numbered(0, "L", "priority.low", "arrow-down-outline"),
    Category::numbered(1, "M", "priority.medium", "remove-outline"),
    Category::numbered(2, "H", "priority.high", "arrow-up-outline"),
];

pub static WORK_RELATIONSHIP_TYPES: &[Category] = &[
    Category::numbered(0, "EMP", "workRelType.employee", "briefcase-outline"),
    Category::numbered(1, "FRL", "workRelType.freelancer", "laptop-outline"),
    Category::numbered(2, "INT", "workRelType.intern", "school-outline"),
    Category::numbered(3, "VOL", "workRelType.volunteer", "heart-outline"),
    Category::numbered(4, "BRD", "workRelType.boardMember", "people-outline"),
];

pub static ACCESS_ROLES: &[Category] = &[
    Category::keyed("privileged", "PRV", "accessRole.privileged", "lock-closed-outline"),
    Category::keyed("protected", "PRT", "accessRole.protected", "shield-outline"),
    Category::keyed("public", "PUB", "accessRole.public", "globe-outline"),
];

/// `(name, entries, default id)` for every built-in enumeration.
fn builtin_tables() -> Vec<(&'static str, &'static [Category], CategoryId)> {
    vec![
        (
            CALENDAR_EVENT_TYPE,
            CALENDAR_EVENT_TYPES,
            DEFAULT_CALENDAR_EVENT_TYPE.into(),
        ),
        (
            MEMBERSHIP_CATEGORY,
            MEMBERSHIP_CATEGORIES,
            DEFAULT_MEMBERSHIP_CATEGORY.into(),
        ),
        (
            RESERVATION_TYPE,
            RESERVATION_TYPES,
            DEFAULT_RESERVATION_TYPE.into(),
        ),
        (OWNERSHIP_TYPE, OWNERSHIP_TYPES, DEFAULT_OWNERSHIP_TYPE.into()),
        (
            INVITATION_STATE,
            INVITATION_STATES,
            DEFAULT_INVITATION_STATE.into(),
        ),
        (SECTION_TYPE, SECTION_TYPES, DEFAULT_SECTION_TYPE.into()),
        (DOCUMENT_TYPE, DOCUMENT_TYPES, DEFAULT_DOCUMENT_TYPE.into()),
        (TASK_STATE, TASK_STATES, DEFAULT_TASK_STATE.into()),
        (PRIORITY, PRIORITIES, DEFAULT_PRIORITY.into()),
        (
            WORK_RELATIONSHIP_TYPE,
            WORK_RELATIONSHIP_TYPES,
            DEFAULT_WORK_RELATIONSHIP_TYPE.into(),
        ),
        (
            ACCESS_ROLE,
            ACCESS_ROLES,
            crate::domain::AccessRole::most_restrictive().as_str().into(),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_integrity() {
        // Every built-in table passes the same checks as user-declared ones.
        let registry = CategoryRegistry::builtin().unwrap();
        assert_eq!(registry.tables().count(), 11);
        for table in registry.tables() {
            assert!(table.get(table.default_id()).is_some(), "{}", table.name());
        }
    }

    #[test]
    fn access_role_table_covers_every_role() {
        let registry = CategoryRegistry::builtin().unwrap();
        let table = registry.require(ACCESS_ROLE).unwrap();
        for role in crate::domain::AccessRole::ALL {
            assert!(table.contains(&FieldValue::Text(role.as_str())));
        }
        assert_eq!(table.default_id(), &CategoryId::from("privileged"));
    }

    #[test]
    fn abbreviation_lookup_by_number_and_numeric_text() {
        let registry = CategoryRegistry::builtin().unwrap();
        assert_eq!(
            registry.abbreviation(CALENDAR_EVENT_TYPE, &FieldValue::Number(1.0)),
            "BRD"
        );
        assert_eq!(
            registry.abbreviation(CALENDAR_EVENT_TYPE, &FieldValue::Text("1")),
            "BRD"
        );
    }

    #[test]
    fn abbreviation_of_unknown_is_empty() {
        let registry = CategoryRegistry::builtin().unwrap();
        assert_eq!(
            registry.abbreviation(CALENDAR_EVENT_TYPE, &FieldValue::Number(99.0)),
            ""
        );
        assert_eq!(registry.abbreviation("nope", &FieldValue::Number(1.0)), "");
        assert_eq!(
            registry.abbreviation(CALENDAR_EVENT_TYPE, &FieldValue::Absent),
            ""
        );
    }

    #[test]
    fn table_rejects_duplicate_ids() {
        let result = CategoryTable::new(
            "dup",
            vec![
                Category::numbered(0, "A", "a", ""),
                Category::numbered(0, "B", "b", ""),
            ],
            0_i64,
        );
        assert!(matches!(
            result,
            Err(DomainError::InvalidCategoryTable { .. })
        ));
    }

    #[test]
    fn table_rejects_foreign_default() {
        let result = CategoryTable::new("t", vec![Category::numbered(0, "A", "a", "")], 7_i64);
        assert!(result.is_err());
    }

    #[test]
    fn table_rejects_empty() {
        assert!(CategoryTable::new("t", Vec::<Category>::new(), 0_i64).is_err());
    }

    #[test]
    fn registry_rejects_double_registration() {
        let mut registry = CategoryRegistry::new();
        let table =
            CategoryTable::new("t", vec![Category::numbered(0, "A", "a", "")], 0_i64).unwrap();
        registry.register(table.clone()).unwrap();
        assert!(registry.register(table).is_err());
    }

    #[test]
    fn keyed_ids_do_not_match_numbers() {
        let id = CategoryId::from("done");
        assert!(id.matches(&FieldValue::Text("done")));
        assert!(!id.matches(&FieldValue::Number(0.0)));
    }
}
