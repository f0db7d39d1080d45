//! The seam between the generic engine and concrete entity types.
//!
//! The engine never sees entity structs. It asks a [`Record`] for the value
//! of a field by name and receives a borrowed [`FieldValue`] snapshot.
//! Unknown or unset fields come back as [`FieldValue::Absent`], so no
//! lookup can fail.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// A borrowed view of one field value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// Missing, unset or null.
    Absent,
    Text(&'a str),
    Number(f64),
    Flag(bool),
    /// Present but not a scalar (a list or nested object).
    Composite,
}

impl<'a> FieldValue<'a> {
    /// Absent, or text that is empty after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Absent => true,
            Self::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric interpretation; numeric text (as typed into a form) counts.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(b) => Some(*b),
            Self::Text("true") => Some(true),
            Self::Text("false") => Some(false),
            _ => None,
        }
    }

    /// Rendering used by the index builder: absent becomes `""`.
    pub fn to_index_text(&self) -> Cow<'a, str> {
        match self {
            Self::Absent | Self::Composite => Cow::Borrowed(""),
            Self::Text(s) => Cow::Borrowed(s.trim()),
            Self::Number(n) => Cow::Owned(format_number(*n)),
            Self::Flag(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_index_text())
    }
}

/// Integral numbers render without a fractional part (`1`, not `1.0`).
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(s: &'a str) -> Self {
        Self::Text(s)
    }
}

impl<'a> From<&'a String> for FieldValue<'a> {
    fn from(s: &'a String) -> Self {
        Self::Text(s.as_str())
    }
}

impl From<f64> for FieldValue<'_> {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for FieldValue<'_> {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<u32> for FieldValue<'_> {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<bool> for FieldValue<'_> {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

impl<'a, T> From<Option<T>> for FieldValue<'a>
where
    T: Into<FieldValue<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// Anything the engine can read fields from: a typed entity, a typed form
/// model, or a loosely-typed document.
pub trait Record {
    /// Value of `name`, or [`FieldValue::Absent`] when unknown or unset.
    fn field(&self, name: &str) -> FieldValue<'_>;
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, name: &str) -> FieldValue<'_> {
        (**self).field(name)
    }
}

/// Loose string documents, as typed into a form or passed on a command line.
impl Record for HashMap<String, String> {
    fn field(&self, name: &str) -> FieldValue<'_> {
        self.get(name).into()
    }
}

impl Record for BTreeMap<String, String> {
    fn field(&self, name: &str) -> FieldValue<'_> {
        self.get(name).into()
    }
}

/// A persisted domain entity with a registered schema.
pub trait Entity: Record {
    /// Name under which the entity's schema is registered.
    const ENTITY: &'static str;

    /// Tenant the entity belongs to.
    fn tenant(&self) -> &str;

    /// Store a freshly built search index on the entity.
    fn set_index(&mut self, index: String);

    /// The currently stored search index.
    fn index(&self) -> &str;
}
