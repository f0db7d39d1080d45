//! Domain value objects: FieldKind, DateOrdering, EmptyTokenPolicy, AccessRole.
//!
//! # Design
//!
//! These are pure `Copy` value types with no identity.
//! This file's only job is to define the types, their string
//! representations, and their `FromStr` parsers. Manifests and the CLI
//! speak the string forms; the engine speaks the enums.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Store dates ──────────────────────────────────────────────────────────────

/// Sentinel used for open-ended end dates ("valid until further notice").
pub const OPEN_END_DATE: &str = "99999999";

/// Whether `value` is an 8-digit `YYYYMMDD` store date naming a real day.
///
/// [`OPEN_END_DATE`] is accepted as well.
pub fn is_store_date(value: &str) -> bool {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    if value == OPEN_END_DATE {
        return true;
    }
    let part = |range: std::ops::Range<usize>| value[range].parse::<u32>().unwrap_or(0);
    let (year, month, day) = (part(0..4), part(4..6), part(6..8));
    day >= 1 && day <= days_in_month(year, month)
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) => 29,
        2 => 28,
        _ => 0,
    }
}

// ── FieldKind ────────────────────────────────────────────────────────────────

/// The primitive shape of one entity field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[serde(alias = "string")]
    Text,
    Number,
    Date,
    Category,
    Boolean,
}

impl FieldKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "string",
            Self::Number => "number",
            Self::Date => "date",
            Self::Category => "category",
            Self::Boolean => "boolean",
        }
    }

    /// Whether min/max bounds mean something for this kind.
    pub const fn supports_bounds(self) -> bool {
        matches!(self, Self::Text | Self::Number)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "string" | "text" => Ok(Self::Text),
            "number" | "num" => Ok(Self::Number),
            "date" => Ok(Self::Date),
            "category" | "enum" => Ok(Self::Category),
            "boolean" | "bool" => Ok(Self::Boolean),
            other => Err(DomainError::InvalidValue(format!(
                "unknown field kind: {other}"
            ))),
        }
    }
}

// ── DateOrdering ─────────────────────────────────────────────────────────────

/// How strictly an end date must follow its start date.
///
/// Chosen per rule: a membership exit must be strictly after its entry,
/// while a same-day reservation may end on the day it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateOrdering {
    /// `end > start`
    Strict,
    /// `end >= start`
    AllowEqual,
}

impl DateOrdering {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::AllowEqual => "allow-equal",
        }
    }

    /// Whether `end` is correctly ordered after `start`.
    ///
    /// Both must be store dates; 8-digit strings compare chronologically.
    pub fn holds(self, start: &str, end: &str) -> bool {
        match self {
            Self::Strict => end > start,
            Self::AllowEqual => end >= start,
        }
    }
}

impl fmt::Display for DateOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateOrdering {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" | "after" => Ok(Self::Strict),
            "allow-equal" | "after-or-equal" | "same-day" => Ok(Self::AllowEqual),
            other => Err(DomainError::InvalidValue(format!(
                "unknown date ordering: {other}"
            ))),
        }
    }
}

// ── EmptyTokenPolicy ─────────────────────────────────────────────────────────

/// What an index does with a token whose value is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyTokenPolicy {
    /// Emit `token:` even when the value is empty.
    Always,
    /// Leave the token out entirely.
    #[default]
    SkipEmpty,
}

impl EmptyTokenPolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::SkipEmpty => "skip-empty",
        }
    }
}

impl fmt::Display for EmptyTokenPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmptyTokenPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "skip-empty" | "skip" => Ok(Self::SkipEmpty),
            other => Err(DomainError::InvalidValue(format!(
                "unknown empty-token policy: {other}"
            ))),
        }
    }
}

// ── AccessRole ───────────────────────────────────────────────────────────────

/// Who may see a piece of content.
///
/// Ordered from most to least restrictive. The default is the most
/// restrictive role: be on the safe side, restrict access by default.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AccessRole {
    /// Only privileged members (admins, content owners).
    #[default]
    Privileged,
    /// Registered members of the tenant.
    Protected,
    /// Anyone, including anonymous visitors.
    Public,
}

impl AccessRole {
    pub const ALL: [AccessRole; 3] = [Self::Privileged, Self::Protected, Self::Public];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Privileged => "privileged",
            Self::Protected => "protected",
            Self::Public => "public",
        }
    }

    pub const fn most_restrictive() -> Self {
        Self::Privileged
    }

    /// Parse an optional role, falling back to the most restrictive one
    /// when the value is missing or unrecognised.
    pub fn or_restrictive(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(Self::most_restrictive)
    }
}

impl fmt::Display for AccessRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "privileged" | "private" | "admin" => Ok(Self::Privileged),
            "protected" | "members" => Ok(Self::Protected),
            "public" => Ok(Self::Public),
            other => Err(DomainError::InvalidValue(format!(
                "unknown access role: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_date_shape() {
        assert!(is_store_date("20250615"));
        assert!(is_store_date(OPEN_END_DATE));
        assert!(!is_store_date("2025-06-15"));
        assert!(!is_store_date("2025061"));
        assert!(!is_store_date(""));
    }

    #[test]
    fn store_date_must_name_a_real_day() {
        assert!(!is_store_date("20231399"));
        assert!(!is_store_date("20230100"));
        assert!(!is_store_date("20230431"));
        assert!(!is_store_date("20230229"));
        assert!(is_store_date("20240229"));
        assert!(!is_store_date("19000229"));
        assert!(is_store_date("20000229"));
        assert!(is_store_date("20231231"));
    }

    #[test]
    fn field_kind_from_str_accepts_aliases() {
        assert_eq!("string".parse::<FieldKind>().unwrap(), FieldKind::Text);
        assert_eq!("enum".parse::<FieldKind>().unwrap(), FieldKind::Category);
        assert_eq!("bool".parse::<FieldKind>().unwrap(), FieldKind::Boolean);
        assert!("blob".parse::<FieldKind>().is_err());
    }

    #[test]
    fn date_ordering_strictness() {
        assert!(DateOrdering::Strict.holds("20230101", "20230102"));
        assert!(!DateOrdering::Strict.holds("20230101", "20230101"));
        assert!(DateOrdering::AllowEqual.holds("20230101", "20230101"));
        assert!(!DateOrdering::AllowEqual.holds("20230102", "20230101"));
    }

    #[test]
    fn access_role_defaults_to_most_restrictive() {
        assert_eq!(AccessRole::default(), AccessRole::Privileged);
        assert_eq!(AccessRole::or_restrictive(None), AccessRole::Privileged);
        assert_eq!(
            AccessRole::or_restrictive(Some("nonsense")),
            AccessRole::Privileged
        );
        assert_eq!(
            AccessRole::or_restrictive(Some("public")),
            AccessRole::Public
        );
    }

    #[test]
    fn access_roles_ordered_by_restriction() {
        assert!(AccessRole::Privileged < AccessRole::Protected);
        assert!(AccessRole::Protected < AccessRole::Public);
    }

    #[test]
    fn empty_token_policy_display_roundtrip() {
        for p in [EmptyTokenPolicy::Always, EmptyTokenPolicy::SkipEmpty] {
            assert_eq!(p.to_string().parse::<EmptyTokenPolicy>().unwrap(), p);
        }
    }
}
