//! Search index specs and the index strings they build.
//!
//! An index is the space-separated list `tok1:val1 tok2:val2 ...`, stored
//! next to the entity so a plain substring search over it is enough for a
//! search box. Token prefixes keep dimensions apart (`n:` name, `d:` date).

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::domain::categories::CategoryRegistry;
use crate::domain::entities::Record;
use crate::domain::error::DomainError;
use crate::domain::value_objects::EmptyTokenPolicy;

// ── Tokens ───────────────────────────────────────────────────────────────────

/// Where the value of one token comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    /// The field value, trimmed.
    Field(String),
    /// The abbreviation of the field's category in `table`.
    Category { field: String, table: String },
    /// Several fields joined by single spaces, blanks left out
    /// (e.g. first and last name).
    Joined(Vec<String>),
}

impl TokenSource {
    pub fn fields(&self) -> Vec<&str> {
        match self {
            Self::Field(f) | Self::Category { field: f, .. } => vec![f.as_str()],
            Self::Joined(fields) => fields.iter().map(String::as_str).collect(),
        }
    }

    fn render(&self, record: &dyn Record, categories: &CategoryRegistry) -> String {
        match self {
            Self::Field(f) => record.field(f).to_index_text().into_owned(),
            Self::Category { field, table } => categories
                .abbreviation(table, &record.field(field))
                .to_owned(),
            Self::Joined(fields) => {
                let mut out = String::new();
                for f in fields {
                    let value = record.field(f).to_index_text();
                    if value.is_empty() {
                        continue;
                    }
                    if !out.is_empty() {
                        out.push(' ');
                    }
                    out.push_str(&value);
                }
                out
            }
        }
    }
}

/// One `(token, source)` pair of an [`IndexSpec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexToken {
    pub token: String,
    pub source: TokenSource,
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn check_token(token: &str) -> Result<(), DomainError> {
    let invalid = |reason: &str| DomainError::InvalidToken {
        token: token.to_owned(),
        reason: reason.to_owned(),
    };
    if token.is_empty() {
        return Err(invalid("token is empty"));
    }
    if !token.chars().all(is_token_char) {
        return Err(invalid("only letters, digits, '_' and '-' are allowed"));
    }
    Ok(())
}

// ── IndexSpec ────────────────────────────────────────────────────────────────

/// Ordered token declarations for one entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSpec {
    entity: String,
    tokens: Vec<IndexToken>,
    policy: EmptyTokenPolicy,
}

impl IndexSpec {
    pub fn builder(entity: impl Into<String>) -> IndexSpecBuilder {
        IndexSpecBuilder {
            entity: entity.into(),
            tokens: Vec::new(),
            policy: EmptyTokenPolicy::default(),
        }
    }

    pub fn new(
        entity: impl Into<String>,
        tokens: Vec<IndexToken>,
        policy: EmptyTokenPolicy,
    ) -> Result<Self, DomainError> {
        IndexSpecBuilder {
            entity: entity.into(),
            tokens,
            policy,
        }
        .build()
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn tokens(&self) -> &[IndexToken] {
        &self.tokens
    }

    pub fn policy(&self) -> EmptyTokenPolicy {
        self.policy
    }

    /// Build the index of a snapshot. Deterministic; never fails.
    pub fn build(&self, record: &dyn Record, categories: &CategoryRegistry) -> SearchIndex {
        let mut out = String::new();
        for IndexToken { token, source } in &self.tokens {
            let value = source.render(record, categories);
            if value.is_empty() && self.policy == EmptyTokenPolicy::SkipEmpty {
                continue;
            }
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(token);
            out.push(':');
            out.push_str(&value);
        }
        SearchIndex(out)
    }
}

/// Collects token declarations for an [`IndexSpec`].
#[derive(Debug, Clone)]
pub struct IndexSpecBuilder {
    entity: String,
    tokens: Vec<IndexToken>,
    policy: EmptyTokenPolicy,
}

impl IndexSpecBuilder {
    fn push(mut self, token: &str, source: TokenSource) -> Self {
        self.tokens.push(IndexToken {
            token: token.to_owned(),
            source,
        });
        self
    }

    pub fn field(self, token: &str, field: &str) -> Self {
        self.push(token, TokenSource::Field(field.to_owned()))
    }

    pub fn category(self, token: &str, field: &str, table: &str) -> Self {
        self.push(
            token,
            TokenSource::Category {
                field: field.to_owned(),
                table: table.to_owned(),
            },
        )
    }

    pub fn joined(self, token: &str, fields: &[&str]) -> Self {
        self.push(
            token,
            TokenSource::Joined(fields.iter().map(|f| (*f).to_owned()).collect()),
        )
    }

    pub fn policy(mut self, policy: EmptyTokenPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Fail fast on malformed or duplicate tokens and empty sources.
    ///
    /// Whether the referenced fields exist is checked when the spec is
    /// paired with a suite in the schema registry.
    pub fn build(self) -> Result<IndexSpec, DomainError> {
        let mut seen = HashSet::new();
        for IndexToken { token, source } in &self.tokens {
            check_token(token)?;
            if !seen.insert(token.as_str()) {
                return Err(DomainError::DuplicateToken {
                    entity: self.entity.clone(),
                    token: token.clone(),
                });
            }
            let fields = source.fields();
            if fields.is_empty() || fields.iter().any(|f| f.trim().is_empty()) {
                return Err(DomainError::InvalidToken {
                    token: token.clone(),
                    reason: "token reads no field".into(),
                });
            }
            if matches!(source, TokenSource::Category { table, .. } if table.trim().is_empty()) {
                return Err(DomainError::InvalidToken {
                    token: token.clone(),
                    reason: "category token without a table".into(),
                });
            }
        }
        Ok(IndexSpec {
            entity: self.entity,
            tokens: self.tokens,
            policy: self.policy,
        })
    }
}

// ── SearchIndex ──────────────────────────────────────────────────────────────

/// A derived index string. Rebuilt from the entity on every write, never
/// edited by hand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SearchIndex(String);

impl SearchIndex {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Case-insensitive substring search over the whole index.
    pub fn matches(&self, term: &str) -> bool {
        self.0.to_lowercase().contains(&term.trim().to_lowercase())
    }

    /// Like [`Self::matches`] but only within the value of `token`.
    pub fn matches_token(&self, token: &str, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        self.fragments()
            .iter()
            .any(|(t, value)| *t == token && value.to_lowercase().contains(&term))
    }

    /// The `(token, value)` fragments in index order.
    ///
    /// A fragment starts at every word shaped like `token:`; values
    /// containing such words are split there.
    pub fn fragments(&self) -> Vec<(&str, &str)> {
        let s = self.0.as_str();
        let mut starts = Vec::new();
        let mut offset = 0;
        for word in s.split(' ') {
            let starts_fragment = word
                .split_once(':')
                .is_some_and(|(t, _)| !t.is_empty() && t.chars().all(is_token_char));
            if starts_fragment {
                starts.push(offset);
            }
            offset += word.len() + 1;
        }

        starts
            .iter()
            .enumerate()
            .filter_map(|(i, &start)| {
                let end = starts.get(i + 1).map_or(s.len(), |next| next - 1);
                s[start..end].trim_end().split_once(':')
            })
            .collect()
    }
}

impl fmt::Display for SearchIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SearchIndex {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Wrap an index string read back from storage.
impl From<String> for SearchIndex {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<SearchIndex> for String {
    fn from(index: SearchIndex) -> Self {
        index.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::categories::CALENDAR_EVENT_TYPE;
    use crate::domain::entities::FieldValue;

    struct Event {
        name: &'static str,
        start: &'static str,
        kind: Option<i64>,
    }

    impl Record for Event {
        fn field(&self, name: &str) -> FieldValue<'_> {
            match name {
                "name" => self.name.into(),
                "startDate" => self.start.into(),
                "type" => self.kind.into(),
                _ => FieldValue::Absent,
            }
        }
    }

    fn spec(policy: EmptyTokenPolicy) -> IndexSpec {
        IndexSpec::builder("calendar_event")
            .field("n", "name")
            .field("sd", "startDate")
            .category("et", "type", CALENDAR_EVENT_TYPE)
            .policy(policy)
            .build()
            .unwrap()
    }

    #[test]
    fn builds_tokens_in_order_with_abbreviation() {
        let registry = CategoryRegistry::builtin().unwrap();
        let event = Event {
            name: "Board Meeting",
            start: "20250615",
            kind: Some(1),
        };
        let index = spec(EmptyTokenPolicy::SkipEmpty).build(&event, &registry);
        assert_eq!(index.as_str(), "n:Board Meeting sd:20250615 et:BRD");
    }

    #[test]
    fn empty_policy_decides_dangling_tokens() {
        let registry = CategoryRegistry::builtin().unwrap();
        let event = Event {
            name: "Party",
            start: "",
            kind: None,
        };
        let skip = spec(EmptyTokenPolicy::SkipEmpty).build(&event, &registry);
        let always = spec(EmptyTokenPolicy::Always).build(&event, &registry);
        assert_eq!(skip.as_str(), "n:Party");
        assert_eq!(always.as_str(), "n:Party sd: et:");
    }

    #[test]
    fn building_twice_is_identical() {
        let registry = CategoryRegistry::builtin().unwrap();
        let event = Event {
            name: "x",
            start: "20240101",
            kind: Some(3),
        };
        let spec = spec(EmptyTokenPolicy::SkipEmpty);
        assert_eq!(spec.build(&event, &registry), spec.build(&event, &registry));
    }

    #[test]
    fn joined_tokens_skip_blank_parts() {
        struct Person;
        impl Record for Person {
            fn field(&self, name: &str) -> FieldValue<'_> {
                match name {
                    "first" => FieldValue::Text("  "),
                    "last" => FieldValue::Text("Doe"),
                    _ => FieldValue::Absent,
                }
            }
        }
        let spec = IndexSpec::builder("p")
            .joined("ie", &["first", "last"])
            .build()
            .unwrap();
        let registry = CategoryRegistry::new();
        assert_eq!(spec.build(&Person, &registry).as_str(), "ie:Doe");
    }

    #[test]
    fn duplicate_tokens_are_rejected() {
        let err = IndexSpec::builder("e")
            .field("n", "name")
            .field("n", "nickname")
            .build()
            .unwrap_err();
        assert!(matches!(err, DomainError::DuplicateToken { .. }));
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        for token in ["", "a:b", "a b"] {
            let err = IndexSpec::builder("e").field(token, "f").build().unwrap_err();
            assert!(matches!(err, DomainError::InvalidToken { .. }), "{token:?}");
        }
        assert!(IndexSpec::builder("e").joined("j", &[]).build().is_err());
    }

    #[test]
    fn matching_is_case_insensitive() {
        let index = SearchIndex::from("n:Board Meeting sd:20250615 et:BRD".to_owned());
        assert!(index.matches("board"));
        assert!(index.matches("et:brd"));
        assert!(!index.matches("assembly"));
    }

    #[test]
    fn token_matching_stays_within_one_dimension() {
        let index = SearchIndex::from("d:20251201 ir:John Smith ie:Jane Doe".to_owned());
        assert_eq!(
            index.fragments(),
            [("d", "20251201"), ("ir", "John Smith"), ("ie", "Jane Doe")]
        );
        assert!(index.matches_token("ie", "doe"));
        assert!(!index.matches_token("ir", "doe"));
        assert!(!index.matches_token("x", ""));
    }
}
