//! Field validators: one predicate per primitive field shape.
//!
//! Every validator appends zero or more message keys to the enclosing
//! [`ValidationResult`] under the field's name and never fails. Malformed
//! input is a violation, not an error. An empty optional value is accepted
//! *before* any bound is looked at.

use crate::domain::categories::CategoryTable;
use crate::domain::entities::{FieldValue, ValidationResult, keys};
use crate::domain::value_objects::is_store_date;

/// Text of at most `max_len` and at least `min_len` characters.
pub fn validate_string(
    result: &mut ValidationResult,
    name: &str,
    value: FieldValue<'_>,
    max_len: Option<usize>,
    min_len: usize,
    required: bool,
) {
    let text = match value {
        v if v.is_blank() => {
            if required {
                result.add(name, keys::REQUIRED);
            }
            return;
        }
        FieldValue::Text(s) => s,
        _ => {
            result.add(name, keys::WRONG_TYPE);
            return;
        }
    };

    let len = text.chars().count();
    if len < min_len {
        result.add(name, keys::TOO_SHORT);
    }
    if max_len.is_some_and(|max| len > max) {
        result.add(name, keys::TOO_LONG);
    }
}

/// A number within `[min, max]`.
///
/// An absent optional number is skipped entirely, range included.
pub fn validate_number(
    result: &mut ValidationResult,
    name: &str,
    value: FieldValue<'_>,
    required: bool,
    min: Option<f64>,
    max: Option<f64>,
) {
    if value.is_blank() {
        if required {
            result.add(name, keys::REQUIRED);
        }
        return;
    }
    let Some(n) = value.as_number().filter(|n| n.is_finite()) else {
        result.add(name, keys::NOT_A_NUMBER);
        return;
    };
    if min.is_some_and(|min| n < min) {
        result.add(name, keys::TOO_SMALL);
    }
    if max.is_some_and(|max| n > max) {
        result.add(name, keys::TOO_LARGE);
    }
}

/// An 8-digit `YYYYMMDD` store date, or nothing when optional.
pub fn validate_date(result: &mut ValidationResult, name: &str, value: FieldValue<'_>, required: bool) {
    if value.is_blank() {
        if required {
            result.add(name, keys::REQUIRED);
        }
        return;
    }
    match value {
        FieldValue::Text(s) if is_store_date(s.trim()) => {}
        _ => result.add(name, keys::INVALID_DATE),
    }
}

/// A valid member id of `table`.
pub fn validate_category(
    result: &mut ValidationResult,
    name: &str,
    value: FieldValue<'_>,
    table: &CategoryTable,
    required: bool,
) {
    if value.is_blank() {
        if required {
            result.add(name, keys::REQUIRED);
        }
        return;
    }
    if !table.contains(&value) {
        result.add(name, keys::INVALID_CATEGORY);
    }
}

/// A flag, or the text `true` / `false`.
pub fn validate_boolean(
    result: &mut ValidationResult,
    name: &str,
    value: FieldValue<'_>,
    required: bool,
) {
    if value.is_blank() {
        if required {
            result.add(name, keys::REQUIRED);
        }
        return;
    }
    if value.as_flag().is_none() {
        result.add(name, keys::NOT_A_BOOLEAN);
    }
}
