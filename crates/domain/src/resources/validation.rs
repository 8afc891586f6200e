//! Field checks shared by the resource payloads.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{DomainError, DomainResult};

static EMAIL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok());

/// Checks that `value` has between `min` and `max` characters.
pub(crate) fn check_len(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> DomainResult<()> {
    let len = value.chars().count();
    if len < min {
        return Err(DomainError::validation(
            field,
            format!("must have at least {min} characters"),
        ));
    }
    if len > max {
        return Err(DomainError::validation(
            field,
            format!("must have at most {max} characters"),
        ));
    }
    Ok(())
}

/// Same as [`check_len`] for optional fields; `None` always passes.
pub(crate) fn check_opt_len(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> DomainResult<()> {
    value.map_or(Ok(()), |v| check_len(field, v, 0, max))
}

/// Checks `value` against a pattern compiled once by the caller.
pub(crate) fn check_pattern(
    field: &'static str,
    value: &str,
    pattern: &LazyLock<Option<Regex>>,
    description: &str,
) -> DomainResult<()> {
    match pattern.as_ref() {
        Some(re) if re.is_match(value) => Ok(()),
        _ => Err(DomainError::validation(field, description.to_string())),
    }
}

/// Checks that the value looks like an email address.
pub(crate) fn check_email(field: &'static str, value: &str) -> DomainResult<()> {
    check_pattern(field, value, &EMAIL, "must be an email address")
}
