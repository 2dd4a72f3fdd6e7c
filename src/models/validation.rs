//! Field-level validation shared by every payload.
//!
//! Failures name the field and the violated constraint, e.g.
//! `name: must be at most 128 characters`.

use crate::error::{AppError, AppResult};

fn invalid(field: &str, constraint: impl std::fmt::Display) -> AppError {
    AppError::Validation(format!("{}: {}", field, constraint))
}

/// Trim surrounding whitespace and enforce a maximum length in characters.
pub fn trimmed(field: &str, value: String, max_len: usize) -> AppResult<String> {
    let value = value.trim().to_string();
    if value.chars().count() > max_len {
        return Err(invalid(
            field,
            format_args!("must be at most {} characters", max_len),
        ));
    }
    Ok(value)
}

/// Like [`trimmed`], but the trimmed value must not be empty.
pub fn required_text(field: &str, value: String, max_len: usize) -> AppResult<String> {
    let value = trimmed(field, value, max_len)?;
    if value.is_empty() {
        return Err(invalid(field, "must not be empty"));
    }
    Ok(value)
}

pub fn optional_text(field: &str, value: Option<String>, max_len: usize) -> AppResult<Option<String>> {
    value.map(|v| trimmed(field, v, max_len)).transpose()
}

/// Check a number lies within `min..=max`.
pub fn within(field: &str, value: f64, min: f64, max: f64) -> AppResult<f64> {
    if !(min..=max).contains(&value) {
        return Err(invalid(
            field,
            format_args!("must be between {} and {}", min, max),
        ));
    }
    Ok(value)
}

/// Error for a parent key that must be present when a full update turns into a create.
pub fn missing(field: &str) -> AppError {
    invalid(field, "field required")
}
