//! Field validation helpers shared by create DTOs.
//!
//! The `validator` derive handles numeric ranges directly; the helpers here
//! cover the rules it has no built-in for (non-blank text) and turn a
//! [`validator::ValidationErrors`] set into a single readable message.

use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors};

/// Reject empty or whitespace-only text.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some(Cow::Borrowed("must not be blank"));
        return Err(error);
    }
    Ok(())
}

/// Normalize optional text the way form inputs are stored: blank becomes `None`.
pub fn presence(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Flatten validation errors into `"field: message; field: message"`,
/// ordered by field name so messages are stable.
pub fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<(String, String)> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                (field.clone(), message)
            })
        })
        .collect();
    fields.sort();

    fields
        .into_iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("; ")
}
