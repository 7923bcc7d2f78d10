//! Shared validation helpers for inbound HTTP handlers.
//!
//! Presence and format checks only; anything deeper (uniqueness, referenced
//! entities) is a read-before-write check in the handler itself.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::json;

use crate::domain::Error;

/// Validation error codes carried in the error envelope's details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailureCode {
    MissingField,
    InvalidEmail,
}

impl FailureCode {
    fn as_str(self) -> &'static str {
        match self {
            FailureCode::MissingField => "missing_field",
            FailureCode::InvalidEmail => "invalid_email",
        }
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Shape check only: something@something.tld with no whitespace.
        let pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn field_error(field: &'static str, message: String, code: FailureCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

/// Reject blank or whitespace-only required fields.
pub(crate) fn require_non_blank(field: &'static str, value: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(field_error(
            field,
            format!("missing required field: {field}"),
            FailureCode::MissingField,
        ));
    }
    Ok(())
}

/// Reject values that do not look like an email address.
pub(crate) fn validate_email(value: &str) -> Result<(), Error> {
    if !email_regex().is_match(value) {
        return Err(field_error(
            "email",
            "email must be a valid address".to_owned(),
            FailureCode::InvalidEmail,
        ));
    }
    Ok(())
}
