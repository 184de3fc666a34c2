//! The validation engine.
//!
//! [`validate`] checks a record against a [`FormSchema`] and returns the
//! messages for the fields that failed. It is a pure function: the server
//! runs it authoritatively before every write, and clients may run the same
//! checks locally for immediate feedback.
//!
//! For each field, in schema order:
//!
//! 1. If the field is required and its value is empty, the field fails with
//!    `"This field is required"` and no further checks run for it.
//! 2. Otherwise, if a value is present, the type-specific checks run. A
//!    later failing check replaces the message of an earlier one.

use formkit_core::FieldErrors;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::schema::{FieldDefinition, FieldType, FieldValidation, FormSchema};

/// A submitted record: field name to JSON value.
pub type Record = serde_json::Map<String, Value>;

/// Message for a required field with an empty value.
pub const REQUIRED_MESSAGE: &str = "This field is required";

/// Message for a text value that does not match the field's pattern.
pub const INVALID_FORMAT_MESSAGE: &str = "Invalid format";

/// Leading numeric prefix of a string, in the shape `parseFloat` accepts.
static NUMERIC_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").expect("valid regex")
});

/// Validates `record` against every field of `schema`.
///
/// Keys in `record` that the schema does not name are ignored. An empty
/// result means the record is acceptable.
///
/// # Examples
///
/// ```
/// use formkit_forms::builtin::onboarding_schema;
/// use formkit_forms::validate;
/// use serde_json::json;
///
/// let record = json!({"name": "A", "email": "a@b.co", "gender": "male"});
/// let errors = validate(&onboarding_schema(), record.as_object().unwrap());
/// assert_eq!(errors.get("name"), Some("Minimum length is 2"));
/// assert_eq!(errors.len(), 1);
/// ```
pub fn validate(schema: &FormSchema, record: &Record) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for field in &schema.fields {
        if let Some(message) = validate_field(field, record.get(&field.name)) {
            errors.set(field.name.as_str(), message);
        }
    }
    if !errors.is_empty() {
        tracing::debug!(failed = errors.len(), "Record failed validation");
    }
    errors
}

/// Validates one field value, returning the message of the last failing
/// check, or `None` if the value passes.
pub fn validate_field(field: &FieldDefinition, value: Option<&Value>) -> Option<String> {
    if field.required && is_empty_value(&field.field_type, value) {
        return Some(REQUIRED_MESSAGE.to_string());
    }
    let (Some(value), Some(rules)) = (value, field.validation.as_ref()) else {
        return None;
    };

    // Each check decides for itself whether the value is present.
    match &field.field_type {
        field_type @ (FieldType::Text | FieldType::Textarea) => {
            if is_empty_value(field_type, Some(value)) {
                None
            } else {
                check_text(rules, value)
            }
        }
        FieldType::Number => check_number(rules, value),
        FieldType::Date => check_date(rules, value),
        FieldType::MultiSelect => check_selection(rules, value),
        FieldType::Select | FieldType::Switch | FieldType::Unknown(_) => None,
    }
}

/// Returns `true` if `value` counts as "not supplied" for a field of the
/// given type.
///
/// Absent, `null`, `""`, `false`, and `0` are empty for every type, so a
/// required switch must be on and a required number must be non-zero. An
/// empty array is additionally empty for a multi-select.
pub fn is_empty_value(field_type: &FieldType, value: Option<&Value>) -> bool {
    let Some(value) = value else {
        return true;
    };
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => *field_type == FieldType::MultiSelect && items.is_empty(),
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Object(_) => false,
    }
}

/// Reads a number from a JSON number or from the leading numeric prefix of
/// a string (`"42abc"` reads as 42). Returns `None` when nothing numeric is
/// found.
pub fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim_start();
            let prefix = NUMERIC_PREFIX.find(trimmed)?.as_str();
            let unsigned = prefix.trim_start_matches(['+', '-']);
            let magnitude = if unsigned == "Infinity" {
                f64::INFINITY
            } else {
                unsigned.parse::<f64>().ok()?
            };
            Some(if prefix.starts_with('-') {
                -magnitude
            } else {
                magnitude
            })
        }
        _ => None,
    }
}

fn check_text(rules: &FieldValidation, value: &Value) -> Option<String> {
    let mut error = None;

    if let Value::String(text) = value {
        let length = text.chars().count();
        if let Some(min) = rules.min_length {
            if length < min {
                error = Some(format!("Minimum length is {min}"));
            }
        }
        if let Some(max) = rules.max_length {
            if length > max {
                error = Some(format!("Maximum length is {max}"));
            }
        }
    }

    if let Some(pattern) = &rules.regex {
        let matched = match value {
            Value::String(text) => pattern.is_match(text),
            other => pattern.is_match(&other.to_string()),
        };
        if !matched {
            error = Some(INVALID_FORMAT_MESSAGE.to_string());
        }
    }

    error
}

fn check_number(rules: &FieldValidation, value: &Value) -> Option<String> {
    let n = parse_number(value)?;
    let mut error = None;

    if let Some(min) = &rules.min {
        if min.as_f64().is_some_and(|bound| n < bound) {
            error = Some(format!("Minimum value is {min}"));
        }
    }
    if let Some(max) = &rules.max {
        if max.as_f64().is_some_and(|bound| n > bound) {
            error = Some(format!("Maximum value is {max}"));
        }
    }

    error
}

fn check_date(rules: &FieldValidation, value: &Value) -> Option<String> {
    let date = value.as_str().filter(|s| !s.is_empty())?;
    let min_date = rules.min_date.as_deref()?;
    // ISO dates order the same lexicographically and chronologically.
    (date < min_date).then(|| format!("Minimum date is {min_date}"))
}

fn check_selection(rules: &FieldValidation, value: &Value) -> Option<String> {
    // A bare string is counted by its length.
    let count = match value {
        Value::Array(items) => items.len(),
        Value::String(text) if !text.is_empty() => text.chars().count(),
        _ => return None,
    };
    let mut error = None;

    if let Some(min) = rules.min_selected {
        if count < min {
            error = Some(format!("Select at least {min} options"));
        }
    }
    if let Some(max) = rules.max_selected {
        if count > max {
            error = Some(format!("Select at most {max} options"));
        }
    }

    error
}
