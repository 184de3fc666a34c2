//! Records for the built-in onboarding schema.

use formkit_forms::Record;
use serde_json::{json, Value};

/// Converts a JSON object literal into a [`Record`].
///
/// # Panics
///
/// Panics if `value` is not an object.
pub fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("fixture must be a JSON object, got {other}"),
    }
}

/// The smallest record the onboarding schema accepts.
pub fn minimal_onboarding() -> Value {
    json!({"name": "Al", "email": "a@b.com", "gender": "male"})
}

/// A record that fills every onboarding field with a valid value.
pub fn complete_onboarding() -> Value {
    json!({
        "name": "Grace Hopper",
        "email": "grace@navy.example",
        "age": 45,
        "gender": "female",
        "interests": ["reading", "travel"],
        "birthdate": "1906-12-09",
        "bio": "Compiler pioneer.",
        "newsletter": true
    })
}

/// A valid record whose name and email are derived from `name`.
pub fn person(name: &str) -> Value {
    json!({
        "name": name,
        "email": format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        "gender": "other"
    })
}
