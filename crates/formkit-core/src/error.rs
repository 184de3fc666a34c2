//! Core error types for formkit.
//!
//! This module provides [`FieldErrors`], the field name to message mapping
//! produced by the validation engine, and [`FormError`], the error enum shared
//! by the store, the HTTP API, and the CLI. Every variant maps to an HTTP
//! status code via [`FormError::status_code`].

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// A mapping of field name to error message for the fields that failed
/// validation.
///
/// Entries keep the order in which a field first failed, which is schema
/// order when produced by the validation engine. Setting a message for a
/// field that already has one replaces the message in place, so only the
/// last failing check for a field is visible.
///
/// Serializes as a JSON object: `{"age": "Minimum value is 18"}`.
///
/// # Examples
///
/// ```
/// use formkit_core::error::FieldErrors;
///
/// let mut errors = FieldErrors::new();
/// errors.set("email", "Maximum length is 50");
/// errors.set("email", "Invalid format");
/// assert_eq!(errors.get("email"), Some("Invalid format"));
/// assert_eq!(errors.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors {
    entries: Map<String, Value>,
}

impl FieldErrors {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self { entries: Map::new() }
    }

    /// Records `message` for `field`, overwriting any earlier message.
    pub fn set(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.entries
            .insert(field.into(), Value::String(message.into()));
    }

    /// Returns the message recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries.get(field).and_then(Value::as_str)
    }

    /// Returns `true` if `field` has a recorded message.
    pub fn contains(&self, field: &str) -> bool {
        self.entries.contains_key(field)
    }

    /// Returns the number of failing fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no field failed, i.e. the record is acceptable.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(field, message)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str().unwrap_or_default()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut errors = Self::new();
        for (field, message) in iter {
            errors.set(field, message);
        }
        errors
    }
}

/// The primary error type for formkit.
///
/// Covers the three request-level failures of the form API (validation,
/// missing submission, malformed parameters) plus configuration and
/// infrastructure errors raised while starting the server.
#[derive(Error, Debug)]
pub enum FormError {
    // ── Request errors ───────────────────────────────────────────────

    /// One or more fields failed validation.
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// The requested submission does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The request parameters are malformed (e.g. pagination out of range).
    #[error("{0}")]
    BadRequest(String),

    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value or schema definition is missing or invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ── Serialization ────────────────────────────────────────────────

    /// An error occurred during serialization or deserialization.
    #[error("Serialization error: {0}")]
    Serialization(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An unexpected internal failure.
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl FormError {
    /// Returns the HTTP status code associated with this error.
    ///
    /// - `Validation`, `BadRequest` -> 400
    /// - `NotFound` -> 404
    /// - Everything else -> 500
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => 400,
            Self::NotFound(_) => 404,
            Self::Configuration(_) | Self::Serialization(_) | Self::Io(_) | Self::Internal(_) => {
                500
            }
        }
    }

    /// Shorthand for the "submission not found" error.
    pub fn submission_not_found() -> Self {
        Self::NotFound("Submission not found".to_string())
    }
}

impl From<serde_json::Error> for FormError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// A convenience type alias for `Result<T, FormError>`.
pub type FormResult<T> = Result<T, FormError>;
