//! # formkit
//!
//! Schema-driven dynamic forms. This is the meta-crate that re-exports the
//! sub-crates; depend on individual crates for finer-grained control.
//!
//! ```
//! use formkit::forms::builtin::onboarding_schema;
//! use formkit::forms::validate;
//! use serde_json::json;
//!
//! let record = json!({"name": "Al", "email": "a@b.com", "gender": "male", "age": 15});
//! let errors = validate(&onboarding_schema(), record.as_object().unwrap());
//! assert_eq!(errors.get("age"), Some("Minimum value is 18"));
//! ```

/// Settings, logging, and the shared error type.
pub use formkit_core as core;

/// Form schemas and the validation engine.
pub use formkit_forms as forms;

/// The in-memory submission store and exporters.
pub use formkit_store as store;

/// The HTTP JSON API.
#[cfg(feature = "api")]
pub use formkit_api as api;

/// The `formkit` command framework.
#[cfg(feature = "cli")]
pub use formkit_cli as cli;

/// Test client and fixtures.
#[cfg(feature = "testing")]
pub use formkit_test as test;

/// Third-party re-exports.
pub use axum;
pub use serde;
pub use serde_json;
pub use tokio;
pub use tracing;

/// Commonly used items.
pub mod prelude {
    pub use formkit_core::{FieldErrors, FormError, FormResult, Settings};
    pub use formkit_forms::{
        validate, FieldDefinition, FieldType, FieldValidation, FormSchema, Record,
    };
    pub use formkit_store::{ListParams, SortOrder, Submission, SubmissionStore};

    #[cfg(feature = "api")]
    pub use formkit_api::{build_router, AppState, FormApp};
}
