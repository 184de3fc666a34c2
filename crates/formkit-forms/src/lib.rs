//! # formkit-forms
//!
//! Form schema definitions and the validation engine shared by the formkit
//! server and any client-side mirror of its checks.
//!
//! - [`schema`] - `FormSchema`, `FieldDefinition`, field types and constraint bags
//! - [`builtin`] - The built-in employee onboarding schema
//! - [`provider`] - Loads and holds the schema served for the process lifetime
//! - [`validation`] - `validate(schema, record)` producing per-field errors

pub mod builtin;
pub mod provider;
pub mod schema;
pub mod validation;

pub use provider::SchemaProvider;
pub use schema::{FieldDefinition, FieldOption, FieldType, FieldValidation, FormSchema, Pattern};
pub use validation::{validate, Record};
