//! # formkit-core
//!
//! Core types, settings, and error types for formkit. This crate has no
//! dependency on the other formkit crates and provides the foundation for all
//! of them.
//!
//! ## Modules
//!
//! - [`error`] - Error types, field error mappings, and result aliases
//! - [`settings`] - Server settings with sensible defaults
//! - [`settings_loader`] - Loading settings from TOML/JSON and the environment
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use error::{FieldErrors, FormError, FormResult};
pub use settings::Settings;
