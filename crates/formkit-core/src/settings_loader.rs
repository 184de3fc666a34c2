//! Settings loading from configuration files and the environment.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `FORMKIT_DEBUG` | `debug` |
//! | `FORMKIT_HOST` | `host` |
//! | `PORT`, `FORMKIT_PORT` | `port` (`FORMKIT_PORT` wins when both are set) |
//! | `FORMKIT_SCHEMA_PATH` | `schema_path` |
//! | `FORMKIT_CORS_ALLOWED_ORIGINS` | `cors_allowed_origins` (comma-separated) |
//! | `FORMKIT_LOG_LEVEL` | `log_level` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use formkit_core::settings_loader;
//!
//! let settings = settings_loader::from_file_with_env("formkit.toml").unwrap();
//! ```

use std::path::{Path, PathBuf};

use crate::error::FormError;
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// Any fields not present in the TOML keep their default values.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or cannot be deserialized.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, FormError> {
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| FormError::Configuration(format!("Failed to parse TOML: {e}")))?;
    merge_into_defaults(toml_to_json(toml_value), "TOML")
}

/// Loads settings from a JSON string.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or cannot be deserialized.
pub fn from_json_str(json_str: &str) -> Result<Settings, FormError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| FormError::Configuration(format!("Failed to parse JSON: {e}")))?;
    merge_into_defaults(json_value, "JSON")
}

/// Loads settings from a file, choosing the format by extension.
///
/// Files ending in `.json` are parsed as JSON; everything else as TOML.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is malformed.
pub fn from_file(path: impl AsRef<Path>) -> Result<Settings, FormError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        FormError::Configuration(format!(
            "Failed to read settings file '{}': {e}",
            path.display()
        ))
    })?;
    if is_json_path(path) {
        from_json_str(&content)
    } else {
        from_toml_str(&content)
    }
}

/// Loads settings from a file and then applies environment variable overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is malformed.
pub fn from_file_with_env(path: impl AsRef<Path>) -> Result<Settings, FormError> {
    let mut settings = from_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies process environment overrides to a settings struct.
pub fn apply_env_overrides(settings: &mut Settings) {
    apply_overrides_from(settings, |key| std::env::var(key).ok());
}

/// Applies overrides using `lookup` to resolve variable names.
///
/// Unparseable numeric values are ignored and the existing setting is kept.
pub fn apply_overrides_from(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(val) = lookup("FORMKIT_DEBUG") {
        settings.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }

    if let Some(val) = lookup("FORMKIT_HOST") {
        settings.host = val;
    }

    for key in ["PORT", "FORMKIT_PORT"] {
        if let Some(port) = lookup(key).and_then(|val| val.trim().parse::<u16>().ok()) {
            settings.port = port;
        }
    }

    if let Some(val) = lookup("FORMKIT_SCHEMA_PATH") {
        settings.schema_path = if val.is_empty() {
            None
        } else {
            Some(PathBuf::from(val))
        };
    }

    if let Some(val) = lookup("FORMKIT_CORS_ALLOWED_ORIGINS") {
        settings.cors_allowed_origins = val
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }

    if let Some(val) = lookup("FORMKIT_LOG_LEVEL") {
        settings.log_level = val;
    }
}

/// Returns `true` if the path has a `.json` extension.
pub fn is_json_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

// ============================================================
// Helpers
// ============================================================

/// Merges a parsed configuration document over the default settings.
fn merge_into_defaults(value: serde_json::Value, format: &str) -> Result<Settings, FormError> {
    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        FormError::Configuration(format!("Failed to serialize default settings: {e}"))
    })?;
    let merged = merge_json(default_json, value);
    serde_json::from_value(merged).map_err(|e| {
        FormError::Configuration(format!("Failed to deserialize settings from {format}: {e}"))
    })
}

/// Converts a TOML value to a `serde_json::Value`.
pub fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => {
            let map: serde_json::Map<String, serde_json::Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            serde_json::Value::Object(map)
        }
    }
}

/// Deep-merges two JSON values. The `override_val` takes precedence.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = if let Some(base_v) = base_map.remove(&key) {
                    merge_json(base_v, override_v)
                } else {
                    override_v
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_val) => override_val,
    }
}
