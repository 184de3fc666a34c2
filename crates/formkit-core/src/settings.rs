//! Settings for the formkit server.
//!
//! This module provides the [`Settings`] struct, which holds all server
//! configuration with sensible defaults. Settings are loaded once at startup
//! (see [`settings_loader`](crate::settings_loader)) and passed explicitly to
//! the components that need them.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The complete set of server settings.
///
/// # Examples
///
/// ```
/// use formkit_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert_eq!(settings.port, 5000);
/// assert_eq!(settings.bind_address(), "0.0.0.0:5000");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // ── Server ───────────────────────────────────────────────────────

    /// Whether debug mode is enabled (pretty logs instead of JSON).
    pub debug: bool,
    /// The interface to bind to.
    pub host: String,
    /// The TCP port to listen on.
    pub port: u16,

    // ── Schema ───────────────────────────────────────────────────────

    /// Optional path to a JSON or TOML form schema. When unset, the
    /// built-in onboarding schema is served.
    pub schema_path: Option<PathBuf>,

    // ── CORS ─────────────────────────────────────────────────────────

    /// Origins allowed to call the API. Empty means any origin.
    pub cors_allowed_origins: Vec<String>,

    // ── Logging ──────────────────────────────────────────────────────

    /// The log filter directive (e.g. "info", "debug", "formkit_api=trace").
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            host: "0.0.0.0".to_string(),
            port: 5000,
            schema_path: None,
            cors_allowed_origins: Vec::new(),
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Returns the `host:port` address the server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let s = Settings::default();
        assert!(!s.debug);
        assert_eq!(s.host, "0.0.0.0");
        assert_eq!(s.port, 5000);
        assert!(s.schema_path.is_none());
        assert!(s.cors_allowed_origins.is_empty());
        assert_eq!(s.log_level, "info");
    }

    #[test]
    fn test_bind_address() {
        let s = Settings {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ..Settings::default()
        };
        assert_eq!(s.bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_settings_roundtrip_json() {
        let s = Settings::default();
        let json = serde_json::to_string(&s).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.port, s.port);
        assert_eq!(back.log_level, s.log_level);
    }
}
