//! The schema provider: resolves the schema once at startup and hands out
//! shared, read-only references to it.

use std::sync::Arc;

use formkit_core::{FormResult, Settings};

use crate::builtin::onboarding_schema;
use crate::schema::FormSchema;

/// Holds the single schema served for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct SchemaProvider {
    schema: Arc<FormSchema>,
}

impl SchemaProvider {
    /// Wraps an already-built schema.
    pub fn new(schema: FormSchema) -> Self {
        Self {
            schema: Arc::new(schema),
        }
    }

    /// Loads the schema named by `settings.schema_path`, or the built-in
    /// onboarding schema when no path is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured file cannot be read, parsed, or
    /// fails the schema checks.
    pub fn from_settings(settings: &Settings) -> FormResult<Self> {
        let schema = match &settings.schema_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "Loading form schema from file");
                FormSchema::from_file(path)?
            }
            None => onboarding_schema(),
        };
        tracing::debug!(
            title = %schema.title,
            fields = schema.fields.len(),
            "Form schema ready"
        );
        Ok(Self::new(schema))
    }

    /// Returns the schema.
    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// Returns a shared handle to the schema.
    pub fn shared(&self) -> Arc<FormSchema> {
        Arc::clone(&self.schema)
    }
}

impl Default for SchemaProvider {
    fn default() -> Self {
        Self::new(onboarding_schema())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_provider_serves_builtin() {
        let provider = SchemaProvider::default();
        assert_eq!(provider.schema().title, "Employee Onboarding Form");
    }

    #[test]
    fn test_from_settings_without_path() {
        let provider = SchemaProvider::from_settings(&Settings::default()).unwrap();
        assert_eq!(provider.schema().fields.len(), 8);
    }

    #[test]
    fn test_from_settings_with_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"title": "Survey", "fields": [{{"name": "q1", "type": "switch", "label": "Q1"}}]}}"#
        )
        .unwrap();
        let settings = Settings {
            schema_path: Some(file.path().to_path_buf()),
            ..Settings::default()
        };
        let provider = SchemaProvider::from_settings(&settings).unwrap();
        assert_eq!(provider.schema().title, "Survey");
        assert_eq!(provider.shared().field_names(), vec!["q1"]);
    }

    #[test]
    fn test_from_settings_with_bad_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "title = \"x\"\nfields = \"not a list\"").unwrap();
        let settings = Settings {
            schema_path: Some(file.path().to_path_buf()),
            ..Settings::default()
        };
        assert!(SchemaProvider::from_settings(&settings).is_err());
    }
}
