//! The `check` command.
//!
//! Validates a record file against the active schema with the same engine
//! the server uses, without starting the server.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use formkit_core::{FieldErrors, FormError, FormResult, Settings};
use formkit_forms::{validate, FormSchema, SchemaProvider};
use serde_json::Value;

use crate::command::ManagementCommand;

/// Validates a JSON record file. Fails when any field fails.
pub struct CheckCommand;

/// Reads the JSON object at `path` and validates it against `schema`.
pub fn check_record(schema: &FormSchema, path: &Path) -> FormResult<FieldErrors> {
    let content = std::fs::read_to_string(path)?;
    match serde_json::from_str::<Value>(&content)? {
        Value::Object(record) => Ok(validate(schema, &record)),
        _ => Err(FormError::BadRequest(format!(
            "{} does not contain a JSON object",
            path.display()
        ))),
    }
}

#[async_trait]
impl ManagementCommand for CheckCommand {
    fn name(&self) -> &'static str {
        "check"
    }

    fn help(&self) -> &'static str {
        "Validates a JSON record against the form schema"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("record")
                .required(true)
                .value_name("RECORD")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Path to a JSON object of field values"),
        )
    }

    async fn handle(&self, matches: &clap::ArgMatches, settings: &Settings) -> FormResult<()> {
        let path = matches
            .get_one::<PathBuf>("record")
            .ok_or_else(|| FormError::Configuration("Missing record path".to_string()))?;
        let provider = SchemaProvider::from_settings(settings)?;
        let errors = check_record(provider.schema(), path)?;

        if errors.is_empty() {
            println!("{}: valid", path.display());
            return Ok(());
        }
        for (field, message) in errors.iter() {
            println!("  {field}: {message}");
        }
        Err(FormError::Validation(errors))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use formkit_forms::builtin::onboarding_schema;

    use super::*;

    fn record_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    fn matches(path: &Path) -> clap::ArgMatches {
        CheckCommand
            .add_arguments(clap::Command::new("check"))
            .try_get_matches_from([std::ffi::OsStr::new("check"), path.as_os_str()])
            .unwrap()
    }

    #[test]
    fn test_check_record_valid() {
        let file = record_file(r#"{"name": "Al", "email": "a@b.com", "gender": "male"}"#);
        let errors = check_record(&onboarding_schema(), file.path()).unwrap();
        assert!(errors.is_empty());
    }

    #[test]
    fn test_check_record_reports_errors() {
        let file = record_file(r#"{"name": "Al", "email": "a@b.com", "gender": "male", "age": 15}"#);
        let errors = check_record(&onboarding_schema(), file.path()).unwrap();
        assert_eq!(errors.get("age"), Some("Minimum value is 18"));
    }

    #[test]
    fn test_check_record_rejects_non_object() {
        let file = record_file("[]");
        assert!(matches!(
            check_record(&onboarding_schema(), file.path()),
            Err(FormError::BadRequest(_))
        ));
    }

    #[test]
    fn test_check_record_missing_file() {
        assert!(matches!(
            check_record(&onboarding_schema(), Path::new("/no/record.json")),
            Err(FormError::Io(_))
        ));
    }

    #[tokio::test]
    async fn test_handle_fails_on_invalid_record() {
        let file = record_file("{}");
        let err = CheckCommand
            .handle(&matches(file.path()), &Settings::default())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(err.to_string().starts_with("Validation failed: name:"));
    }

    #[tokio::test]
    async fn test_handle_succeeds_on_valid_record() {
        let file = record_file(r#"{"name": "Al", "email": "a@b.com", "gender": "male"}"#);
        assert!(CheckCommand
            .handle(&matches(file.path()), &Settings::default())
            .await
            .is_ok());
    }
}
