//! The `schema` command.

use async_trait::async_trait;
use formkit_core::{FormResult, Settings};
use formkit_forms::{FormSchema, SchemaProvider};

use crate::command::ManagementCommand;

/// Prints the active form schema as JSON.
pub struct SchemaCommand;

/// Renders `schema` as compact or pretty JSON.
pub fn render_schema(schema: &FormSchema, pretty: bool) -> FormResult<String> {
    let json = if pretty {
        serde_json::to_string_pretty(schema)?
    } else {
        serde_json::to_string(schema)?
    };
    Ok(json)
}

#[async_trait]
impl ManagementCommand for SchemaCommand {
    fn name(&self) -> &'static str {
        "schema"
    }

    fn help(&self) -> &'static str {
        "Prints the active form schema as JSON"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("pretty")
                .long("pretty")
                .action(clap::ArgAction::SetTrue)
                .help("Indent the output"),
        )
    }

    async fn handle(&self, matches: &clap::ArgMatches, settings: &Settings) -> FormResult<()> {
        let provider = SchemaProvider::from_settings(settings)?;
        println!("{}", render_schema(provider.schema(), matches.get_flag("pretty"))?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use formkit_forms::builtin::onboarding_schema;

    use super::*;

    #[test]
    fn test_render_compact() {
        let out = render_schema(&onboarding_schema(), false).unwrap();
        assert!(!out.contains('\n'));
        assert!(out.starts_with(r#"{"title":"Employee Onboarding Form""#));
    }

    #[test]
    fn test_render_pretty_parses_back() {
        let out = render_schema(&onboarding_schema(), true).unwrap();
        assert!(out.contains('\n'));
        let parsed = FormSchema::from_json_str(&out).unwrap();
        assert_eq!(parsed, onboarding_schema());
    }

    #[tokio::test]
    async fn test_handle_with_builtin_schema() {
        let matches = SchemaCommand
            .add_arguments(clap::Command::new("schema"))
            .try_get_matches_from(["schema"])
            .unwrap();
        assert!(SchemaCommand
            .handle(&matches, &Settings::default())
            .await
            .is_ok());
    }
}
