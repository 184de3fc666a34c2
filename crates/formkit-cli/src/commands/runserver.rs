//! The `runserver` command.

use async_trait::async_trait;
use formkit_api::FormApp;
use formkit_core::{FormResult, Settings};

use crate::command::ManagementCommand;

/// Serves the HTTP API.
///
/// Binds to the configured host and port unless `--host` or `--port` is
/// given.
pub struct RunserverCommand;

impl RunserverCommand {
    /// Applies `--host` and `--port` on top of `settings`.
    pub fn effective_settings(matches: &clap::ArgMatches, settings: &Settings) -> Settings {
        let mut effective = settings.clone();
        if let Some(host) = matches.get_one::<String>("host") {
            effective.host.clone_from(host);
        }
        if let Some(port) = matches.get_one::<u16>("port") {
            effective.port = *port;
        }
        effective
    }
}

#[async_trait]
impl ManagementCommand for RunserverCommand {
    fn name(&self) -> &'static str {
        "runserver"
    }

    fn help(&self) -> &'static str {
        "Starts the form API server"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("host")
                .long("host")
                .help("Host to bind to"),
        )
        .arg(
            clap::Arg::new("port")
                .long("port")
                .value_parser(clap::value_parser!(u16))
                .help("Port to bind to"),
        )
    }

    async fn handle(&self, matches: &clap::ArgMatches, settings: &Settings) -> FormResult<()> {
        let settings = Self::effective_settings(matches, settings);
        let addr = settings.bind_address();
        tracing::info!(debug = settings.debug, "Starting form server at http://{addr}/");
        FormApp::from_settings(settings)?.run(&addr).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(args: &[&str]) -> clap::ArgMatches {
        RunserverCommand
            .add_arguments(clap::Command::new("runserver"))
            .try_get_matches_from(args)
            .unwrap()
    }

    #[test]
    fn test_defaults_come_from_settings() {
        let effective =
            RunserverCommand::effective_settings(&matches(&["runserver"]), &Settings::default());
        assert_eq!(effective.bind_address(), "0.0.0.0:5000");
    }

    #[test]
    fn test_flags_override_settings() {
        let effective = RunserverCommand::effective_settings(
            &matches(&["runserver", "--host", "127.0.0.1", "--port", "8080"]),
            &Settings::default(),
        );
        assert_eq!(effective.bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(RunserverCommand
            .add_arguments(clap::Command::new("runserver"))
            .try_get_matches_from(["runserver", "--port", "99999"])
            .is_err());
    }
}
