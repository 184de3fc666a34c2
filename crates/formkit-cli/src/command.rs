//! Command framework.
//!
//! A [`ManagementCommand`] names itself, declares its arguments, and handles
//! parsed matches. The [`CommandRegistry`] assembles registered commands
//! into a single clap CLI with a global `--config` option and dispatches to
//! the selected one.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use formkit_core::{settings_loader, FormError, FormResult, Settings};

/// A subcommand of the `formkit` CLI.
#[async_trait]
pub trait ManagementCommand: Send + Sync {
    /// The subcommand name.
    fn name(&self) -> &'static str;

    /// One-line help text.
    fn help(&self) -> &'static str;

    /// Adds arguments to the subcommand. The default adds none.
    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd
    }

    /// Runs the command.
    async fn handle(&self, matches: &clap::ArgMatches, settings: &Settings) -> FormResult<()>;
}

/// Registered commands, keyed by name.
#[derive(Default)]
pub struct CommandRegistry {
    commands: BTreeMap<&'static str, Box<dyn ManagementCommand>>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `command`, replacing any command with the same name.
    pub fn register(&mut self, command: Box<dyn ManagementCommand>) {
        self.commands.insert(command.name(), command);
    }

    /// Looks up a command by name.
    pub fn get(&self, name: &str) -> Option<&dyn ManagementCommand> {
        self.commands.get(name).map(AsRef::as_ref)
    }

    /// Returns the registered command names, sorted.
    pub fn list_commands(&self) -> Vec<&str> {
        self.commands.keys().copied().collect()
    }

    /// Returns the number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Builds the top-level clap command with one subcommand per
    /// registered command.
    pub fn build_cli(&self) -> clap::Command {
        let mut app = clap::Command::new("formkit")
            .about("Schema-driven form server")
            .version(env!("CARGO_PKG_VERSION"))
            .subcommand_required(true)
            .arg_required_else_help(true)
            .arg(
                clap::Arg::new("config")
                    .long("config")
                    .global(true)
                    .value_name("FILE")
                    .value_parser(clap::value_parser!(PathBuf))
                    .help("Settings file (TOML, or JSON by .json extension)"),
            );
        for (name, cmd) in &self.commands {
            let subcmd = clap::Command::new(*name).about(cmd.help());
            app = app.subcommand(cmd.add_arguments(subcmd));
        }
        app
    }

    /// Dispatches to the subcommand selected in `matches`.
    pub async fn execute(&self, matches: &clap::ArgMatches, settings: &Settings) -> FormResult<()> {
        let (name, sub_matches) = matches
            .subcommand()
            .ok_or_else(|| FormError::Configuration("No subcommand specified".to_string()))?;
        let cmd = self
            .get(name)
            .ok_or_else(|| FormError::Configuration(format!("Unknown command: {name}")))?;
        tracing::debug!(command = name, "Running command");
        cmd.handle(sub_matches, settings).await
    }
}

/// Loads settings from `config` when given, otherwise from defaults.
/// Environment overrides apply in both cases.
pub fn load_settings(config: Option<&Path>) -> FormResult<Settings> {
    match config {
        Some(path) => settings_loader::from_file_with_env(path),
        None => Ok(settings_loader::from_env()),
    }
}
