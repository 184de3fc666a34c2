use std::path::PathBuf;
use std::process::ExitCode;

use formkit_cli::commands::register_builtin_commands;
use formkit_cli::{load_settings, CommandRegistry};
use formkit_core::logging::setup_logging;

#[tokio::main]
async fn main() -> ExitCode {
    let mut registry = CommandRegistry::new();
    register_builtin_commands(&mut registry);

    let matches = registry.build_cli().get_matches();
    let config = matches.get_one::<PathBuf>("config");

    let settings = match load_settings(config.map(PathBuf::as_path)) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    setup_logging(&settings);

    match registry.execute(&matches, &settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
