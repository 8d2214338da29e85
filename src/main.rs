//! Runbook command-line entry point.
//!
//! Loads configuration, sets up logging, dispatches to the command handler,
//! and maps errors to exit codes.

use runbook::cli::Cli;
use runbook::config::Config;
use runbook::{commands, exit_codes, logging};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::from(err.exit_code() as u8);
        }
    };

    logging::init(&config.log_level);
    config.log_items();

    match commands::dispatch(cli.command, &config) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            tracing::error!(error = %err, "Command failed");
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
