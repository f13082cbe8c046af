//! Main application entry point.

use clap::Parser;
use inkpad_app::{AppConfig, Cli, init_logging, run};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (config, config_error) = match AppConfig::locate(cli.config.as_deref()) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    init_logging(&config.logging);
    if let Some(err) = config_error {
        log::warn!("{err}; using built-in defaults");
    }

    let stdout = io::stdout();
    match run(cli.command, &config, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("inkpad: {err}");
            ExitCode::FAILURE
        }
    }
}
