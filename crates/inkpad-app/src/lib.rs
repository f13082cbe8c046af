//! InkPad Application
//!
//! Command-line front end for InkPad drawings: configuration, logging setup
//! and the `inkpad` commands.

pub mod cli;
pub mod commands;
pub mod config;
mod logging;

pub use cli::{Cli, Command};
pub use commands::{AppError, AppResult, run};
pub use config::{AppConfig, CanvasConfig, ConfigError, LoggingConfig};
pub use logging::init_logging;
