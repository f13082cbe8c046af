//! Logger setup.

use crate::config::LoggingConfig;
use env_logger::{Builder, Env};

/// Initialize `env_logger` at the configured level. `RUST_LOG`, when set,
/// takes precedence.
pub fn init_logging(config: &LoggingConfig) {
    let env = Env::default().default_filter_or(config.level.as_str());
    // Already initialized (tests), ignore.
    let _ = Builder::from_env(env).format_timestamp(None).try_init();
}
