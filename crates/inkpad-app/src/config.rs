//! Application configuration.
//!
//! Looked up from `--config`, then `$INKPAD_CONFIG`, then
//! `<config dir>/inkpad/config.json`. A missing user config falls back to
//! built-in defaults; a missing explicitly named file is an error.

use inkpad_core::Color;
use inkpad_render::{GRID_SPACING, GridStyle, MAX_GRID_PRIMITIVES, grid_cell_count};
use kurbo::Size;
use serde::{Deserialize, Serialize};
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming a configuration file.
pub const CONFIG_ENV_VAR: &str = "INKPAD_CONFIG";

/// Root of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub canvas: CanvasConfig,
}

impl AppConfig {
    /// Load configuration from an explicit path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.canvas.validate().map_err(|message| ConfigError::Invalid {
            path: path.to_path_buf(),
            message,
        })?;
        Ok(config)
    }

    /// Find and load the configuration for this process.
    pub fn locate(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::resolve(explicit, env::var_os(CONFIG_ENV_VAR), Self::user_config_path())
    }

    /// `<config dir>/inkpad/config.json`, if the platform has a config dir.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("inkpad").join("config.json"))
    }

    fn resolve(
        explicit: Option<&Path>,
        from_env: Option<OsString>,
        user_path: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if let Some(path) = from_env.filter(|value| !value.is_empty()) {
            return Self::from_file(PathBuf::from(path));
        }
        match user_path {
            Some(path) if path.is_file() => Self::from_file(path),
            _ => Ok(Self::default()),
        }
    }
}

/// Logging configuration. `RUST_LOG` takes precedence over `level`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_string()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
        }
    }
}

/// Canvas defaults used when rendering and drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasConfig {
    #[serde(default = "CanvasConfig::default_width")]
    pub width: f64,
    #[serde(default = "CanvasConfig::default_height")]
    pub height: f64,
    #[serde(default)]
    pub grid: GridStyle,
    #[serde(default = "CanvasConfig::default_grid_spacing")]
    pub grid_spacing: f64,
    #[serde(default = "CanvasConfig::default_pen_color")]
    pub pen_color: Color,
}

impl CanvasConfig {
    fn default_width() -> f64 {
        800.0
    }

    fn default_height() -> f64 {
        600.0
    }

    fn default_grid_spacing() -> f64 {
        GRID_SPACING
    }

    fn default_pen_color() -> Color {
        Color::AQUA
    }

    fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("canvas.width", self.width),
            ("canvas.height", self.height),
            ("canvas.grid_spacing", self.grid_spacing),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{name} must be a positive number, got {value}"));
            }
        }
        let cells = grid_cell_count(Size::new(self.width, self.height), self.grid_spacing);
        if cells > MAX_GRID_PRIMITIVES as f64 {
            return Err(format!(
                "canvas.grid_spacing {} is too fine for a {}x{} canvas",
                self.grid_spacing, self.width, self.height
            ));
        }
        Ok(())
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: Self::default_width(),
            height: Self::default_height(),
            grid: GridStyle::default(),
            grid_spacing: Self::default_grid_spacing(),
            pen_color: Self::default_pen_color(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid config file {}: {message}", .path.display())]
    Invalid { path: PathBuf, message: String },
}

impl ConfigError {
    /// File the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Io { path, .. } | ConfigError::Parse { path, .. } | ConfigError::Invalid { path, .. } => {
                path
            }
        }
    }
}
