//! # Configuration
//!
//! Drinklog configuration is loaded with [`confique`], layered from environment
//! variables, a TOML file and compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `DRINKLOG_DATA_DIR`, `DRINKLOG_DEFAULT_UNIT`, `DRINKLOG_LOG`.
//! 2. **Config file**: `drinklog.toml` in the OS config directory (via the
//!    `directories` crate), or the file passed with `--config`.
//! 3. **Compiled Defaults**: via `#[config(default = ...)]`.
//!
//! A missing config file is not an error.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_dir` | OS data dir | Where `drinks.json` and `favorites.json` live |
//! | `default_unit` | `ml` | Unit assumed when a volume is given without one |
//! | `log_level` | `warn` | Tracing filter for diagnostics on stderr |

use confique::Config;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

use crate::error::{DrinkLogError, Result};
use crate::units::VolumeUnit;

pub const CONFIG_FILE_NAME: &str = "drinklog.toml";

/// Configuration for drinklog, stored in `drinklog.toml`.
#[derive(Config, Debug, Clone, PartialEq, Eq)]
pub struct DrinkLogConfig {
    /// Directory holding the drink log files.
    /// When absent, the OS data directory is used.
    #[config(env = "DRINKLOG_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Unit assumed when a volume is given without one (e.g. "ml", "cl", "fl-oz").
    #[config(default = "ml", env = "DRINKLOG_DEFAULT_UNIT")]
    pub default_unit: String,

    /// Diagnostics filter, in `RUST_LOG` syntax.
    #[config(default = "warn", env = "DRINKLOG_LOG")]
    pub log_level: String,
}

impl Default for DrinkLogConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            default_unit: "ml".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

impl DrinkLogConfig {
    /// Load from the environment and `file` (or the default config file).
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let path = file.map(Path::to_path_buf).or_else(default_config_path);

        let mut builder = Self::builder().env();
        if let Some(path) = path {
            builder = builder.file(path);
        }
        let config = builder
            .load()
            .map_err(|e| DrinkLogError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.default_unit
            .parse::<VolumeUnit>()
            .map_err(|e| DrinkLogError::Config(format!("default_unit: {}", e)))?;
        Ok(())
    }

    /// A commented sample `drinklog.toml`.
    pub fn template() -> String {
        confique::toml::template::<Self>(confique::toml::FormatOptions::default())
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "drinklog", "drinklog").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
