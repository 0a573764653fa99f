//! # Initialization
//!
//! Wires configuration, the data directory and the filesystem store into a
//! ready-to-use [`DrinkLogApi`].
//!
//! ## Data Directory Resolution
//!
//! 1. `data_override` (the CLI `--data-dir` flag), when given.
//! 2. `data_dir` from [`DrinkLogConfig`] (which `DRINKLOG_DATA_DIR` feeds).
//! 3. The OS data directory from the `directories` crate, e.g.
//!    `~/.local/share/drinklog` on Linux.
//!
//! The directory is created lazily, on the first write.

use crate::api::DrinkLogApi;
use crate::config::DrinkLogConfig;
use crate::error::{DrinkLogError, Result};
use crate::store::fs::FileStore;
use crate::store::fs_backend::FsBackend;
use directories::ProjectDirs;
use std::path::PathBuf;

pub struct DrinkLogContext {
    pub api: DrinkLogApi<FsBackend>,
    pub config: DrinkLogConfig,
    pub data_dir: PathBuf,
}

pub fn default_data_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "drinklog", "drinklog")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| DrinkLogError::Config("Could not determine data directory".to_string()))
}

/// Open the drink log for `config`, with `data_override` taking precedence over it.
pub fn initialize(config: DrinkLogConfig, data_override: Option<PathBuf>) -> Result<DrinkLogContext> {
    let data_dir = match data_override.or_else(|| config.data_dir.clone()) {
        Some(dir) => dir,
        None => default_data_dir()?,
    };

    let store = FileStore::open_dir(data_dir.clone())?;
    let api = DrinkLogApi::new(store);

    Ok(DrinkLogContext {
        api,
        config,
        data_dir,
    })
}
