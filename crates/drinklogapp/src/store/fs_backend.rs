use super::backend::{StorageBackend, StorageKey};
use crate::error::{DrinkLogError, Result};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

/// One JSON file per key, all inside a single data directory.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(DrinkLogError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn read(&self, key: StorageKey) -> Result<Option<String>> {
        let path = self.location(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(DrinkLogError::Io)?;
        Ok(Some(content))
    }

    fn write(&self, key: StorageKey, content: &str) -> Result<()> {
        self.ensure_dir()?;

        let stem = key.file_name().trim_end_matches(".json");
        let tmp_file = self.root.join(format!(".{}-{}.tmp", stem, Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(DrinkLogError::Io)?;
        if let Err(e) = fs::rename(&tmp_file, self.location(key)) {
            let _ = fs::remove_file(&tmp_file);
            return Err(DrinkLogError::Io(e));
        }
        Ok(())
    }

    fn location(&self, key: StorageKey) -> PathBuf {
        self.root.join(key.file_name())
    }
}
