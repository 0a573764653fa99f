use super::fs_backend::FsBackend;
use super::DrinkLogStore;
use crate::error::Result;
use std::path::PathBuf;

pub type FileStore = DrinkLogStore<FsBackend>;

impl FileStore {
    /// Open the log kept in `root`, creating nothing until the first write.
    pub fn open_dir(root: PathBuf) -> Result<Self> {
        DrinkLogStore::open(FsBackend::new(root))
    }
}
