use crate::error::Result;
use std::fmt;
use std::path::PathBuf;

/// The durable slots the store mirrors its collections into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Drinks,
    Favorites,
}

impl StorageKey {
    pub fn file_name(&self) -> &'static str {
        match self {
            StorageKey::Drinks => "drinks.json",
            StorageKey::Favorites => "favorites.json",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_name())
    }
}

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while DrinkLogStore handles the "what" (snapshots, broadcast, persistence order).
pub trait StorageBackend {
    /// Read the raw document stored under `key`.
    /// Returns Ok(None) if nothing was ever written there.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn read(&self, key: StorageKey) -> Result<Option<String>>;

    /// Replace the document stored under `key`.
    /// MUST be atomic (e.g. write to tmp then rename) so a crash never leaves half a file.
    fn write(&self, key: StorageKey, content: &str) -> Result<()>;

    /// Where `key` lives. For FsBackend, this is the real path. For MemBackend, a virtual path.
    fn location(&self, key: StorageKey) -> PathBuf;
}
