use super::backend::{StorageBackend, StorageKey};
use crate::error::{DrinkLogError, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since drinklog is single-threaded.
/// This keeps the `StorageBackend` trait on `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    slots: RefCell<HashMap<StorageKey, String>>,
    writes: RefCell<usize>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a pre-populated slot, as if an earlier session had written it.
    pub fn with_content(self, key: StorageKey, content: &str) -> Self {
        self.slots.borrow_mut().insert(key, content.to_string());
        self
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        *self.writes.borrow()
    }
}

impl StorageBackend for MemBackend {
    fn read(&self, key: StorageKey) -> Result<Option<String>> {
        Ok(self.slots.borrow().get(&key).cloned())
    }

    fn write(&self, key: StorageKey, content: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(DrinkLogError::Store("Simulated write error".to_string()));
        }
        self.slots.borrow_mut().insert(key, content.to_string());
        *self.writes.borrow_mut() += 1;
        Ok(())
    }

    fn location(&self, key: StorageKey) -> PathBuf {
        PathBuf::from(format!("memory://{}", key.file_name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_missing_key_is_none() {
        let backend = MemBackend::new();
        assert_eq!(backend.read(StorageKey::Drinks).unwrap(), None);
    }

    #[test]
    fn keys_are_independent() {
        let backend = MemBackend::new();
        backend.write(StorageKey::Drinks, "[1]").unwrap();
        assert_eq!(backend.read(StorageKey::Drinks).unwrap().as_deref(), Some("[1]"));
        assert_eq!(backend.read(StorageKey::Favorites).unwrap(), None);
        assert_eq!(backend.write_count(), 1);
    }

    #[test]
    fn simulated_error_keeps_previous_content() {
        let backend = MemBackend::new().with_content(StorageKey::Favorites, "[]");
        backend.set_simulate_write_error(true);
        assert!(backend.write(StorageKey::Favorites, "[{}]").is_err());
        assert_eq!(backend.read(StorageKey::Favorites).unwrap().as_deref(), Some("[]"));
        assert_eq!(backend.write_count(), 0);
    }
}
