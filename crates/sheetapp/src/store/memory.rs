use super::BlobStore;
use crate::error::{Result, SheetError};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory blob store for testing.
///
/// Uses `RefCell` for interior mutability since the app is single-threaded.
#[derive(Default)]
pub struct MemBlobStore {
    blobs: RefCell<HashMap<String, String>>,
    simulate_write_error: RefCell<bool>,
}

impl MemBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    pub fn contains(&self, key: &str) -> bool {
        self.blobs.borrow().contains_key(key)
    }
}

impl BlobStore for MemBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(SheetError::Store("Simulated write error".to_string()));
        }
        self.blobs
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.blobs.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let store = MemBlobStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert!(!store.contains("k"));
    }

    #[test]
    fn simulated_write_error() {
        let store = MemBlobStore::new();
        store.set_simulate_write_error(true);
        assert!(store.set("k", "v").is_err());
        assert!(!store.contains("k"));
    }
}
