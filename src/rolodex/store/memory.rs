use super::StorageBackend;
use crate::error::{Result, RolodexError};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` since rolodex is single-threaded, so the trait can take `&self`
/// for writes as well.
#[derive(Default)]
pub struct MemBackend {
    blobs: RefCell<HashMap<String, Vec<u8>>>,
    active: RefCell<Option<String>>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Stores raw bytes under `name`, bypassing the codec.
    pub fn put_raw(&self, name: &str, bytes: Vec<u8>) {
        self.blobs.borrow_mut().insert(name.to_string(), bytes);
    }
}

impl StorageBackend for MemBackend {
    fn read_blob(&self, name: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.blobs.borrow().get(name).cloned())
    }

    fn write_blob(&self, name: &str, bytes: &[u8]) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(RolodexError::Store("Simulated write error".to_string()));
        }
        self.blobs
            .borrow_mut()
            .insert(name.to_string(), bytes.to_vec());
        Ok(())
    }

    fn list_books(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.blobs.borrow().keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn read_active(&self) -> Result<Option<String>> {
        Ok(self.active.borrow().clone())
    }

    fn write_active(&self, owner: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(RolodexError::Store("Simulated write error".to_string()));
        }
        *self.active.borrow_mut() = Some(owner.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blobs_round_trip() {
        let backend = MemBackend::new();
        assert!(backend.read_blob("a").unwrap().is_none());
        backend.write_blob("b", b"2").unwrap();
        backend.put_raw("a", b"1".to_vec());

        assert_eq!(backend.read_blob("a").unwrap().unwrap(), b"1");
        assert_eq!(backend.list_books().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_simulated_write_error_keeps_old_blob() {
        let backend = MemBackend::new();
        backend.write_blob("a", b"old").unwrap();
        backend.set_simulate_write_error(true);
        assert!(backend.write_blob("a", b"new").is_err());
        assert_eq!(backend.read_blob("a").unwrap().unwrap(), b"old");
    }
}
