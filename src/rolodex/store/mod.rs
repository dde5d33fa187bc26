//! # Storage Layer
//!
//! Saved books are opaque blobs (see [`crate::snapshot`]) kept under a name, one
//! blob per owner. The [`StorageBackend`] trait only knows how to move bytes:
//!
//! - [`fs::FsBackend`]: production, one `<owner>.bin` file per book in a root
//!   directory,
//! - [`memory::MemBackend`]: in-memory, for tests.
//!
//! Backends also remember the active owner, the book a session opens when no
//! owner is asked for.
//!
//! [`save_book`] and [`load_book`] put the codec and the backend together.

use crate::book::AddressBook;
use crate::error::{Result, RolodexError};
use crate::snapshot;
use tracing::debug;

pub mod fs;
pub mod memory;

/// Raw blob storage.
pub trait StorageBackend {
    /// Returns `Ok(None)` when nothing is stored under `name`.
    /// Returns `Err` only on actual I/O errors.
    fn read_blob(&self, name: &str) -> Result<Option<Vec<u8>>>;

    /// MUST be atomic (write to tmp then rename) so a crash never leaves a
    /// half-written book behind.
    fn write_blob(&self, name: &str, bytes: &[u8]) -> Result<()>;

    /// Names of all stored books, sorted.
    fn list_books(&self) -> Result<Vec<String>>;

    /// Owner whose book is opened when none is asked for, if one was recorded.
    fn read_active(&self) -> Result<Option<String>>;

    fn write_active(&self, owner: &str) -> Result<()>;
}

/// Owner names double as blob names, so they must be usable as file names.
pub fn validate_book_name(name: &str) -> Result<()> {
    let bad = name.trim().is_empty()
        || name.starts_with('.')
        || name.contains(['/', '\\', '\0']);
    if bad {
        return Err(RolodexError::validation(format!(
            "'{}' cannot be used as a user name for storing an address book.",
            name
        )));
    }
    Ok(())
}

pub fn save_book<B: StorageBackend>(backend: &B, book: &AddressBook) -> Result<()> {
    validate_book_name(book.owner())?;
    let bytes = snapshot::encode(book)?;
    backend.write_blob(book.owner(), &bytes)?;
    debug!(owner = %book.owner(), records = book.len(), "book stored");
    Ok(())
}

pub fn is_stored<B: StorageBackend>(backend: &B, owner: &str) -> Result<bool> {
    validate_book_name(owner)?;
    Ok(backend.read_blob(owner)?.is_some())
}

pub fn load_book<B: StorageBackend>(backend: &B, owner: &str) -> Result<AddressBook> {
    validate_book_name(owner)?;
    let bytes = backend.read_blob(owner)?.ok_or_else(|| {
        RolodexError::not_found(format!("No address book stored for the user '{}'.", owner))
    })?;
    let book = snapshot::decode(&bytes)?;
    debug!(owner = %owner, records = book.len(), "book loaded");
    Ok(book)
}

#[cfg(test)]
mod tests {
    use super::memory::MemBackend;
    use super::*;
    use crate::fixtures::BookFixture;

    #[test]
    fn test_save_then_load() {
        let backend = MemBackend::new();
        let mut book = BookFixture::new().with_sample_contacts().book;
        book.set_owner("tu").unwrap();

        save_book(&backend, &book).unwrap();
        assert_eq!(backend.list_books().unwrap(), vec!["tu"]);

        let loaded = load_book(&backend, "tu").unwrap();
        assert_eq!(loaded, book);
    }

    #[test]
    fn test_is_stored() {
        let backend = MemBackend::new();
        let book = BookFixture::new().with_contacts(1).book;
        assert!(!is_stored(&backend, book.owner()).unwrap());
        save_book(&backend, &book).unwrap();
        assert!(is_stored(&backend, book.owner()).unwrap());
        assert!(is_stored(&backend, "../x").is_err());
    }

    #[test]
    fn test_load_never_stored_is_not_found() {
        let backend = MemBackend::new();
        let err = load_book(&backend, "ghost").unwrap_err();
        assert_eq!(
            err.to_string(),
            "No address book stored for the user 'ghost'."
        );
    }

    #[test]
    fn test_book_names() {
        assert!(validate_book_name("alice").is_ok());
        assert!(validate_book_name("Alice Smith").is_ok());
        for bad in ["", "  ", "../x", "a/b", ".hidden", "a\\b"] {
            assert!(validate_book_name(bad).is_err(), "{:?}", bad);
        }
    }

    #[test]
    fn test_write_error_surfaces() {
        let backend = MemBackend::new();
        backend.set_simulate_write_error(true);
        let book = BookFixture::new().with_contacts(1).book;
        assert!(matches!(
            save_book(&backend, &book),
            Err(RolodexError::Store(_))
        ));
    }
}
