use super::StorageBackend;
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const BOOK_EXT: &str = "bin";
const ACTIVE_FILE: &str = ".active";

/// Stores each book as `<root>/<owner>.bin`. The root is created on first write.
/// The active owner is a one-line `<root>/.active` file.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn book_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.{}", name, BOOK_EXT))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }

    fn write_atomic(&self, target: &Path, bytes: &[u8]) -> Result<()> {
        self.ensure_dir()?;
        let tmp = self.root.join(format!(".book-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp, bytes)?;
        if let Err(e) = fs::rename(&tmp, target) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn read_blob(&self, name: &str) -> Result<Option<Vec<u8>>> {
        let path = self.book_path(name);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read(path)?))
    }

    fn write_blob(&self, name: &str, bytes: &[u8]) -> Result<()> {
        self.write_atomic(&self.book_path(name), bytes)
    }

    fn list_books(&self) -> Result<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(BOOK_EXT) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if !stem.starts_with('.') {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    fn read_active(&self) -> Result<Option<String>> {
        let path = self.root.join(ACTIVE_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let owner = fs::read_to_string(path)?.trim().to_string();
        Ok((!owner.is_empty()).then_some(owner))
    }

    fn write_active(&self, owner: &str) -> Result<()> {
        self.write_atomic(&self.root.join(ACTIVE_FILE), owner.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_root_reads_nothing() {
        let dir = tempdir().unwrap();
        let backend = FsBackend::new(dir.path().join("not-yet"));
        assert!(backend.read_blob("alice").unwrap().is_none());
        assert!(backend.list_books().unwrap().is_empty());
    }

    #[test]
    fn test_write_creates_root_and_file() {
        let dir = tempdir().unwrap();
        let backend = FsBackend::new(dir.path().join("books"));
        backend.write_blob("alice", b"abc").unwrap();

        assert!(backend.book_path("alice").ends_with("books/alice.bin"));
        assert_eq!(backend.read_blob("alice").unwrap().unwrap(), b"abc");
    }

    #[test]
    fn test_overwrite_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let backend = FsBackend::new(dir.path());
        backend.write_blob("alice", b"one").unwrap();
        backend.write_blob("alice", b"two").unwrap();

        assert_eq!(backend.read_blob("alice").unwrap().unwrap(), b"two");
        let leftovers = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn test_list_books_ignores_other_files() {
        let dir = tempdir().unwrap();
        let backend = FsBackend::new(dir.path());
        backend.write_blob("bob", b"x").unwrap();
        backend.write_blob("alice", b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();

        assert_eq!(backend.list_books().unwrap(), vec!["alice", "bob"]);
    }

    #[test]
    fn test_active_owner_is_not_a_book() {
        let dir = tempdir().unwrap();
        let backend = FsBackend::new(dir.path().join("books"));
        assert!(backend.read_active().unwrap().is_none());

        backend.write_active("alice").unwrap();
        backend.write_active("bob").unwrap();
        assert_eq!(backend.read_active().unwrap().as_deref(), Some("bob"));
        assert!(backend.list_books().unwrap().is_empty());
    }
}
