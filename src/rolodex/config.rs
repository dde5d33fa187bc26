//! # Configuration
//!
//! Settings are loaded with [`confique`], layered in priority order:
//!
//! 1. **Environment variables**: `ROLODEX_OWNER`, `ROLODEX_STORAGE_DIR`,
//!    `ROLODEX_PAGE_SIZE`.
//! 2. **Config file**: the file given with `--config`, else `rolodex.toml` in the
//!    OS config directory (via `directories`). A missing file is skipped.
//! 3. **Compiled defaults**.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `owner` | `defaultuser` | Whose book is opened at start-up |
//! | `storage_dir` | OS data dir + `/books` | Where `<owner>.bin` files live |
//! | `page_size` | unset | Records per page for listings |

use crate::book::DEFAULT_OWNER;
use crate::error::{Result, RolodexError};
use crate::paging::validate_page_size;
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "rolodex.toml";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "rolodex", "rolodex")
}

/// `rolodex.toml` in the OS config directory, when one can be determined.
pub fn default_config_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RolodexConfig {
    /// Owner of the book opened at start-up.
    #[config(env = "ROLODEX_OWNER", default = "defaultuser")]
    pub owner: String,

    /// Directory holding the stored books.
    #[config(env = "ROLODEX_STORAGE_DIR")]
    pub storage_dir: Option<PathBuf>,

    /// Default number of records per page. Unset shows everything at once.
    #[config(env = "ROLODEX_PAGE_SIZE")]
    pub page_size: Option<usize>,
}

impl Default for RolodexConfig {
    fn default() -> Self {
        Self {
            owner: DEFAULT_OWNER.to_string(),
            storage_dir: None,
            page_size: None,
        }
    }
}

impl RolodexConfig {
    /// Environment first, then `config_file` (or the default location).
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = config_file.map(Path::to_path_buf).or_else(default_config_file) {
            builder = builder.file(path);
        }
        builder.load()?.validated()
    }

    /// Reads only `path`, ignoring the environment.
    pub fn load_file(path: &Path) -> Result<Self> {
        Self::builder().file(path).load()?.validated()
    }

    fn validated(self) -> Result<Self> {
        if self.owner.trim().is_empty() {
            return Err(RolodexError::validation("The configured owner cannot be empty."));
        }
        validate_page_size(self.page_size)?;
        Ok(self)
    }

    /// The configured storage directory, or the OS data directory.
    pub fn storage_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.storage_dir {
            return Ok(dir.clone());
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().join("books"))
            .ok_or_else(|| {
                RolodexError::Store("Could not determine a data directory for address books".into())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = RolodexConfig::default();
        assert_eq!(config.owner, "defaultuser");
        assert_eq!(config.page_size, None);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = RolodexConfig::load_file(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, RolodexConfig::default());
    }

    #[test]
    fn test_file_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            "owner = \"alice\"\nstorage_dir = \"/tmp/books\"\npage_size = 3\n",
        )
        .unwrap();

        let config = RolodexConfig::load_file(&path).unwrap();
        assert_eq!(config.owner, "alice");
        assert_eq!(config.page_size, Some(3));
        assert_eq!(config.storage_dir().unwrap(), PathBuf::from("/tmp/books"));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "page_size = 0\n").unwrap();
        assert!(matches!(
            RolodexConfig::load_file(&path),
            Err(RolodexError::Validation(_))
        ));
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "page_size = \"many\"\n").unwrap();
        assert!(matches!(
            RolodexConfig::load_file(&path),
            Err(RolodexError::Config(_))
        ));
    }
}
