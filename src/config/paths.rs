//! Path management for the bookstore inventory
//!
//! Provides XDG-compliant path resolution for the database, backups and exports.
//!
//! ## Path Resolution Order
//!
//! 1. `BOOKSTORE_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_DATA_HOME/bookstore-cli` or `~/.local/share/bookstore-cli`
//! 3. Windows: `%APPDATA%\bookstore-cli`

use std::path::PathBuf;

use crate::error::BookstoreError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "BOOKSTORE_DATA_DIR";

/// File name of the SQLite database inside the data directory
pub const DATABASE_FILE_NAME: &str = "livraria.db";

/// Manages all paths used by the bookstore inventory
#[derive(Debug, Clone)]
pub struct BookstorePaths {
    /// Base directory for all bookstore data
    base_dir: PathBuf,
}

impl BookstorePaths {
    /// Create a new BookstorePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, BookstoreError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create BookstorePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (holds the database file)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the backup directory
    pub fn backup_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    /// Get the export directory
    pub fn export_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the SQLite database
    pub fn database_file(&self) -> PathBuf {
        self.data_dir().join(DATABASE_FILE_NAME)
    }

    /// Get the path of the CSV export with the given file name
    pub fn export_file(&self, file_name: &str) -> PathBuf {
        self.export_dir().join(file_name)
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), BookstoreError> {
        for dir in [
            self.base_dir.clone(),
            self.data_dir(),
            self.backup_dir(),
            self.export_dir(),
        ] {
            std::fs::create_dir_all(&dir).map_err(|e| {
                BookstoreError::Io(format!("Failed to create {}: {}", dir.display(), e))
            })?;
        }

        Ok(())
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, BookstoreError> {
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        if !xdg.is_empty() {
            return Ok(PathBuf::from(xdg).join("bookstore-cli"));
        }
    }

    let home = std::env::var("HOME")
        .map_err(|_| BookstoreError::Config("Could not determine HOME directory".into()))?;
    Ok(PathBuf::from(home)
        .join(".local")
        .join("share")
        .join("bookstore-cli"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, BookstoreError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| BookstoreError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("bookstore-cli"))
}
