//! Backup restoration for the bookstore inventory
//!
//! Replaces the database file with the contents of a snapshot. The catalog
//! must not be open while a restore runs.

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags};

use crate::config::paths::BookstorePaths;
use crate::config::settings::BackupRetention;
use crate::error::{BookstoreError, BookstoreResult};

use super::manager::BackupManager;

/// Handles restoring from backups
pub struct RestoreManager {
    paths: BookstorePaths,
    retention: BackupRetention,
}

impl RestoreManager {
    /// Create a new RestoreManager
    pub fn new(paths: BookstorePaths, retention: BackupRetention) -> Self {
        Self { paths, retention }
    }

    /// Check that a file is a readable catalog database
    pub fn validate_backup(&self, backup_path: &Path) -> BookstoreResult<ValidationResult> {
        let size_bytes = fs::metadata(backup_path)
            .map_err(|e| BookstoreError::Backup(format!("Failed to read backup file: {}", e)))?
            .len();

        let conn = Connection::open_with_flags(backup_path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|e| BookstoreError::Backup(format!("Failed to open backup: {}", e)))?;

        let has_table: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'livros'",
                [],
                |row| row.get(0),
            )
            .map_err(|e| BookstoreError::Backup(format!("Not a valid database: {}", e)))?;

        if has_table == 0 {
            return Err(BookstoreError::Backup(format!(
                "{} does not contain a book catalog",
                backup_path.display()
            )));
        }

        let book_count: i64 = conn.query_row("SELECT COUNT(*) FROM livros", [], |row| row.get(0))?;

        Ok(ValidationResult {
            book_count: book_count as usize,
            size_bytes,
        })
    }

    /// Restore the database from a backup file
    ///
    /// The current database is snapshotted first. The backup is read into memory
    /// before that snapshot so a retention pass cannot remove it mid-restore.
    pub fn restore_from_file(&self, backup_path: &Path) -> BookstoreResult<RestoreResult> {
        let validation = self.validate_backup(backup_path)?;

        let contents = fs::read(backup_path)
            .map_err(|e| BookstoreError::Backup(format!("Failed to read backup file: {}", e)))?;

        self.paths.ensure_directories()?;
        let database_file = self.paths.database_file();

        let pre_restore_backup = if database_file.exists() {
            let manager = BackupManager::new(&self.paths, self.retention.clone());
            Some(manager.snapshot()?.path)
        } else {
            None
        };

        write_atomic(&database_file, &contents)?;
        log::info!(
            "Restored {} book(s) from {}",
            validation.book_count,
            backup_path.display()
        );

        Ok(RestoreResult {
            books_restored: validation.book_count,
            pre_restore_backup,
        })
    }
}

/// Write to a temp file in the same directory, then rename over the target
fn write_atomic(path: &Path, contents: &[u8]) -> BookstoreResult<()> {
    let temp_path = path.with_extension("db.tmp");

    fs::write(&temp_path, contents)
        .map_err(|e| BookstoreError::Backup(format!("Failed to write temp file: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        BookstoreError::Backup(format!("Failed to replace database file: {}", e))
    })?;

    Ok(())
}

/// Result of a restore operation
#[derive(Debug)]
pub struct RestoreResult {
    /// Number of books in the restored catalog
    pub books_restored: usize,
    /// Snapshot of the data that was replaced
    pub pre_restore_backup: Option<PathBuf>,
}

impl RestoreResult {
    /// Get a summary of what was restored
    pub fn summary(&self) -> String {
        format!("Restored {} book(s)", self.books_restored)
    }
}

/// Result of validating a backup
#[derive(Debug)]
pub struct ValidationResult {
    /// Books stored in the backup
    pub book_count: usize,
    /// Size of the backup file
    pub size_bytes: u64,
}
