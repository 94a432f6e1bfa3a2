//! Backup system for the bookstore inventory
//!
//! Provides rolling snapshots of the database file and restore functionality.
//!
//! # Architecture
//!
//! - `BackupManager`: copies the database into `backups/` and enforces retention
//! - `RestoreManager`: validates a snapshot and copies it back over the database
//!
//! # Backup Format
//!
//! A backup is a byte-for-byte copy of the SQLite file named
//! `backup_YYYY-MM-DD_HH-MM-SS.db`. A second snapshot within the same second
//! gets a `_2`, `_3`, ... suffix instead of overwriting the first.
//!
//! # Retention Policy
//!
//! After every snapshot the oldest files (by modification time) are deleted
//! until `max_backups` remain. The default is 5.
//!
//! # Example
//!
//! ```rust,ignore
//! use bookstore::backup::BackupManager;
//! use bookstore::config::{paths::BookstorePaths, settings::BackupRetention};
//!
//! let paths = BookstorePaths::new()?;
//! let manager = BackupManager::new(&paths, BackupRetention::default());
//! let snapshot = manager.snapshot()?;
//! println!("Backup written to {}", snapshot.path.display());
//! ```

mod manager;
mod restore;

pub use manager::{BackupInfo, BackupManager, Snapshot};
pub use restore::{RestoreManager, RestoreResult, ValidationResult};
