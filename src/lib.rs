//! Bookstore CLI - inventory manager for a small bookstore
//!
//! Books live in a single SQLite table. Every change to the catalog is
//! preceded by a byte-for-byte snapshot of the database file, and only the
//! most recent snapshots are kept.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: The `Book` record and input parsing
//! - `storage`: SQLite catalog store
//! - `backup`: Rolling snapshots and restore
//! - `services`: Backup-then-mutate operations and CSV import
//! - `export`: CSV export
//! - `display`: Terminal formatting
//! - `cli`: Command handlers and the interactive menu
//!
//! # Example
//!
//! ```rust,ignore
//! use bookstore::backup::BackupManager;
//! use bookstore::config::{paths::BookstorePaths, settings::Settings};
//! use bookstore::models::NewBook;
//! use bookstore::services::InventoryService;
//! use bookstore::storage::Storage;
//!
//! let paths = BookstorePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(paths.clone())?;
//! let backups = BackupManager::new(&paths, settings.backup_retention.clone());
//!
//! let service = InventoryService::new(&storage, &backups);
//! service.add_book(NewBook::new("Dom Casmurro", "Machado de Assis", 1899, 39.9))?;
//! storage.close()?;
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::BookstoreError;
