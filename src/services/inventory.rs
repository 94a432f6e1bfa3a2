//! Inventory service
//!
//! Every mutating operation takes a snapshot through the [`BackupManager`]
//! first; if the snapshot fails the catalog is left untouched.

use crate::backup::{BackupManager, Snapshot};
use crate::error::BookstoreResult;
use crate::models::{check_price, Book, BookId, NewBook};
use crate::storage::Storage;

/// Service for book management
pub struct InventoryService<'a> {
    storage: &'a Storage,
    backups: &'a BackupManager,
}

impl<'a> InventoryService<'a> {
    /// Create a new inventory service
    pub fn new(storage: &'a Storage, backups: &'a BackupManager) -> Self {
        Self { storage, backups }
    }

    /// Add a book and return it with its assigned id
    pub fn add_book(&self, input: NewBook) -> BookstoreResult<Book> {
        input.validate()?;

        self.backups.snapshot()?;
        let id = self.storage.catalog.insert(&input)?;
        log::info!("Added book {} ({})", id, input.title);

        Ok(input.with_id(id))
    }

    /// All books ordered by id
    pub fn list_books(&self) -> BookstoreResult<Vec<Book>> {
        self.storage.catalog.list_all()
    }

    /// Get a book by id
    pub fn get(&self, id: BookId) -> BookstoreResult<Option<Book>> {
        self.storage.catalog.get(id)
    }

    /// Change a book's price; returns the matched row count (0 when the id is unknown)
    pub fn update_price(&self, id: BookId, price: f64) -> BookstoreResult<usize> {
        check_price(price)?;
        self.backups.snapshot()?;
        let matched = self.storage.catalog.update_price(id, price)?;
        if matched == 0 {
            log::debug!("Price update matched no book with id {}", id);
        }
        Ok(matched)
    }

    /// Delete a book; returns the matched row count (0 when the id is unknown)
    pub fn remove_book(&self, id: BookId) -> BookstoreResult<usize> {
        self.backups.snapshot()?;
        let matched = self.storage.catalog.delete_by_id(id)?;
        if matched == 0 {
            log::debug!("Delete matched no book with id {}", id);
        }
        Ok(matched)
    }

    /// Books whose author contains the given text
    pub fn search_by_author(&self, needle: &str) -> BookstoreResult<Vec<Book>> {
        self.storage.catalog.search_by_author(needle)
    }

    /// Take a snapshot on request
    pub fn backup_now(&self) -> BookstoreResult<Snapshot> {
        self.backups.snapshot()
    }
}
