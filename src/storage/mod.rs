//! Storage layer for the bookstore inventory
//!
//! A single SQLite file holds the catalog. `Storage` is acquired once at
//! startup and released with [`Storage::close`].

pub mod catalog;

pub use catalog::{BatchOutcome, CatalogStore, InsertOutcome};

use crate::config::paths::BookstorePaths;
use crate::error::BookstoreError;

/// Main storage coordinator
pub struct Storage {
    paths: BookstorePaths,
    pub catalog: CatalogStore,
}

impl Storage {
    /// Create directories and open the catalog, creating the database on first run
    pub fn open(paths: BookstorePaths) -> Result<Self, BookstoreError> {
        paths.ensure_directories()?;
        let catalog = CatalogStore::open(&paths.database_file())?;
        Ok(Self { paths, catalog })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &BookstorePaths {
        &self.paths
    }

    /// Close the database connection
    pub fn close(self) -> Result<(), BookstoreError> {
        self.catalog.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BookstorePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();

        assert!(temp_dir.path().join("data").join("livraria.db").exists());
        assert!(temp_dir.path().join("backups").exists());
        assert!(temp_dir.path().join("exports").exists());
        assert_eq!(storage.catalog.count().unwrap(), 0);
        storage.close().unwrap();
    }
}
