//! Service layer for the bookstore inventory
//!
//! The service layer sits on top of the storage layer and pairs every
//! mutation with a backup snapshot.

pub mod import;
pub mod inventory;

pub use import::{ImportService, ImportSummary, RowSkip};
pub use inventory::InventoryService;
