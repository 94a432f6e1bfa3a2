//! Export module for the bookstore inventory
//!
//! Dumps the catalog to a spreadsheet-compatible CSV file.

pub mod csv;

pub use self::csv::{export_books_csv, export_catalog, ExportOutcome, CSV_HEADER};
