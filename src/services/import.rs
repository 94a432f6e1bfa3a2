//! CSV Import service
//!
//! Loads books from a CSV laid out as `id,titulo,autor,ano_publicacao,preco`.
//! The first row is always treated as a header and discarded. Rows with the
//! wrong width or unparseable numbers are skipped, and so are rows whose id
//! already exists. One snapshot is taken before anything is written.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;

use crate::backup::BackupManager;
use crate::error::{BookstoreError, BookstoreResult};
use crate::models::{parse_price, BookId, NewBook};
use crate::storage::Storage;

/// Number of fields in a catalog CSV row
pub const EXPECTED_FIELDS: usize = 5;

/// Why a row was not turned into a book
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowSkip {
    /// The CSV reader could not decode the row
    Unreadable(String),
    /// Row did not have exactly five fields
    WrongFieldCount(usize),
    /// Id was not an integer
    InvalidId(String),
    /// Year was not an integer
    InvalidYear(String),
    /// Price was not a finite decimal number
    InvalidPrice(String),
}

/// Rows parsed from a CSV, ready to insert
#[derive(Debug, Default)]
pub struct ParsedRows {
    /// Rows with their explicit ids
    pub rows: Vec<(BookId, NewBook)>,
    /// Skipped rows as (1-based line number, reason)
    pub skipped: Vec<(usize, RowSkip)>,
}

/// Result of an import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Books written to the catalog
    pub imported: usize,
    /// Rows skipped because the id already existed
    pub collisions: usize,
    /// Rows skipped because they were malformed or refused by the store
    pub malformed: usize,
}

/// Service for bulk CSV import
pub struct ImportService<'a> {
    storage: &'a mut Storage,
    backups: &'a BackupManager,
}

impl<'a> ImportService<'a> {
    /// Create a new import service
    pub fn new(storage: &'a mut Storage, backups: &'a BackupManager) -> Self {
        Self { storage, backups }
    }

    /// Import every valid row of the file at `path`
    ///
    /// Fails without taking a backup if the file is missing or unreadable.
    pub fn import_file(&mut self, path: &Path) -> BookstoreResult<ImportSummary> {
        if !path.is_file() {
            return Err(BookstoreError::Import(format!(
                "File not found: {}",
                path.display()
            )));
        }

        let file = File::open(path).map_err(|e| {
            BookstoreError::Import(format!("Failed to open {}: {}", path.display(), e))
        })?;

        self.backups.snapshot()?;

        let parsed = parse_rows(file);
        for (line, reason) in &parsed.skipped {
            log::debug!("Skipping CSV row {}: {:?}", line, reason);
        }

        let outcome = self.storage.catalog.insert_batch_with_ids(&parsed.rows)?;
        let summary = ImportSummary {
            imported: outcome.inserted,
            collisions: outcome.collisions,
            malformed: parsed.skipped.len() + outcome.rejected,
        };

        log::info!(
            "Imported {} book(s) from {} ({} duplicate id(s), {} malformed row(s))",
            summary.imported,
            path.display(),
            summary.collisions,
            summary.malformed
        );

        Ok(summary)
    }
}

/// Parse CSV content into insertable rows, skipping the header
pub fn parse_rows<R: Read>(reader: R) -> ParsedRows {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut parsed = ParsedRows::default();

    for (index, record) in csv_reader.records().enumerate().skip(1) {
        let line = index + 1;
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                parsed.skipped.push((line, RowSkip::Unreadable(e.to_string())));
                continue;
            }
        };

        let fields: Vec<&str> = record.iter().collect();
        match parse_row(&fields) {
            Ok(row) => parsed.rows.push(row),
            Err(reason) => parsed.skipped.push((line, reason)),
        }
    }

    parsed
}

/// Parse a single data row
pub fn parse_row(fields: &[&str]) -> Result<(BookId, NewBook), RowSkip> {
    if fields.len() != EXPECTED_FIELDS {
        return Err(RowSkip::WrongFieldCount(fields.len()));
    }

    let id: BookId = fields[0]
        .trim()
        .parse()
        .map_err(|_| RowSkip::InvalidId(fields[0].to_string()))?;
    let year: i64 = fields[3]
        .trim()
        .parse()
        .map_err(|_| RowSkip::InvalidYear(fields[3].to_string()))?;
    let price =
        parse_price(fields[4]).map_err(|_| RowSkip::InvalidPrice(fields[4].to_string()))?;

    Ok((id, NewBook::new(fields[1], fields[2], year, price)))
}
