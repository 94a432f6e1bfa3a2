//! CSV Export functionality
//!
//! Writes every book, ordered by id, as `id,titulo,autor,ano_publicacao,preco`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{BookstoreError, BookstoreResult};
use crate::models::Book;
use crate::storage::CatalogStore;

/// Header row of the catalog CSV
pub const CSV_HEADER: [&str; 5] = ["id", "titulo", "autor", "ano_publicacao", "preco"];

/// What an export did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The file was written
    Written { path: PathBuf, rows: usize },
    /// The catalog was empty; no file was touched
    Empty,
}

/// Write books as CSV to any writer
pub fn export_books_csv<W: Write>(books: &[Book], writer: W) -> BookstoreResult<()> {
    let mut csv_writer = ::csv::Writer::from_writer(writer);

    csv_writer
        .write_record(CSV_HEADER)
        .map_err(|e| BookstoreError::Export(e.to_string()))?;

    for book in books {
        csv_writer
            .write_record([
                book.id.to_string(),
                book.title.clone(),
                book.author.clone(),
                book.year.to_string(),
                format_price(book.price),
            ])
            .map_err(|e| BookstoreError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| BookstoreError::Export(e.to_string()))?;
    Ok(())
}

/// Shortest round-trip form, keeping a `.0` on whole numbers (`10.0`, not `10`)
fn format_price(price: f64) -> String {
    let text = price.to_string();
    if price.is_finite() && !text.contains('.') {
        format!("{}.0", text)
    } else {
        text
    }
}

/// Export the whole catalog to `path`
///
/// An empty catalog leaves any existing file at `path` untouched.
pub fn export_catalog(catalog: &CatalogStore, path: &Path) -> BookstoreResult<ExportOutcome> {
    let books = catalog.list_all()?;
    if books.is_empty() {
        return Ok(ExportOutcome::Empty);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            BookstoreError::Export(format!("Failed to create {}: {}", parent.display(), e))
        })?;
    }

    let file = fs::File::create(path).map_err(|e| {
        BookstoreError::Export(format!("Failed to create {}: {}", path.display(), e))
    })?;
    export_books_csv(&books, file)?;

    log::info!("Exported {} book(s) to {}", books.len(), path.display());
    Ok(ExportOutcome::Written {
        path: path.to_path_buf(),
        rows: books.len(),
    })
}
