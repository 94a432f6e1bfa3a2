//! Catalog store backed by SQLite
//!
//! Uses parameterized queries exclusively (no SQL string concatenation).
//! Every write is committed before the call returns.

use std::path::Path;

use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};

use crate::error::{BookstoreError, BookstoreResult};
use crate::models::{Book, BookId, NewBook};

/// Outcome of inserting a row with a caller-supplied id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The row was stored
    Inserted,
    /// A row with that id already exists; nothing was written
    Collision,
    /// Another constraint refused the row; nothing was written
    Rejected,
}

/// Totals for a batch of explicit-id inserts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub inserted: usize,
    pub collisions: usize,
    pub rejected: usize,
}

/// Owned handle to the `livros` table
pub struct CatalogStore {
    conn: Connection,
}

impl CatalogStore {
    /// Open (creating if absent) the database file and ensure the schema exists
    pub fn open(path: &Path) -> BookstoreResult<Self> {
        let conn = Connection::open(path).map_err(|e| {
            BookstoreError::Database(format!("Failed to open {}: {}", path.display(), e))
        })?;
        init_schema(&conn)?;
        log::debug!("Opened catalog at {}", path.display());
        Ok(Self { conn })
    }

    /// Open a throwaway in-memory catalog
    pub fn open_in_memory() -> BookstoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Insert a book and return its newly assigned id
    pub fn insert(&self, book: &NewBook) -> BookstoreResult<BookId> {
        self.conn.execute(
            "INSERT INTO livros (titulo, autor, ano_publicacao, preco) VALUES (?1, ?2, ?3, ?4)",
            params![book.title, book.author, book.year, book.price],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Insert a book keeping the supplied id
    ///
    /// An existing id is reported as [`InsertOutcome::Collision`] and any other
    /// constraint violation as [`InsertOutcome::Rejected`]; neither is an error.
    pub fn insert_with_id(&self, id: BookId, book: &NewBook) -> BookstoreResult<InsertOutcome> {
        insert_with_id_on(&self.conn, id, book)
    }

    /// Insert many explicit-id rows in a single transaction
    pub fn insert_batch_with_ids(
        &mut self,
        rows: &[(BookId, NewBook)],
    ) -> BookstoreResult<BatchOutcome> {
        let tx = self.conn.transaction()?;
        let mut outcome = BatchOutcome::default();

        for (id, book) in rows {
            match insert_with_id_on(&tx, *id, book)? {
                InsertOutcome::Inserted => outcome.inserted += 1,
                InsertOutcome::Collision => {
                    log::debug!("Skipping book {}: id already exists", id);
                    outcome.collisions += 1;
                }
                InsertOutcome::Rejected => {
                    log::debug!("Skipping book {}: row violates a constraint", id);
                    outcome.rejected += 1;
                }
            }
        }

        tx.commit()?;
        Ok(outcome)
    }

    /// Set the price of a book; returns the number of matched rows (0 or 1)
    pub fn update_price(&self, id: BookId, price: f64) -> BookstoreResult<usize> {
        let changed = self.conn.execute(
            "UPDATE livros SET preco = ?1 WHERE id = ?2",
            params![price, id],
        )?;
        Ok(changed)
    }

    /// Delete a book; returns the number of matched rows (0 or 1)
    pub fn delete_by_id(&self, id: BookId) -> BookstoreResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM livros WHERE id = ?1", params![id])?;
        Ok(changed)
    }

    /// Get a single book by id
    pub fn get(&self, id: BookId) -> BookstoreResult<Option<Book>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, titulo, autor, ano_publicacao, preco FROM livros WHERE id = ?1",
        )?;
        let book = stmt.query_row(params![id], book_from_row).optional()?;
        Ok(book)
    }

    /// All books ordered by id
    pub fn list_all(&self) -> BookstoreResult<Vec<Book>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, titulo, autor, ano_publicacao, preco FROM livros ORDER BY id",
        )?;
        let books = stmt
            .query_map([], book_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(books)
    }

    /// Books whose author contains `needle`
    ///
    /// `%` and `_` in the needle match literally. Matching follows SQLite `LIKE`,
    /// so ASCII letters compare case-insensitively.
    pub fn search_by_author(&self, needle: &str) -> BookstoreResult<Vec<Book>> {
        let pattern = format!("%{}%", escape_like(needle));
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, titulo, autor, ano_publicacao, preco FROM livros
             WHERE autor LIKE ?1 ESCAPE '\\'
             ORDER BY id",
        )?;
        let books = stmt
            .query_map(params![pattern], book_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(books)
    }

    /// Number of books in the catalog
    pub fn count(&self) -> BookstoreResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM livros", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Release the connection, surfacing any error from SQLite
    pub fn close(self) -> BookstoreResult<()> {
        self.conn.close().map_err(|(_, e)| BookstoreError::from(e))
    }
}

fn init_schema(conn: &Connection) -> BookstoreResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS livros (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            titulo TEXT NOT NULL,
            autor TEXT NOT NULL,
            ano_publicacao INTEGER NOT NULL,
            preco REAL NOT NULL
        );
        ",
    )?;
    log::info!("Catalog schema initialized");
    Ok(())
}

fn insert_with_id_on(conn: &Connection, id: BookId, book: &NewBook) -> BookstoreResult<InsertOutcome> {
    let result = conn.execute(
        "INSERT INTO livros (id, titulo, autor, ano_publicacao, preco) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![id, book.title, book.author, book.year, book.price],
    );

    match result {
        Ok(_) => Ok(InsertOutcome::Inserted),
        Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY {
                Ok(InsertOutcome::Collision)
            } else {
                Ok(InsertOutcome::Rejected)
            }
        }
        Err(e) => Err(e.into()),
    }
}

fn book_from_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        year: row.get(3)?,
        price: row.get(4)?,
    })
}

fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
