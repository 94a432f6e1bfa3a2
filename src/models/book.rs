//! Book model
//!
//! A single row of the catalog: title, author, publication year and price.

use std::fmt;

/// Store-assigned book identifier
pub type BookId = i64;

/// A book as stored in the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    /// Unique identifier, assigned on insert and never reused
    pub id: BookId,

    /// Book title
    pub title: String,

    /// Author name
    pub author: String,

    /// Publication year
    pub year: i64,

    /// Price; any finite value, negative included
    pub price: f64,
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Title: {}, Author: {}, Year: {}, Price: {}",
            self.id, self.title, self.author, self.year, self.price
        )
    }
}

/// Input for a book that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year: i64,
    pub price: f64,
}

impl NewBook {
    /// Create a new book input
    pub fn new(title: impl Into<String>, author: impl Into<String>, year: i64, price: f64) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
            price,
        }
    }

    /// Build a book input from raw text fields, as typed by a user
    ///
    /// Title and author are trimmed; year and price must parse as numbers.
    pub fn parse(
        title: &str,
        author: &str,
        year: &str,
        price: &str,
    ) -> Result<Self, BookValidationError> {
        let book = Self::new(
            title.trim(),
            author.trim(),
            parse_year(year)?,
            parse_price(price)?,
        );
        book.validate()?;
        Ok(book)
    }

    /// Validate the book input
    pub fn validate(&self) -> Result<(), BookValidationError> {
        if self.title.trim().is_empty() {
            return Err(BookValidationError::EmptyTitle);
        }

        if self.author.trim().is_empty() {
            return Err(BookValidationError::EmptyAuthor);
        }

        check_price(self.price)?;

        Ok(())
    }

    /// Attach a store-assigned id
    pub fn with_id(self, id: BookId) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            year: self.year,
            price: self.price,
        }
    }
}

/// Parse a book id from text
pub fn parse_id(input: &str) -> Result<BookId, BookValidationError> {
    input
        .trim()
        .parse()
        .map_err(|_| BookValidationError::InvalidId(input.to_string()))
}

/// Parse a publication year from text
pub fn parse_year(input: &str) -> Result<i64, BookValidationError> {
    input
        .trim()
        .parse()
        .map_err(|_| BookValidationError::InvalidYear(input.to_string()))
}

/// Parse a price from text
///
/// `NaN` and the infinities parse as `f64` but cannot be stored, so they are rejected.
pub fn parse_price(input: &str) -> Result<f64, BookValidationError> {
    match input.trim().parse::<f64>() {
        Ok(price) if price.is_finite() => Ok(price),
        _ => Err(BookValidationError::InvalidPrice(input.to_string())),
    }
}

/// Reject a price that cannot be stored
pub fn check_price(price: f64) -> Result<(), BookValidationError> {
    if price.is_finite() {
        Ok(())
    } else {
        Err(BookValidationError::InvalidPrice(price.to_string()))
    }
}

/// Validation errors for book input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookValidationError {
    EmptyTitle,
    EmptyAuthor,
    InvalidId(String),
    InvalidYear(String),
    InvalidPrice(String),
}

impl fmt::Display for BookValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Book title cannot be empty"),
            Self::EmptyAuthor => write!(f, "Book author cannot be empty"),
            Self::InvalidId(s) => write!(f, "Invalid book id: '{}'", s),
            Self::InvalidYear(s) => write!(f, "Invalid year: '{}'", s),
            Self::InvalidPrice(s) => write!(f, "Invalid price: '{}'", s),
        }
    }
}

impl std::error::Error for BookValidationError {}

impl From<BookValidationError> for crate::error::BookstoreError {
    fn from(err: BookValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}
