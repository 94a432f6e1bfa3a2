//! Display formatting for terminal output
//!
//! Provides utilities for formatting books as tables and detail views.

pub mod book;

pub use book::{format_book_details, format_book_list};
