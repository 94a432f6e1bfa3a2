//! Core data models for the bookstore inventory

pub mod book;

pub use book::{
    check_price, parse_id, parse_price, parse_year, Book, BookId, BookValidationError, NewBook,
};
