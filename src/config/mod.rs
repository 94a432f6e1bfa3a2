//! Configuration module for the bookstore inventory
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::BookstorePaths;
pub use settings::Settings;
