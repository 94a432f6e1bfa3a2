//! Book CLI commands
//!
//! Implements CLI commands for adding, listing, repricing, deleting and
//! searching books. Numeric arguments arrive as text and are parsed here so a
//! bad value is reported before any backup is taken.

use clap::Subcommand;

use crate::backup::BackupManager;
use crate::display::book::{format_book_details, format_book_list};
use crate::error::BookstoreResult;
use crate::models::{parse_id, parse_price, NewBook};
use crate::services::InventoryService;
use crate::storage::Storage;

/// Book subcommands
#[derive(Subcommand)]
pub enum BookCommands {
    /// Add a new book
    Add {
        /// Book title
        title: String,
        /// Author name
        author: String,
        /// Publication year
        #[arg(allow_hyphen_values = true)]
        year: String,
        /// Price (e.g. "39.90")
        #[arg(allow_hyphen_values = true)]
        price: String,
    },
    /// List all books
    List,
    /// Change the price of a book
    UpdatePrice {
        /// Book ID
        id: String,
        /// New price
        #[arg(allow_hyphen_values = true)]
        price: String,
    },
    /// Delete a book
    Delete {
        /// Book ID
        id: String,
    },
    /// Search books by author (substring match)
    Search {
        /// Text contained in the author name
        author: String,
    },
}

/// Handle a book command
pub fn handle_book_command(
    storage: &Storage,
    backups: &BackupManager,
    cmd: BookCommands,
) -> BookstoreResult<()> {
    let service = InventoryService::new(storage, backups);

    match cmd {
        BookCommands::Add {
            title,
            author,
            year,
            price,
        } => {
            let input = NewBook::parse(&title, &author, &year, &price)?;
            let book = service.add_book(input)?;
            println!("Book added!");
            print!("{}", format_book_details(&book));
        }

        BookCommands::List => {
            let books = service.list_books()?;
            println!("{}", format_book_list(&books, "No books found."));
        }

        BookCommands::UpdatePrice { id, price } => {
            let id = parse_id(&id)?;
            let price = parse_price(&price)?;
            let matched = service.update_price(id, price)?;
            println!("{}", price_update_message(matched));
        }

        BookCommands::Delete { id } => {
            let id = parse_id(&id)?;
            let matched = service.remove_book(id)?;
            println!("{}", delete_message(matched));
        }

        BookCommands::Search { author } => {
            let books = service.search_by_author(&author)?;
            println!(
                "{}",
                format_book_list(&books, "No books found for this author.")
            );
        }
    }

    Ok(())
}

pub(crate) fn price_update_message(matched: usize) -> &'static str {
    if matched > 0 {
        "Price updated!"
    } else {
        "Book not found."
    }
}

pub(crate) fn delete_message(matched: usize) -> &'static str {
    if matched > 0 {
        "Book deleted!"
    } else {
        "Book not found."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BookstorePaths;
    use crate::config::settings::BackupRetention;
    use tempfile::TempDir;

    fn setup() -> (Storage, BackupManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BookstorePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths.clone()).unwrap();
        let backups = BackupManager::new(&paths, BackupRetention::default());
        (storage, backups, temp_dir)
    }

    #[test]
    fn test_bad_number_is_rejected_before_backup() {
        let (storage, backups, _temp) = setup();

        let err = handle_book_command(
            &storage,
            &backups,
            BookCommands::Add {
                title: "T".into(),
                author: "A".into(),
                year: "soon".into(),
                price: "1".into(),
            },
        )
        .unwrap_err();
        assert!(err.is_validation());

        let err = handle_book_command(
            &storage,
            &backups,
            BookCommands::Delete { id: "two".into() },
        )
        .unwrap_err();
        assert!(err.is_validation());

        assert!(backups.list_backups().unwrap().is_empty());
        assert_eq!(storage.catalog.count().unwrap(), 0);
    }

    #[test]
    fn test_add_then_update() {
        let (storage, backups, _temp) = setup();

        handle_book_command(
            &storage,
            &backups,
            BookCommands::Add {
                title: "T".into(),
                author: "A".into(),
                year: "2000".into(),
                price: "10".into(),
            },
        )
        .unwrap();
        handle_book_command(
            &storage,
            &backups,
            BookCommands::UpdatePrice {
                id: "1".into(),
                price: "-2.5".into(),
            },
        )
        .unwrap();

        assert_eq!(storage.catalog.get(1).unwrap().unwrap().price, -2.5);
        assert_eq!(backups.list_backups().unwrap().len(), 2);
    }

    #[test]
    fn test_outcome_messages() {
        assert_eq!(price_update_message(1), "Price updated!");
        assert_eq!(price_update_message(0), "Book not found.");
        assert_eq!(delete_message(0), "Book not found.");
    }
}
