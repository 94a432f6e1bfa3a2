//! Interactive numeric menu
//!
//! Reads a choice, prompts for the fields that operation needs and dispatches
//! through [`MENU_ITEMS`]. Bad numbers are reported and the menu continues;
//! storage and backup failures end the session with an error.

use std::io::{BufRead, Write};
use std::path::Path;

use crate::backup::BackupManager;
use crate::config::settings::Settings;
use crate::display::book::format_book_list;
use crate::error::{BookstoreError, BookstoreResult};
use crate::models::{parse_id, parse_price, NewBook};
use crate::services::{ImportService, InventoryService};
use crate::storage::Storage;

use super::book::{delete_message, price_update_message};
use super::transfer::{export_message, import_message, run_export};

/// Operations reachable from the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    AddBook,
    ListBooks,
    UpdatePrice,
    DeleteBook,
    SearchByAuthor,
    Export,
    Import,
    Backup,
    Exit,
}

/// Menu key, label and action, in display order
pub const MENU_ITEMS: [(&str, &str, MenuAction); 9] = [
    ("1", "Add book", MenuAction::AddBook),
    ("2", "List books", MenuAction::ListBooks),
    ("3", "Update price", MenuAction::UpdatePrice),
    ("4", "Delete book", MenuAction::DeleteBook),
    ("5", "Search by author", MenuAction::SearchByAuthor),
    ("6", "Export books to CSV", MenuAction::Export),
    ("7", "Import books from CSV", MenuAction::Import),
    ("8", "Create backup", MenuAction::Backup),
    ("9", "Exit", MenuAction::Exit),
];

/// Look up the action for a menu key
pub fn action_for(choice: &str) -> Option<MenuAction> {
    MENU_ITEMS
        .iter()
        .find(|(key, _, _)| *key == choice.trim())
        .map(|(_, _, action)| *action)
}

/// An interactive session over any input and output
pub struct MenuSession<'a, R, W> {
    storage: &'a mut Storage,
    backups: &'a BackupManager,
    settings: &'a Settings,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> MenuSession<'a, R, W> {
    /// Create a new menu session
    pub fn new(
        storage: &'a mut Storage,
        backups: &'a BackupManager,
        settings: &'a Settings,
        input: R,
        output: W,
    ) -> Self {
        Self {
            storage,
            backups,
            settings,
            input,
            output,
        }
    }

    /// Run until the user picks Exit or input ends
    pub fn run(&mut self) -> BookstoreResult<()> {
        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt("Choose an option: ")? else {
                break;
            };

            match action_for(&choice) {
                Some(MenuAction::Exit) => {
                    writeln!(self.output, "Goodbye!")?;
                    break;
                }
                Some(action) => match self.dispatch(action) {
                    Err(BookstoreError::Validation(msg)) => writeln!(self.output, "{}", msg)?,
                    other => other?,
                },
                None => writeln!(self.output, "Invalid option.")?,
            }
        }

        Ok(())
    }

    fn dispatch(&mut self, action: MenuAction) -> BookstoreResult<()> {
        match action {
            MenuAction::AddBook => self.add_book(),
            MenuAction::ListBooks => {
                let books = self.inventory().list_books()?;
                writeln!(self.output, "{}", format_book_list(&books, "No books found."))?;
                Ok(())
            }
            MenuAction::UpdatePrice => self.update_price(),
            MenuAction::DeleteBook => self.delete_book(),
            MenuAction::SearchByAuthor => self.search(),
            MenuAction::Export => {
                let outcome = run_export(&*self.storage, self.settings)?;
                writeln!(self.output, "{}", export_message(&outcome))?;
                Ok(())
            }
            MenuAction::Import => self.import(),
            MenuAction::Backup => {
                let snapshot = self.inventory().backup_now()?;
                writeln!(self.output, "Backup created: {}", snapshot.path.display())?;
                Ok(())
            }
            MenuAction::Exit => Ok(()),
        }
    }

    fn inventory(&self) -> InventoryService<'_> {
        InventoryService::new(&*self.storage, self.backups)
    }

    fn add_book(&mut self) -> BookstoreResult<()> {
        let title = self.prompt_required("Title: ")?;
        let author = self.prompt_required("Author: ")?;
        let year = self.prompt_required("Year: ")?;
        let price = self.prompt_required("Price: ")?;

        let input = NewBook::parse(&title, &author, &year, &price)?;
        let book = self.inventory().add_book(input)?;
        writeln!(self.output, "Book added with ID {}!", book.id)?;
        Ok(())
    }

    fn update_price(&mut self) -> BookstoreResult<()> {
        let id = self.prompt_required("Book ID: ")?;
        let price = self.prompt_required("New price: ")?;

        let id = parse_id(&id)?;
        let price = parse_price(&price)?;
        let matched = self.inventory().update_price(id, price)?;
        writeln!(self.output, "{}", price_update_message(matched))?;
        Ok(())
    }

    fn delete_book(&mut self) -> BookstoreResult<()> {
        let id = self.prompt_required("Book ID: ")?;

        let id = parse_id(&id)?;
        let matched = self.inventory().remove_book(id)?;
        writeln!(self.output, "{}", delete_message(matched))?;
        Ok(())
    }

    fn search(&mut self) -> BookstoreResult<()> {
        let author = self.prompt_required("Author: ")?;
        let books = self.inventory().search_by_author(&author)?;
        writeln!(
            self.output,
            "{}",
            format_book_list(&books, "No books found for this author.")
        )?;
        Ok(())
    }

    fn import(&mut self) -> BookstoreResult<()> {
        let path = self.prompt_required("CSV file path: ")?;
        let path = Path::new(&path);

        if !path.is_file() {
            writeln!(self.output, "File not found.")?;
            return Ok(());
        }

        let summary = ImportService::new(&mut *self.storage, self.backups).import_file(path)?;
        writeln!(self.output, "{}", import_message(&summary))?;
        Ok(())
    }

    fn print_menu(&mut self) -> BookstoreResult<()> {
        writeln!(self.output)?;
        for (key, label, _) in MENU_ITEMS.iter() {
            writeln!(self.output, "{}. {}", key, label)?;
        }
        Ok(())
    }

    /// Prompt and read one trimmed line; `None` at end of input
    fn prompt(&mut self, label: &str) -> BookstoreResult<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prompt for a field; end of input mid-operation is an I/O error
    fn prompt_required(&mut self, label: &str) -> BookstoreResult<String> {
        self.prompt(label)?
            .ok_or_else(|| BookstoreError::Io("Input ended unexpectedly".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BookstorePaths;
    use tempfile::TempDir;

    fn run_session(temp: &TempDir, script: &str) -> (Storage, BackupManager, String) {
        let paths = BookstorePaths::with_base_dir(temp.path().to_path_buf());
        let mut storage = Storage::open(paths.clone()).unwrap();
        let settings = Settings::default();
        let backups = BackupManager::new(&paths, settings.backup_retention.clone());

        let mut output = Vec::new();
        MenuSession::new(
            &mut storage,
            &backups,
            &settings,
            script.as_bytes(),
            &mut output,
        )
        .run()
        .unwrap();

        (storage, backups, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_dispatch_table() {
        assert_eq!(action_for("1"), Some(MenuAction::AddBook));
        assert_eq!(action_for(" 9 "), Some(MenuAction::Exit));
        assert_eq!(action_for("10"), None);
        assert_eq!(action_for(""), None);
    }

    #[test]
    fn test_add_and_list() {
        let temp = TempDir::new().unwrap();
        let (storage, backups, output) = run_session(
            &temp,
            "1\nDom Casmurro\nMachado de Assis\n1899\n39.90\n2\n9\n",
        );

        assert!(output.contains("Book added with ID 1!"));
        assert!(output.contains("Dom Casmurro"));
        assert!(output.contains("Goodbye!"));
        assert_eq!(storage.catalog.count().unwrap(), 1);
        assert_eq!(backups.list_backups().unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_number_continues_without_backup() {
        let temp = TempDir::new().unwrap();
        let (storage, backups, output) = run_session(&temp, "1\nT\nA\nlast year\n10\n3\nx\n5\n9\n");

        assert!(output.contains("Invalid year: 'last year'"));
        assert!(output.contains("Invalid book id: 'x'"));
        assert_eq!(storage.catalog.count().unwrap(), 0);
        assert!(backups.list_backups().unwrap().is_empty());
    }

    #[test]
    fn test_not_found_and_unknown_option() {
        let temp = TempDir::new().unwrap();
        let (_storage, _backups, output) = run_session(&temp, "4\n42\n0\n9\n");

        assert!(output.contains("Book not found."));
        assert!(output.contains("Invalid option."));
    }

    #[test]
    fn test_missing_import_file_takes_no_backup() {
        let temp = TempDir::new().unwrap();
        let script = format!("7\n{}\n9\n", temp.path().join("nope.csv").display());
        let (_storage, backups, output) = run_session(&temp, &script);

        assert!(output.contains("File not found."));
        assert!(backups.list_backups().unwrap().is_empty());
    }

    #[test]
    fn test_end_of_input_exits() {
        let temp = TempDir::new().unwrap();
        let (_storage, _backups, output) = run_session(&temp, "2\n");
        assert!(output.contains("No books found."));
    }
}
