//! Export and import CLI commands

use std::path::Path;

use clap::Subcommand;

use crate::backup::BackupManager;
use crate::config::settings::Settings;
use crate::error::BookstoreResult;
use crate::export::{export_catalog, ExportOutcome};
use crate::services::{ImportService, ImportSummary};
use crate::storage::Storage;

/// Bulk transfer subcommands
#[derive(Subcommand)]
pub enum TransferCommands {
    /// Export all books to the CSV file in the export directory
    Export,
    /// Import books from a CSV file, keeping their ids
    Import {
        /// Path to CSV file
        file: String,
    },
}

/// Handle an export or import command
pub fn handle_transfer_command(
    storage: &mut Storage,
    backups: &BackupManager,
    settings: &Settings,
    cmd: TransferCommands,
) -> BookstoreResult<()> {
    match cmd {
        TransferCommands::Export => {
            let outcome = run_export(storage, settings)?;
            println!("{}", export_message(&outcome));
        }
        TransferCommands::Import { file } => {
            let summary = ImportService::new(storage, backups).import_file(Path::new(&file))?;
            println!("{}", import_message(&summary));
        }
    }

    Ok(())
}

pub(crate) fn run_export(storage: &Storage, settings: &Settings) -> BookstoreResult<ExportOutcome> {
    let path = storage.paths().export_file(&settings.export_file_name);
    export_catalog(&storage.catalog, &path)
}

pub(crate) fn export_message(outcome: &ExportOutcome) -> String {
    match outcome {
        ExportOutcome::Written { path, rows } => {
            format!("Exported {} book(s) to {}", rows, path.display())
        }
        ExportOutcome::Empty => "No books to export.".to_string(),
    }
}

pub(crate) fn import_message(summary: &ImportSummary) -> String {
    let mut message = format!("{} book(s) imported.", summary.imported);
    if summary.collisions > 0 || summary.malformed > 0 {
        message.push_str(&format!(
            " Skipped: {} existing id(s), {} invalid row(s).",
            summary.collisions, summary.malformed
        ));
    }
    message
}
