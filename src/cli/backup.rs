//! Backup CLI commands
//!
//! Implements CLI commands for backup management.

use clap::Subcommand;
use std::path::PathBuf;

use crate::backup::{BackupManager, RestoreManager};
use crate::config::settings::Settings;
use crate::error::{BookstoreError, BookstoreResult};
use crate::storage::Storage;

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Create a new backup
    Create,

    /// List all available backups
    List {
        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },

    /// Delete old backups beyond the retention count
    Prune,

    /// Restore the database from a backup
    Restore {
        /// Backup filename or path (use 'latest' for most recent)
        backup: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a backup command
///
/// Takes ownership of the storage so a restore can close the database first.
pub fn handle_backup_command(
    storage: Storage,
    settings: &Settings,
    cmd: BackupCommands,
) -> BookstoreResult<()> {
    let paths = storage.paths().clone();
    let manager = BackupManager::new(&paths, settings.backup_retention.clone());

    match cmd {
        BackupCommands::Create => {
            let snapshot = manager.snapshot()?;
            println!("Backup created: {}", snapshot.path.display());
            if !snapshot.pruned.is_empty() {
                println!("Removed {} old backup(s).", snapshot.pruned.len());
            }
        }

        BackupCommands::List { verbose } => {
            let backups = manager.list_backups()?;

            if backups.is_empty() {
                println!("No backups found.");
                println!("Create one with: bookstore backup create");
            } else {
                println!("Available Backups");
                println!("=================");
                println!();

                for (i, backup) in backups.iter().enumerate() {
                    let age = chrono::Local::now().signed_duration_since(backup.modified);

                    if verbose {
                        println!(
                            "{}. {}\n   Modified: {}\n   Size: {}\n   Age: {}\n",
                            i + 1,
                            backup.filename,
                            backup.modified.format("%Y-%m-%d %H:%M:%S"),
                            format_size(backup.size_bytes),
                            format_duration(age),
                        );
                    } else {
                        println!(
                            "  {}. {} ({} ago, {})",
                            i + 1,
                            backup.filename,
                            format_duration(age),
                            format_size(backup.size_bytes),
                        );
                    }
                }

                println!();
                println!(
                    "Total: {} backup(s), keeping at most {}",
                    backups.len(),
                    manager.max_backups()
                );
            }
        }

        BackupCommands::Prune => {
            let deleted = manager.prune()?;
            if deleted.is_empty() {
                println!("No backups to prune.");
            } else {
                println!("Deleted {} backup(s).", deleted.len());
            }
        }

        BackupCommands::Restore { backup, force } => {
            let backup_path = resolve_backup_path(&manager, &backup)?;

            let restore_manager = RestoreManager::new(paths, settings.backup_retention.clone());
            let validation = restore_manager.validate_backup(&backup_path)?;

            println!("Backup Information");
            println!("==================");
            println!("File: {}", backup_path.display());
            println!("Books: {}", validation.book_count);
            println!("Size: {}", format_size(validation.size_bytes));
            println!();

            if !force {
                println!("WARNING: This will overwrite ALL current data!");
                println!("To proceed, run again with --force flag:");
                println!("  bookstore backup restore {} --force", backup);
                return storage.close();
            }

            storage.close()?;

            println!("Restoring from backup...");
            let result = restore_manager.restore_from_file(&backup_path)?;
            if let Some(pre_restore) = &result.pre_restore_backup {
                println!("Previous data saved to: {}", pre_restore.display());
            }
            println!("Restore complete! {}", result.summary());
            return Ok(());
        }
    }

    storage.close()
}

/// Resolve a backup identifier to a full path
fn resolve_backup_path(manager: &BackupManager, backup: &str) -> BookstoreResult<PathBuf> {
    if backup.eq_ignore_ascii_case("latest") {
        return manager
            .latest()?
            .map(|b| b.path)
            .ok_or_else(|| BookstoreError::backup_not_found("latest"));
    }

    if let Some(info) = manager.get_backup(backup)? {
        return Ok(info.path);
    }

    if let Some(info) = manager.get_backup(&format!("{}.db", backup))? {
        return Ok(info.path);
    }

    let path = PathBuf::from(backup);
    if path.is_file() {
        return Ok(path);
    }

    Err(BookstoreError::backup_not_found(backup))
}

/// Format a duration in human-readable form
fn format_duration(duration: chrono::Duration) -> String {
    let total_seconds = duration.num_seconds().max(0);

    if total_seconds < 60 {
        return format!("{}s", total_seconds);
    }

    let minutes = total_seconds / 60;
    if minutes < 60 {
        return format!("{}m", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }

    format!("{}d", hours / 24)
}

/// Format a file size in human-readable form
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
