//! Backup manager for the bookstore inventory
//!
//! Copies the database file into the backup directory before every mutation
//! and keeps only the most recent snapshots.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};

use crate::config::paths::BookstorePaths;
use crate::config::settings::BackupRetention;
use crate::error::{BookstoreError, BookstoreResult};

const BACKUP_PREFIX: &str = "backup_";
const BACKUP_EXTENSION: &str = "db";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";
const TIMESTAMP_LEN: usize = 19;

/// Metadata about a backup
#[derive(Debug, Clone)]
pub struct BackupInfo {
    /// Backup filename
    pub filename: String,
    /// Full path to backup
    pub path: PathBuf,
    /// Last modification time of the file
    pub modified: DateTime<Local>,
    /// Size in bytes
    pub size_bytes: u64,
    /// Timestamp part of the name, if it parses
    stamp: Option<String>,
    /// Same-second sequence number (1 for an unsuffixed name)
    sequence: u32,
}

impl BackupInfo {
    fn eviction_key(&self) -> (DateTime<Local>, Option<&str>, u32) {
        (self.modified, self.stamp.as_deref(), self.sequence)
    }
}

/// A snapshot that was just taken
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Path of the new backup file
    pub path: PathBuf,
    /// Older backups removed by the retention pass
    pub pruned: Vec<PathBuf>,
}

/// Manages backup creation and retention
pub struct BackupManager {
    /// Path to backup directory
    backup_dir: PathBuf,
    /// Database file being protected
    database_file: PathBuf,
    /// Retention policy
    retention: BackupRetention,
}

impl BackupManager {
    /// Create a new BackupManager
    pub fn new(paths: &BookstorePaths, retention: BackupRetention) -> Self {
        Self {
            backup_dir: paths.backup_dir(),
            database_file: paths.database_file(),
            retention,
        }
    }

    /// Copy the database file into the backup directory, then prune
    ///
    /// Any failure is returned before the caller gets a chance to mutate.
    pub fn snapshot(&self) -> BookstoreResult<Snapshot> {
        if !self.database_file.exists() {
            return Err(BookstoreError::Backup(format!(
                "Database file not found: {}",
                self.database_file.display()
            )));
        }

        fs::create_dir_all(&self.backup_dir).map_err(|e| {
            BookstoreError::Backup(format!("Failed to create backup directory: {}", e))
        })?;

        let stamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let path = self.unused_backup_path(&stamp);

        fs::copy(&self.database_file, &path).map_err(|e| {
            BookstoreError::Backup(format!("Failed to copy database to {}: {}", path.display(), e))
        })?;

        // fs::copy may carry over the source mtime
        File::options()
            .write(true)
            .open(&path)
            .and_then(|f| f.set_modified(SystemTime::now()))
            .map_err(|e| BookstoreError::Backup(format!("Failed to stamp backup: {}", e)))?;

        log::info!("Created backup {}", path.display());

        let pruned = self.prune()?;
        Ok(Snapshot { path, pruned })
    }

    /// First free name for this second: `backup_<stamp>.db`, then `backup_<stamp>_2.db`, ...
    fn unused_backup_path(&self, stamp: &str) -> PathBuf {
        let mut path = self
            .backup_dir
            .join(format!("{}{}.{}", BACKUP_PREFIX, stamp, BACKUP_EXTENSION));
        let mut sequence = 2;
        while path.exists() {
            path = self.backup_dir.join(format!(
                "{}{}_{}.{}",
                BACKUP_PREFIX, stamp, sequence, BACKUP_EXTENSION
            ));
            sequence += 1;
        }
        path
    }

    /// Delete the oldest backups until at most `max_backups` remain
    ///
    /// Returns the deleted paths, oldest first.
    pub fn prune(&self) -> BookstoreResult<Vec<PathBuf>> {
        let mut backups = self.list_backups()?;
        backups.reverse();

        let excess = backups.len().saturating_sub(self.retention.max_backups);
        let mut deleted = Vec::with_capacity(excess);

        for backup in backups.into_iter().take(excess) {
            fs::remove_file(&backup.path).map_err(|e| {
                BookstoreError::Backup(format!(
                    "Failed to delete old backup {}: {}",
                    backup.filename, e
                ))
            })?;
            deleted.push(backup.path);
        }

        if !deleted.is_empty() {
            log::info!("Pruned {} old backup(s)", deleted.len());
        }

        Ok(deleted)
    }

    /// List all available backups, newest first
    pub fn list_backups(&self) -> BookstoreResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.backup_dir).map_err(|e| {
            BookstoreError::Backup(format!("Failed to read backup directory: {}", e))
        })?;

        let mut backups = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                BookstoreError::Backup(format!("Failed to read directory entry: {}", e))
            })?;

            if let Some(info) = parse_backup_info(&entry.path()) {
                backups.push(info);
            }
        }

        backups.sort_by(|a, b| b.eviction_key().cmp(&a.eviction_key()));
        Ok(backups)
    }

    /// Get the most recent backup
    pub fn latest(&self) -> BookstoreResult<Option<BackupInfo>> {
        Ok(self.list_backups()?.into_iter().next())
    }

    /// Get a backup by filename
    pub fn get_backup(&self, filename: &str) -> BookstoreResult<Option<BackupInfo>> {
        let path = self.backup_dir.join(filename);
        if path.exists() {
            Ok(parse_backup_info(&path))
        } else {
            Ok(None)
        }
    }

    /// Get backup directory path
    pub fn backup_dir(&self) -> &PathBuf {
        &self.backup_dir
    }

    /// Number of backups kept by the retention pass
    pub fn max_backups(&self) -> usize {
        self.retention.max_backups
    }
}

/// Build backup info for a `backup_*.db` file; anything else yields `None`
fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_string_lossy().to_string();
    let body = filename
        .strip_prefix(BACKUP_PREFIX)?
        .strip_suffix(BACKUP_EXTENSION)?
        .strip_suffix('.')?;

    let metadata = match fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => metadata,
        Ok(_) => return None,
        Err(e) => {
            log::warn!("Skipping backup {}: {}", filename, e);
            return None;
        }
    };
    let modified = match metadata.modified() {
        Ok(time) => DateTime::<Local>::from(time),
        Err(e) => {
            log::warn!("Skipping backup {}: {}", filename, e);
            return None;
        }
    };

    let (stamp, sequence) = parse_name_body(body);

    Some(BackupInfo {
        filename,
        path: path.to_path_buf(),
        modified,
        size_bytes: metadata.len(),
        stamp,
        sequence,
    })
}

/// Split `YYYY-MM-DD_HH-MM-SS[_N]` into its timestamp and sequence number
fn parse_name_body(body: &str) -> (Option<String>, u32) {
    let Some(stamp) = body.get(..TIMESTAMP_LEN) else {
        return (None, 1);
    };
    if chrono::NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).is_err() {
        return (None, 1);
    }

    let sequence = match &body[TIMESTAMP_LEN..] {
        "" => 1,
        rest => match rest.strip_prefix('_').and_then(|n| n.parse().ok()) {
            Some(n) => n,
            None => return (None, 1),
        },
    };

    (Some(stamp.to_string()), sequence)
}
