use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use bookstore::backup::BackupManager;
use bookstore::cli::{
    handle_backup_command, handle_book_command, handle_transfer_command, BackupCommands,
    BookCommands, MenuSession, TransferCommands,
};
use bookstore::config::{paths::BookstorePaths, settings::Settings};
use bookstore::storage::Storage;

#[derive(Parser)]
#[command(
    name = "bookstore",
    version,
    about = "Inventory manager for a small bookstore",
    long_about = "Keeps a catalog of books (title, author, year, price) in a local \
                  SQLite database. Every change is preceded by an automatic backup \
                  of the database file; the five most recent backups are kept."
)]
struct Cli {
    /// Override the data directory (defaults to BOOKSTORE_DATA_DIR or the platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Book(BookCommands),

    #[command(flatten)]
    Transfer(TransferCommands),

    /// Backup management commands
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Launch the interactive menu
    #[command(alias = "shell")]
    Menu,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => BookstorePaths::with_base_dir(dir),
        None => BookstorePaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;

    log::debug!("Data directory: {}", paths.base_dir().display());
    let mut storage = Storage::open(paths.clone())?;
    let backups = BackupManager::new(&paths, settings.backup_retention.clone());

    match cli.command {
        Some(Commands::Book(cmd)) => handle_book_command(&storage, &backups, cmd)?,
        Some(Commands::Transfer(cmd)) => {
            handle_transfer_command(&mut storage, &backups, &settings, cmd)?
        }
        Some(Commands::Backup(cmd)) => {
            // Consumes the storage so a restore can close the database first
            handle_backup_command(storage, &settings, cmd)?;
            return Ok(());
        }
        Some(Commands::Menu) => {
            let stdin = io::stdin();
            MenuSession::new(
                &mut storage,
                &backups,
                &settings,
                stdin.lock(),
                io::stdout(),
            )
            .run()?;
        }
        Some(Commands::Config) => print_config(&paths, &settings),
        None => {
            println!("Bookstore - inventory manager");
            println!();
            println!("Run 'bookstore --help' for usage information.");
            println!("Run 'bookstore menu' to launch the interactive menu.");
        }
    }

    storage.close()?;
    Ok(())
}

fn print_config(paths: &BookstorePaths, settings: &Settings) {
    println!("Bookstore Configuration");
    println!("=======================");
    println!("Base directory:   {}", paths.base_dir().display());
    println!("Database file:    {}", paths.database_file().display());
    println!("Backup directory: {}", paths.backup_dir().display());
    println!(
        "Export file:      {}",
        paths.export_file(&settings.export_file_name).display()
    );
    println!();
    println!("Settings:");
    println!(
        "  Backups kept: {}",
        settings.backup_retention.max_backups
    );
}
