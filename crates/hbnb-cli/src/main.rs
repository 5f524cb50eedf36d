//! HBnB CLI
//!
//! Non-interactive console over the storage facade. The backend comes from
//! the environment (`HBNB_TYPE_STORAGE`, `HBNB_FILE_PATH`, `HBNB_DB_PATH`,
//! `HBNB_ENV`, optionally via `.env`) and can be overridden per invocation.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use hbnb_core::logging_facility::{self, Profile};
use hbnb_store::{BackendKind, DbTarget, Storage, StorageConfig};

mod commands;
mod params;

#[derive(Debug, Parser)]
#[command(name = "hbnb")]
#[command(about = "HBnB - persistence console", long_about = None)]
struct Cli {
    /// Storage backend
    #[arg(long, global = true, value_enum)]
    storage: Option<StorageArg>,

    /// Store file for the file backend
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Database path for the db backend (`:memory:` for a throwaway one)
    #[arg(long, global = true)]
    db: Option<String>,

    /// Log profile: dev, prod/json or test; logging is off when unset
    #[arg(long, global = true, env = "HBNB_LOG")]
    log: Option<Profile>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StorageArg {
    File,
    Db,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create an instance and print its id
    Create(commands::create::CreateArgs),
    /// Print one instance
    Show(commands::show::ShowArgs),
    /// Print every instance, or every instance of a class
    All(commands::all::AllArgs),
    /// Delete an instance and its dependents
    Destroy(commands::destroy::DestroyArgs),
    /// Set one attribute of an instance
    Update(commands::update::UpdateArgs),
    /// Print the number of instances
    Count(commands::count::CountArgs),
}

impl Cli {
    /// Environment first, then command-line overrides
    fn storage_config(&self) -> StorageConfig {
        let mut config = StorageConfig::load();
        if let Some(storage) = self.storage {
            config.backend = match storage {
                StorageArg::File => BackendKind::File,
                StorageArg::Db => BackendKind::Db,
            };
        }
        if let Some(file) = &self.file {
            config.file_path = file.clone();
        }
        if let Some(db) = &self.db {
            config.db_target = DbTarget::from_setting(db);
        }
        config
    }
}

fn run(command: Commands, storage: &mut Storage) -> commands::CommandResult {
    let report = storage.reload()?;
    for skipped in &report.skipped {
        eprintln!("warning: skipped {}: {}", skipped.key, skipped.error);
    }

    match command {
        Commands::Create(args) => commands::create::execute(args, storage),
        Commands::Show(args) => commands::show::execute(args, storage),
        Commands::All(args) => commands::all::execute(args, storage),
        Commands::Destroy(args) => commands::destroy::execute(args, storage),
        Commands::Update(args) => commands::update::execute(args, storage),
        Commands::Count(args) => commands::count::execute(args, storage),
    }
}

fn main() {
    let cli = Cli::parse();
    if let Some(profile) = cli.log {
        logging_facility::init(profile);
    }

    let mut storage = Storage::init(&cli.storage_config());
    let result = run(cli.command, &mut storage);
    let closed = storage.close();

    if let Err(e) = result.and(closed.map_err(Into::into)) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
