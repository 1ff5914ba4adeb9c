use anyhow::Result;
use clap::{Parser, Subcommand};

use quokka::cli::{
    handle_accounting_command, handle_audit_command, handle_catalog_command,
    handle_config_command, handle_logbook_command, ConfigCommands,
};
use quokka::config::{paths::QuokkaPaths, settings::Settings};
use quokka::storage::Storage;

#[derive(Parser)]
#[command(
    name = "quokka",
    version,
    about = "Accounting and vehicle logbook companion for Quokka",
    long_about = "Quokka reconciles the start time, end time and amount of accounting \
                  entries, checks them against the service rules, splits return trips \
                  into two logbook legs, and prints the request bodies the backend expects."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory, settings and an empty service catalog
    Init,

    /// Show or change settings
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommands>,
    },

    /// Maintain the cached service catalog
    #[command(subcommand)]
    Catalog(quokka::cli::CatalogCommands),

    /// Autofill and validate accounting entries
    #[command(subcommand, alias = "acc")]
    Accounting(quokka::cli::AccountingCommands),

    /// Validate and split logbook trips
    #[command(subcommand)]
    Logbook(quokka::cli::LogbookCommands),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = QuokkaPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing Quokka at: {}", paths.base_dir().display());
            let fresh = !paths.is_initialized();
            settings.save(&paths)?;
            storage.save_all()?;
            if fresh {
                println!("Initialization complete!");
            } else {
                println!("Already initialized; settings and catalog were kept.");
            }
            println!();
            println!("Run 'quokka catalog import <file>' to load the service catalog.");
        }
        Some(Commands::Config { action }) => {
            handle_config_command(&storage, &settings, action.unwrap_or(ConfigCommands::Show))?;
        }
        Some(Commands::Catalog(cmd)) => {
            handle_catalog_command(&storage, cmd)?;
        }
        Some(Commands::Accounting(cmd)) => {
            handle_accounting_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Logbook(cmd)) => {
            handle_logbook_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Audit { limit }) => {
            handle_audit_command(&storage, limit)?;
        }
        None => {
            println!("Quokka - accounting and logbook companion");
            println!();
            println!("Run 'quokka --help' for usage information.");
        }
    }

    Ok(())
}
