//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

mod args;

pub mod accounting;
pub mod audit;
pub mod catalog;
pub mod config;
pub mod logbook;

pub use accounting::{handle_accounting_command, AccountingCommands};
pub use audit::handle_audit_command;
pub use catalog::{handle_catalog_command, CatalogCommands};
pub use config::{handle_config_command, ConfigCommands};
pub use logbook::{handle_logbook_command, LogbookCommands};
