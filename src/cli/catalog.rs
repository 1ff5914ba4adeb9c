//! Service catalog CLI commands
//!
//! The catalog is normally fetched from the backend; these commands maintain
//! the local copy the rules run against.

use std::path::PathBuf;

use clap::Subcommand;

use crate::audit::EntityType;
use crate::display::format_catalog;
use crate::error::QuokkaResult;
use crate::models::{ServiceCatalog, ServiceId, ServiceType};
use crate::storage::Storage;

/// Catalog subcommands
#[derive(Subcommand)]
pub enum CatalogCommands {
    /// Show the cached catalog
    Show,
    /// Replace the list of hourly-based services
    SetHourly {
        /// Service IDs (e.g. 1 2 svc-5)
        ids: Vec<ServiceId>,
    },
    /// Set the type of a service
    SetType {
        id: ServiceId,
        /// material or wage
        service_type: ServiceType,
    },
    /// Replace the catalog with a JSON export from the backend
    Import {
        /// File with {"hourly_based_ids": [..], "types": [{"id": .., "type": ..}]}
        file: PathBuf,
    },
}

/// Handle a catalog command
pub fn handle_catalog_command(storage: &Storage, cmd: CatalogCommands) -> QuokkaResult<()> {
    let before = storage.catalog.snapshot()?;

    match cmd {
        CatalogCommands::Show => {
            print!("{}", format_catalog(&before));
            return Ok(());
        }
        CatalogCommands::SetHourly { ids } => {
            storage.catalog.set_hourly_based_ids(ids)?;
        }
        CatalogCommands::SetType { id, service_type } => {
            storage.catalog.set_service_type(id, service_type)?;
            println!("{} is now a {} service", id, service_type);
        }
        CatalogCommands::Import { file } => {
            let imported = storage.catalog.import(&file)?;
            println!(
                "Imported {} hourly-based service(s) and {} service type(s)",
                imported.hourly_based_ids().count(),
                imported.type_entries().len()
            );
        }
    }

    storage.catalog.save()?;
    let after = storage.catalog.snapshot()?;
    record_change(storage, &before, &after)?;

    print!("{}", format_catalog(&after));
    Ok(())
}

fn record_change(storage: &Storage, before: &ServiceCatalog, after: &ServiceCatalog) -> QuokkaResult<()> {
    if before == after {
        return Ok(());
    }
    storage.log_update(EntityType::ServiceCatalog, "catalog", before, after)
}
