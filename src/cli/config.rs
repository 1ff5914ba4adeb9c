//! Configuration CLI commands

use clap::Subcommand;
use rust_decimal::Decimal;

use super::args::quantity_arg;
use crate::audit::EntityType;
use crate::config::Settings;
use crate::display::format_settings;
use crate::error::QuokkaResult;
use crate::storage::Storage;

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show paths and settings
    Show,
    /// Set the smallest billable time unit in hours (e.g. 0.25)
    SetMinAmount {
        #[arg(value_parser = quantity_arg)]
        amount: Decimal,
    },
    /// Set the UTC offset in minutes used for API dates
    SetOffset {
        #[arg(allow_negative_numbers = true)]
        minutes: i32,
    },
    /// Use the system timezone for API dates
    ClearOffset,
    /// Report every failing rule group instead of only the first
    SetAccumulate {
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
    /// Set the currency unit shown next to material amounts
    SetCurrency { unit: String },
}

/// Handle a config command
pub fn handle_config_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ConfigCommands,
) -> QuokkaResult<()> {
    let mut updated = settings.clone();

    match cmd {
        ConfigCommands::Show => {
            let paths = storage.paths();
            println!("Quokka Configuration");
            println!("====================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Service catalog:  {}", paths.services_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            print!("{}", format_settings(settings));
            return Ok(());
        }
        ConfigCommands::SetMinAmount { amount } => updated.accounting_min_amount = amount,
        ConfigCommands::SetOffset { minutes } => updated.utc_offset_minutes = Some(minutes),
        ConfigCommands::ClearOffset => updated.utc_offset_minutes = None,
        ConfigCommands::SetAccumulate { enabled } => {
            updated.accumulate_validation_errors = enabled
        }
        ConfigCommands::SetCurrency { unit } => updated.currency_unit = unit,
    }

    updated.save(storage.paths())?;
    if updated != *settings {
        storage.log_update(EntityType::Settings, "settings", settings, &updated)?;
    }

    println!("Settings saved.");
    print!("{}", format_settings(&updated));
    Ok(())
}
