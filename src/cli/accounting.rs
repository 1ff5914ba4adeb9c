//! Accounting CLI commands
//!
//! Each command replays the given values as form edits in the order a user
//! fills the form, so autofill behaves exactly as it does while typing.

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Subcommand};
use rust_decimal::Decimal;

use super::args::{date_arg, quantity_arg, time_arg};
use crate::api::{local_today, parse_server_errors, AccountingPayload};
use crate::audit::EntityType;
use crate::config::Settings;
use crate::display::{
    format_autofill_result, format_entry_details, format_field_errors, render_structured,
    OutputFormat,
};
use crate::error::{QuokkaError, QuokkaResult};
use crate::models::{
    AccountingChange, AccountingErrors, AccountingField, ProjectId, ServiceId, ServiceRecord,
    TimeFields,
};
use crate::services::AccountingService;
use crate::storage::Storage;

/// Values of an accounting form
#[derive(Args, Debug)]
pub struct RecordArgs {
    /// Service ID (e.g. 12 or svc-12)
    #[arg(long)]
    pub service: Option<ServiceId>,

    /// Project ID (e.g. 7 or prj-7)
    #[arg(long)]
    pub project: Option<ProjectId>,

    /// Day the service was provided (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = date_arg)]
    pub on: Option<NaiveDate>,

    /// Start time (HH:MM)
    #[arg(long, value_parser = time_arg)]
    pub start: Option<NaiveTime>,

    /// End time (HH:MM)
    #[arg(long, value_parser = time_arg)]
    pub end: Option<NaiveTime>,

    /// Amount (hours for wage services)
    #[arg(long, value_parser = quantity_arg)]
    pub amount: Option<Decimal>,

    #[arg(long)]
    pub comment: Option<String>,
}

impl RecordArgs {
    /// The edits that fill an empty form with these values
    fn changes(&self) -> Vec<AccountingChange> {
        let mut changes = Vec::new();
        if let Some(service) = self.service {
            changes.push(AccountingChange::Service(service));
        }
        if self.project.is_some() {
            changes.push(AccountingChange::Project(self.project));
        }
        if self.comment.is_some() {
            changes.push(AccountingChange::Comment(self.comment.clone()));
        }
        if self.amount.is_some() {
            changes.push(AccountingChange::Amount(self.amount));
        }
        if self.start.is_some() {
            changes.push(AccountingChange::StartedAt(self.start));
        }
        if self.end.is_some() {
            changes.push(AccountingChange::EndedAt(self.end));
        }
        changes
    }
}

/// Accounting subcommands
#[derive(Subcommand)]
pub enum AccountingCommands {
    /// Derive the blank one of start, end and amount
    Autofill {
        #[arg(long, value_parser = time_arg)]
        start: Option<NaiveTime>,
        #[arg(long, value_parser = time_arg)]
        end: Option<NaiveTime>,
        #[arg(long, value_parser = quantity_arg)]
        amount: Option<Decimal>,
        /// Day the times are placed on (defaults to today)
        #[arg(long, value_parser = date_arg)]
        date: Option<NaiveDate>,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Check an accounting entry against the service rules
    Validate(RecordArgs),
    /// Autofill, validate and print the request body for the backend
    Prepare {
        #[command(flatten)]
        record: RecordArgs,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Map a backend validation response onto the accounting fields
    ServerErrors {
        /// File containing the response body
        file: PathBuf,
    },
}

/// Handle an accounting command
pub fn handle_accounting_command(
    storage: &Storage,
    settings: &Settings,
    cmd: AccountingCommands,
) -> QuokkaResult<()> {
    let catalog = storage.catalog.snapshot()?;
    let service = AccountingService::new(&catalog, settings);
    let today = local_today(settings.timezone());

    match cmd {
        AccountingCommands::Autofill {
            start,
            end,
            amount,
            date,
            format,
        } => {
            let fields = TimeFields::new(start, end, amount);
            let filled = service.autofill(fields, date.unwrap_or(today));

            match format {
                OutputFormat::Text => print!("{}", format_autofill_result(&filled)),
                _ => println!("{}", render_structured(&filled, format)?),
            }
        }

        AccountingCommands::Validate(args) => {
            let record = fill_form(&service, &args, today);
            let entry = service.validate(&record).map_err(validation_error)?;

            println!("Valid: {}", entry);
            print!(
                "{}",
                format_entry_details(
                    &entry,
                    catalog.service_type(entry.service_id),
                    &settings.currency_unit
                )
            );
        }

        AccountingCommands::Prepare { record, format } => {
            let form = fill_form(&service, &record, today);
            let entry = service.prepare(form, today).map_err(validation_error)?;
            let payload = AccountingPayload::from(&entry);

            storage.log_create(
                EntityType::AccountingEntry,
                entry.service_id.to_string(),
                Some(entry.to_string()),
                &payload,
            )?;

            match format {
                OutputFormat::Text => {
                    println!("Prepared: {}", entry);
                    print!(
                        "{}",
                        format_entry_details(
                            &entry,
                            catalog.service_type(entry.service_id),
                            &settings.currency_unit
                        )
                    );
                }
                _ => println!("{}", render_structured(&payload, format)?),
            }
        }

        AccountingCommands::ServerErrors { file } => {
            let body = std::fs::read_to_string(&file).map_err(|e| {
                QuokkaError::Io(format!("Failed to read {}: {}", file.display(), e))
            })?;
            let errors = parse_server_errors::<AccountingField>(&body)?;

            if errors.is_empty() {
                println!("No field errors in response.");
            } else {
                println!("Server rejected the entry:");
                print!("{}", format_field_errors(&errors));
            }
        }
    }

    Ok(())
}

fn fill_form(service: &AccountingService<'_>, args: &RecordArgs, today: NaiveDate) -> ServiceRecord {
    let empty = ServiceRecord::new(args.on.unwrap_or(today));
    args.changes()
        .into_iter()
        .fold(empty, |record, change| service.edit(&record, change, today))
}

fn validation_error(errors: AccountingErrors) -> QuokkaError {
    QuokkaError::Validation(errors.to_string())
}
