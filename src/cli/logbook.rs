//! Logbook CLI commands

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand};

use super::args::date_arg;
use crate::api::{local_today, parse_server_errors, LogbookPayload};
use crate::audit::{AuditEntry, EntityType};
use crate::config::Settings;
use crate::display::{format_field_errors, format_leg_table, render_structured, OutputFormat};
use crate::error::{QuokkaError, QuokkaResult};
use crate::models::{LogbookField, ProjectId, TripLeg, VehicleId};
use crate::services::{split_return_trip, LogbookService};
use crate::storage::Storage;

/// Values of a logbook form
#[derive(Args, Debug)]
pub struct TripArgs {
    /// Vehicle ID (e.g. 3 or veh-3)
    #[arg(long)]
    pub vehicle: VehicleId,

    #[arg(long)]
    pub project: Option<ProjectId>,

    /// Day of the trip (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = date_arg)]
    pub on: Option<NaiveDate>,

    /// Odometer reading at departure
    #[arg(long, allow_negative_numbers = true)]
    pub start_km: i64,

    /// Odometer reading at arrival
    #[arg(long, allow_negative_numbers = true)]
    pub end_km: i64,

    /// Driven distance; derived from the odometer readings when omitted
    #[arg(long, allow_negative_numbers = true)]
    pub driven_km: Option<i64>,

    #[arg(long)]
    pub origin: String,

    #[arg(long)]
    pub destination: String,

    /// Litres refuelled during the trip
    #[arg(long, allow_negative_numbers = true)]
    pub litres: Option<i64>,

    #[arg(long)]
    pub comment: Option<String>,
}

impl TripArgs {
    fn into_leg(self, today: NaiveDate) -> TripLeg {
        let mut leg = TripLeg::new(
            self.vehicle,
            self.on.unwrap_or(today),
            self.start_km,
            self.end_km,
            self.origin,
            self.destination,
        );
        if let Some(driven) = self.driven_km {
            leg.driven_kilometres = driven;
        }
        leg.project_id = self.project;
        leg.litres_refuelled = self.litres;
        leg.comment = self.comment.filter(|c| !c.trim().is_empty());
        leg
    }
}

/// Logbook subcommands
#[derive(Subcommand)]
pub enum LogbookCommands {
    /// Split a return trip into its outbound and inbound legs
    Split(TripArgs),
    /// Validate a trip and print the request bodies for the backend
    Prepare {
        #[command(flatten)]
        trip: TripArgs,
        /// Log the trip as a return trip (two legs)
        #[arg(long)]
        return_trip: bool,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Map a backend validation response onto the logbook fields
    ServerErrors {
        /// File containing the response body
        file: PathBuf,
    },
}

/// Handle a logbook command
pub fn handle_logbook_command(
    storage: &Storage,
    settings: &Settings,
    cmd: LogbookCommands,
) -> QuokkaResult<()> {
    let today = local_today(settings.timezone());

    match cmd {
        LogbookCommands::Split(args) => {
            let trip = split_return_trip(&args.into_leg(today));
            print!("{}", format_leg_table(&trip.into_legs()));
        }

        LogbookCommands::Prepare {
            trip,
            return_trip,
            format,
        } => {
            let leg = trip.into_leg(today);
            let legs = LogbookService::new()
                .prepare(&leg, return_trip)
                .map_err(|errors| QuokkaError::Validation(errors.to_string()))?;

            let payloads: Vec<LogbookPayload> = legs.iter().map(LogbookPayload::from).collect();
            let entries = legs
                .iter()
                .zip(&payloads)
                .map(|(leg, payload)| {
                    AuditEntry::create(
                        EntityType::LogbookEntry,
                        leg.vehicle_id.to_string(),
                        Some(leg.to_string()),
                        payload,
                    )
                })
                .collect();
            storage.log_create_batch(entries)?;

            match format {
                OutputFormat::Text => {
                    let noun = if legs.len() == 1 { "entry" } else { "entries" };
                    println!("Prepared {} logbook {}:", legs.len(), noun);
                    print!("{}", format_leg_table(&legs));
                }
                _ => println!("{}", render_structured(&payloads, format)?),
            }
        }

        LogbookCommands::ServerErrors { file } => {
            let body = std::fs::read_to_string(&file).map_err(|e| {
                QuokkaError::Io(format!("Failed to read {}: {}", file.display(), e))
            })?;
            let errors = parse_server_errors::<LogbookField>(&body)?;

            if errors.is_empty() {
                println!("No field errors in response.");
            } else {
                println!("Server rejected the trip:");
                print!("{}", format_field_errors(&errors));
            }
        }
    }

    Ok(())
}
