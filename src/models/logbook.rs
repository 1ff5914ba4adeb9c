//! Logbook trip model
//!
//! One logbook entry records a single drive of a vehicle: odometer readings
//! at start and end, the driven distance, where the trip began and ended.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::field_errors::{FieldErrors, FormField};
use super::ids::{ProjectId, VehicleId};

/// Fields of the logbook form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogbookField {
    VehicleId,
    ProjectId,
    DrivenOn,
    StartKilometres,
    EndKilometres,
    DrivenKilometres,
    LitresRefuelled,
    Origin,
    Destination,
    Comment,
}

impl FormField for LogbookField {
    fn api_name(&self) -> &'static str {
        match self {
            Self::VehicleId => "vehicle_id",
            Self::ProjectId => "project_id",
            Self::DrivenOn => "driven_on",
            Self::StartKilometres => "start_kilometres",
            Self::EndKilometres => "end_kilometres",
            Self::DrivenKilometres => "driven_kilometres",
            Self::LitresRefuelled => "litres_refuelled",
            Self::Origin => "origin",
            Self::Destination => "destination",
            Self::Comment => "comment",
        }
    }

    fn from_api_name(name: &str) -> Option<Self> {
        match name {
            "vehicle_id" => Some(Self::VehicleId),
            "project_id" => Some(Self::ProjectId),
            "driven_on" => Some(Self::DrivenOn),
            "start_kilometres" => Some(Self::StartKilometres),
            "end_kilometres" => Some(Self::EndKilometres),
            "driven_kilometres" => Some(Self::DrivenKilometres),
            "litres_refuelled" => Some(Self::LitresRefuelled),
            "origin" => Some(Self::Origin),
            "destination" => Some(Self::Destination),
            "comment" => Some(Self::Comment),
            _ => None,
        }
    }
}

pub type LogbookErrors = FieldErrors<LogbookField>;

/// A single logged drive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripLeg {
    pub vehicle_id: VehicleId,
    pub project_id: Option<ProjectId>,
    pub driven_on: NaiveDate,

    /// Odometer reading when the trip started
    pub start_kilometres: i64,
    /// Odometer reading when the trip ended
    pub end_kilometres: i64,
    /// Always `end_kilometres - start_kilometres` for a valid leg
    pub driven_kilometres: i64,

    pub origin: String,
    pub destination: String,

    #[serde(default)]
    pub litres_refuelled: Option<i64>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl TripLeg {
    /// Create a leg whose driven distance is derived from the odometer readings
    ///
    /// Readings too far apart for an `i64` saturate the distance, which
    /// [`TripLeg::validate`] then reports as inconsistent.
    pub fn new(
        vehicle_id: VehicleId,
        driven_on: NaiveDate,
        start_kilometres: i64,
        end_kilometres: i64,
        origin: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            vehicle_id,
            project_id: None,
            driven_on,
            start_kilometres,
            end_kilometres,
            driven_kilometres: end_kilometres.saturating_sub(start_kilometres),
            origin: origin.into(),
            destination: destination.into(),
            litres_refuelled: None,
            comment: None,
        }
    }

    /// Check the odometer readings agree with the driven distance
    pub fn is_consistent(&self) -> bool {
        self.end_kilometres.checked_sub(self.start_kilometres) == Some(self.driven_kilometres)
    }

    /// Validate the leg before it is submitted
    pub fn validate(&self) -> Result<(), LogbookErrors> {
        let mut errors = LogbookErrors::new();

        if self.start_kilometres < 0 {
            errors.add(
                LogbookField::StartKilometres,
                "Start kilometres must not be negative",
            );
        }
        if self.end_kilometres <= 0 {
            errors.add(LogbookField::EndKilometres, "End kilometres must be positive");
        }
        if self.driven_kilometres <= 0 {
            errors.add(
                LogbookField::DrivenKilometres,
                "Driven kilometres must be positive",
            );
        }
        if matches!(self.litres_refuelled, Some(litres) if litres <= 0) {
            errors.add(
                LogbookField::LitresRefuelled,
                "Litres refuelled must be positive",
            );
        }
        if self.origin.trim().is_empty() {
            errors.add(LogbookField::Origin, "Origin is required");
        }
        if self.destination.trim().is_empty() {
            errors.add(LogbookField::Destination, "Destination is required");
        }

        if self.start_kilometres >= self.end_kilometres {
            errors.add(
                LogbookField::StartKilometres,
                "Start kilometres must be less than end kilometres",
            );
            errors.add(
                LogbookField::EndKilometres,
                "End kilometres must be greater than start kilometres",
            );
        }

        if !self.is_consistent() {
            errors.add(
                LogbookField::StartKilometres,
                "Start kilometres must equal end kilometres minus driven kilometres",
            );
            errors.add(
                LogbookField::EndKilometres,
                "End kilometres must equal start kilometres plus driven kilometres",
            );
            errors.add(
                LogbookField::DrivenKilometres,
                "Driven kilometres must equal end kilometres minus start kilometres",
            );
        }

        errors.into_result(())
    }
}

impl fmt::Display for TripLeg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {} ({} km, {} -> {})",
            self.driven_on.format("%Y-%m-%d"),
            self.origin,
            self.destination,
            self.driven_kilometres,
            self.start_kilometres,
            self.end_kilometres
        )
    }
}
