//! Request bodies for the backend
//!
//! Validated records are serialized into the shapes the backend's create
//! endpoints accept. Dates and times are rendered as API strings; the
//! amount goes out as a JSON number.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::datetime::{format_api_date, format_api_time};
use crate::models::{AccountingEntry, ProjectId, ServiceId, TripLeg, VehicleId};

/// Body of a create/update request for an accounting entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountingPayload {
    pub service_provided_on: String,
    pub service_provided_started_at: Option<String>,
    pub service_provided_ended_at: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub comment: Option<String>,
    pub project_id: ProjectId,
    pub service_id: ServiceId,
}

impl From<&AccountingEntry> for AccountingPayload {
    fn from(entry: &AccountingEntry) -> Self {
        Self {
            service_provided_on: format_api_date(entry.provided_on),
            service_provided_started_at: entry.started_at.map(format_api_time),
            service_provided_ended_at: entry.ended_at.map(format_api_time),
            amount: entry.amount.normalize(),
            comment: entry.comment.clone(),
            project_id: entry.project_id,
            service_id: entry.service_id,
        }
    }
}

/// Body of a create/update request for a logbook entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogbookPayload {
    pub vehicle_id: VehicleId,
    pub driven_on: String,
    pub start_kilometres: i64,
    pub end_kilometres: i64,
    pub driven_kilometres: i64,
    pub litres_refuelled: Option<i64>,
    pub origin: String,
    pub destination: String,
    pub project_id: Option<ProjectId>,
    pub comment: Option<String>,
}

impl From<&TripLeg> for LogbookPayload {
    fn from(leg: &TripLeg) -> Self {
        Self {
            vehicle_id: leg.vehicle_id,
            driven_on: format_api_date(leg.driven_on),
            start_kilometres: leg.start_kilometres,
            end_kilometres: leg.end_kilometres,
            driven_kilometres: leg.driven_kilometres,
            litres_refuelled: leg.litres_refuelled,
            origin: leg.origin.clone(),
            destination: leg.destination.clone(),
            project_id: leg.project_id,
            comment: leg.comment.clone(),
        }
    }
}
