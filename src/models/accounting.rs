//! Accounting record models
//!
//! A service record is what the user fills in when booking work or material
//! against a project: the day the service was provided, optionally the clock
//! times it started and ended (hourly-based services only), and the billed
//! amount. `ServiceRecord` is the editable form state where any field may
//! still be blank; `AccountingEntry` is a record that passed validation.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::field_errors::{FieldErrors, FormField};
use super::ids::{ProjectId, ServiceId};

/// Fields of the accounting form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AccountingField {
    ServiceId,
    ProjectId,
    ProvidedOn,
    StartedAt,
    EndedAt,
    Amount,
    Comment,
}

impl FormField for AccountingField {
    fn api_name(&self) -> &'static str {
        match self {
            Self::ServiceId => "service_id",
            Self::ProjectId => "project_id",
            Self::ProvidedOn => "service_provided_on",
            Self::StartedAt => "service_provided_started_at",
            Self::EndedAt => "service_provided_ended_at",
            Self::Amount => "amount",
            Self::Comment => "comment",
        }
    }

    fn from_api_name(name: &str) -> Option<Self> {
        match name {
            "service_id" => Some(Self::ServiceId),
            "project_id" => Some(Self::ProjectId),
            "service_provided_on" => Some(Self::ProvidedOn),
            "service_provided_started_at" => Some(Self::StartedAt),
            "service_provided_ended_at" => Some(Self::EndedAt),
            "amount" => Some(Self::Amount),
            "comment" => Some(Self::Comment),
            _ => None,
        }
    }
}

impl fmt::Display for AccountingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.api_name())
    }
}

pub type AccountingErrors = FieldErrors<AccountingField>;

/// The three fields autofill reconciles: start, end and amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeFields {
    pub started_at: Option<NaiveTime>,
    pub ended_at: Option<NaiveTime>,
    /// Hours for hourly-based services
    pub amount: Option<Decimal>,
}

impl TimeFields {
    pub fn new(
        started_at: Option<NaiveTime>,
        ended_at: Option<NaiveTime>,
        amount: Option<Decimal>,
    ) -> Self {
        Self {
            started_at,
            ended_at,
            amount,
        }
    }

    /// How many of the three fields are blank
    pub fn missing_count(&self) -> usize {
        [
            self.started_at.is_none(),
            self.ended_at.is_none(),
            self.amount.is_none(),
        ]
        .iter()
        .filter(|missing| **missing)
        .count()
    }
}

/// Editable accounting form state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub service_id: Option<ServiceId>,
    pub project_id: Option<ProjectId>,

    /// Calendar day the service was rendered
    pub provided_on: NaiveDate,

    pub started_at: Option<NaiveTime>,
    pub ended_at: Option<NaiveTime>,

    /// Billed quantity; hours for wage services, free unit for material
    pub amount: Option<Decimal>,

    #[serde(default)]
    pub comment: Option<String>,
}

impl ServiceRecord {
    /// Create an empty record for the given day
    pub fn new(provided_on: NaiveDate) -> Self {
        Self {
            service_id: None,
            project_id: None,
            provided_on,
            started_at: None,
            ended_at: None,
            amount: None,
            comment: None,
        }
    }

    pub fn time_fields(&self) -> TimeFields {
        TimeFields::new(self.started_at, self.ended_at, self.amount)
    }

    pub fn with_time_fields(mut self, fields: TimeFields) -> Self {
        self.started_at = fields.started_at;
        self.ended_at = fields.ended_at;
        self.amount = fields.amount;
        self
    }

    /// Check if both clock times are filled in
    pub fn has_times(&self) -> bool {
        self.started_at.is_some() && self.ended_at.is_some()
    }
}

/// A single user edit of the accounting form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountingChange {
    Service(ServiceId),
    Project(Option<ProjectId>),
    ProvidedOn(NaiveDate),
    StartedAt(Option<NaiveTime>),
    EndedAt(Option<NaiveTime>),
    Amount(Option<Decimal>),
    Comment(Option<String>),
}

impl AccountingChange {
    /// Edits of the clock times make the form recompute the remaining field
    pub fn triggers_autofill(&self) -> bool {
        matches!(self, Self::StartedAt(_) | Self::EndedAt(_))
    }
}

/// An accounting record that passed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountingEntry {
    pub service_id: ServiceId,
    pub project_id: ProjectId,
    pub provided_on: NaiveDate,
    pub started_at: Option<NaiveTime>,
    pub ended_at: Option<NaiveTime>,
    pub amount: Decimal,
    pub comment: Option<String>,
}

impl fmt::Display for AccountingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.provided_on.format("%Y-%m-%d"), self.service_id)?;
        if let (Some(start), Some(end)) = (self.started_at, self.ended_at) {
            write!(f, " {}-{}", start.format("%H:%M"), end.format("%H:%M"))?;
        }
        write!(f, " x{}", self.amount)
    }
}
