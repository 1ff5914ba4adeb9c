//! Core data models for Quokka
//!
//! This module contains the value records the reconciliation and splitting
//! logic works on: service records, trip legs, the service catalog, and the
//! field-keyed validation errors they produce.

pub mod accounting;
pub mod field_errors;
pub mod ids;
pub mod logbook;
pub mod quantity;
pub mod service;

pub use accounting::{
    AccountingChange, AccountingEntry, AccountingErrors, AccountingField, ServiceRecord,
    TimeFields,
};
pub use field_errors::{FieldErrors, FormField};
pub use ids::{ProjectId, ServiceId, VehicleId};
pub use logbook::{LogbookErrors, LogbookField, TripLeg};
pub use service::{ServiceCatalog, ServiceType, ServiceTypeEntry};
