//! Service layer for Quokka
//!
//! The service layer holds the business rules: keeping accounting records
//! consistent and turning logged trips into submittable legs. Nothing here
//! performs I/O.

pub mod accounting;
pub mod logbook;

pub use accounting::{
    apply_change, autofill_missing_field, validate_record, AccountingService, ValidationMode,
};
pub use logbook::{split_return_trip, LogbookService, ReturnTrip};
