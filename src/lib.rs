//! Quokka - accounting reconciliation and logbook trip splitting
//!
//! This library holds the client-side rules of the Quokka field app: the
//! autofill that keeps start time, end time and amount of an accounting
//! entry consistent, the validation run before an entry is submitted, and
//! the splitting of a return trip into two logbook legs.
//!
//! # Architecture
//!
//! - `config`: Paths and user settings
//! - `error`: Custom error types
//! - `models`: Records, ids, quantities and field-keyed errors
//! - `services`: Autofill, validation and trip splitting
//! - `api`: Request payloads, API date/time formatting, server error mapping
//! - `storage`: JSON file storage for the cached service catalog
//! - `audit`: Append-only activity log
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `quokka` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use quokka::config::Settings;
//! use quokka::models::{ServiceCatalog, TimeFields};
//! use quokka::services::AccountingService;
//!
//! let settings = Settings::default();
//! let catalog = ServiceCatalog::new();
//! let service = AccountingService::new(&catalog, &settings);
//! let filled = service.autofill(TimeFields::new(Some(start), Some(end), None), today);
//! ```

pub mod api;
pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::QuokkaError;
