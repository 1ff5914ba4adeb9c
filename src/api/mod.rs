//! Backend API boundary
//!
//! The core never talks to the network. This module only shapes values for
//! the backend (request bodies, API date/time strings) and reads its
//! validation responses back into field errors.

pub mod datetime;
pub mod payload;
pub mod server_errors;

pub use datetime::{api_date, api_time, local_today, parse_api_date, parse_api_time};
pub use payload::{AccountingPayload, LogbookPayload};
pub use server_errors::parse_server_errors;
