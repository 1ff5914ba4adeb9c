//! Audit logging for Quokka
//!
//! Every payload prepared for the backend and every change to local state
//! (settings, service catalog) is appended to `audit.log` as one JSON line.
//! This is the application's activity log; `quokka audit` prints it.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
