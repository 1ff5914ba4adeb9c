//! Errors raised by the storage, config and CLI layers
//!
//! Record validation does not go through this type: rule failures are returned
//! as [`crate::models::FieldErrors`] so callers can attach them to form fields.

use thiserror::Error;

/// Failure of a Quokka command outside the form rules
#[derive(Error, Debug)]
pub enum QuokkaError {
    /// Unreadable or invalid settings
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),

    /// A body or file that does not encode or decode
    #[error("JSON error: {0}")]
    Json(String),

    /// User input that could not be parsed (dates, times, amounts, ids)
    #[error("Parse error: {0}")]
    Parse(String),

    /// A record failed validation; the message lists the failing fields
    #[error("Validation error: {0}")]
    Validation(String),

    /// Lookup by id that found nothing
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// The cached catalog could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),
}

impl QuokkaError {
    /// A service id the catalog does not know
    pub fn service_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Service",
            identifier: identifier.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for QuokkaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for QuokkaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for QuokkaError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Json(format!("YAML: {}", err))
    }
}

pub type QuokkaResult<T> = Result<T, QuokkaError>;
