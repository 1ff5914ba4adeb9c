//! Display formatting for terminal output
//!
//! Human-readable text and tables for the CLI, plus JSON/YAML rendering of
//! API payloads for scripting.

pub mod accounting;
pub mod catalog;
pub mod logbook;

pub use accounting::{format_autofill_result, format_entry_details, format_field_errors};
pub use catalog::{format_catalog, format_settings};
pub use logbook::format_leg_table;

use clap::ValueEnum;
use serde::Serialize;

use crate::error::QuokkaResult;

/// Output format for commands that print API payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    Json,
    Yaml,
}

/// Render a serializable value as JSON or YAML
///
/// `Text` falls back to pretty JSON; callers print their own text view.
pub fn render_structured<T: Serialize + ?Sized>(
    value: &T,
    format: OutputFormat,
) -> QuokkaResult<String> {
    match format {
        OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
        OutputFormat::Json | OutputFormat::Text => Ok(serde_json::to_string_pretty(value)?),
    }
}
