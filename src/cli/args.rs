//! Value parsers shared by the CLI commands

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use crate::api::{parse_api_date, parse_api_time};
use crate::models::quantity::parse_quantity;

/// Parse a `YYYY-MM-DD` argument
pub fn date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_api_date(s).map_err(|e| e.to_string())
}

/// Parse an `HH:MM` argument
pub fn time_arg(s: &str) -> Result<NaiveTime, String> {
    parse_api_time(s).map_err(|e| e.to_string())
}

/// Parse a decimal quantity, accepting a comma as decimal separator
pub fn quantity_arg(s: &str) -> Result<Decimal, String> {
    parse_quantity(s).map_err(|e| e.to_string())
}
