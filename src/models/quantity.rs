//! Quantity arithmetic for billed amounts
//!
//! Amounts are `rust_decimal::Decimal` so granularity checks are exact:
//! `2.6 % 0.25` is a true remainder, not a floating-point approximation.
//! Hours are converted to whole minutes of a clock face; seconds never count.

use chrono::{Duration, NaiveTime, Timelike};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::fmt;

pub const MINUTES_PER_HOUR: i64 = 60;

/// Granularity every material amount must respect
pub const MATERIAL_AMOUNT_STEP: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Check whether `value` is an exact multiple of `unit`
///
/// A non-positive unit has no multiples.
pub fn is_multiple_of(value: Decimal, unit: Decimal) -> bool {
    if unit <= Decimal::ZERO {
        return false;
    }
    (value % unit).is_zero()
}

/// Minute of the day, ignoring seconds
pub fn minute_of_day(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * MINUTES_PER_HOUR + i64::from(time.minute())
}

/// Elapsed whole minutes from `start` to `end` on the same day (negative if `end` is earlier)
pub fn elapsed_minutes(start: NaiveTime, end: NaiveTime) -> i64 {
    minute_of_day(end) - minute_of_day(start)
}

/// A minimum amount unit in hours expressed in minutes (0.25 -> 15)
pub fn unit_minutes(min_amount_unit: Decimal) -> Decimal {
    min_amount_unit * Decimal::from(MINUTES_PER_HOUR)
}

/// Round `minutes` down to the nearest multiple of the unit
pub fn truncate_to_unit(minutes: i64, min_amount_unit: Decimal) -> Decimal {
    let minutes = Decimal::from(minutes);
    let step = unit_minutes(min_amount_unit);
    if step <= Decimal::ZERO {
        return minutes;
    }
    minutes - minutes % step
}

pub fn minutes_to_hours(minutes: Decimal) -> Decimal {
    (minutes / Decimal::from(MINUTES_PER_HOUR)).normalize()
}

/// The longest amount (hours) that fits between two times, in whole units
pub fn max_hours_between(start: NaiveTime, end: NaiveTime, min_amount_unit: Decimal) -> Decimal {
    minutes_to_hours(truncate_to_unit(
        elapsed_minutes(start, end),
        min_amount_unit,
    ))
}

/// Convert an amount of hours into a duration with millisecond precision
pub fn hours_to_duration(hours: Decimal) -> Option<Duration> {
    let millis = hours.checked_mul(Decimal::from(3_600_000))?.round().to_i64()?;
    Duration::try_milliseconds(millis)
}

/// Parse a quantity typed by a user
///
/// Accepts "2.5", "2,5", "  3 ". A comma is taken as the decimal separator.
pub fn parse_quantity(s: &str) -> Result<Decimal, QuantityParseError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(QuantityParseError::Empty);
    }
    let normalized = trimmed.replace(',', ".");
    normalized
        .parse::<Decimal>()
        .map_err(|_| QuantityParseError::InvalidFormat(trimmed.to_string()))
}

/// Error type for quantity parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantityParseError {
    Empty,
    InvalidFormat(String),
}

impl fmt::Display for QuantityParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Quantity is empty"),
            Self::InvalidFormat(s) => write!(f, "Invalid quantity format: '{}'", s),
        }
    }
}

impl std::error::Error for QuantityParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_material_step() {
        assert_eq!(MATERIAL_AMOUNT_STEP, d("0.01"));
    }

    #[test]
    fn test_is_multiple_of() {
        assert!(is_multiple_of(d("2.5"), d("0.25")));
        assert!(is_multiple_of(d("3"), d("0.25")));
        assert!(!is_multiple_of(d("2.6"), d("0.25")));
        assert!(is_multiple_of(d("1.23"), d("0.01")));
        assert!(!is_multiple_of(d("1.234"), d("0.01")));
        assert!(!is_multiple_of(d("1"), Decimal::ZERO));
    }

    #[test]
    fn test_elapsed_minutes_ignores_seconds() {
        let start = NaiveTime::from_hms_opt(8, 0, 59).unwrap();
        let end = NaiveTime::from_hms_opt(10, 40, 1).unwrap();
        assert_eq!(elapsed_minutes(start, end), 160);
        assert_eq!(elapsed_minutes(end, start), -160);
    }

    #[test]
    fn test_truncate_to_unit() {
        assert_eq!(truncate_to_unit(160, d("0.25")), d("150"));
        assert_eq!(truncate_to_unit(150, d("0.25")), d("150"));
        assert_eq!(truncate_to_unit(10, d("0.25")), Decimal::ZERO);
        assert_eq!(truncate_to_unit(10, Decimal::ZERO), d("10"));
    }

    #[test]
    fn test_max_hours_between() {
        assert_eq!(max_hours_between(t(8, 0), t(10, 40), d("0.25")), d("2.5"));
        assert_eq!(max_hours_between(t(8, 0), t(10, 40), d("1")), d("2"));
        assert_eq!(max_hours_between(t(8, 0), t(8, 10), d("0.25")), Decimal::ZERO);
    }

    #[test]
    fn test_hours_to_duration() {
        assert_eq!(hours_to_duration(d("2.5")), Some(Duration::minutes(150)));
        assert_eq!(hours_to_duration(d("0.01")), Some(Duration::seconds(36)));
        assert_eq!(hours_to_duration(Decimal::MAX), None);
        assert_eq!(hours_to_duration(d("-2562047788015.216")), None);
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("2.5").unwrap(), d("2.5"));
        assert_eq!(parse_quantity(" 2,75 ").unwrap(), d("2.75"));
        assert_eq!(parse_quantity(""), Err(QuantityParseError::Empty));
        assert!(matches!(
            parse_quantity("two"),
            Err(QuantityParseError::InvalidFormat(_))
        ));
    }
}
