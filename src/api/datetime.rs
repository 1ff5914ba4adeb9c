//! Date and time formatting for API request bodies
//!
//! The backend expects dates as `YYYY-MM-DD` and times as `HH:MM`, both as
//! wall-clock values in the user's timezone. An instant is first moved to
//! the configured offset and only then formatted, so a late-evening instant
//! never lands on the next UTC day.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::error::{QuokkaError, QuokkaResult};

pub const API_DATE_FORMAT: &str = "%Y-%m-%d";
pub const API_TIME_FORMAT: &str = "%H:%M";

/// Wall-clock reading of `instant` at `offset`
pub fn correct_timezone_offset<Tz: TimeZone>(
    instant: &DateTime<Tz>,
    offset: FixedOffset,
) -> NaiveDateTime {
    instant.with_timezone(&offset).naive_local()
}

/// Calendar date of `instant` at `offset`, formatted for the API
pub fn api_date<Tz: TimeZone>(instant: &DateTime<Tz>, offset: FixedOffset) -> String {
    format_api_date(correct_timezone_offset(instant, offset).date())
}

/// Clock time of `instant` at `offset`, formatted for the API
pub fn api_time<Tz: TimeZone>(instant: &DateTime<Tz>, offset: FixedOffset) -> String {
    format_api_time(correct_timezone_offset(instant, offset).time())
}

pub fn format_api_date(date: NaiveDate) -> String {
    date.format(API_DATE_FORMAT).to_string()
}

pub fn format_api_time(time: NaiveTime) -> String {
    time.format(API_TIME_FORMAT).to_string()
}

/// Today's calendar date at `offset`
pub fn local_today(offset: FixedOffset) -> NaiveDate {
    correct_timezone_offset(&Utc::now(), offset).date()
}

/// Midnight of a calendar date at `offset`
pub fn start_of_day(date: NaiveDate, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    offset
        .from_local_datetime(&date.and_hms_opt(0, 0, 0)?)
        .single()
}

/// Parse an API date (`YYYY-MM-DD`)
pub fn parse_api_date(s: &str) -> QuokkaResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), API_DATE_FORMAT).map_err(|_| {
        QuokkaError::Parse(format!("Invalid date format: '{}'. Use YYYY-MM-DD", s))
    })
}

/// Parse an API time (`HH:MM`, seconds are accepted and kept)
pub fn parse_api_time(s: &str) -> QuokkaResult<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, API_TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| QuokkaError::Parse(format!("Invalid time format: '{}'. Use HH:MM", s)))
}
