//! Date handling for bookings and the week calendar.
//!
//! The bookings API sends ISO-8601 strings. Everything is compared in UTC so
//! a booking lands on the same calendar day regardless of the server's zone.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc, Weekday};

/// Error returned when a booking date cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date {input:?}: expected RFC 3339 timestamp or YYYY-MM-DD")]
pub struct DateError {
    input: String,
}

/// First day of the week. Fixed, not configurable.
pub const WEEK_START: Weekday = Weekday::Sun;

/// Parse an ISO-8601 timestamp or bare date into a UTC instant.
///
/// # Examples
///
/// ```
/// use booking_lookup::domain::parse_date;
///
/// let at = parse_date("2024-06-17T00:00:00.000Z").unwrap();
/// assert_eq!(at.to_rfc3339(), "2024-06-17T00:00:00+00:00");
///
/// // Bare dates are midnight UTC
/// assert_eq!(parse_date("2024-06-17").unwrap(), at);
///
/// assert!(parse_date("17.06.2024").is_err());
/// ```
pub fn parse_date(s: &str) -> Result<DateTime<Utc>, DateError> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| DateError {
            input: s.to_string(),
        })
}

/// The start of the week containing `day`.
pub fn start_of_week(day: NaiveDate) -> NaiveDate {
    day.week(WEEK_START).first_day()
}

/// `day` shifted by a whole number of weeks, in either direction.
pub fn add_weeks(day: NaiveDate, weeks: i64) -> NaiveDate {
    let days = Days::new(weeks.unsigned_abs() * 7);
    let shifted = if weeks >= 0 {
        day.checked_add_days(days)
    } else {
        day.checked_sub_days(days)
    };
    // Only fails at the edge of chrono's representable range.
    shifted.unwrap_or(day)
}

/// Label for a calendar day cell, e.g. `17.06`.
pub fn format_day_label(day: NaiveDate) -> String {
    day.format("%d.%m").to_string()
}

/// Display format for booking dates, e.g. `01/10/2024`.
pub fn format_date(at: DateTime<Utc>) -> String {
    at.format("%m/%d/%Y").to_string()
}
