//! Stations and their bookings, as served by the bookings API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::dates::{DateError, parse_date};

/// A rental station.
///
/// Identity is the `id`; two stations with the same id are the same station
/// even if the rest of the record differs between fetches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub id: String,
    pub name: String,
    /// Absent on the wire for some endpoints (name lookup, remote search).
    #[serde(default)]
    pub bookings: Vec<Booking>,
}

impl Station {
    /// Create a station with no bookings.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            bookings: Vec::new(),
        }
    }

    /// Attach bookings to this station.
    pub fn with_bookings(mut self, bookings: Vec<Booking>) -> Self {
        self.bookings = bookings;
        self
    }

    /// Find one of this station's bookings by id.
    pub fn booking(&self, booking_id: &str) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id == booking_id)
    }
}

/// A reservation at a station.
///
/// Dates are kept as the raw ISO-8601 strings the API sends; `start <= end`
/// is assumed, never checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    #[serde(default)]
    pub pickup_return_station_id: String,
    pub customer_name: String,
    pub start_date: String,
    pub end_date: String,
}

impl Booking {
    /// Parsed start instant.
    pub fn start(&self) -> Result<DateTime<Utc>, DateError> {
        parse_date(&self.start_date)
    }

    /// Parsed end instant.
    pub fn end(&self) -> Result<DateTime<Utc>, DateError> {
        parse_date(&self.end_date)
    }

    /// Whether the booking starts or ends on `day`.
    ///
    /// Days strictly between start and end do not count. A date that fails
    /// to parse never matches.
    pub fn touches(&self, day: NaiveDate) -> bool {
        let on_day = |d: Result<DateTime<Utc>, DateError>| d.is_ok_and(|d| d.date_naive() == day);
        on_day(self.start()) || on_day(self.end())
    }

    /// Length of stay in whole days, truncated toward zero.
    ///
    /// Negative when the end precedes the start.
    pub fn stay_days(&self) -> Result<i64, DateError> {
        Ok((self.end()? - self.start()?).num_days())
    }
}
