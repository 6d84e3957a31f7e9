//! Domain types for the booking lookup.
//!
//! Stations and bookings mirror the remote API's records; the date helpers
//! fix the conventions the calendar and detail views share (UTC comparison,
//! Sunday week start, display formats).

mod booking;
mod dates;

pub use booking::{Booking, Station};
pub use dates::{
    DateError, WEEK_START, add_weeks, format_date, format_day_label, parse_date, start_of_week,
};
