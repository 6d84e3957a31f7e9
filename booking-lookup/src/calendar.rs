//! Week calendar with a booking overlay.
//!
//! Shows seven consecutive days starting at a week start. The window moves
//! only by whole weeks, through [`WeekCalendar::next`] and
//! [`WeekCalendar::previous`]; selection changes never move it.

use chrono::NaiveDate;

use crate::domain::{Booking, add_weeks, start_of_week};
use crate::store::SelectionStore;

/// Number of days shown.
pub const DAYS_PER_WEEK: usize = 7;

/// Local state of a mounted week calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekCalendar {
    week_start: NaiveDate,
}

impl WeekCalendar {
    /// A calendar showing the week containing `today`.
    pub fn starting_at(today: NaiveDate) -> Self {
        Self {
            week_start: start_of_week(today),
        }
    }

    /// First day of the window.
    pub fn week_start(&self) -> NaiveDate {
        self.week_start
    }

    /// Move the window one week forward.
    pub fn next(&mut self) {
        self.week_start = add_weeks(self.week_start, 1);
        tracing::debug!(week_start = %self.week_start, "next week");
    }

    /// Move the window one week back.
    pub fn previous(&mut self) {
        self.week_start = add_weeks(self.week_start, -1);
        tracing::debug!(week_start = %self.week_start, "previous week");
    }

    /// The seven days of the window, ascending.
    pub fn days(&self) -> Vec<NaiveDate> {
        self.week_start.iter_days().take(DAYS_PER_WEEK).collect()
    }

    /// Each day of the window with the bookings that start or end on it.
    pub fn overlay<'a>(&self, bookings: &'a [Booking]) -> Vec<(NaiveDate, Vec<&'a Booking>)> {
        self.days()
            .into_iter()
            .map(|day| (day, bookings_on(bookings, day)))
            .collect()
    }

    /// Activate a booking marker.
    pub fn activate(&self, booking_id: impl Into<String>, store: &SelectionStore) {
        store.set_selected_booking_id(booking_id);
    }
}

/// Bookings that start or end on `day`.
///
/// Days strictly inside a booking are not matched.
pub fn bookings_on(bookings: &[Booking], day: NaiveDate) -> Vec<&Booking> {
    bookings.iter().filter(|b| b.touches(day)).collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::Datelike;
    use proptest::prelude::*;

    /// Any date within a few centuries of now.
    fn any_date() -> impl Strategy<Value = NaiveDate> {
        (-80_000i64..80_000).prop_map(|offset| {
            let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
            base + chrono::Duration::days(offset)
        })
    }

    proptest! {
        /// next() then previous() returns to the original window.
        #[test]
        fn next_previous_roundtrip(today in any_date()) {
            let mut calendar = WeekCalendar::starting_at(today);
            let original = calendar.week_start();
            calendar.next();
            calendar.previous();
            prop_assert_eq!(calendar.week_start(), original);
        }

        /// The window is always seven days, one day apart, starting on the week start.
        #[test]
        fn days_contiguous(today in any_date(), moves in proptest::collection::vec(any::<bool>(), 0..10)) {
            let mut calendar = WeekCalendar::starting_at(today);
            for forward in moves {
                if forward { calendar.next() } else { calendar.previous() }
            }
            let days = calendar.days();
            prop_assert_eq!(days.len(), DAYS_PER_WEEK);
            prop_assert_eq!(days[0], calendar.week_start());
            prop_assert_eq!(days[0].weekday(), crate::domain::WEEK_START);
            for pair in days.windows(2) {
                prop_assert_eq!((pair[1] - pair[0]).num_days(), 1);
            }
        }

        /// The window always contains the day it was anchored to.
        #[test]
        fn window_contains_today(today in any_date()) {
            let calendar = WeekCalendar::starting_at(today);
            prop_assert!(calendar.days().contains(&today));
        }
    }
}
