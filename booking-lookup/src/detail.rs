//! Booking detail view.
//!
//! Mounting the view issues two independent fetches: the booking itself and
//! the display name of its station. The booking gates the main content. The
//! name lands in a slot shared by every copy of the view whenever it
//! arrives; until then (or if it never does) its cell is blank.

use std::pin::pin;
use std::sync::{Arc, OnceLock};

use futures::future::{self, Either};

use crate::domain::{Booking, format_date};
use crate::gateway::{StationGateway, fetch_booking_details, fetch_station_name};
use crate::store::SelectionStore;

/// Placeholder shown until the booking has been fetched.
pub const LOADING: &str = "Loading";

/// Local state of a mounted booking detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDetail {
    station_id: Option<String>,
    booking_id: String,
    booking: Option<Booking>,
    station_name: Arc<OnceLock<String>>,
}

impl BookingDetail {
    /// Mount the view for a booking and fetch its data.
    ///
    /// Returns once the booking fetch settles. A name lookup still in flight
    /// at that point keeps running in the background and fills the name slot
    /// when it completes.
    ///
    /// Without a station id there is nothing to fetch and the view stays in
    /// its loading state.
    pub async fn load<G: StationGateway>(
        gateway: &Arc<G>,
        station_id: Option<&str>,
        booking_id: &str,
    ) -> Self {
        let station_name = Arc::new(OnceLock::new());
        let booking = match station_id {
            Some(station_id) => {
                let name = Box::pin(fill_station_name(
                    Arc::clone(gateway),
                    station_id.to_string(),
                    Arc::clone(&station_name),
                ));
                let booking = pin!(fetch_booking_details(gateway.as_ref(), station_id, booking_id));

                match future::select(name, booking).await {
                    Either::Left(((), booking)) => booking.await,
                    Either::Right((booking, name)) => {
                        tracing::debug!(station_id, "station name still loading");
                        tokio::spawn(name);
                        booking
                    }
                }
            }
            None => {
                tracing::warn!(booking_id, "booking selected without a station");
                None
            }
        };

        Self {
            station_id: station_id.map(str::to_string),
            booking_id: booking_id.to_string(),
            booking,
            station_name,
        }
    }

    /// Whether this view was mounted for the given ids.
    pub fn is_for(&self, station_id: Option<&str>, booking_id: &str) -> bool {
        self.station_id.as_deref() == station_id && self.booking_id == booking_id
    }

    pub fn booking_id(&self) -> &str {
        &self.booking_id
    }

    pub fn station_id(&self) -> Option<&str> {
        self.station_id.as_deref()
    }

    /// The station's display name, once its lookup has succeeded.
    pub fn station_name(&self) -> Option<&str> {
        self.station_name.get().map(String::as_str)
    }

    /// Whether the booking is still missing.
    pub fn is_loading(&self) -> bool {
        self.booking.is_none()
    }

    /// Display fields, or `None` while loading.
    pub fn fields(&self) -> Option<BookingFields> {
        let booking = self.booking.as_ref()?;
        Some(BookingFields::new(booking, self.station_name()))
    }

    /// The "Back" action: deselect the booking, keep the station.
    pub fn back(store: &SelectionStore) {
        store.clear_selected_booking_id();
    }
}

async fn fill_station_name<G: StationGateway>(
    gateway: Arc<G>,
    station_id: String,
    slot: Arc<OnceLock<String>>,
) {
    if let Some(name) = fetch_station_name(gateway.as_ref(), &station_id).await {
        let _ = slot.set(name);
    }
}

/// Formatted booking fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingFields {
    pub customer_name: String,
    pub start_date: String,
    pub end_date: String,
    /// Whole days between start and end; empty if a date is unreadable.
    pub duration_days: String,
    /// Empty until the name lookup succeeds.
    pub station_name: String,
}

impl BookingFields {
    fn new(booking: &Booking, station_name: Option<&str>) -> Self {
        let start_date = booking
            .start()
            .map(format_date)
            .unwrap_or_else(|_| booking.start_date.clone());
        let end_date = booking
            .end()
            .map(format_date)
            .unwrap_or_else(|_| booking.end_date.clone());
        let duration_days = booking
            .stay_days()
            .map(|d| d.to_string())
            .unwrap_or_default();

        Self {
            customer_name: booking.customer_name.clone(),
            start_date,
            end_date,
            duration_days,
            station_name: station_name.unwrap_or_default().to_string(),
        }
    }
}
