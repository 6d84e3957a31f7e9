//! Shared selection state.
//!
//! The store holds what the views coordinate on: the station list, the
//! selected station and the selected booking. Mutations replace state
//! wholesale (last write wins) and are visible to every reader and
//! subscriber as soon as the call returns.

use tokio::sync::watch;

use crate::domain::Station;

/// Snapshot of the selection state.
///
/// `selected_booking_id` only means something while `selected_station` is
/// set; nothing enforces that structurally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// All stations, in server order.
    pub stations: Vec<Station>,
    pub selected_station: Option<Station>,
    pub selected_booking_id: Option<String>,
}

impl Selection {
    /// Bookings of the selected station, empty when nothing is selected.
    pub fn selected_bookings(&self) -> &[crate::domain::Booking] {
        self.selected_station
            .as_ref()
            .map(|s| s.bookings.as_slice())
            .unwrap_or_default()
    }

    /// Name of the selected station, if any.
    pub fn selected_station_name(&self) -> Option<&str> {
        self.selected_station.as_ref().map(|s| s.name.as_str())
    }
}

/// Selection store with change notification.
///
/// Instances are independent; create one per session (or per test).
#[derive(Debug)]
pub struct SelectionStore {
    state: watch::Sender<Selection>,
}

impl SelectionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        let (state, _) = watch::channel(Selection::default());
        Self { state }
    }

    /// Current state.
    pub fn snapshot(&self) -> Selection {
        self.state.borrow().clone()
    }

    /// Read the current state without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&Selection) -> R) -> R {
        f(&self.state.borrow())
    }

    /// Receiver notified after every mutation.
    pub fn subscribe(&self) -> watch::Receiver<Selection> {
        self.state.subscribe()
    }

    /// Replace the station list.
    pub fn set_stations(&self, stations: Vec<Station>) {
        tracing::debug!(count = stations.len(), "set stations");
        self.state.send_modify(|s| s.stations = stations);
    }

    /// Select a station.
    pub fn set_selected_station(&self, station: Station) {
        tracing::debug!(station_id = %station.id, "select station");
        self.state.send_modify(|s| s.selected_station = Some(station));
    }

    /// Clear the selected station.
    pub fn clear_selected_station(&self) {
        tracing::debug!("clear selected station");
        self.state.send_modify(|s| s.selected_station = None);
    }

    /// Select a booking.
    pub fn set_selected_booking_id(&self, booking_id: impl Into<String>) {
        let booking_id = booking_id.into();
        tracing::debug!(%booking_id, "select booking");
        self.state.send_modify(|s| s.selected_booking_id = Some(booking_id));
    }

    /// Clear the selected booking.
    pub fn clear_selected_booking_id(&self) {
        tracing::debug!("clear selected booking");
        self.state.send_modify(|s| s.selected_booking_id = None);
    }
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new()
    }
}
