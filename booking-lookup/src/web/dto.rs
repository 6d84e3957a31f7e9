//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::Station;
use crate::search::StationSearch;
use crate::store::Selection;

/// Query for the search endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SearchRequest {
    /// New contents of the search input
    #[serde(default)]
    pub q: String,
}

/// Query for the index page.
#[derive(Debug, Default, Deserialize)]
pub struct IndexRequest {
    /// Search input submitted without script support
    pub q: Option<String>,
}

/// Form selecting a suggested station.
#[derive(Debug, Deserialize)]
pub struct SelectStationForm {
    pub station_id: String,
}

/// Form activating a booking marker.
#[derive(Debug, Deserialize)]
pub struct SelectBookingForm {
    pub booking_id: String,
}

/// A station in responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationResult {
    pub id: String,
    pub name: String,
}

impl StationResult {
    pub fn from_station(station: &Station) -> Self {
        Self {
            id: station.id.clone(),
            name: station.name.clone(),
        }
    }
}

/// Response for the search endpoint.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// Current input text
    pub input: String,

    /// Whether the input mirrors the selected station
    pub emphasized: bool,

    /// Suggestions, in list order
    pub suggestions: Vec<StationResult>,
}

impl SearchResponse {
    pub fn from_search(search: &StationSearch, selection: &Selection) -> Self {
        Self {
            input: search.input().to_string(),
            emphasized: search.is_emphasized(selection),
            suggestions: search
                .suggestions()
                .iter()
                .map(StationResult::from_station)
                .collect(),
        }
    }
}

/// A booking in the selection snapshot.
#[derive(Debug, Serialize)]
pub struct BookingResult {
    pub id: String,
    pub customer_name: String,
    pub start_date: String,
    pub end_date: String,
}

/// The selected station with its bookings.
#[derive(Debug, Serialize)]
pub struct SelectedStationResult {
    pub id: String,
    pub name: String,
    pub bookings: Vec<BookingResult>,
}

/// Snapshot of the selection store.
#[derive(Debug, Serialize)]
pub struct SelectionResponse {
    /// Every fetched station, in server order
    pub stations: Vec<StationResult>,

    pub selected_station: Option<SelectedStationResult>,

    pub selected_booking_id: Option<String>,
}

impl SelectionResponse {
    pub fn from_selection(selection: &Selection) -> Self {
        let selected_station = selection
            .selected_station
            .as_ref()
            .map(|s| SelectedStationResult {
                id: s.id.clone(),
                name: s.name.clone(),
                bookings: s
                    .bookings
                    .iter()
                    .map(|b| BookingResult {
                        id: b.id.clone(),
                        customer_name: b.customer_name.clone(),
                        start_date: b.start_date.clone(),
                        end_date: b.end_date.clone(),
                    })
                    .collect(),
            });

        Self {
            stations: selection
                .stations
                .iter()
                .map(StationResult::from_station)
                .collect(),
            selected_station,
            selected_booking_id: selection.selected_booking_id.clone(),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
