//! Remote data gateway for stations and bookings.
//!
//! Read-only access to the bookings API:
//! - `GET /stations` lists every station with its bookings
//! - `GET /stations/{id}` returns one station (only its name is used)
//! - `GET /stations/{id}/bookings/{id}` returns one booking
//! - `GET /stations?name=...` filters stations server-side
//!
//! The `fetch_*` functions are the boundary the views call through: a
//! failure is logged and becomes `None`, so a view simply keeps showing its
//! loading or empty state.

mod client;
mod error;
mod mock;

use std::future::Future;

use crate::domain::{Booking, Station};

pub use client::{DEFAULT_BASE_URL, GatewayConfig, HttpGateway};
pub use error::GatewayError;
pub use mock::{GatewayCall, MockGateway};

/// Source of station and booking data.
pub trait StationGateway: Send + Sync + 'static {
    /// Fetch every station, in server order.
    fn list_stations(&self) -> impl Future<Output = Result<Vec<Station>, GatewayError>> + Send;

    /// Fetch a single station.
    fn station(
        &self,
        station_id: &str,
    ) -> impl Future<Output = Result<Station, GatewayError>> + Send;

    /// Fetch a single booking of a station.
    fn booking(
        &self,
        station_id: &str,
        booking_id: &str,
    ) -> impl Future<Output = Result<Booking, GatewayError>> + Send;

    /// Fetch the stations whose name matches `name`, filtered by the server.
    fn search_stations(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Vec<Station>, GatewayError>> + Send;
}

/// Fetch all stations, or `None` on failure.
pub async fn fetch_stations<G: StationGateway>(gateway: &G) -> Option<Vec<Station>> {
    match gateway.list_stations().await {
        Ok(stations) => {
            tracing::info!(count = stations.len(), "fetched stations");
            Some(stations)
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to fetch stations");
            None
        }
    }
}

/// Fetch one booking's detail, or `None` on failure.
pub async fn fetch_booking_details<G: StationGateway>(
    gateway: &G,
    station_id: &str,
    booking_id: &str,
) -> Option<Booking> {
    gateway
        .booking(station_id, booking_id)
        .await
        .inspect_err(|e| {
            tracing::error!(error = %e, station_id, booking_id, "failed to fetch booking details");
        })
        .ok()
}

/// Fetch a station's display name, or `None` on failure.
pub async fn fetch_station_name<G: StationGateway>(
    gateway: &G,
    station_id: &str,
) -> Option<String> {
    gateway
        .station(station_id)
        .await
        .inspect_err(|e| tracing::error!(error = %e, station_id, "failed to fetch station name"))
        .ok()
        .map(|s| s.name)
}

/// Fetch the stations matching `name` server-side, or `None` on failure.
pub async fn fetch_matching_stations<G: StationGateway>(
    gateway: &G,
    name: &str,
) -> Option<Vec<Station>> {
    gateway
        .search_stations(name)
        .await
        .inspect_err(|e| tracing::error!(error = %e, query = name, "failed to search stations"))
        .ok()
}
