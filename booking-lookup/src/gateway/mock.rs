//! In-memory gateway for tests and offline development.
//!
//! Serves a fixed station list, optionally loaded from a JSON file holding
//! the same array `GET /stations` returns. A gateway built with
//! [`MockGateway::recording`] also logs every call, so tests can assert how
//! often the views hit the API.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use crate::domain::{Booking, Station};

use super::StationGateway;
use super::error::GatewayError;

/// A call made against the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    ListStations,
    Station(String),
    Booking {
        station_id: String,
        booking_id: String,
    },
    Search(String),
}

#[derive(Default)]
struct MockInner {
    stations: RwLock<Vec<Station>>,
    failing: AtomicBool,
    /// `None` unless recording
    calls: Option<Mutex<Vec<GatewayCall>>>,
}

/// Gateway backed by an in-memory station list.
#[derive(Clone, Default)]
pub struct MockGateway {
    inner: Arc<MockInner>,
}

impl MockGateway {
    /// Create a mock serving the given stations.
    pub fn new(stations: Vec<Station>) -> Self {
        let gateway = Self::default();
        gateway.set_stations(stations);
        gateway
    }

    /// Create a mock that also logs every call made against it.
    pub fn recording(stations: Vec<Station>) -> Self {
        let gateway = Self {
            inner: Arc::new(MockInner {
                calls: Some(Mutex::default()),
                ..MockInner::default()
            }),
        };
        gateway.set_stations(stations);
        gateway
    }

    /// Load stations from a JSON fixture file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, GatewayError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| GatewayError::Fixture {
            message: format!("failed to read {}: {}", path.display(), e),
        })?;
        let stations: Vec<Station> =
            serde_json::from_str(&json).map_err(|e| GatewayError::Fixture {
                message: format!("failed to parse {}: {}", path.display(), e),
            })?;
        Ok(Self::new(stations))
    }

    /// Replace the served stations.
    pub fn set_stations(&self, stations: Vec<Station>) {
        *self.inner.stations.write().unwrap_or_else(|e| e.into_inner()) = stations;
    }

    /// Make every call fail with a 500 (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.inner.failing.store(failing, Ordering::SeqCst);
    }

    /// Calls made so far, in order. Always empty unless recording.
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.inner
            .calls
            .as_ref()
            .map(|calls| calls.lock().unwrap_or_else(|e| e.into_inner()).clone())
            .unwrap_or_default()
    }

    /// Number of recorded calls matching `pred`.
    pub fn count_calls(&self, pred: impl Fn(&GatewayCall) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: GatewayCall) -> Result<(), GatewayError> {
        let url = match &call {
            GatewayCall::ListStations | GatewayCall::Search(_) => "mock://stations".to_string(),
            GatewayCall::Station(id) => format!("mock://stations/{id}"),
            GatewayCall::Booking {
                station_id,
                booking_id,
            } => format!("mock://stations/{station_id}/bookings/{booking_id}"),
        };
        if let Some(calls) = &self.inner.calls {
            calls.lock().unwrap_or_else(|e| e.into_inner()).push(call);
        }

        if self.inner.failing.load(Ordering::SeqCst) {
            return Err(GatewayError::Status { status: 500, url });
        }
        Ok(())
    }

    fn stations(&self) -> Vec<Station> {
        self.inner
            .stations
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn not_found(url: String) -> GatewayError {
        GatewayError::Status { status: 404, url }
    }
}

impl StationGateway for MockGateway {
    async fn list_stations(&self) -> Result<Vec<Station>, GatewayError> {
        self.record(GatewayCall::ListStations)?;
        Ok(self.stations())
    }

    async fn station(&self, station_id: &str) -> Result<Station, GatewayError> {
        self.record(GatewayCall::Station(station_id.to_string()))?;
        self.stations()
            .into_iter()
            .find(|s| s.id == station_id)
            .ok_or_else(|| Self::not_found(format!("mock://stations/{station_id}")))
    }

    async fn booking(&self, station_id: &str, booking_id: &str) -> Result<Booking, GatewayError> {
        self.record(GatewayCall::Booking {
            station_id: station_id.to_string(),
            booking_id: booking_id.to_string(),
        })?;
        self.stations()
            .iter()
            .find(|s| s.id == station_id)
            .and_then(|s| s.booking(booking_id).cloned())
            .ok_or_else(|| {
                Self::not_found(format!(
                    "mock://stations/{station_id}/bookings/{booking_id}"
                ))
            })
    }

    async fn search_stations(&self, name: &str) -> Result<Vec<Station>, GatewayError> {
        self.record(GatewayCall::Search(name.to_string()))?;
        let needle = name.to_lowercase();
        Ok(self
            .stations()
            .into_iter()
            .filter(|s| s.name.to_lowercase().contains(&needle))
            .collect())
    }
}
