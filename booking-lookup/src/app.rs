//! Application shell: the root view and the screens it mounts.
//!
//! The root view is a pure function of the selected booking: no booking
//! shows the search and calendar, a booking shows its detail. Every render
//! reconciles the mounted screen with that choice. A screen that is no
//! longer wanted is dropped with all its local state, and its replacement
//! is mounted fresh (fetching whatever it fetches on mount).
//!
//! Mount fetches never run under the screen lock. A screen is installed
//! only if the selection still asks for it once its fetches are done.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tokio::sync::{Mutex, MutexGuard};

use crate::calendar::WeekCalendar;
use crate::detail::BookingDetail;
use crate::gateway::{StationGateway, fetch_matching_stations, fetch_stations};
use crate::search::{Debouncer, FilterStrategy, SearchConfig, StationSearch};
use crate::store::{Selection, SelectionStore};

/// Source of "today" for anchoring the calendar.
pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// Which screen the root view shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    SearchCalendar,
    BookingDetail {
        station_id: Option<String>,
        booking_id: String,
    },
}

/// The root view: a pure function of the selection.
pub fn root_view(selection: &Selection) -> Screen {
    match &selection.selected_booking_id {
        None => Screen::SearchCalendar,
        Some(booking_id) => Screen::BookingDetail {
            station_id: selection.selected_station.as_ref().map(|s| s.id.clone()),
            booking_id: booking_id.clone(),
        },
    }
}

/// A mounted screen and its local state.
#[derive(Debug)]
enum Mounted {
    SearchCalendar {
        search: StationSearch,
        calendar: WeekCalendar,
    },
    BookingDetail(BookingDetail),
}

impl Mounted {
    fn shows(&self, screen: &Screen) -> bool {
        match (self, screen) {
            (Mounted::SearchCalendar { .. }, Screen::SearchCalendar) => true,
            (
                Mounted::BookingDetail(detail),
                Screen::BookingDetail {
                    station_id,
                    booking_id,
                },
            ) => detail.is_for(station_id.as_deref(), booking_id),
            _ => false,
        }
    }
}

/// Output of a render.
#[derive(Debug, Clone)]
pub enum Rendered {
    SearchCalendar {
        search: StationSearch,
        calendar: WeekCalendar,
        selection: Selection,
    },
    BookingDetail(BookingDetail),
}

/// Errors from user actions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// The action belongs to a screen that is not shown
    #[error("{0} is not shown")]
    NotShown(&'static str),

    /// The station id is neither suggested nor listed
    #[error("unknown station: {0}")]
    UnknownStation(String),
}

/// The booking lookup application.
///
/// Owns the selection store, the gateway and the currently mounted screen.
pub struct App<G> {
    gateway: Arc<G>,
    store: Arc<SelectionStore>,
    search_config: SearchConfig,
    debouncer: Debouncer,
    today: Clock,
    mounted: Mutex<Option<Mounted>>,
}

impl<G: StationGateway> App<G> {
    /// Create an application; nothing is mounted until the first render.
    pub fn new(gateway: G, store: Arc<SelectionStore>, search_config: SearchConfig) -> Self {
        Self {
            gateway: Arc::new(gateway),
            store,
            debouncer: Debouncer::new(search_config.debounce),
            search_config,
            today: Arc::new(|| Local::now().date_naive()),
            mounted: Mutex::new(None),
        }
    }

    /// Replace the clock used to anchor newly mounted calendars.
    pub fn with_clock(mut self, today: impl Fn() -> NaiveDate + Send + Sync + 'static) -> Self {
        self.today = Arc::new(today);
        self
    }

    pub fn store(&self) -> &SelectionStore {
        &self.store
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn search_config(&self) -> &SearchConfig {
        &self.search_config
    }

    /// Render the root view, mounting or unmounting screens as needed.
    pub async fn render(&self) -> Rendered {
        let mut slot = self.reconcile().await;
        self.snapshot(&mut slot)
    }

    /// Change the search input.
    pub async fn search(&self, text: &str) -> Result<Rendered, ActionError> {
        self.require_search_calendar("search")?;
        let query_remote = {
            let mut slot = self.reconcile().await;
            let selection = self.store.snapshot();
            let Some(Mounted::SearchCalendar { search, .. }) = slot.as_mut() else {
                return Err(ActionError::NotShown("search"));
            };
            search.set_input(text, &selection);
            search.strategy() == FilterStrategy::Remote && search.wants_suggestions(&selection)
        };

        if query_remote {
            self.search_remote(text).await;
        }
        Ok(self.render().await)
    }

    /// Debounced server-side filtering for `query`.
    ///
    /// Runs without holding the screen lock so later keystrokes can
    /// supersede it.
    async fn search_remote(&self, query: &str) {
        let Some(ticket) = self.debouncer.settle().await else {
            tracing::debug!(query, "search superseded before sending");
            return;
        };

        let results = fetch_matching_stations(self.gateway.as_ref(), query)
            .await
            .unwrap_or_default();

        if !self.debouncer.is_current(ticket) {
            tracing::debug!(query, "discarding stale search response");
            return;
        }

        let mut slot = self.mounted.lock().await;
        if let Some(Mounted::SearchCalendar { search, .. }) = slot.as_mut() {
            search.apply_remote(query, results, &self.store.snapshot());
        }
    }

    /// Pick a suggested station.
    pub async fn select_station(&self, station_id: &str) -> Result<Rendered, ActionError> {
        self.require_search_calendar("search")?;
        {
            let mut slot = self.reconcile().await;
            let Some(Mounted::SearchCalendar { search, .. }) = slot.as_mut() else {
                return Err(ActionError::NotShown("search"));
            };

            let station = search
                .find_candidate(station_id, &self.store.snapshot())
                .ok_or_else(|| ActionError::UnknownStation(station_id.to_string()))?;
            search.select(station, &self.store);
        }
        Ok(self.render().await)
    }

    /// Show the following week.
    pub async fn next_week(&self) -> Result<Rendered, ActionError> {
        self.with_calendar(WeekCalendar::next).await
    }

    /// Show the preceding week.
    pub async fn previous_week(&self) -> Result<Rendered, ActionError> {
        self.with_calendar(WeekCalendar::previous).await
    }

    async fn with_calendar(
        &self,
        f: impl FnOnce(&mut WeekCalendar),
    ) -> Result<Rendered, ActionError> {
        self.require_search_calendar("calendar")?;
        let mut slot = self.reconcile().await;
        let Some(Mounted::SearchCalendar { calendar, .. }) = slot.as_mut() else {
            return Err(ActionError::NotShown("calendar"));
        };
        f(calendar);
        Ok(self.snapshot(&mut slot))
    }

    /// Activate a booking marker in the calendar.
    pub async fn select_booking(&self, booking_id: &str) -> Result<Rendered, ActionError> {
        self.require_search_calendar("calendar")?;
        {
            let slot = self.reconcile().await;
            let Some(Mounted::SearchCalendar { calendar, .. }) = slot.as_ref() else {
                return Err(ActionError::NotShown("calendar"));
            };
            calendar.activate(booking_id, &self.store);
        }
        Ok(self.render().await)
    }

    /// Leave the booking detail.
    ///
    /// Works from the selection alone, so it does not wait for a detail
    /// that is still mounting.
    pub async fn back(&self) -> Result<Rendered, ActionError> {
        if root_view(&self.store.snapshot()) == Screen::SearchCalendar {
            return Err(ActionError::NotShown("booking detail"));
        }
        BookingDetail::back(&self.store);
        Ok(self.render().await)
    }

    /// Reject actions for the search screen while the selection asks for
    /// the detail, without mounting anything.
    fn require_search_calendar(&self, screen: &'static str) -> Result<(), ActionError> {
        match root_view(&self.store.snapshot()) {
            Screen::SearchCalendar => Ok(()),
            Screen::BookingDetail { .. } => Err(ActionError::NotShown(screen)),
        }
    }

    /// Bring the mounted screen in line with the root view and return it
    /// locked.
    ///
    /// The lock is released while a replacement mounts. If the selection
    /// moves on meanwhile, the new mount is discarded and the loop tries
    /// again with the current choice.
    async fn reconcile(&self) -> MutexGuard<'_, Option<Mounted>> {
        loop {
            let wanted = root_view(&self.store.snapshot());
            {
                let slot = self.mounted.lock().await;
                if slot.as_ref().is_some_and(|m| m.shows(&wanted)) {
                    return slot;
                }
            }

            let mounted = self.mount(wanted.clone()).await;

            let mut slot = self.mounted.lock().await;
            if root_view(&self.store.snapshot()) != wanted {
                tracing::debug!("selection changed while mounting");
                continue;
            }
            // Another render may have mounted the same screen first
            if slot.as_ref().is_some_and(|m| m.shows(&wanted)) {
                return slot;
            }
            if slot.replace(mounted).is_some() {
                tracing::debug!("unmounted previous screen");
            }
            return slot;
        }
    }

    async fn mount(&self, screen: Screen) -> Mounted {
        match screen {
            Screen::SearchCalendar => {
                let search = StationSearch::new(self.search_config.strategy);
                if let Some(stations) = fetch_stations(self.gateway.as_ref()).await {
                    self.store.set_stations(stations);
                }
                let calendar = WeekCalendar::starting_at((self.today)());
                tracing::info!(week_start = %calendar.week_start(), "mounted search and calendar");
                Mounted::SearchCalendar { search, calendar }
            }
            Screen::BookingDetail {
                station_id,
                booking_id,
            } => {
                let detail =
                    BookingDetail::load(&self.gateway, station_id.as_deref(), &booking_id).await;
                tracing::info!(
                    %booking_id,
                    loaded = !detail.is_loading(),
                    "mounted booking detail"
                );
                Mounted::BookingDetail(detail)
            }
        }
    }

    fn snapshot(&self, slot: &mut Option<Mounted>) -> Rendered {
        let selection = self.store.snapshot();
        match slot {
            Some(Mounted::SearchCalendar { search, calendar }) => {
                search.sync(&selection);
                Rendered::SearchCalendar {
                    search: search.clone(),
                    calendar: *calendar,
                    selection,
                }
            }
            Some(Mounted::BookingDetail(detail)) => Rendered::BookingDetail(detail.clone()),
            // reconcile always mounts a screen
            None => Rendered::SearchCalendar {
                search: StationSearch::new(self.search_config.strategy),
                calendar: WeekCalendar::starting_at((self.today)()),
                selection,
            },
        }
    }
}
