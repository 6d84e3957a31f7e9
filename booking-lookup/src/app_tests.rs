//! End-to-end tests of the application shell against the mock gateway.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tokio::sync::Notify;
use tokio::time::timeout;

use crate::app::{ActionError, App, Rendered, Screen, root_view};
use crate::calendar::WeekCalendar;
use crate::detail::BookingDetail;
use crate::domain::{Booking, Station};
use crate::gateway::{GatewayCall, GatewayError, MockGateway, StationGateway};
use crate::search::{FilterStrategy, SearchConfig, StationSearch};
use crate::store::{Selection, SelectionStore};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn booking(id: &str, station: &str, name: &str, start: &str, end: &str) -> Booking {
    Booking {
        id: id.into(),
        pickup_return_station_id: station.into(),
        customer_name: name.into(),
        start_date: start.into(),
        end_date: end.into(),
    }
}

fn stations() -> Vec<Station> {
    vec![
        Station::new("1", "Berlin").with_bookings(vec![
            booking(
                "1",
                "1",
                "Jane Smith",
                "2024-06-17T00:00:00.000Z",
                "2024-06-17T00:00:00.000Z",
            ),
            booking(
                "3",
                "1",
                "Chris Lee",
                "2024-06-20T00:00:00.000Z",
                "2024-06-25T00:00:00.000Z",
            ),
        ]),
        Station::new("2", "Lisabon"),
        Station::new("3", "Barcelona"),
    ]
}

fn station_456() -> Station {
    Station::new("station-456", "Mock Station Name").with_bookings(vec![booking(
        "booking-123",
        "station-456",
        "John Doe",
        "2024-01-10T00:00:00.000Z",
        "2024-01-20T00:00:00.000Z",
    )])
}

/// Serves from a mock, but station lookups wait until `release` fires.
struct HeldName {
    inner: MockGateway,
    release: Arc<Notify>,
}

impl StationGateway for HeldName {
    async fn list_stations(&self) -> Result<Vec<Station>, GatewayError> {
        self.inner.list_stations().await
    }

    async fn station(&self, station_id: &str) -> Result<Station, GatewayError> {
        self.release.notified().await;
        self.inner.station(station_id).await
    }

    async fn booking(&self, station_id: &str, booking_id: &str) -> Result<Booking, GatewayError> {
        self.inner.booking(station_id, booking_id).await
    }

    async fn search_stations(&self, name: &str) -> Result<Vec<Station>, GatewayError> {
        self.inner.search_stations(name).await
    }
}

fn held_name_app(inner: MockGateway) -> (App<HeldName>, Arc<Notify>) {
    let release = Arc::new(Notify::new());
    let gateway = HeldName {
        inner,
        release: Arc::clone(&release),
    };
    let app = app_with(gateway, SearchConfig::default());
    app.store().set_selected_station(station_456());
    app.store().set_selected_booking_id("booking-123");
    (app, release)
}

fn app_with<G: StationGateway>(gateway: G, config: SearchConfig) -> App<G> {
    App::new(gateway, Arc::new(SelectionStore::new()), config).with_clock(|| day(2024, 6, 19))
}

fn local_app() -> App<MockGateway> {
    app_with(MockGateway::recording(stations()), SearchConfig::default())
}

fn remote_app(debounce: Duration) -> App<MockGateway> {
    app_with(
        MockGateway::recording(stations()),
        SearchConfig::default()
            .with_strategy(FilterStrategy::Remote)
            .with_debounce(debounce),
    )
}

fn search_screen(rendered: Rendered) -> (StationSearch, WeekCalendar, Selection) {
    match rendered {
        Rendered::SearchCalendar {
            search,
            calendar,
            selection,
        } => (search, calendar, selection),
        Rendered::BookingDetail(_) => panic!("expected search screen"),
    }
}

fn detail_screen(rendered: Rendered) -> BookingDetail {
    match rendered {
        Rendered::BookingDetail(detail) => detail,
        Rendered::SearchCalendar { .. } => panic!("expected booking detail"),
    }
}

fn names(search: &StationSearch) -> Vec<&str> {
    search.suggestions().iter().map(|s| s.name.as_str()).collect()
}

fn list_calls(gateway: &MockGateway) -> usize {
    gateway.count_calls(|c| matches!(c, GatewayCall::ListStations))
}

#[test]
fn root_view_follows_selected_booking() {
    let mut selection = Selection::default();
    assert_eq!(root_view(&selection), Screen::SearchCalendar);

    selection.selected_booking_id = Some("booking-123".into());
    assert_eq!(
        root_view(&selection),
        Screen::BookingDetail {
            station_id: None,
            booking_id: "booking-123".into(),
        }
    );

    selection.selected_station = Some(Station::new("station-456", "Mock Station Name"));
    assert_eq!(
        root_view(&selection),
        Screen::BookingDetail {
            station_id: Some("station-456".into()),
            booking_id: "booking-123".into(),
        }
    );
}

#[tokio::test]
async fn first_render_mounts_search_and_calendar() {
    let app = local_app();
    let (search, calendar, selection) = search_screen(app.render().await);

    assert_eq!(search.input(), "");
    assert!(search.suggestions().is_empty());
    assert_eq!(calendar.week_start(), day(2024, 6, 16));
    assert_eq!(selection.stations.len(), 3);

    // Further renders keep the mounted screen
    app.render().await;
    app.render().await;
    assert_eq!(list_calls(app.gateway()), 1);
}

#[tokio::test]
async fn typing_suggests_matching_stations() {
    let app = local_app();
    let (search, _, _) = search_screen(app.search("Li").await.unwrap());
    assert_eq!(names(&search), ["Berlin", "Lisabon"]);

    let (search, _, _) = search_screen(app.search("   ").await.unwrap());
    assert!(search.suggestions().is_empty());
}

#[tokio::test]
async fn empty_station_list_never_suggests() {
    let app = app_with(MockGateway::recording(Vec::new()), SearchConfig::default());
    for text in ["B", "Berlin", "x"] {
        let (search, _, _) = search_screen(app.search(text).await.unwrap());
        assert!(search.suggestions().is_empty());
    }
}

#[tokio::test]
async fn failed_station_fetch_leaves_search_empty() {
    let gateway = MockGateway::recording(stations());
    gateway.set_failing(true);
    let app = app_with(gateway, SearchConfig::default());

    let (search, _, selection) = search_screen(app.search("Ber").await.unwrap());
    assert!(selection.stations.is_empty());
    assert!(search.suggestions().is_empty());
}

#[tokio::test]
async fn selecting_station_shows_its_bookings() {
    let app = local_app();
    app.search("Ber").await.unwrap();

    let (search, calendar, selection) = search_screen(app.select_station("1").await.unwrap());
    assert_eq!(search.input(), "Berlin");
    assert!(search.suggestions().is_empty());
    assert!(search.is_emphasized(&selection));

    let overlay = calendar.overlay(selection.selected_bookings());
    let marked: Vec<_> = overlay
        .iter()
        .flat_map(|(d, bs)| bs.iter().map(move |b| (*d, b.id.clone())))
        .collect();
    assert_eq!(
        marked,
        [(day(2024, 6, 17), "1".to_string()), (day(2024, 6, 20), "3".to_string())]
    );
}

#[tokio::test]
async fn unknown_station_is_rejected() {
    let app = local_app();
    assert_eq!(
        app.select_station("99").await.unwrap_err(),
        ActionError::UnknownStation("99".into())
    );
    assert!(app.store().snapshot().selected_station.is_none());
}

#[tokio::test]
async fn week_navigation_moves_by_whole_weeks() {
    let app = local_app();
    let (_, calendar, _) = search_screen(app.next_week().await.unwrap());
    assert_eq!(calendar.week_start(), day(2024, 6, 23));

    app.previous_week().await.unwrap();
    let (_, calendar, _) = search_screen(app.previous_week().await.unwrap());
    assert_eq!(calendar.week_start(), day(2024, 6, 9));
}

#[tokio::test]
async fn selecting_booking_opens_detail_and_back_remounts_search() {
    let app = local_app();
    app.search("Ber").await.unwrap();
    app.select_station("1").await.unwrap();
    app.next_week().await.unwrap();

    let detail = detail_screen(app.select_booking("1").await.unwrap());
    let fields = detail.fields().unwrap();
    assert_eq!(fields.customer_name, "Jane Smith");
    assert_eq!(fields.start_date, "06/17/2024");
    assert_eq!(fields.duration_days, "0");
    assert_eq!(fields.station_name, "Berlin");
    assert_eq!(
        app.gateway().count_calls(|c| matches!(c, GatewayCall::Booking { .. })),
        1
    );

    // Search and calendar actions do not apply while the detail is shown
    assert_eq!(
        app.next_week().await.unwrap_err(),
        ActionError::NotShown("calendar")
    );

    let (search, calendar, selection) = search_screen(app.back().await.unwrap());

    // Station selection survives; local state starts over
    assert_eq!(selection.selected_station_name(), Some("Berlin"));
    assert!(selection.selected_booking_id.is_none());
    assert_eq!(search.input(), "");
    assert!(!search.is_emphasized(&selection));
    assert_eq!(calendar.week_start(), day(2024, 6, 16));
    assert_eq!(list_calls(app.gateway()), 2);
}

#[tokio::test]
async fn detail_for_booking_123() {
    let app = app_with(MockGateway::recording(vec![station_456()]), SearchConfig::default());
    app.store()
        .set_selected_station(Station::new("station-456", "Mock Station Name"));
    app.store().set_selected_booking_id("booking-123");

    let detail = detail_screen(app.render().await);
    let fields = detail.fields().unwrap();
    assert_eq!(fields.customer_name, "John Doe");
    assert_eq!(fields.start_date, "01/10/2024");
    assert_eq!(fields.end_date, "01/20/2024");
    assert_eq!(fields.duration_days, "10");
    assert_eq!(fields.station_name, "Mock Station Name");

    // Mounted detail does not refetch on re-render
    app.render().await;
    assert_eq!(app.gateway().calls().len(), 2);

    app.back().await.unwrap();
    assert_eq!(
        app.store().snapshot().selected_station.unwrap().id,
        "station-456"
    );
}

#[tokio::test]
async fn stalled_station_name_does_not_hold_up_detail() {
    let (app, _release) = held_name_app(MockGateway::new(vec![station_456()]));

    let rendered = timeout(Duration::from_secs(2), app.render())
        .await
        .expect("detail mounted while the name lookup is pending");
    let fields = detail_screen(rendered).fields().unwrap();
    assert_eq!(fields.customer_name, "John Doe");
    assert_eq!(fields.station_name, "");

    // Other actions are not queued behind the lookup either
    assert_eq!(
        timeout(Duration::from_secs(2), app.next_week())
            .await
            .unwrap()
            .unwrap_err(),
        ActionError::NotShown("calendar")
    );
    let rendered = timeout(Duration::from_secs(2), app.back())
        .await
        .expect("back completed while the name lookup is pending")
        .unwrap();
    let (_, _, selection) = search_screen(rendered);
    assert!(selection.selected_booking_id.is_none());
}

#[tokio::test]
async fn late_station_name_shows_on_next_render() {
    let mock = MockGateway::recording(vec![station_456()]);
    let (app, release) = held_name_app(mock.clone());

    let detail = detail_screen(app.render().await);
    assert_eq!(detail.station_name(), None);

    release.notify_one();
    let name = timeout(Duration::from_secs(2), async {
        loop {
            if let Some(name) = detail_screen(app.render().await).station_name() {
                return name.to_string();
            }
            tokio::task::yield_now().await;
        }
    })
    .await
    .unwrap();
    assert_eq!(name, "Mock Station Name");

    // The name landed in the mounted view; nothing was refetched
    assert_eq!(
        mock.count_calls(|c| matches!(c, GatewayCall::Booking { .. })),
        1
    );
    assert_eq!(
        mock.count_calls(|c| matches!(c, GatewayCall::Station(_))),
        1
    );
}

#[tokio::test]
async fn booking_without_station_stays_loading() {
    let app = local_app();
    app.store().set_selected_booking_id("booking-123");

    let detail = detail_screen(app.render().await);
    assert!(detail.is_loading());
    assert!(app.gateway().calls().is_empty());
}

#[tokio::test]
async fn back_requires_detail() {
    let app = local_app();
    assert_eq!(
        app.back().await.unwrap_err(),
        ActionError::NotShown("booking detail")
    );
}

#[tokio::test]
async fn remote_search_queries_server() {
    let app = remote_app(Duration::ZERO);
    let (search, _, _) = search_screen(app.search("bar").await.unwrap());
    assert_eq!(names(&search), ["Barcelona"]);
    assert!(
        app.gateway()
            .calls()
            .contains(&GatewayCall::Search("bar".into()))
    );

    // Empty input clears without asking the server
    let (search, _, _) = search_screen(app.search("").await.unwrap());
    assert!(search.suggestions().is_empty());
    assert_eq!(
        app.gateway()
            .count_calls(|c| matches!(c, GatewayCall::Search(_))),
        1
    );
}

#[tokio::test(start_paused = true)]
async fn remote_search_debounces_keystrokes() {
    let app = remote_app(Duration::from_millis(500));

    let (first, second) = tokio::join!(app.search("Be"), app.search("Ber"));
    first.unwrap();
    let (search, _, _) = search_screen(second.unwrap());

    assert_eq!(names(&search), ["Berlin"]);
    let searches: Vec<_> = app
        .gateway()
        .calls()
        .into_iter()
        .filter(|c| matches!(c, GatewayCall::Search(_)))
        .collect();
    assert_eq!(searches, [GatewayCall::Search("Ber".into())]);
}

#[tokio::test]
async fn remote_selection_suppresses_suggestions() {
    let app = remote_app(Duration::ZERO);
    app.search("Lis").await.unwrap();
    let (search, _, selection) = search_screen(app.select_station("2").await.unwrap());
    assert_eq!(selection.selected_station_name(), Some("Lisabon"));
    assert!(search.suggestions().is_empty());

    // Typing the selected name exactly does not query
    app.search("Lisabon").await.unwrap();
    assert_eq!(
        app.gateway()
            .count_calls(|c| matches!(c, GatewayCall::Search(_))),
        1
    );
}
