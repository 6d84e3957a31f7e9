//! Askama templates for the web frontend.

use askama::Template;
use chrono::{Datelike, NaiveDate};

use crate::app::Rendered;
use crate::calendar::WeekCalendar;
use crate::detail::{BookingDetail, LOADING};
use crate::domain::format_day_label;
use crate::search::{PLACEHOLDER, StationSearch};
use crate::store::Selection;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Station search and week calendar.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub search: SearchView,
    pub calendar: CalendarView,
}

/// Booking detail page.
#[derive(Template)]
#[template(path = "booking.html")]
pub struct BookingTemplate {
    pub detail: DetailView,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Suggestion dropdown fragment.
#[derive(Template)]
#[template(path = "suggestions.html")]
pub struct SuggestionsTemplate {
    pub search: SearchView,
}

/// Render a full page for the root view.
pub fn render_page(rendered: &Rendered) -> askama::Result<String> {
    match rendered {
        Rendered::SearchCalendar {
            search,
            calendar,
            selection,
        } => IndexTemplate {
            search: SearchView::from_search(search, selection),
            calendar: CalendarView::from_calendar(calendar, selection),
        }
        .render(),
        Rendered::BookingDetail(detail) => BookingTemplate {
            detail: DetailView::from_detail(detail),
        }
        .render(),
    }
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Search input and its dropdown.
#[derive(Debug, Clone)]
pub struct SearchView {
    pub input: String,
    pub placeholder: &'static str,
    pub emphasized: bool,
    pub suggestions: Vec<SuggestionView>,
}

/// One entry of the dropdown.
#[derive(Debug, Clone)]
pub struct SuggestionView {
    pub id: String,
    pub name: String,
}

impl SearchView {
    pub fn from_search(search: &StationSearch, selection: &Selection) -> Self {
        Self {
            input: search.input().to_string(),
            placeholder: PLACEHOLDER,
            emphasized: search.is_emphasized(selection),
            suggestions: search
                .suggestions()
                .iter()
                .map(|s| SuggestionView {
                    id: s.id.clone(),
                    name: s.name.clone(),
                })
                .collect(),
        }
    }

    /// Whether the dropdown is open.
    pub fn has_suggestions(&self) -> bool {
        !self.suggestions.is_empty()
    }
}

/// The visible week.
#[derive(Debug, Clone)]
pub struct CalendarView {
    /// Name of the station whose bookings are shown
    pub station_name: Option<String>,
    pub days: Vec<DayView>,
}

/// One day cell.
#[derive(Debug, Clone)]
pub struct DayView {
    /// `dd.MM`
    pub label: String,
    /// Short weekday name
    pub weekday: String,
    /// ISO date, for markup
    pub date: String,
    pub markers: Vec<MarkerView>,
}

/// A booking marker.
#[derive(Debug, Clone)]
pub struct MarkerView {
    pub booking_id: String,
    pub customer_name: String,
}

impl CalendarView {
    pub fn from_calendar(calendar: &WeekCalendar, selection: &Selection) -> Self {
        let days = calendar
            .overlay(selection.selected_bookings())
            .into_iter()
            .map(|(day, bookings)| DayView {
                label: format_day_label(day),
                weekday: weekday_name(day).to_string(),
                date: day.to_string(),
                markers: bookings
                    .into_iter()
                    .map(|b| MarkerView {
                        booking_id: b.id.clone(),
                        customer_name: b.customer_name.clone(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            station_name: selection.selected_station_name().map(str::to_string),
            days,
        }
    }

    pub fn station_label(&self) -> &str {
        self.station_name.as_deref().unwrap_or("No station selected")
    }
}

fn weekday_name(day: NaiveDate) -> &'static str {
    use chrono::Weekday::*;
    match day.weekday() {
        Mon => "Mon",
        Tue => "Tue",
        Wed => "Wed",
        Thu => "Thu",
        Fri => "Fri",
        Sat => "Sat",
        Sun => "Sun",
    }
}

/// Booking detail fields.
#[derive(Debug, Clone)]
pub struct DetailView {
    pub loading: bool,
    pub loading_text: &'static str,
    pub customer_name: String,
    pub start_date: String,
    pub end_date: String,
    pub duration_days: String,
    pub station_name: String,
}

impl DetailView {
    pub fn from_detail(detail: &BookingDetail) -> Self {
        match detail.fields() {
            Some(fields) => Self {
                loading: false,
                loading_text: LOADING,
                customer_name: fields.customer_name,
                start_date: fields.start_date,
                end_date: fields.end_date,
                duration_days: fields.duration_days,
                station_name: fields.station_name,
            },
            None => Self {
                loading: true,
                loading_text: LOADING,
                customer_name: String::new(),
                start_date: String::new(),
                end_date: String::new(),
                duration_days: String::new(),
                station_name: String::new(),
            },
        }
    }
}
