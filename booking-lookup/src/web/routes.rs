//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::{
    Form, Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::app::{ActionError, Rendered};
use crate::gateway::StationGateway;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router<G: StationGateway>(
    state: AppState<G>,
    static_dir: impl AsRef<Path>,
) -> Router {
    Router::new()
        .route("/", get(index_page::<G>))
        .route("/health", get(health))
        .route("/search", get(search::<G>))
        .route("/search/select", post(select_station::<G>))
        .route("/calendar/next", post(next_week::<G>))
        .route("/calendar/previous", post(previous_week::<G>))
        .route("/bookings/select", post(select_booking::<G>))
        .route("/bookings/back", post(back::<G>))
        .route("/api/selection", get(selection::<G>))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

fn html<T: Template>(template: &T) -> Result<Response, AppError> {
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;
    Ok(Html(html).into_response())
}

/// Root view page.
///
/// A `q` parameter updates the search input first, for forms submitted
/// without script support.
async fn index_page<G: StationGateway>(
    State(state): State<AppState<G>>,
    Query(req): Query<IndexRequest>,
) -> Result<Response, AppError> {
    let rendered = match req.q {
        Some(q) => match state.app.search(&q).await {
            Ok(rendered) => rendered,
            Err(ActionError::NotShown(_)) => state.app.render().await,
            Err(e) => return Err(e.into()),
        },
        None => state.app.render().await,
    };

    let html = render_page(&rendered).map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;
    Ok(Html(html).into_response())
}

/// Update the search input and return the suggestions.
async fn search<G: StationGateway>(
    State(state): State<AppState<G>>,
    headers: HeaderMap,
    Query(req): Query<SearchRequest>,
) -> Result<Response, AppError> {
    let Rendered::SearchCalendar {
        search, selection, ..
    } = state.app.search(&req.q).await?
    else {
        return Err(ActionError::NotShown("search").into());
    };

    if accepts_html(&headers) {
        html(&SuggestionsTemplate {
            search: SearchView::from_search(&search, &selection),
        })
    } else {
        Ok(Json(SearchResponse::from_search(&search, &selection)).into_response())
    }
}

/// Select a suggested station.
async fn select_station<G: StationGateway>(
    State(state): State<AppState<G>>,
    Form(form): Form<SelectStationForm>,
) -> Result<Redirect, AppError> {
    back_to_root(state.app.select_station(&form.station_id).await)
}

async fn next_week<G: StationGateway>(
    State(state): State<AppState<G>>,
) -> Result<Redirect, AppError> {
    back_to_root(state.app.next_week().await)
}

async fn previous_week<G: StationGateway>(
    State(state): State<AppState<G>>,
) -> Result<Redirect, AppError> {
    back_to_root(state.app.previous_week().await)
}

/// Activate a booking marker.
async fn select_booking<G: StationGateway>(
    State(state): State<AppState<G>>,
    Form(form): Form<SelectBookingForm>,
) -> Result<Redirect, AppError> {
    back_to_root(state.app.select_booking(&form.booking_id).await)
}

/// Leave the booking detail.
async fn back<G: StationGateway>(State(state): State<AppState<G>>) -> Result<Redirect, AppError> {
    back_to_root(state.app.back().await)
}

/// Snapshot of the selection store.
async fn selection<G: StationGateway>(
    State(state): State<AppState<G>>,
) -> Json<SelectionResponse> {
    Json(SelectionResponse::from_selection(
        &state.app.store().snapshot(),
    ))
}

/// Answer a form action with a redirect to the root view.
///
/// Actions aimed at a screen that is no longer shown (a resubmitted form,
/// say) are dropped.
fn back_to_root(result: Result<Rendered, ActionError>) -> Result<Redirect, AppError> {
    match result {
        Ok(_) => Ok(Redirect::to("/")),
        Err(ActionError::NotShown(screen)) => {
            tracing::debug!(screen, "ignoring action for hidden screen");
            Ok(Redirect::to("/"))
        }
        Err(e) => Err(e.into()),
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<ActionError> for AppError {
    fn from(e: ActionError) -> Self {
        match e {
            ActionError::UnknownStation(_) => AppError::NotFound {
                message: e.to_string(),
            },
            ActionError::NotShown(_) => AppError::BadRequest {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message.clone()),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        };

        if status.is_server_error() {
            tracing::error!(%status, %message, "request failed");
        } else {
            tracing::warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
