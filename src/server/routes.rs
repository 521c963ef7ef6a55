// HTTP handlers for the calendar adapter

use std::time::Instant;

use axum::{
    extract::{Path, RawQuery, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;
use serde_json::json;

use crate::error::CalendarError;
use crate::services::hebcal::OfflineConverter;
use crate::services::session::CalendarSession;
use crate::services::url_state::MemoryLocation;

use super::view::{CalendarView, MarksView};
use super::AppState;

pub struct ApiError(CalendarError);

impl From<CalendarError> for ApiError {
    fn from(err: CalendarError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            err if err.is_user_error() => StatusCode::BAD_REQUEST,
            CalendarError::Lookup(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::CONFLICT,
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

fn open_session(state: &AppState, query: Option<String>) -> Result<CalendarSession<MemoryLocation>, CalendarError> {
    CalendarSession::load(
        MemoryLocation::new(query.unwrap_or_default()),
        state.settings.max_range_days,
        Local::now().date_naive(),
    )
}

/// Rebuild the grid positions only; mutations need no Hebrew data
async fn restore_marks(
    state: &AppState,
    query: Option<String>,
) -> Result<CalendarSession<MemoryLocation>, CalendarError> {
    let mut session = open_session(state, query)?;
    session.generate(session.range(), &OfflineConverter).await?;
    Ok(session)
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Generate the calendar described by the query, with Hebrew dates
pub async fn get_calendar(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> ApiResult<CalendarView> {
    let mut session = open_session(&state, query)?;
    session
        .generate(session.range(), state.converter.as_ref())
        .await?;
    Ok(Json(CalendarView::from_session(&session)))
}

pub async fn post_cycle(
    State(state): State<AppState>,
    Path(position): Path<usize>,
    RawQuery(query): RawQuery,
) -> ApiResult<MarksView> {
    let mut session = restore_marks(&state, query).await?;
    session.cycle(position)?;
    Ok(Json(MarksView::from_session(&session)))
}

pub async fn post_fill(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> ApiResult<MarksView> {
    let mut session = restore_marks(&state, query).await?;
    session.fill_all();
    Ok(Json(MarksView::from_session(&session)))
}

pub async fn post_reset(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> ApiResult<MarksView> {
    let mut session = restore_marks(&state, query).await?;
    session.reset_all();
    Ok(Json(MarksView::from_session(&session)))
}

pub async fn post_split(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> ApiResult<MarksView> {
    let mut session = restore_marks(&state, query).await?;
    session.toggle_split();
    Ok(Json(MarksView::from_session(&session)))
}

pub async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    log::info!(
        "{} {} -> {} ({} ms)",
        method,
        path,
        response.status().as_u16(),
        started.elapsed().as_millis()
    );
    response
}
