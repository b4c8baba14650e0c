//! Server-side week layout: `GET /api/layout/week?date=YYYY-MM-DD`.

use anyhow::Context;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use serde_json::Value;

use super::dto::{ApiResponse, WeekQuery};
use super::{query_params, ApiError, AppState};
use crate::layout::compute_week_layout;
use crate::state::CalendarState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/layout/week", get(week_layout))
}

/// Lay out the week containing `date` (today in the display zone when
/// omitted). `count` is the number of events fetched for the week.
async fn week_layout(
    State(state): State<AppState>,
    query: Result<Query<WeekQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    let query = query_params(query)?;
    let settings = state.settings();
    let date = query.date.unwrap_or_else(|| settings.today());

    let week = CalendarState::new(date, settings.first_day_of_week);
    let range = week.week_range(&settings.tz);
    let events = state.with_events(|service| Ok(service.find_by_date_range(range)?))?;

    let layout = compute_week_layout(&events, week.current_week_start, &settings.tz, settings.window);
    let data = serde_json::to_value(&layout).context("Failed to serialize week layout")?;

    Ok(Json(ApiResponse {
        count: Some(events.len()),
        ..ApiResponse::ok(data)
    }))
}
