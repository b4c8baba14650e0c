//! Event CRUD endpoints under `/api/events`.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};

use super::dto::{ApiResponse, CreateEventPayload, DeletedEvent, EventQuery, FieldError, UpdateEventPayload};
use super::{query_params, ApiError, AppState};
use crate::layout::DateRange;
use crate::models::event::Event;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/events", get(list_events).post(create_event))
        .route(
            "/api/events/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ApiError::BadRequest("Invalid event ID format".to_string()))
}

fn parse_instant(field: &str, raw: &str) -> Result<DateTime<Utc>, ApiError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|_| {
            ApiError::Validation(vec![FieldError {
                field: field.to_string(),
                message: "Must be a valid ISO 8601 date string".to_string(),
            }])
        })
}

/// `Some(range)` only when both bounds are given.
fn query_range(query: &EventQuery) -> Result<Option<DateRange>, ApiError> {
    let (Some(start), Some(end)) = (&query.start, &query.end) else {
        return Ok(None);
    };
    let start = parse_instant("start", start)?;
    let end = parse_instant("end", end)?;

    DateRange::new(start, end).map(Some).ok_or_else(|| {
        ApiError::Validation(vec![FieldError {
            field: "end".to_string(),
            message: "Start date must be before or equal to end date".to_string(),
        }])
    })
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(inner)| inner)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// GET /api/events?start&end
async fn list_events(
    State(state): State<AppState>,
    query: Result<Query<EventQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Event>>>, ApiError> {
    let range = query_range(&query_params(query)?)?;
    let events = state.with_events(|service| Ok(service.list(range)?))?;
    Ok(Json(ApiResponse::list(events)))
}

/// GET /api/events/{id}
async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Event>>, ApiError> {
    let id = parse_id(&id)?;
    let event = state.with_events(|service| service.get(id)?.ok_or(ApiError::NotFound))?;
    Ok(Json(ApiResponse::ok(event)))
}

/// POST /api/events
async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<CreateEventPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Event>>), ApiError> {
    let event = body(payload)?.into_event(&state.settings().default_color)?;
    let created = state.with_events(|service| Ok(service.create(event)?))?;

    log::info!("Created event {:?} ({})", created.id, created.title);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Event created successfully", created)),
    ))
}

/// PUT /api/events/{id}
async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateEventPayload>, JsonRejection>,
) -> Result<Json<ApiResponse<Event>>, ApiError> {
    let id = parse_id(&id)?;
    let payload = body(payload)?;

    let updated = state.with_events(|service| {
        let existing = service.get(id)?.ok_or(ApiError::NotFound)?;
        let merged = payload.merge_into(existing).normalized();
        merged.validate()?;
        Ok(service.update(&merged)?)
    })?;

    log::info!("Updated event {}", id);
    Ok(Json(ApiResponse::with_message(
        "Event updated successfully",
        updated,
    )))
}

/// DELETE /api/events/{id}
async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeletedEvent>>, ApiError> {
    let id = parse_id(&id)?;
    state.with_events(|service| {
        service.get(id)?.ok_or(ApiError::NotFound)?;
        Ok(service.delete(id)?)
    })?;

    log::info!("Deleted event {}", id);
    Ok(Json(ApiResponse::with_message(
        "Event deleted successfully",
        DeletedEvent { id },
    )))
}
