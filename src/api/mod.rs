//! JSON HTTP API over the event store and the week layout.

pub mod dto;
mod events;
mod layout;
mod state;

use anyhow::Context;
use axum::{
    extract::{rejection::QueryRejection, Query},
    http::{header, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use thiserror::Error;
use tower_http::cors::CorsLayer;

use crate::models::event::EventValidationError;
use dto::{ApiResponse, FieldError, HealthResponse};

pub use state::{AppState, CalendarSettings};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Event not found")]
    NotFound,
    #[error("Route {0} not found")]
    RouteNotFound(String),
    #[error("Validation failed")]
    Validation(Vec<FieldError>),
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Internal(anyhow::Error),
}

impl From<EventValidationError> for ApiError {
    fn from(err: EventValidationError) -> Self {
        Self::Validation(vec![FieldError::from(&err)])
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<EventValidationError>() {
            Some(validation) => validation.clone().into(),
            None => Self::Internal(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                ApiResponse::<()>::failure("Event not found", None),
            ),
            Self::RouteNotFound(path) => (
                StatusCode::NOT_FOUND,
                ApiResponse::failure(format!("Route {} not found", path), None),
            ),
            Self::Validation(errors) => {
                log::warn!("Rejected event: {:?}", errors);
                (
                    StatusCode::BAD_REQUEST,
                    ApiResponse::failure("Validation failed", Some(errors)),
                )
            }
            Self::BadRequest(message) => {
                log::warn!("Bad request: {}", message);
                (StatusCode::BAD_REQUEST, ApiResponse::failure(message, None))
            }
            Self::Internal(err) => {
                log::error!("Request failed: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::failure("Internal server error", None),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

/// All routes with `state` attached. CORS is layered on separately.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(events::router())
        .merge(layout::router())
        .fallback(not_found)
        .with_state(state)
}

/// Credentialed CORS for one origin. A wildcard is rejected since
/// tower-http refuses `*` together with credentials.
pub fn cors_layer(origin: &str) -> anyhow::Result<CorsLayer> {
    if origin.trim() == "*" {
        anyhow::bail!("CORS origin '*' cannot be used with credentials");
    }
    let origin = HeaderValue::from_str(origin)
        .with_context(|| format!("Invalid CORS origin '{}'", origin))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true))
}

/// Unwrap query parameters, turning a rejection into an enveloped 400.
fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    query
        .map(|Query(inner)| inner)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        message: "Server is running".to_string(),
        timestamp: Utc::now(),
    })
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::RouteNotFound(uri.path().to_string())
}
