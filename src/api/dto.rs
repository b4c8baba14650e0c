use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::event::{Event, EventValidationError};

/// Response envelope shared by every endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            count: None,
            errors: None,
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok(data)
        }
    }

    pub fn failure(message: impl Into<String>, errors: Option<Vec<FieldError>>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            count: None,
            errors,
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    pub fn list(items: Vec<T>) -> Self {
        Self {
            count: Some(items.len()),
            ..Self::ok(items)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl From<&EventValidationError> for FieldError {
    fn from(err: &EventValidationError) -> Self {
        Self {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeletedEvent {
    pub id: i64,
}

/// Body of `POST /api/events`. Every field is optional here so a missing
/// field is reported through the validation envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventPayload {
    pub title: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl CreateEventPayload {
    pub fn into_event(self, default_color: &str) -> Result<Event, EventValidationError> {
        let start = self.start_time.ok_or(EventValidationError::Missing("startTime"))?;
        let end = self.end_time.ok_or(EventValidationError::Missing("endTime"))?;

        let event = Event {
            id: None,
            title: self.title.unwrap_or_default(),
            description: self.description,
            location: self.location,
            start,
            end,
            color: self.color.unwrap_or_else(|| default_color.to_string()),
            created_at: None,
            updated_at: None,
        }
        .normalized();

        event.validate()?;
        Ok(event)
    }
}

impl From<&Event> for CreateEventPayload {
    fn from(event: &Event) -> Self {
        Self {
            title: Some(event.title.clone()),
            start_time: Some(event.start),
            end_time: Some(event.end),
            color: Some(event.color.clone()),
            description: event.description.clone(),
            location: event.location.clone(),
        }
    }
}

/// Body of `PUT /api/events/{id}`; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl UpdateEventPayload {
    /// Overlay the payload onto `existing`. The result still needs validation.
    pub fn merge_into(self, mut existing: Event) -> Event {
        if let Some(title) = self.title {
            existing.title = title;
        }
        if let Some(start) = self.start_time {
            existing.start = start;
        }
        if let Some(end) = self.end_time {
            existing.end = end;
        }
        if let Some(color) = self.color {
            existing.color = color;
        }
        if self.description.is_some() {
            existing.description = self.description;
        }
        if self.location.is_some() {
            existing.location = self.location;
        }
        existing
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeekQuery {
    pub date: Option<NaiveDate>,
}
