// Event module
// Calendar event model and the rules every stored event must satisfy

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 500;
pub const MAX_LOCATION_LEN: usize = 200;
pub const MIN_DURATION_MINUTES: i64 = 15;
pub const DEFAULT_EVENT_COLOR: &str = "#3b82f6";

/// Reasons an event is rejected before it reaches storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventValidationError {
    #[error("Title is required")]
    TitleRequired,
    #[error("Title must not exceed 100 characters")]
    TitleTooLong,
    #[error("Description must not exceed 500 characters")]
    DescriptionTooLong,
    #[error("Location must not exceed 200 characters")]
    LocationTooLong,
    #[error("Must be a valid hex color")]
    InvalidColor,
    #[error("Start time must be before end time")]
    EndNotAfterStart,
    #[error("Event must be at least 15 minutes long")]
    TooShort,
    #[error("{0} is required")]
    Missing(&'static str),
}

impl EventValidationError {
    /// Name of the JSON field the error is reported against.
    pub fn field(&self) -> &'static str {
        match self {
            Self::TitleRequired | Self::TitleTooLong => "title",
            Self::DescriptionTooLong => "description",
            Self::LocationTooLong => "location",
            Self::InvalidColor => "color",
            Self::EndNotAfterStart | Self::TooShort => "endTime",
            Self::Missing(field) => *field,
        }
    }
}

/// A single calendar entry.
///
/// `start` and `end` are absolute instants; any wall-clock interpretation
/// happens at layout time against a display time zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Option<i64>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "startTime")]
    pub start: DateTime<Utc>,
    #[serde(rename = "endTime")]
    pub end: DateTime<Utc>,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Event {
    /// Create a new event with required fields and the default color.
    ///
    /// # Examples
    /// ```
    /// use week_calendar::models::event::Event;
    /// use chrono::{Duration, TimeZone, Utc};
    ///
    /// let start = Utc.with_ymd_and_hms(2025, 1, 10, 9, 0, 0).unwrap();
    /// let event = Event::new("Team Meeting", start, start + Duration::hours(1)).unwrap();
    /// assert_eq!(event.color, "#3b82f6");
    /// ```
    pub fn new(
        title: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Self, EventValidationError> {
        let event = Self {
            id: None,
            title: title.into(),
            description: None,
            location: None,
            start,
            end,
            color: DEFAULT_EVENT_COLOR.to_string(),
            created_at: None,
            updated_at: None,
        }
        .normalized();

        event.validate()?;
        Ok(event)
    }

    /// Create a builder for constructing events with optional fields
    pub fn builder() -> EventBuilder {
        EventBuilder::new()
    }

    /// Trim text fields, drop optional strings that end up empty and cut
    /// instants to the millisecond precision they are stored with.
    pub fn normalized(mut self) -> Self {
        self.start = self.start.trunc_subsecs(3);
        self.end = self.end.trunc_subsecs(3);
        self.title = self.title.trim().to_string();
        self.description = trim_optional(self.description);
        self.location = trim_optional(self.location);
        self
    }

    /// Validate the event against the storage rules.
    pub fn validate(&self) -> Result<(), EventValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(EventValidationError::TitleRequired);
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(EventValidationError::TitleTooLong);
        }

        if let Some(ref description) = self.description {
            if description.trim().chars().count() > MAX_DESCRIPTION_LEN {
                return Err(EventValidationError::DescriptionTooLong);
            }
        }

        if let Some(ref location) = self.location {
            if location.trim().chars().count() > MAX_LOCATION_LEN {
                return Err(EventValidationError::LocationTooLong);
            }
        }

        if !is_hex_color(&self.color) {
            return Err(EventValidationError::InvalidColor);
        }

        if self.end <= self.start {
            return Err(EventValidationError::EndNotAfterStart);
        }

        if self.duration() < Duration::minutes(MIN_DURATION_MINUTES) {
            return Err(EventValidationError::TooShort);
        }

        Ok(())
    }

    /// Get the duration of the event
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whole minutes between start and end, truncated.
    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }
}

/// `#RGB` or `#RRGGBB`, case-insensitive.
pub fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

fn trim_optional(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Builder for creating events with optional fields
#[derive(Default)]
pub struct EventBuilder {
    title: Option<String>,
    description: Option<String>,
    location: Option<String>,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    color: Option<String>,
}

impl EventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn start(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    /// Set the event color (hex format)
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Build the event, normalizing text fields and validating the result.
    pub fn build(self) -> Result<Event, EventValidationError> {
        let title = self.title.ok_or(EventValidationError::TitleRequired)?;
        let start = self.start.ok_or(EventValidationError::Missing("startTime"))?;
        let end = self.end.ok_or(EventValidationError::Missing("endTime"))?;

        let event = Event {
            id: None,
            title,
            description: self.description,
            location: self.location,
            start,
            end,
            color: self
                .color
                .unwrap_or_else(|| DEFAULT_EVENT_COLOR.to_string()),
            created_at: None,
            updated_at: None,
        }
        .normalized();

        event.validate()?;
        Ok(event)
    }
}
