use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;

use super::ApiError;
use crate::config::{CalendarConfig, ConfigError};
use crate::layout::GridWindow;
use crate::services::database::Database;
use crate::services::event::EventService;

/// Calendar display settings resolved once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarSettings {
    pub window: GridWindow,
    pub tz: Tz,
    pub first_day_of_week: u8,
    pub default_color: String,
}

impl CalendarSettings {
    pub fn from_config(config: &CalendarConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            window: config.grid_window()?,
            tz: config.time_zone()?,
            first_day_of_week: config.first_day_of_week,
            default_color: config.default_color.clone(),
        })
    }

    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.tz).date_naive()
    }
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            window: GridWindow::full_day(),
            tz: Tz::UTC,
            first_day_of_week: 1,
            default_color: crate::models::event::DEFAULT_EVENT_COLOR.to_string(),
        }
    }
}

/// Shared handler state: one SQLite connection behind a mutex.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Database>>,
    settings: Arc<CalendarSettings>,
}

impl AppState {
    pub fn new(db: Database, settings: CalendarSettings) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            settings: Arc::new(settings),
        }
    }

    pub fn settings(&self) -> &CalendarSettings {
        &self.settings
    }

    /// Run `f` against the event service while holding the database lock.
    /// Never call this across an `.await`.
    pub(crate) fn with_events<T>(
        &self,
        f: impl FnOnce(&EventService<'_>) -> Result<T, ApiError>,
    ) -> Result<T, ApiError> {
        let db = self
            .db
            .lock()
            .map_err(|_| ApiError::Internal(anyhow!("Database lock poisoned")))?;
        let service = EventService::new(db.connection());
        f(&service)
    }
}
