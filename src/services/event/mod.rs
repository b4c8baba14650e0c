//! Calendar event service entry point.
//! Provides database-backed CRUD and range queries organized across focused
//! submodules.

use anyhow::Result;
use rusqlite::Connection;

use crate::layout::DateRange;
use crate::models::event::Event;
use crate::services::source::EventSource;

pub mod crud;
pub mod queries;
mod shared;

/// Service for managing calendar events stored in SQLite.
pub struct EventService<'a> {
    pub(crate) conn: &'a Connection,
}

impl<'a> EventService<'a> {
    /// Create a new EventService with a database connection
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl EventSource for EventService<'_> {
    fn list_events(&self, range: Option<DateRange>) -> Result<Vec<Event>> {
        self.list(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::EventValidationError;
    use crate::services::database::Database;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn setup_test_db() -> Database {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();
        db
    }

    fn utc(d: u32, h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, d, h, m, 0).unwrap()
    }

    fn sample_event() -> Event {
        Event::new("Test Event", utc(10, 9, 0), utc(10, 10, 0)).unwrap()
    }

    #[test]
    fn test_create_event() {
        let db = setup_test_db();
        let service = EventService::new(db.connection());

        let created = service.create(sample_event()).unwrap();
        assert!(created.id.is_some());
        assert_eq!(created.title, "Test Event");
        assert!(created.created_at.is_some());
        assert_eq!(created.created_at, created.updated_at);
    }

    #[test]
    fn test_create_returns_stored_precision() {
        let db = setup_test_db();
        let service = EventService::new(db.connection());

        let mut event = sample_event();
        event.start += Duration::microseconds(123_456);
        event.end += Duration::microseconds(789);

        let created = service.create(event).unwrap();
        let stored = service.get(created.id.unwrap()).unwrap().unwrap();
        assert_eq!(created.start, utc(10, 9, 0) + Duration::milliseconds(123));
        assert_eq!(created.start, stored.start);
        assert_eq!(created.end, stored.end);
    }

    #[test]
    fn test_create_event_with_optional_fields() {
        let db = setup_test_db();
        let service = EventService::new(db.connection());

        let event = Event::builder()
            .title("Conference")
            .description("Annual tech conference")
            .location("Convention Center")
            .start(utc(10, 9, 0))
            .end(utc(10, 17, 0))
            .color("#FF5733")
            .build()
            .unwrap();

        let created = service.create(event.clone()).unwrap();
        let stored = service.get(created.id.unwrap()).unwrap().unwrap();
        assert_eq!(stored.description, event.description);
        assert_eq!(stored.location, event.location);
        assert_eq!(stored.color, "#FF5733");
        assert_eq!(stored, created);
    }

    #[test]
    fn test_create_rejects_invalid_event() {
        let db = setup_test_db();
        let service = EventService::new(db.connection());

        let mut event = sample_event();
        event.end = event.start + Duration::minutes(10);

        let err = service.create(event).unwrap_err();
        assert_eq!(
            err.downcast_ref::<EventValidationError>(),
            Some(&EventValidationError::TooShort)
        );
        assert!(service.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_get_nonexistent_event() {
        let db = setup_test_db();
        let service = EventService::new(db.connection());

        assert!(service.get(999).unwrap().is_none());
    }

    #[test]
    fn test_update_event() {
        let db = setup_test_db();
        let service = EventService::new(db.connection());

        let mut event = service.create(sample_event()).unwrap();
        event.title = "Updated Title".to_string();
        event.description = Some("New description".to_string());

        let updated = service.update(&event).unwrap();
        assert_eq!(updated.title, "Updated Title");
        assert_eq!(updated.id, event.id);

        let stored = service.get(event.id.unwrap()).unwrap().unwrap();
        assert_eq!(stored.description, Some("New description".to_string()));
    }

    #[test]
    fn test_update_nonexistent_event() {
        let db = setup_test_db();
        let service = EventService::new(db.connection());

        let mut event = sample_event();
        event.id = Some(999);

        assert!(service.update(&event).is_err());
    }

    #[test]
    fn test_update_requires_id() {
        let db = setup_test_db();
        let service = EventService::new(db.connection());

        assert!(service.update(&sample_event()).is_err());
    }

    #[test]
    fn test_delete_event() {
        let db = setup_test_db();
        let service = EventService::new(db.connection());

        let id = service.create(sample_event()).unwrap().id.unwrap();
        service.delete(id).unwrap();

        assert!(service.get(id).unwrap().is_none());
        assert!(service.delete(id).is_err(), "Second delete should fail");
    }

    #[test]
    fn test_list_all_sorted_by_start() {
        let db = setup_test_db();
        let service = EventService::new(db.connection());

        service
            .create(Event::new("Third", utc(12, 9, 0), utc(12, 10, 0)).unwrap())
            .unwrap();
        service
            .create(Event::new("First", utc(10, 9, 0), utc(10, 10, 0)).unwrap())
            .unwrap();
        service
            .create(Event::new("Second", utc(11, 9, 0), utc(11, 10, 0)).unwrap())
            .unwrap();

        let titles: Vec<String> = service
            .list_all()
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_find_by_date_range_is_inclusive() {
        let db = setup_test_db();
        let service = EventService::new(db.connection());

        for (title, start, end) in [
            ("Past", utc(8, 9, 0), utc(8, 10, 0)),
            ("Overnight", utc(9, 23, 0), utc(10, 1, 0)),
            ("Ends at start", utc(9, 23, 0), utc(10, 0, 0)),
            ("Inside", utc(10, 12, 0), utc(10, 13, 0)),
            ("Starts at end", utc(10, 23, 59), utc(11, 1, 0)),
            ("Future", utc(12, 9, 0), utc(12, 10, 0)),
        ] {
            service.create(Event::new(title, start, end).unwrap()).unwrap();
        }

        let range = DateRange::new(utc(10, 0, 0), utc(10, 23, 59)).unwrap();
        let titles: Vec<String> = service
            .find_by_date_range(range)
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();

        assert_eq!(
            titles,
            vec!["Overnight", "Ends at start", "Inside", "Starts at end"]
        );
    }

    #[test]
    fn test_event_source_matches_list() {
        let db = setup_test_db();
        let service = EventService::new(db.connection());
        service.create(sample_event()).unwrap();

        let all = service.list_events(None).unwrap();
        assert_eq!(all.len(), 1);

        let range = DateRange::new(utc(11, 0, 0), utc(11, 23, 59)).unwrap();
        assert!(service.list_events(Some(range)).unwrap().is_empty());
    }
}
