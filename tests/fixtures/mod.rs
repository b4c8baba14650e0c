// Test fixtures - reusable test data
// Provides consistent events and databases across integration tests

use chrono::{DateTime, TimeZone, Utc};
use week_calendar::models::event::Event;
use week_calendar::services::database::Database;

/// January 2025 at the given day, hour and minute (UTC)
pub fn utc(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, day, hour, minute, 0).unwrap()
}

/// In-memory database with the schema applied
pub fn memory_db() -> Database {
    let db = Database::new(":memory:").expect("Failed to open in-memory database");
    db.initialize_schema().expect("Failed to initialize schema");
    db
}

pub fn event(title: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Event {
    Event::new(title, start, end).expect("fixture event should be valid")
}

/// Three events on Wed Jan 15 that all overlap 09:30-10:00
pub fn overlapping_trio() -> Vec<Event> {
    vec![
        event("Design review", utc(15, 9, 0), utc(15, 10, 0)),
        event("Vendor call", utc(15, 9, 15), utc(15, 10, 15)),
        event("Hiring sync", utc(15, 9, 30), utc(15, 10, 30)),
    ]
}
