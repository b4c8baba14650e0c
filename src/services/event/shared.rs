use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::{self, types::Type, Result, Row};

use crate::models::event::Event;

pub(crate) const EVENT_COLUMNS: &str =
    "id, title, description, location, start_datetime, end_datetime, color, created_at, updated_at";

/// Fixed-width UTC text, so lexical order equals chronological order.
pub(crate) fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current time at the precision the store keeps.
pub(crate) fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

pub(crate) fn to_utc_datetime(value: &str) -> chrono::ParseResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value).map(|dt| dt.with_timezone(&Utc))
}

fn instant_column(row: &Row<'_>, index: usize) -> Result<DateTime<Utc>> {
    let text: String = row.get(index)?;
    to_utc_datetime(&text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}

pub(crate) fn map_event_row(row: &Row<'_>) -> Result<Event> {
    Ok(Event {
        id: Some(row.get(0)?),
        title: row.get(1)?,
        description: row.get(2)?,
        location: row.get(3)?,
        start: instant_column(row, 4)?,
        end: instant_column(row, 5)?,
        color: row.get(6)?,
        created_at: Some(instant_column(row, 7)?),
        updated_at: Some(instant_column(row, 8)?),
    })
}
