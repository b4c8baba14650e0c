use super::shared::{format_instant, map_event_row, EVENT_COLUMNS};
use super::EventService;
use crate::layout::DateRange;
use crate::models::event::Event;
use anyhow::Result;

impl<'a> EventService<'a> {
    /// List every event ordered by start date.
    pub fn list_all(&self) -> Result<Vec<Event>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM events ORDER BY start_datetime ASC, id ASC",
            EVENT_COLUMNS
        ))?;

        let events = stmt
            .query_map([], map_event_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(events)
    }

    /// Events with `start <= range.end` and `end >= range.start`, ordered by
    /// start. Same predicate as `layout::matches_range`.
    pub fn find_by_date_range(&self, range: DateRange) -> Result<Vec<Event>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM events
             WHERE start_datetime <= ?1 AND end_datetime >= ?2
             ORDER BY start_datetime ASC, id ASC",
            EVENT_COLUMNS
        ))?;

        let events = stmt
            .query_map(
                [format_instant(&range.end), format_instant(&range.start)],
                map_event_row,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        log::debug!(
            "Range query {} .. {} matched {} events",
            range.start,
            range.end,
            events.len()
        );
        Ok(events)
    }

    /// Range query when a range is given, otherwise every event.
    pub fn list(&self, range: Option<DateRange>) -> Result<Vec<Event>> {
        match range {
            Some(range) => self.find_by_date_range(range),
            None => self.list_all(),
        }
    }
}
