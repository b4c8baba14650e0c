use super::shared::{format_instant, map_event_row, now_millis, EVENT_COLUMNS};
use super::EventService;
use crate::models::event::Event;
use anyhow::{anyhow, Context, Result};
use rusqlite::{self, params};

impl<'a> EventService<'a> {
    /// Create a new event in the database.
    pub fn create(&self, event: Event) -> Result<Event> {
        let mut event = event.normalized();
        event.validate()?;

        let now = now_millis();
        let now_text = format_instant(&now);

        self.conn
            .execute(
                "INSERT INTO events (
                    title, description, location, start_datetime, end_datetime,
                    color, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    event.title,
                    event.description,
                    event.location,
                    format_instant(&event.start),
                    format_instant(&event.end),
                    event.color,
                    &now_text,
                    &now_text,
                ],
            )
            .context("Failed to insert event")?;

        let id = self.conn.last_insert_rowid();
        log::debug!("Created event {} ({:?})", id, event.title);

        event.id = Some(id);
        event.created_at = Some(now);
        event.updated_at = Some(now);

        Ok(event)
    }

    /// Retrieve an event by ID.
    pub fn get(&self, id: i64) -> Result<Option<Event>> {
        let result = self.conn.query_row(
            &format!("SELECT {} FROM events WHERE id = ?", EVENT_COLUMNS),
            [id],
            map_event_row,
        );

        match result {
            Ok(event) => Ok(Some(event)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Update an existing event and return the stored version.
    pub fn update(&self, event: &Event) -> Result<Event> {
        let id = event
            .id
            .ok_or_else(|| anyhow!("Event ID is required for update"))?;

        let event = event.clone().normalized();
        event.validate()?;

        let rows_affected = self
            .conn
            .execute(
                "UPDATE events SET
                    title = ?, description = ?, location = ?, start_datetime = ?,
                    end_datetime = ?, color = ?, updated_at = ?
                 WHERE id = ?",
                params![
                    event.title,
                    event.description,
                    event.location,
                    format_instant(&event.start),
                    format_instant(&event.end),
                    event.color,
                    format_instant(&now_millis()),
                    id,
                ],
            )
            .context("Failed to update event")?;

        if rows_affected == 0 {
            return Err(anyhow!("Event with id {} not found", id));
        }

        log::debug!("Updated event {}", id);
        self.get(id)?
            .ok_or_else(|| anyhow!("Event with id {} vanished during update", id))
    }

    /// Delete an event by ID.
    pub fn delete(&self, id: i64) -> Result<()> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM events WHERE id = ?", [id])
            .context("Failed to delete event")?;

        if rows_affected == 0 {
            return Err(anyhow!("Event with id {} not found", id));
        }

        log::debug!("Deleted event {}", id);
        Ok(())
    }
}
