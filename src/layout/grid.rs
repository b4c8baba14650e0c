//! Maps an event's time range and column onto percentage grid coordinates.

use chrono::{TimeZone, Timelike};
use serde::Serialize;
use thiserror::Error;

use crate::models::event::Event;

pub const MINUTES_PER_HOUR: i64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridWindowError {
    #[error("grid end hour {0} is past 24")]
    EndOutOfRange(u32),
    #[error("grid start hour {start} must be before end hour {end}")]
    Empty { start: u32, end: u32 },
}

/// Hour range mapped onto the 0%–100% vertical extent of a day column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridWindow {
    start_hour: u32,
    end_hour: u32,
}

impl GridWindow {
    pub fn new(start_hour: u32, end_hour: u32) -> Result<Self, GridWindowError> {
        if end_hour > 24 {
            return Err(GridWindowError::EndOutOfRange(end_hour));
        }
        if start_hour >= end_hour {
            return Err(GridWindowError::Empty {
                start: start_hour,
                end: end_hour,
            });
        }
        Ok(Self {
            start_hour,
            end_hour,
        })
    }

    pub fn full_day() -> Self {
        Self {
            start_hour: 0,
            end_hour: 24,
        }
    }

    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }

    pub fn total_minutes(&self) -> i64 {
        (self.end_hour - self.start_hour) as i64 * MINUTES_PER_HOUR
    }
}

impl Default for GridWindow {
    fn default() -> Self {
        Self::full_day()
    }
}

/// Percent coordinates of one positioned event. Values are not clipped:
/// events outside the window yield negative `top` or `top + height > 100`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridPosition {
    pub top: f64,
    pub height: f64,
    pub left: f64,
    pub width: f64,
}

/// Grid coordinates for `event` in `column` of `total_columns`.
///
/// `top` uses the wall-clock hour and minute of `event.start` in `tz`;
/// `height` uses the duration in whole minutes.
///
/// # Panics
/// Panics if `total_columns` is zero or `column` is not below it.
pub fn grid_position<Tz: TimeZone>(
    event: &Event,
    column: usize,
    total_columns: usize,
    window: GridWindow,
    tz: &Tz,
) -> GridPosition {
    assert!(total_columns >= 1, "grid mapping needs at least one column");
    assert!(
        column < total_columns,
        "column {} out of range for {} columns",
        column,
        total_columns
    );

    let local_start = event.start.with_timezone(tz);
    let start_minute = (local_start.hour() as i64) * MINUTES_PER_HOUR + local_start.minute() as i64;
    let window_offset = window.start_hour() as i64 * MINUTES_PER_HOUR;
    let grid_minutes = window.total_minutes() as f64;

    let width = 100.0 / total_columns as f64;

    GridPosition {
        top: (start_minute - window_offset) as f64 / grid_minutes * 100.0,
        height: event.duration_minutes() as f64 / grid_minutes * 100.0,
        left: column as f64 * width,
        width,
    }
}
