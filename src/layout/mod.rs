//! Event layout engine for the week grid.
//!
//! `compute_day_layout` runs the day filter, column assignment and grid
//! mapping in sequence. Everything here is pure: inputs are borrowed, nothing
//! is cached, and results are rebuilt on every call.

use chrono::{NaiveDate, TimeZone};
use serde::Serialize;

pub mod columns;
pub mod day_filter;
pub mod grid;
pub mod overlap;
pub mod range;

pub use columns::{assign_columns, ColumnAssignment, ColumnLayout};
pub use day_filter::events_for_day;
pub use grid::{grid_position, GridPosition, GridWindow, GridWindowError};
pub use overlap::{events_overlap, overlaps};
pub use range::{filter_range, matches_range, DateRange};

use crate::models::event::Event;
use crate::utils::date::{format_week_range, week_dates};

/// An event with its column and grid coordinates for one rendered day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedEvent<'a> {
    pub event: &'a Event,
    pub column: usize,
    pub total_columns: usize,
    #[serde(flatten)]
    pub position: GridPosition,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayLayout<'a> {
    pub date: NaiveDate,
    pub events: Vec<PositionedEvent<'a>>,
}

impl<'a> DayLayout<'a> {
    pub fn total_columns(&self) -> usize {
        self.events.first().map_or(0, |e| e.total_columns)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekLayout<'a> {
    pub week_start: NaiveDate,
    pub label: String,
    pub window: GridWindow,
    pub days: Vec<DayLayout<'a>>,
}

/// Lay out the events of `day` as seen in `tz`.
pub fn compute_day_layout<'a, Tz: TimeZone>(
    events: &'a [Event],
    day: NaiveDate,
    tz: &Tz,
    window: GridWindow,
) -> DayLayout<'a> {
    let members = events_for_day(events, day, tz);
    let columns = assign_columns(&members);

    let events = columns
        .assignments
        .iter()
        .map(|assignment| PositionedEvent {
            event: assignment.event,
            column: assignment.column,
            total_columns: columns.total_columns,
            position: grid_position(
                assignment.event,
                assignment.column,
                columns.total_columns,
                window,
                tz,
            ),
        })
        .collect();

    DayLayout { date: day, events }
}

/// Lay out the seven days starting at `week_start`.
pub fn compute_week_layout<'a, Tz: TimeZone>(
    events: &'a [Event],
    week_start: NaiveDate,
    tz: &Tz,
    window: GridWindow,
) -> WeekLayout<'a> {
    let days = week_dates(week_start)
        .into_iter()
        .map(|day| compute_day_layout(events, day, tz, window))
        .collect();

    WeekLayout {
        week_start,
        label: format_week_range(week_start),
        window,
        days,
    }
}
