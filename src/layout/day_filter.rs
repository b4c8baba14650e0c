//! Selects the events that touch a single calendar day.

use chrono::{NaiveDate, TimeZone};

use super::overlap::overlaps;
use crate::models::event::Event;
use crate::utils::date::day_bounds;

/// Events intersecting `[start_of_day(day), start_of_next_day)` in `tz`,
/// in input order. Events crossing midnight belong to both days.
pub fn events_for_day<'a, Tz: TimeZone>(
    events: &'a [Event],
    day: NaiveDate,
    tz: &Tz,
) -> Vec<&'a Event> {
    let (day_start, day_end) = day_bounds(day, tz);

    events
        .iter()
        .filter(|event| overlaps(event.start, event.end, day_start, day_end))
        .collect()
}
