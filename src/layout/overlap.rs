//! Half-open interval intersection shared by column assignment and day filtering.

use chrono::{DateTime, Utc};

use crate::models::event::Event;

/// Whether `[a_start, a_end)` and `[b_start, b_end)` intersect.
///
/// Touching endpoints do not count. Ordering of each pair is not checked.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && a_end > b_start
}

pub fn events_overlap(a: &Event, b: &Event) -> bool {
    overlaps(a.start, a.end, b.start, b.end)
}
