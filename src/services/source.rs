//! Seam between event consumers and wherever events are loaded from.

use anyhow::Result;

use crate::layout::DateRange;
use crate::models::event::Event;

/// Anything that can list events, optionally restricted to a range.
///
/// Implementations honour the inclusive range test of
/// [`matches_range`](crate::layout::matches_range) and return events sorted
/// by start.
#[cfg_attr(test, mockall::automock)]
pub trait EventSource {
    fn list_events(&self, range: Option<DateRange>) -> Result<Vec<Event>>;
}
