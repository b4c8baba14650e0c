//! Inclusive range matching used by event queries.
//!
//! Unlike the half-open overlap predicate, both query bounds are inclusive:
//! an event ending exactly at `query_start` still matches. The SQL in
//! `services::event::queries` applies the same test.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::event::Event;

/// Inclusive query window `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Returns `None` when `start` is after `end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    pub fn contains_event(&self, event: &Event) -> bool {
        matches_range(event, self.start, self.end)
    }
}

pub fn matches_range(event: &Event, query_start: DateTime<Utc>, query_end: DateTime<Utc>) -> bool {
    event.start <= query_end && event.end >= query_start
}

/// Matching events sorted by start ascending; equal starts keep input order.
pub fn filter_range<'a>(events: &'a [Event], range: Option<DateRange>) -> Vec<&'a Event> {
    let mut matched: Vec<&Event> = match range {
        Some(range) => events.iter().filter(|e| range.contains_event(e)).collect(),
        None => events.iter().collect(),
    };
    matched.sort_by_key(|event| event.start);
    matched
}
