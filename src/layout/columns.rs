//! Greedy column assignment for one day's events.
//!
//! Events are placed in start order into the leftmost column whose members
//! they do not overlap; a new column opens when none fits. Every event in the
//! batch shares the same `total_columns`, even when it overlaps nothing.

use std::cmp::Ordering;

use super::overlap::events_overlap;
use crate::models::event::Event;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnAssignment<'a> {
    pub event: &'a Event,
    pub column: usize,
}

/// Result of assigning one day's batch. `assignments` is in placement order.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout<'a> {
    pub assignments: Vec<ColumnAssignment<'a>>,
    pub total_columns: usize,
}

impl<'a> ColumnLayout<'a> {
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn column_of(&self, event: &Event) -> Option<usize> {
        self.assignments
            .iter()
            .find(|assignment| std::ptr::eq(assignment.event, event))
            .map(|assignment| assignment.column)
    }
}

/// Assign each event to a column so that no two events in a column overlap.
///
/// # Panics
/// Panics if any event has `start >= end`.
pub fn assign_columns<'a>(events: &[&'a Event]) -> ColumnLayout<'a> {
    for event in events {
        assert!(
            event.start < event.end,
            "event {:?} ({:?}) must start before it ends",
            event.id,
            event.title
        );
    }

    let mut sorted = events.to_vec();
    sorted.sort_by(|a, b| placement_order(a, b));

    let mut columns: Vec<Vec<&'a Event>> = Vec::new();
    let mut assignments = Vec::with_capacity(sorted.len());

    for event in sorted {
        let free = columns
            .iter()
            .position(|column| !column.iter().any(|placed| events_overlap(event, placed)));

        let column = match free {
            Some(index) => {
                columns[index].push(event);
                index
            }
            None => {
                columns.push(vec![event]);
                columns.len() - 1
            }
        };

        assignments.push(ColumnAssignment { event, column });
    }

    ColumnLayout {
        total_columns: columns.len(),
        assignments,
    }
}

/// Start ascending, then longer first. Identical intervals fall back to id
/// (unsaved events last) and title so input order never matters.
pub fn placement_order(a: &Event, b: &Event) -> Ordering {
    a.start
        .cmp(&b.start)
        .then_with(|| b.duration().cmp(&a.duration()))
        .then_with(|| compare_ids(a.id, b.id))
        .then_with(|| a.title.cmp(&b.title))
}

fn compare_ids(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
