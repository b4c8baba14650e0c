// Property-based tests for the layout engine
// Random batches of events checked against the column and range invariants

use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use week_calendar::layout::{
    assign_columns, compute_day_layout, events_overlap, filter_range, matches_range, DateRange,
    GridWindow,
};
use week_calendar::models::event::Event;

fn day_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap()
}

/// (start offset in minutes from midnight, duration in minutes)
fn spans() -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::vec((0i64..1440, 15i64..360), 0..24)
}

fn build_events(spans: &[(i64, i64)]) -> Vec<Event> {
    spans
        .iter()
        .enumerate()
        .map(|(index, (offset, minutes))| {
            let start = day_start() + Duration::minutes(*offset);
            let mut event =
                Event::new(format!("Event {index}"), start, start + Duration::minutes(*minutes))
                    .unwrap();
            event.id = Some(index as i64 + 1);
            event
        })
        .collect()
}

fn columns_by_id(events: &[Event]) -> (HashMap<i64, usize>, usize) {
    let refs: Vec<&Event> = events.iter().collect();
    let layout = assign_columns(&refs);
    let columns = layout
        .assignments
        .iter()
        .map(|a| (a.event.id.unwrap(), a.column))
        .collect();
    (columns, layout.total_columns)
}

proptest! {
    /// Property: no two events sharing a column overlap
    #[test]
    fn prop_no_overlap_within_column(spans in spans()) {
        let events = build_events(&spans);
        let refs: Vec<&Event> = events.iter().collect();
        let layout = assign_columns(&refs);

        for (i, a) in layout.assignments.iter().enumerate() {
            for b in &layout.assignments[i + 1..] {
                if a.column == b.column {
                    prop_assert!(!events_overlap(a.event, b.event));
                }
            }
        }
    }

    /// Property: an event in column c overlaps something in every column left of c
    #[test]
    fn prop_columns_are_dense(spans in spans()) {
        let events = build_events(&spans);
        let refs: Vec<&Event> = events.iter().collect();
        let layout = assign_columns(&refs);

        for a in &layout.assignments {
            for left in 0..a.column {
                let blocked = layout
                    .assignments
                    .iter()
                    .any(|b| b.column == left && events_overlap(a.event, b.event));
                prop_assert!(blocked, "column {} was free for {:?}", left, a.event.title);
            }
        }

        let used = layout.assignments.iter().map(|a| a.column + 1).max().unwrap_or(0);
        prop_assert_eq!(layout.total_columns, used);
    }

    /// Property: input order never changes the assignment
    #[test]
    fn prop_assignment_ignores_input_order(
        (spans, order) in spans().prop_flat_map(|spans| {
            let indices: Vec<usize> = (0..spans.len()).collect();
            (Just(spans), Just(indices).prop_shuffle())
        })
    ) {
        let events = build_events(&spans);
        let permuted: Vec<Event> = order.iter().map(|&i| events[i].clone()).collect();

        prop_assert_eq!(columns_by_id(&events), columns_by_id(&permuted));
    }

    /// Property: every positioned event spans exactly one column's width
    #[test]
    fn prop_positions_fill_columns(spans in spans()) {
        let events = build_events(&spans);
        let day = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let layout = compute_day_layout(&events, day, &Utc, GridWindow::full_day());

        for positioned in &layout.events {
            let expected_width = 100.0 / positioned.total_columns as f64;
            prop_assert!((positioned.position.width - expected_width).abs() < 1e-9);
            prop_assert!(positioned.position.left + positioned.position.width <= 100.0 + 1e-9);
            prop_assert!(positioned.position.top >= 0.0);
        }
    }

    /// Property: the range filter agrees with the inclusive predicate and sorts by start
    #[test]
    fn prop_range_filter_matches_predicate(
        spans in spans(),
        query_start in 0i64..1440,
        query_len in 0i64..1440,
    ) {
        let events = build_events(&spans);
        let start = day_start() + Duration::minutes(query_start);
        let end = start + Duration::minutes(query_len);
        let range = DateRange::new(start, end).unwrap();

        let filtered = filter_range(&events, Some(range));
        let expected = events.iter().filter(|e| matches_range(e, start, end)).count();
        prop_assert_eq!(filtered.len(), expected);
        prop_assert!(filtered.windows(2).all(|pair| pair[0].start <= pair[1].start));
    }
}
