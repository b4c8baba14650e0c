// Benchmark for the layout engine
// Measures column assignment and full week layout over growing event counts

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use week_calendar::layout::{assign_columns, compute_week_layout, GridWindow};
use week_calendar::models::event::Event;

/// `count` events spread over one week, with clusters that overlap.
fn sample_events(count: usize) -> Vec<Event> {
    let week_start = Utc.with_ymd_and_hms(2025, 1, 13, 0, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let day = (i % 7) as i64;
            let offset = ((i * 37) % (14 * 60)) as i64;
            let start = week_start + Duration::days(day) + Duration::hours(7) + Duration::minutes(offset);
            let minutes = 15 + ((i * 13) % 120) as i64;
            let mut event = Event::new(format!("Event {i}"), start, start + Duration::minutes(minutes))
                .expect("benchmark event should be valid");
            event.id = Some(i as i64 + 1);
            event
        })
        .collect()
}

fn bench_assign_columns(c: &mut Criterion) {
    let mut group = c.benchmark_group("assign_columns");

    for count in [10, 100, 500].iter() {
        let events = sample_events(*count);
        let refs: Vec<&Event> = events.iter().collect();
        group.bench_with_input(BenchmarkId::from_parameter(count), &refs, |b, refs| {
            b.iter(|| assign_columns(black_box(refs)));
        });
    }

    group.finish();
}

fn bench_week_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("week_layout");
    let week_start = NaiveDate::from_ymd_opt(2025, 1, 13).unwrap();

    for count in [50, 350].iter() {
        let events = sample_events(*count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &events, |b, events| {
            b.iter(|| {
                compute_week_layout(
                    black_box(events),
                    black_box(week_start),
                    &chrono_tz::Europe::London,
                    GridWindow::full_day(),
                )
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_assign_columns, bench_week_layout);
criterion_main!(benches);
