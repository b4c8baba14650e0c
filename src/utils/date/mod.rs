// Date utility functions
// Day boundaries, week navigation and the labels shown around the week grid

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};

pub const DAYS_IN_WEEK: usize = 7;

pub fn is_same_day<Tz: TimeZone>(date1: &DateTime<Tz>, date2: &DateTime<Tz>) -> bool {
    date1.date_naive() == date2.date_naive()
}

/// First instant of `date` in `tz`.
///
/// Midnight can be skipped by a DST transition in a few zones; the first
/// representable quarter hour after it is used instead.
pub fn start_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);

    for minutes in (0..=180).step_by(15) {
        match tz.from_local_datetime(&(midnight + Duration::minutes(minutes))) {
            LocalResult::Single(dt) => return dt.with_timezone(&Utc),
            LocalResult::Ambiguous(earliest, _) => return earliest.with_timezone(&Utc),
            LocalResult::None => continue,
        }
    }

    tz.from_utc_datetime(&midnight).with_timezone(&Utc)
}

/// Exclusive end of `date` in `tz`: the start of the following day, which
/// is 24 hours after `start_of_day` except on DST transition days.
pub fn end_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    match date.succ_opt() {
        Some(next) => start_of_day(next, tz),
        None => start_of_day(date, tz) + Duration::hours(24),
    }
}

/// Half-open `[start, end)` bounds of `date` in `tz`.
pub fn day_bounds<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    (start_of_day(date, tz), end_of_day(date, tz))
}

/// Calculate the start of the week containing the given date.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc. Taken modulo 7.
pub fn get_week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let first = (first_day_of_week % 7) as i64;
    let offset = (weekday - first).rem_euclid(7);
    date - Duration::days(offset)
}

pub fn get_week_end(week_start: NaiveDate) -> NaiveDate {
    week_start + Duration::days(DAYS_IN_WEEK as i64 - 1)
}

pub fn week_dates(week_start: NaiveDate) -> Vec<NaiveDate> {
    (0..DAYS_IN_WEEK as i64)
        .map(|offset| week_start + Duration::days(offset))
        .collect()
}

pub fn next_week(date: NaiveDate) -> NaiveDate {
    date + Duration::weeks(1)
}

pub fn prev_week(date: NaiveDate) -> NaiveDate {
    date - Duration::weeks(1)
}

/// Header label for a week, e.g. "Nov 18 - 24, 2025" or "Nov 28 - Dec 4, 2025".
pub fn format_week_range(week_start: NaiveDate) -> String {
    let week_end = get_week_end(week_start);
    let start_month = week_start.format("%b").to_string();
    let end_month = week_end.format("%b").to_string();

    if start_month == end_month {
        format!(
            "{} {} - {}, {}",
            start_month,
            week_start.day(),
            week_end.day(),
            week_end.year()
        )
    } else {
        format!(
            "{} {} - {} {}, {}",
            start_month,
            week_start.day(),
            end_month,
            week_end.day(),
            week_end.year()
        )
    }
}

/// Time grid hour label: "12 AM", "9 AM", "12 PM", "3 PM".
pub fn format_hour(hour: u32) -> String {
    match hour % 24 {
        0 => "12 AM".to_string(),
        12 => "12 PM".to_string(),
        h if h < 12 => format!("{} AM", h),
        h => format!("{} PM", h - 12),
    }
}

/// Event time label, e.g. "9:00 AM".
pub fn format_time<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    instant.with_timezone(tz).format("%-I:%M %p").to_string()
}
