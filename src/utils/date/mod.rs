// Date/time utility functions shared by the placement and scheduling code.
// All trip times are wall-clock local to the trip, so NaiveDate/NaiveTime
// are used throughout instead of timezone-aware types.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// Minutes since midnight for a wall-clock time.
pub fn minutes_since_midnight(time: NaiveTime) -> i64 {
    use chrono::Timelike;
    time.hour() as i64 * 60 + time.minute() as i64
}

/// Build a time from minutes since midnight. Returns `None` outside 0..1440.
pub fn time_from_minutes(minutes: i64) -> Option<NaiveTime> {
    if !(0..MINUTES_PER_DAY).contains(&minutes) {
        return None;
    }
    NaiveTime::from_hms_opt((minutes / 60) as u32, (minutes % 60) as u32, 0)
}

/// Add a signed number of minutes to a `(date, time)` pair, rolling the date
/// forward or backward as the clock crosses midnight.
pub fn add_minutes(date: NaiveDate, time: NaiveTime, delta: i64) -> (NaiveDate, NaiveTime) {
    let dt = date.and_time(time) + Duration::minutes(delta);
    (dt.date(), truncate_seconds(dt.time()))
}

/// Whole minutes between two wall-clock datetimes (`end - start`).
pub fn span_minutes(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    (end - start).num_minutes()
}

/// Format a time as the `HH:MM` labels used on activity cards.
pub fn format_hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Parse an `HH:MM` string. Seconds are not accepted; the grid never
/// produces them.
pub fn parse_hhmm(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").ok()
}

fn truncate_seconds(time: NaiveTime) -> NaiveTime {
    use chrono::Timelike;
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}
