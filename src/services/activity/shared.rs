use chrono::{DateTime, Local, NaiveDate, NaiveTime};
use rusqlite::{self, Result, Row};

use crate::models::activity::{Activity, ActivityId, ActivityKind};

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
pub(crate) const TIME_FORMAT: &str = "%H:%M";

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

pub(crate) fn parse_date(value: String) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&value, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

pub(crate) fn parse_time(value: String) -> Result<NaiveTime> {
    // Seconds crept into a few early rows; accept both shapes.
    NaiveTime::parse_from_str(&value, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(&value, "%H:%M:%S"))
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

pub(crate) fn to_local_datetime(value: String) -> Result<DateTime<Local>> {
    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Local))
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

/// Map a full `SELECT *`-ordered activities row. Column order matches the
/// SELECT list in `crud.rs` and `queries.rs`.
pub(crate) fn row_to_activity(row: &Row<'_>) -> Result<Activity> {
    Ok(Activity {
        id: ActivityId::Persisted(row.get(0)?),
        trip_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        location: row.get(4)?,
        kind: ActivityKind::parse(&row.get::<_, String>(5)?),
        notes: row.get(6)?,
        is_confirmed: row.get::<_, i32>(7)? != 0,
        start_date: parse_date(row.get(8)?)?,
        end_date: parse_date(row.get(9)?)?,
        start_time: parse_time(row.get(10)?)?,
        end_time: parse_time(row.get(11)?)?,
        created_at: Some(to_local_datetime(row.get(12)?)?),
        updated_at: Some(to_local_datetime(row.get(13)?)?),
    })
}

pub(crate) const ACTIVITY_COLUMNS: &str = "id, trip_id, title, description, location, kind, notes, is_confirmed,
     start_date, end_date, start_time, end_time, created_at, updated_at";
