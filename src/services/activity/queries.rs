use std::collections::BTreeMap;

use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::params;

use super::shared::{format_date, row_to_activity, ACTIVITY_COLUMNS};
use super::ActivityService;
use crate::models::activity::Activity;

impl<'a> ActivityService<'a> {
    /// Every activity of a trip in grid order.
    pub fn by_trip(&self, trip_id: i64) -> Result<Vec<Activity>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM activities
             WHERE trip_id = ?
             ORDER BY start_date ASC, start_time ASC",
            ACTIVITY_COLUMNS
        ))?;

        let activities = stmt
            .query_map([trip_id], row_to_activity)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(activities)
    }

    /// Activities starting on one date, in time order.
    pub fn for_date(&self, trip_id: i64, date: NaiveDate) -> Result<Vec<Activity>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM activities
             WHERE trip_id = ? AND start_date = ?
             ORDER BY start_time ASC",
            ACTIVITY_COLUMNS
        ))?;

        let activities = stmt
            .query_map(params![trip_id, format_date(date)], row_to_activity)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(activities)
    }

    /// Group a trip's activities by ISO start date. The grid renders columns
    /// straight out of this map.
    pub fn by_date(&self, trip_id: i64) -> Result<BTreeMap<String, Vec<Activity>>> {
        let mut grouped: BTreeMap<String, Vec<Activity>> = BTreeMap::new();
        for activity in self.by_trip(trip_id)? {
            grouped
                .entry(format_date(activity.start_date))
                .or_default()
                .push(activity);
        }
        Ok(grouped)
    }

    /// Case-insensitive search over title, location and notes.
    pub fn search(&self, trip_id: i64, query: &str) -> Result<Vec<Activity>> {
        if query.trim().is_empty() {
            return Ok(vec![]);
        }

        let pattern = format!("%{}%", query.to_lowercase());
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM activities
             WHERE trip_id = ?1
               AND (LOWER(title) LIKE ?2
                OR LOWER(COALESCE(location, '')) LIKE ?2
                OR LOWER(COALESCE(notes, '')) LIKE ?2)
             ORDER BY start_date ASC, start_time ASC",
            ACTIVITY_COLUMNS
        ))?;

        let activities = stmt
            .query_map(params![trip_id, pattern], row_to_activity)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(activities)
    }

    /// Count of activities starting on a date; trip boundary removal asks
    /// this before shrinking the range.
    pub fn count_for_date(&self, trip_id: i64, date: NaiveDate) -> Result<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM activities WHERE trip_id = ? AND start_date = ?",
            params![trip_id, format_date(date)],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
