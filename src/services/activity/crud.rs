use anyhow::{anyhow, Context, Result};
use chrono::Local;
use rusqlite::{self, params};

use super::shared::{format_date, format_time, row_to_activity, ACTIVITY_COLUMNS};
use super::ActivityService;
use crate::models::activity::{Activity, ActivityId};

impl<'a> ActivityService<'a> {
    /// Persist a draft activity. The returned copy carries its assigned
    /// `Persisted` id.
    pub fn create(&self, mut activity: Activity) -> Result<Activity> {
        activity.validate().map_err(|e| anyhow!(e))?;

        let now = Local::now().to_rfc3339();
        self.conn
            .execute(
                "INSERT INTO activities (
                    trip_id, title, description, location, kind, notes, is_confirmed,
                    start_date, end_date, start_time, end_time, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    activity.trip_id,
                    activity.title,
                    activity.description,
                    activity.location,
                    activity.kind.as_str(),
                    activity.notes,
                    activity.is_confirmed as i32,
                    format_date(activity.start_date),
                    format_date(activity.end_date),
                    format_time(activity.start_time),
                    format_time(activity.end_time),
                    &now,
                    &now,
                ],
            )
            .context("Failed to insert activity")?;

        activity.id = ActivityId::Persisted(self.conn.last_insert_rowid());
        activity.created_at = Some(Local::now());
        activity.updated_at = Some(Local::now());
        Ok(activity)
    }

    pub fn get(&self, id: i64) -> Result<Option<Activity>> {
        let result = self.conn.query_row(
            &format!("SELECT {} FROM activities WHERE id = ?", ACTIVITY_COLUMNS),
            [id],
            row_to_activity,
        );

        match result {
            Ok(activity) => Ok(Some(activity)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Update an existing activity. Drafts must go through `create` first.
    pub fn update(&self, activity: &Activity) -> Result<()> {
        let id = activity
            .id
            .row_id()
            .ok_or_else(|| anyhow!("Activity must be persisted before update"))?;
        activity.validate().map_err(|e| anyhow!(e))?;

        let rows_affected = self
            .conn
            .execute(
                "UPDATE activities SET
                    title = ?, description = ?, location = ?, kind = ?, notes = ?,
                    is_confirmed = ?, start_date = ?, end_date = ?, start_time = ?,
                    end_time = ?, updated_at = ?
                 WHERE id = ?",
                params![
                    activity.title,
                    activity.description,
                    activity.location,
                    activity.kind.as_str(),
                    activity.notes,
                    activity.is_confirmed as i32,
                    format_date(activity.start_date),
                    format_date(activity.end_date),
                    format_time(activity.start_time),
                    format_time(activity.end_time),
                    Local::now().to_rfc3339(),
                    id,
                ],
            )
            .context("Failed to update activity")?;

        if rows_affected == 0 {
            return Err(anyhow!("Activity with id {} not found", id));
        }
        Ok(())
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM activities WHERE id = ?", [id])
            .context("Failed to delete activity")?;

        if rows_affected == 0 {
            return Err(anyhow!("Activity with id {} not found", id));
        }
        Ok(())
    }
}
