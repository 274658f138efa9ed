//! Trip persistence and boundary management. Extending a trip adds a day
//! column at either end; removing one refuses while the boundary day still
//! has activities so the host deletes or moves them first.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Duration, Local, NaiveDate};
use rusqlite::{self, params, Connection, Row};

use crate::models::trip::Trip;
use crate::services::activity::ActivityService;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Which end of the trip range a boundary operation touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Before,
    After,
}

pub struct TripService<'a> {
    conn: &'a Connection,
}

impl<'a> TripService<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn create(&self, mut trip: Trip) -> Result<Trip> {
        let now = Local::now().to_rfc3339();
        self.conn
            .execute(
                "INSERT INTO trips (name, start_date, end_date, created_at, updated_at)
                 VALUES (?, ?, ?, ?, ?)",
                params![
                    trip.name,
                    trip.start_date.format(DATE_FORMAT).to_string(),
                    trip.end_date.format(DATE_FORMAT).to_string(),
                    &now,
                    &now,
                ],
            )
            .context("Failed to insert trip")?;

        trip.id = Some(self.conn.last_insert_rowid());
        trip.created_at = Some(Local::now());
        trip.updated_at = Some(Local::now());
        Ok(trip)
    }

    pub fn get(&self, id: i64) -> Result<Option<Trip>> {
        let result = self.conn.query_row(
            "SELECT id, name, start_date, end_date, created_at, updated_at
             FROM trips WHERE id = ?",
            [id],
            row_to_trip,
        );

        match result {
            Ok(trip) => Ok(Some(trip)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn list_all(&self) -> Result<Vec<Trip>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, start_date, end_date, created_at, updated_at
             FROM trips ORDER BY start_date ASC",
        )?;
        let trips = stmt
            .query_map([], row_to_trip)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(trips)
    }

    pub fn update(&self, trip: &Trip) -> Result<()> {
        let id = trip
            .id
            .ok_or_else(|| anyhow!("Trip ID is required for update"))?;

        let rows_affected = self
            .conn
            .execute(
                "UPDATE trips SET name = ?, start_date = ?, end_date = ?, updated_at = ?
                 WHERE id = ?",
                params![
                    trip.name,
                    trip.start_date.format(DATE_FORMAT).to_string(),
                    trip.end_date.format(DATE_FORMAT).to_string(),
                    Local::now().to_rfc3339(),
                    id,
                ],
            )
            .context("Failed to update trip")?;

        if rows_affected == 0 {
            return Err(anyhow!("Trip with id {} not found", id));
        }
        Ok(())
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM trips WHERE id = ?", [id])
            .context("Failed to delete trip")?;

        if rows_affected == 0 {
            return Err(anyhow!("Trip with id {} not found", id));
        }
        Ok(())
    }

    /// Add one day at the chosen end. Returns the updated trip.
    pub fn extend(&self, id: i64, direction: Direction) -> Result<Trip> {
        let mut trip = self
            .get(id)?
            .ok_or_else(|| anyhow!("Trip with id {} not found", id))?;

        match direction {
            Direction::Before => trip.start_date -= Duration::days(1),
            Direction::After => trip.end_date += Duration::days(1),
        }
        self.update(&trip)?;
        Ok(trip)
    }

    /// Drop the first day of the range. Fails while it still has activities.
    pub fn remove_first_day(&self, id: i64) -> Result<Trip> {
        self.remove_boundary_day(id, Direction::Before)
    }

    /// Drop the last day of the range. Fails while it still has activities.
    pub fn remove_last_day(&self, id: i64) -> Result<Trip> {
        self.remove_boundary_day(id, Direction::After)
    }

    fn remove_boundary_day(&self, id: i64, direction: Direction) -> Result<Trip> {
        let mut trip = self
            .get(id)?
            .ok_or_else(|| anyhow!("Trip with id {} not found", id))?;
        if trip.day_count() <= 1 {
            return Err(anyhow!("Trip must keep at least one day"));
        }

        let boundary = match direction {
            Direction::Before => trip.start_date,
            Direction::After => trip.end_date,
        };
        let activities = ActivityService::new(self.conn).count_for_date(id, boundary)?;
        if activities > 0 {
            return Err(anyhow!(
                "Cannot remove {}: {} activities still scheduled",
                boundary,
                activities
            ));
        }

        match direction {
            Direction::Before => trip.start_date += Duration::days(1),
            Direction::After => trip.end_date -= Duration::days(1),
        }
        self.update(&trip)?;
        Ok(trip)
    }
}

fn row_to_trip(row: &Row<'_>) -> rusqlite::Result<Trip> {
    let parse_date = |value: String| {
        NaiveDate::parse_from_str(&value, DATE_FORMAT)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
    };
    let parse_stamp = |value: String| {
        DateTime::parse_from_rfc3339(&value)
            .map(|dt| dt.with_timezone(&Local))
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
    };

    Ok(Trip {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        start_date: parse_date(row.get(2)?)?,
        end_date: parse_date(row.get(3)?)?,
        created_at: Some(parse_stamp(row.get(4)?)?),
        updated_at: Some(parse_stamp(row.get(5)?)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::activity::Activity;
    use crate::services::database::Database;
    use chrono::NaiveTime;
    use pretty_assertions::assert_eq;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, day).unwrap()
    }

    fn setup_test_db() -> Database {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();
        db
    }

    fn sample_trip(service: &TripService<'_>) -> Trip {
        service
            .create(Trip::new("Sul de Minas buying trip", d(2), d(6)).unwrap())
            .unwrap()
    }

    #[test]
    fn test_create_and_get_trip() {
        let db = setup_test_db();
        let service = TripService::new(db.connection());
        let trip = sample_trip(&service);

        let fetched = service.get(trip.id.unwrap()).unwrap().unwrap();
        assert_eq!(fetched.name, "Sul de Minas buying trip");
        assert_eq!(fetched.start_date, d(2));
        assert_eq!(fetched.day_count(), 5);
    }

    #[test]
    fn test_extend_in_both_directions() {
        let db = setup_test_db();
        let service = TripService::new(db.connection());
        let trip = sample_trip(&service);
        let id = trip.id.unwrap();

        let extended = service.extend(id, Direction::Before).unwrap();
        assert_eq!(extended.start_date, d(1));
        let extended = service.extend(id, Direction::After).unwrap();
        assert_eq!(extended.end_date, d(7));
        assert_eq!(extended.day_count(), 7);
    }

    #[test]
    fn test_remove_empty_boundary_days() {
        let db = setup_test_db();
        let service = TripService::new(db.connection());
        let trip = sample_trip(&service);
        let id = trip.id.unwrap();

        let trimmed = service.remove_first_day(id).unwrap();
        assert_eq!(trimmed.start_date, d(3));
        let trimmed = service.remove_last_day(id).unwrap();
        assert_eq!(trimmed.end_date, d(5));
    }

    #[test]
    fn test_remove_day_with_activities_fails() {
        let db = setup_test_db();
        let service = TripService::new(db.connection());
        let trip = sample_trip(&service);
        let id = trip.id.unwrap();

        ActivityService::new(db.connection())
            .create(
                Activity::new(
                    "Arrival",
                    id,
                    d(2),
                    NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
                    NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
                )
                .unwrap(),
            )
            .unwrap();

        assert!(service.remove_first_day(id).is_err());
        // The range is untouched after the refusal.
        assert_eq!(service.get(id).unwrap().unwrap().start_date, d(2));
    }

    #[test]
    fn test_trip_cannot_shrink_to_nothing() {
        let db = setup_test_db();
        let service = TripService::new(db.connection());
        let trip = service
            .create(Trip::new("Day trip", d(2), d(2)).unwrap())
            .unwrap();
        assert!(service.remove_last_day(trip.id.unwrap()).is_err());
    }

    #[test]
    fn test_deleting_trip_cascades_to_activities() {
        let db = setup_test_db();
        let service = TripService::new(db.connection());
        let trip = sample_trip(&service);
        let id = trip.id.unwrap();

        let activities = ActivityService::new(db.connection());
        activities
            .create(
                Activity::new(
                    "Arrival",
                    id,
                    d(2),
                    NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
                    NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
                )
                .unwrap(),
            )
            .unwrap();

        service.delete(id).unwrap();
        assert!(activities.by_trip(id).unwrap().is_empty());
    }
}
