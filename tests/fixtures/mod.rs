// Test fixtures - reusable test data
// Seeds a schema-initialized database with a trip and a realistic itinerary.

use chrono::{NaiveDate, NaiveTime};

use trip_scheduler::models::activity::{Activity, ActivityKind};
use trip_scheduler::models::trip::Trip;
use trip_scheduler::services::activity::ActivityService;
use trip_scheduler::services::database::Database;
use trip_scheduler::services::trip::TripService;

pub fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, day).unwrap()
}

pub fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

/// Opens a database at `path`, initializes the schema and inserts a five-day
/// trip. Returns the database and the trip id.
pub fn seeded_database(path: &str) -> (Database, i64) {
    let db = Database::new(path).expect("Failed to create database");
    db.initialize_schema().expect("Failed to initialize schema");

    let trips = TripService::new(db.connection());
    let trip = trips
        .create(Trip::new("Sul de Minas buying trip", date(2), date(6)).unwrap())
        .expect("Failed to insert trip");
    let trip_id = trip.id.unwrap();

    (db, trip_id)
}

/// A single-day activity at the given slot, persisted immediately.
pub fn persisted_activity(
    db: &Database,
    trip_id: i64,
    title: &str,
    day: u32,
    start: NaiveTime,
    end: NaiveTime,
) -> Activity {
    let service = ActivityService::new(db.connection());
    let activity = Activity::new(title, trip_id, date(day), start, end).unwrap();
    service.create(activity).expect("Failed to insert activity")
}

/// A persisted activity carrying a location, as the travel recalculation
/// expects for city extraction.
pub fn located_activity(
    db: &Database,
    trip_id: i64,
    title: &str,
    location: &str,
    day: u32,
    start: NaiveTime,
    end: NaiveTime,
) -> Activity {
    let service = ActivityService::new(db.connection());
    let mut activity = Activity::new(title, trip_id, date(day), start, end).unwrap();
    activity.location = Some(location.to_string());
    activity.kind = ActivityKind::Meeting;
    service.create(activity).expect("Failed to insert activity")
}
