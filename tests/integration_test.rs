// Integration tests for database persistence and the transactional
// scheduling operations that span several writes.

mod fixtures;

use serial_test::serial;
use std::path::PathBuf;

use trip_scheduler::models::activity::ActivityKind;
use trip_scheduler::models::participant::AttendeeRef;
use trip_scheduler::services::activity::ActivityService;
use trip_scheduler::services::database::Database;
use trip_scheduler::services::observer::NullObserver;
use trip_scheduler::services::scheduling::drop::{plan_drop, DropPlan, DropTarget};
use trip_scheduler::services::scheduling::split::{build_split, SplitGroup};
use trip_scheduler::services::settings::SettingsService;
use trip_scheduler::services::travel::{recalculate, RegionTableEstimator};
use trip_scheduler::services::trip::TripService;

use fixtures::{date, located_activity, persisted_activity, seeded_database, time};

fn remove_if_present(path: &PathBuf) {
    if path.exists() {
        std::fs::remove_file(path).ok();
    }
}

#[test]
#[serial]
fn test_settings_persistence() {
    let test_db_path = PathBuf::from("test_settings.db");
    remove_if_present(&test_db_path);

    let (db, _trip_id) = seeded_database(test_db_path.to_str().unwrap());
    let settings_service = SettingsService::new(&db);

    let mut settings = settings_service.get().expect("Failed to get settings");
    assert_eq!(settings.day_start_hour, 6);
    assert_eq!(settings.day_end_hour, 22);
    assert_eq!(settings.resize_debounce_ms, 300);
    assert!(!settings.auto_apply_travel);
    assert_eq!(settings.theme, "light");

    settings.day_start_hour = 8;
    settings.day_end_hour = 20;
    settings.auto_apply_travel = true;
    settings.theme = "dark".to_string();
    settings_service
        .update(&settings)
        .expect("Failed to update settings");

    let loaded = settings_service.get().expect("Failed to load settings");
    assert_eq!(loaded.day_start_hour, 8);
    assert_eq!(loaded.day_end_hour, 20);
    assert!(loaded.auto_apply_travel);
    assert_eq!(loaded.theme, "dark");

    remove_if_present(&test_db_path);
}

#[test]
#[serial]
fn test_settings_survive_reopen() {
    let test_db_path = PathBuf::from("test_lifecycle.db");
    remove_if_present(&test_db_path);

    // First launch: the user widens the grid window.
    {
        let (db, _trip_id) = seeded_database(test_db_path.to_str().unwrap());
        let settings_service = SettingsService::new(&db);
        let mut settings = settings_service.get().expect("Failed to get settings");
        settings.day_start_hour = 5;
        settings_service
            .update(&settings)
            .expect("Failed to save settings");
    }

    // Second launch on the same file.
    {
        let db = Database::new(test_db_path.to_str().unwrap()).expect("Failed to open database");
        let settings_service = SettingsService::new(&db);
        let settings = settings_service.get().expect("Failed to load settings");
        assert_eq!(settings.day_start_hour, 5, "Settings should persist across restarts");
    }

    remove_if_present(&test_db_path);
}

#[test]
#[serial]
fn test_swap_writes_both_activities_atomically() {
    let test_db_path = PathBuf::from("test_swap.db");
    remove_if_present(&test_db_path);

    let (db, trip_id) = seeded_database(test_db_path.to_str().unwrap());
    let cupping = persisted_activity(&db, trip_id, "Cupping", 2, time(9, 0), time(10, 30));
    let lunch = persisted_activity(&db, trip_id, "Lunch", 3, time(12, 0), time(13, 0));

    let service = ActivityService::new(db.connection());
    let activities = service.by_trip(trip_id).unwrap();

    let plan = plan_drop(
        &activities,
        cupping.id,
        DropTarget {
            date: date(3),
            time: time(12, 0),
        },
        &NullObserver,
    )
    .expect("Drop should resolve against a known activity");
    assert!(matches!(plan, DropPlan::Swap { .. }));

    service.apply_drop(&plan).expect("Swap should persist");

    let moved_cupping = service.get(cupping.id.row_id().unwrap()).unwrap().unwrap();
    assert_eq!(moved_cupping.start_date, date(3));
    assert_eq!(moved_cupping.start_time, time(12, 0));
    assert_eq!(moved_cupping.end_time, time(13, 30)); // own 90 minutes kept

    let moved_lunch = service.get(lunch.id.row_id().unwrap()).unwrap().unwrap();
    assert_eq!(moved_lunch.start_date, date(2));
    assert_eq!(moved_lunch.start_time, time(9, 0));
    assert_eq!(moved_lunch.end_time, time(10, 0)); // own 60 minutes kept

    remove_if_present(&test_db_path);
}

#[test]
#[serial]
fn test_split_replaces_original_in_one_transaction() {
    let test_db_path = PathBuf::from("test_split.db");
    remove_if_present(&test_db_path);

    let (db, trip_id) = seeded_database(test_db_path.to_str().unwrap());
    let meetings = located_activity(
        &db,
        trip_id,
        "Exporter meetings",
        "Santos",
        2,
        time(9, 0),
        time(12, 0),
    );

    let mut group_a = SplitGroup::seeded(&meetings, "Group A");
    let mut group_b = SplitGroup::seeded(&meetings, "Group B");
    group_a.assign(AttendeeRef::Company(1));
    group_b.assign(AttendeeRef::Participant(2));

    let plan = build_split(&meetings, &group_a, &group_b).expect("Split should validate");

    let service = ActivityService::new(db.connection());
    let replacements = service.apply_split(&plan).expect("Split should persist");

    assert!(replacements.iter().all(|a| !a.id.is_draft()));
    assert_eq!(
        service.get(meetings.id.row_id().unwrap()).unwrap(),
        None,
        "The original is deleted in the same transaction"
    );

    let remaining = service.by_trip(trip_id).unwrap();
    assert_eq!(remaining.len(), 2);
    assert!(remaining
        .iter()
        .any(|a| a.title == "Exporter meetings - Group A"));
    assert!(remaining
        .iter()
        .any(|a| a.title == "Exporter meetings - Group B"));

    remove_if_present(&test_db_path);
}

#[test]
#[serial]
fn test_travel_proposal_round_trip() {
    let test_db_path = PathBuf::from("test_travel.db");
    remove_if_present(&test_db_path);

    let (db, trip_id) = seeded_database(test_db_path.to_str().unwrap());
    let santos = located_activity(
        &db,
        trip_id,
        "Port inspection",
        "Santos",
        2,
        time(8, 0),
        time(9, 0),
    );
    let varginha = located_activity(
        &db,
        trip_id,
        "Farm visit",
        "Varginha",
        3,
        time(14, 0),
        time(16, 0),
    );

    let service = ActivityService::new(db.connection());
    let activities = service.by_trip(trip_id).unwrap();

    // Moving the farm visit onto the Santos day forces an inter-region leg.
    let updates = recalculate(
        &activities,
        varginha.id,
        date(2),
        time(14, 0),
        &RegionTableEstimator,
        &NullObserver,
    );
    assert!(
        updates.iter().any(|u| u.should_create),
        "Santos to Varginha is far above the creation threshold"
    );

    service
        .apply_travel_updates(&updates)
        .expect("Proposal should apply");

    let after = service.for_date(trip_id, date(2)).unwrap();
    let moved = after.iter().find(|a| a.id == varginha.id).unwrap();
    assert_eq!(moved.start_time, time(14, 0));

    let filler = after
        .iter()
        .find(|a| a.kind == ActivityKind::Travel)
        .expect("A travel filler card was created");
    assert!(filler.title.starts_with("Drive to"));
    assert!(!filler.id.is_draft());

    // Re-running the recalculation proposes removing the now-stale filler
    // before re-proposing the leg.
    let activities = service.by_trip(trip_id).unwrap();
    let updates = recalculate(
        &activities,
        santos.id,
        date(2),
        time(8, 0),
        &RegionTableEstimator,
        &NullObserver,
    );
    assert!(updates
        .iter()
        .any(|u| u.should_delete && u.activity_id == filler.id));

    remove_if_present(&test_db_path);
}

#[test]
#[serial]
fn test_boundary_day_removal_refuses_while_occupied() {
    let test_db_path = PathBuf::from("test_boundary.db");
    remove_if_present(&test_db_path);

    let (db, trip_id) = seeded_database(test_db_path.to_str().unwrap());
    let breakfast = persisted_activity(&db, trip_id, "Breakfast", 2, time(7, 0), time(8, 0));

    let trips = TripService::new(db.connection());
    assert!(
        trips.remove_first_day(trip_id).is_err(),
        "The first day still carries an activity"
    );
    let untouched = trips.get(trip_id).unwrap().unwrap();
    assert_eq!(untouched.start_date, date(2));

    let service = ActivityService::new(db.connection());
    service.delete(breakfast.id.row_id().unwrap()).unwrap();

    let trimmed = trips.remove_first_day(trip_id).unwrap();
    assert_eq!(trimmed.start_date, date(3));

    remove_if_present(&test_db_path);
}
