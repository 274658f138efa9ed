//! Travel recalculation after a card lands on a new slot.
//!
//! Produces a proposal, never a write: retime the moved activity, drop the
//! stale travel fillers on the target date, and re-propose segments between
//! the day's consecutive non-travel activities. Callers decide whether to
//! apply the proposal or only surface it.

use chrono::{NaiveDate, NaiveTime};

use crate::models::activity::{Activity, ActivityId, ActivityKind};
use crate::services::observer::{ScheduleEvent, ScheduleObserver};
use crate::utils::date::add_minutes;

use super::estimator::{TravelEstimate, TravelMode, TravelTimeEstimator};
use super::regions::extract_city;

/// Segments only earn a card when the leg is longer than this.
pub const CREATE_THRESHOLD_MINUTES: i64 = 9;

/// Descriptive payload for a proposed travel segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelDetails {
    pub from_location: String,
    pub to_location: String,
    pub minutes: i64,
    pub mode: TravelMode,
}

/// One entry of a travel proposal. `should_create` carries a fully built
/// draft activity; `should_delete` names a stale filler; neither set means a
/// plain retiming of an existing activity.
#[derive(Debug, Clone, PartialEq)]
pub struct TravelUpdate {
    pub activity_id: ActivityId,
    pub new_date: NaiveDate,
    pub new_start: NaiveTime,
    pub new_end_date: NaiveDate,
    pub new_end: NaiveTime,
    pub should_create: bool,
    pub should_delete: bool,
    pub draft: Option<Activity>,
    pub details: Option<TravelDetails>,
}

impl TravelUpdate {
    fn retime(activity: &Activity, date: NaiveDate, start: NaiveTime) -> Self {
        let (end_date, end) = add_minutes(date, start, activity.duration_minutes());
        Self {
            activity_id: activity.id,
            new_date: date,
            new_start: start,
            new_end_date: end_date,
            new_end: end,
            should_create: false,
            should_delete: false,
            draft: None,
            details: None,
        }
    }

    fn delete(activity: &Activity) -> Self {
        Self {
            activity_id: activity.id,
            new_date: activity.start_date,
            new_start: activity.start_time,
            new_end_date: activity.end_date,
            new_end: activity.end_time,
            should_create: false,
            should_delete: true,
            draft: None,
            details: None,
        }
    }
}

/// Recalculate the travel segments of `new_date` after `moved_id` lands at
/// `new_start`. Returns an empty proposal when the moved activity is unknown.
pub fn recalculate(
    activities: &[Activity],
    moved_id: ActivityId,
    new_date: NaiveDate,
    new_start: NaiveTime,
    estimator: &dyn TravelTimeEstimator,
    observer: &dyn ScheduleObserver,
) -> Vec<TravelUpdate> {
    let Some(moved) = activities.iter().find(|a| a.id == moved_id) else {
        return Vec::new();
    };

    let mut updates = vec![TravelUpdate::retime(moved, new_date, new_start)];

    // Stale fillers for the day go regardless of what replaces them.
    for filler in activities
        .iter()
        .filter(|a| a.start_date == new_date && a.is_travel())
    {
        observer.on_event(&ScheduleEvent::TravelRemovalProposed {
            activity: filler.id,
        });
        updates.push(TravelUpdate::delete(filler));
    }

    // The day's non-travel activities with the move already applied.
    let mut day: Vec<Activity> = activities
        .iter()
        .filter(|a| a.start_date == new_date && !a.is_travel() && a.id != moved_id)
        .cloned()
        .collect();
    let mut relocated = moved.clone();
    let duration = relocated.duration_minutes();
    relocated.start_date = new_date;
    relocated.start_time = new_start;
    let (end_date, end_time) = add_minutes(new_date, new_start, duration);
    relocated.end_date = end_date;
    relocated.end_time = end_time;
    day.push(relocated);
    day.sort_by_key(|a| a.start_time);

    for pair in day.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);
        let from_city = extract_city(current.location.as_deref());
        let to_city = extract_city(next.location.as_deref());

        let estimate = estimator.estimate(&from_city, &to_city);
        if estimate.minutes <= CREATE_THRESHOLD_MINUTES {
            continue;
        }

        if let Some(update) = segment_between(current, next, &from_city, &to_city, estimate) {
            observer.on_event(&ScheduleEvent::TravelProposed {
                from_location: from_city,
                to_location: to_city,
                date: new_date,
                minutes: estimate.minutes,
            });
            updates.push(update);
        }
    }

    updates
}

fn segment_between(
    current: &Activity,
    next: &Activity,
    from_city: &str,
    to_city: &str,
    estimate: TravelEstimate,
) -> Option<TravelUpdate> {
    let verb = match estimate.mode {
        TravelMode::Walk => "Walk",
        TravelMode::Drive => "Drive",
    };
    let mut draft = Activity::new(
        format!("{} to {}", verb, to_city),
        current.trip_id,
        current.end_date,
        current.end_time,
        current.end_time,
    )
    .ok()?;
    let (end_date, end_time) = add_minutes(current.end_date, current.end_time, estimate.minutes);
    draft.end_date = end_date;
    draft.end_time = end_time;
    // Short walks still occupy the 15-minute floor on the grid.
    draft.normalize();
    draft.kind = ActivityKind::Travel;
    draft.location = Some(format!("{} → {}", from_city, to_city));
    draft.description = Some(match estimate.mode {
        TravelMode::Walk => format!("Walking between offices in {}", to_city),
        TravelMode::Drive => format!(
            "Travel from {} to {} ({} min drive)",
            from_city, to_city, estimate.minutes
        ),
    });

    Some(TravelUpdate {
        activity_id: draft.id,
        new_date: draft.start_date,
        new_start: draft.start_time,
        new_end_date: draft.end_date,
        new_end: draft.end_time,
        should_create: true,
        should_delete: false,
        details: Some(TravelDetails {
            from_location: from_city.to_string(),
            to_location: to_city.to_string(),
            minutes: estimate.minutes,
            mode: estimate.mode,
        }),
        draft: Some(draft),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::observer::test_support::RecordingObserver;
    use crate::services::travel::estimator::RegionTableEstimator;
    use chrono::{NaiveDate, NaiveTime};
    use pretty_assertions::assert_eq;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, day).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn activity(id: i64, title: &str, day: u32, start: (u32, u32), end: (u32, u32), city: &str) -> Activity {
        let mut a = Activity::new(title, 1, d(day), t(start.0, start.1), t(end.0, end.1)).unwrap();
        a.id = ActivityId::Persisted(id);
        a.location = Some(city.to_string());
        a
    }

    fn recalc(activities: &[Activity], moved: i64, day: u32, start: (u32, u32)) -> Vec<TravelUpdate> {
        recalculate(
            activities,
            ActivityId::Persisted(moved),
            d(day),
            t(start.0, start.1),
            &RegionTableEstimator,
            &RecordingObserver::default(),
        )
    }

    #[test]
    fn test_unknown_activity_yields_empty_proposal() {
        assert!(recalc(&[], 99, 2, (9, 0)).is_empty());
    }

    #[test]
    fn test_retiming_preserves_duration() {
        let activities = [activity(1, "Cupping", 2, (14, 0), (15, 30), "Santos")];
        let updates = recalc(&activities, 1, 3, (9, 0));
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].new_date, d(3));
        assert_eq!(updates[0].new_start, t(9, 0));
        assert_eq!(updates[0].new_end, t(10, 30));
        assert!(!updates[0].should_create);
        assert!(!updates[0].should_delete);
    }

    #[test]
    fn test_stale_fillers_are_deleted() {
        let mut filler = activity(2, "Drive to Varginha", 3, (12, 0), (16, 0), "Santos → Varginha");
        filler.kind = ActivityKind::Travel;
        let activities = [
            activity(1, "Cupping", 2, (14, 0), (15, 30), "Santos"),
            filler,
        ];
        let updates = recalc(&activities, 1, 3, (9, 0));
        assert!(updates.iter().any(|u| u.should_delete && u.activity_id == ActivityId::Persisted(2)));
    }

    #[test]
    fn test_segment_proposed_between_distant_cities() {
        let activities = [
            activity(1, "Port visit", 3, (9, 0), (11, 0), "Santos"),
            activity(2, "Farm tour", 3, (16, 0), (18, 0), "Varginha"),
        ];
        let updates = recalc(&activities, 1, 3, (9, 0));

        let segment = updates.iter().find(|u| u.should_create).unwrap();
        let details = segment.details.as_ref().unwrap();
        assert_eq!(details.minutes, 240);
        assert_eq!(details.mode, TravelMode::Drive);

        let draft = segment.draft.as_ref().unwrap();
        assert_eq!(draft.title, "Drive to Varginha");
        assert_eq!(draft.location.as_deref(), Some("Santos → Varginha"));
        assert_eq!(draft.start_time, t(11, 0));
        assert_eq!(draft.end_time, t(15, 0));
        assert!(draft.id.is_draft());
        assert_eq!(draft.kind, ActivityKind::Travel);
    }

    #[test]
    fn test_same_city_leg_becomes_a_walk_segment() {
        // 10 minutes clears the 9-minute threshold and stays walkable.
        let activities = [
            activity(1, "Exporter A", 3, (9, 0), (10, 0), "Santos"),
            activity(2, "Exporter B", 3, (11, 0), (12, 0), "Santos"),
        ];
        let updates = recalc(&activities, 1, 3, (9, 0));
        let segment = updates.iter().find(|u| u.should_create).unwrap();
        assert_eq!(segment.details.as_ref().unwrap().mode, TravelMode::Walk);
        assert!(segment.draft.as_ref().unwrap().title.starts_with("Walk to"));
    }

    #[test]
    fn test_nine_minute_leg_stays_below_creation_threshold() {
        use crate::services::travel::estimator::MockTravelTimeEstimator;

        let mut estimator = MockTravelTimeEstimator::new();
        estimator.expect_estimate().returning(|_, _| TravelEstimate {
            minutes: CREATE_THRESHOLD_MINUTES,
            mode: TravelMode::Walk,
        });

        let activities = [
            activity(1, "Exporter A", 3, (9, 0), (10, 0), "Santos"),
            activity(2, "Exporter B", 3, (11, 0), (12, 0), "Varginha"),
        ];
        let updates = recalculate(
            &activities,
            ActivityId::Persisted(1),
            d(3),
            t(9, 0),
            &estimator,
            &RecordingObserver::default(),
        );
        assert!(updates.iter().all(|u| !u.should_create));
    }

    #[test]
    fn test_moved_activity_slots_into_day_order() {
        let activities = [
            activity(1, "Morning meeting", 3, (8, 0), (9, 0), "Santos"),
            activity(2, "Cupping", 2, (14, 0), (15, 0), "Varginha"),
            activity(3, "Dinner", 3, (19, 0), (21, 0), "Santos"),
        ];
        let updates = recalc(&activities, 2, 3, (12, 0));

        // Segments surround the relocated cupping: Santos → Varginha and
        // Varginha → Santos.
        let created: Vec<_> = updates.iter().filter(|u| u.should_create).collect();
        assert_eq!(created.len(), 2);
        assert_eq!(
            created[0].details.as_ref().unwrap().to_location,
            "Varginha"
        );
        assert_eq!(created[1].details.as_ref().unwrap().to_location, "Santos");
    }

    #[test]
    fn test_observer_sees_proposals_and_removals() {
        let observer = RecordingObserver::default();
        let mut filler = activity(9, "Walk to Guaruja", 3, (10, 0), (10, 12), "Santos → Guaruja");
        filler.kind = ActivityKind::Travel;
        let activities = [
            activity(1, "Port visit", 3, (9, 0), (11, 0), "Santos"),
            activity(2, "Farm tour", 3, (16, 0), (18, 0), "Varginha"),
            filler,
        ];
        recalculate(
            &activities,
            ActivityId::Persisted(1),
            d(3),
            t(9, 0),
            &RegionTableEstimator,
            &observer,
        );
        let events = observer.events.borrow();
        assert!(events
            .iter()
            .any(|e| matches!(e, ScheduleEvent::TravelRemovalProposed { .. })));
        assert!(events
            .iter()
            .any(|e| matches!(e, ScheduleEvent::TravelProposed { .. })));
    }
}
