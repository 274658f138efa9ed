// Property-based tests for the scheduling arithmetic.
// Random slots, durations and drag distances must never break the grid's
// ordering and granularity invariants.

use chrono::{Duration, NaiveDate, NaiveTime};
use proptest::prelude::*;

use trip_scheduler::models::activity::{Activity, MIN_DURATION_MINUTES};
use trip_scheduler::models::grid::GridBounds;
use trip_scheduler::services::observer::NullObserver;
use trip_scheduler::services::placement::compute_placement;
use trip_scheduler::services::scheduling::drop::{plan_drop, DropPlan, DropTarget};
use trip_scheduler::services::scheduling::resize::{apply_resize, ResizeEdge, TimeSpan};

fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, day).unwrap()
}

fn t(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

fn quarter() -> impl Strategy<Value = u32> {
    prop::sample::select(vec![0u32, 15, 30, 45])
}

fn edge() -> impl Strategy<Value = ResizeEdge> {
    prop_oneof![Just(ResizeEdge::Start), Just(ResizeEdge::End)]
}

proptest! {
    /// Property: any single-day activity starting inside the visible window
    /// gets a card, and its geometry matches the slot arithmetic.
    #[test]
    fn prop_in_window_activity_always_renders(
        start_hour in 6u32..22,
        start_minute in quarter(),
        duration_steps in 1i64..=8,
    ) {
        let start = t(start_hour, start_minute);
        let end_at = d(2).and_time(start) + Duration::minutes(duration_steps * 15);
        prop_assume!(end_at.date() == d(2));

        let activity = Activity::new("Cupping", 1, d(2), start, end_at.time()).unwrap();
        let placement = compute_placement(&activity, d(2), &GridBounds::default())
            .expect("in-window activity must render");

        prop_assert_eq!(placement.start_hour, start_hour);
        prop_assert_eq!(placement.height_units as i64, duration_steps);
        prop_assert!(placement.top_offset >= 0.0);
        prop_assert!(placement.top_offset < 60.0);
    }

    /// Property: no resize, however far the pointer travels in either
    /// direction, may produce an inverted or sub-minimum span.
    #[test]
    fn prop_resize_preserves_span_ordering(
        start_hour in 6u32..22,
        start_minute in quarter(),
        duration_steps in 1i64..=16,
        steps in -400i64..=400,
        edge in edge(),
    ) {
        let start = t(start_hour, start_minute);
        let end_at = d(5).and_time(start) + Duration::minutes(duration_steps * 15);
        let span = TimeSpan {
            start_date: d(5),
            start_time: start,
            end_date: end_at.date(),
            end_time: end_at.time(),
        };

        let result = apply_resize(
            &span,
            Activity::new("Cupping", 1, d(5), start, end_at.time()).unwrap().id,
            edge,
            steps,
            &GridBounds::default(),
            &NullObserver,
        );

        prop_assert!(result.start_at() < result.end_at());
        prop_assert!(
            result.end_at() - result.start_at() >= Duration::minutes(MIN_DURATION_MINUTES)
        );
        prop_assert!(result.end_date >= result.start_date);
    }

    /// Property: a drop never changes any activity's duration, whether it
    /// resolves to a move or a swap.
    #[test]
    fn prop_drop_preserves_durations(
        target_day in 2u32..=6,
        target_hour in 6u32..22,
        occupant_minute in quarter(),
        with_occupant in any::<bool>(),
    ) {
        let dragged = Activity::new("Cupping", 1, d(3), t(9, 0), t(10, 30)).unwrap();
        let mut activities = vec![dragged.clone()];
        if with_occupant {
            let occupant_start = t(target_hour, occupant_minute);
            let occupant_end =
                d(target_day).and_time(occupant_start) + Duration::minutes(45);
            let occupant = Activity::builder()
                .title("Lunch")
                .trip_id(1)
                .start_date(d(target_day))
                .end_date(occupant_end.date())
                .start_time(occupant_start)
                .end_time(occupant_end.time())
                .build()
                .unwrap();
            activities.push(occupant);
        }

        let plan = plan_drop(
            &activities,
            dragged.id,
            DropTarget { date: d(target_day), time: t(target_hour, 0) },
            &NullObserver,
        )
        .expect("dragged id is in the list");

        match plan {
            DropPlan::Move(retiming) => {
                let duration = retiming.end_date.and_time(retiming.end_time)
                    - retiming.start_date.and_time(retiming.start_time);
                prop_assert_eq!(duration, Duration::minutes(90));
            }
            DropPlan::Swap { dragged: moved, occupant } => {
                let dragged_duration = moved.end_date.and_time(moved.end_time)
                    - moved.start_date.and_time(moved.start_time);
                prop_assert_eq!(dragged_duration, Duration::minutes(90));

                let occupant_duration = occupant.end_date.and_time(occupant.end_time)
                    - occupant.start_date.and_time(occupant.start_time);
                prop_assert_eq!(occupant_duration, Duration::minutes(45));

                // The occupant inherits the dragged card's old anchor.
                prop_assert_eq!(occupant.start_date, d(3));
                prop_assert_eq!(occupant.start_time, t(9, 0));
            }
        }
    }

    /// Property: normalization is idempotent and always lands on a valid
    /// record regardless of how the end was mangled.
    #[test]
    fn prop_normalize_is_idempotent(
        end_day in 1u32..=9,
        end_hour in 0u32..24,
        end_minute in quarter(),
    ) {
        let mut activity = Activity::new("Cupping", 1, d(5), t(9, 0), t(10, 0)).unwrap();
        activity.end_date = d(end_day);
        activity.end_time = t(end_hour, end_minute);

        activity.normalize();
        prop_assert!(activity.validate().is_ok());

        let once = activity.clone();
        activity.normalize();
        prop_assert_eq!(activity, once);
    }
}
