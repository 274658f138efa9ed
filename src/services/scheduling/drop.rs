//! Drop planning for drag-and-drop of activity cards.
//!
//! Pure hit-testing and arithmetic: given the authoritative activity list,
//! the dragged card and the target `(date, hour)` cell, decide whether the
//! drop is a plain move or a swap with the cell's occupant. Durations are
//! always preserved; application happens at the persistence boundary.

use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::models::activity::{Activity, ActivityId};
use crate::services::observer::{ScheduleEvent, ScheduleObserver};
use crate::utils::date::add_minutes;

/// Target cell of a drop: a day column and the slot's starting time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropTarget {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

/// New temporal anchor for one activity, with its own duration preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct Retiming {
    pub id: ActivityId,
    pub start_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_date: NaiveDate,
    pub end_time: NaiveTime,
}

impl Retiming {
    fn preserve_duration(activity: &Activity, date: NaiveDate, time: NaiveTime) -> Self {
        let (end_date, end_time) = add_minutes(date, time, activity.duration_minutes());
        Self {
            id: activity.id,
            start_date: date,
            start_time: time,
            end_date,
            end_time,
        }
    }
}

/// Outcome of a drop. A swap exchanges the two anchors atomically.
#[derive(Debug, Clone, PartialEq)]
pub enum DropPlan {
    Move(Retiming),
    Swap { dragged: Retiming, occupant: Retiming },
}

impl DropPlan {
    /// Dates whose travel fillers need recalculating after the drop.
    pub fn affected_dates(&self) -> Vec<NaiveDate> {
        let mut dates = match self {
            DropPlan::Move(retiming) => vec![retiming.start_date],
            DropPlan::Swap { dragged, occupant } => {
                vec![dragged.start_date, occupant.start_date]
            }
        };
        dates.dedup();
        dates
    }
}

/// Plan a drop of `dragged_id` onto `target`. Returns `None` when the id is
/// not in the list (a stale drag session).
pub fn plan_drop(
    activities: &[Activity],
    dragged_id: ActivityId,
    target: DropTarget,
    observer: &dyn ScheduleObserver,
) -> Option<DropPlan> {
    let dragged = activities.iter().find(|a| a.id == dragged_id)?;

    let dragged_retiming = Retiming::preserve_duration(dragged, target.date, target.time);

    // Occupancy is matched by starting hour on the target day, mirroring the
    // cell granularity of the grid.
    let occupant = activities.iter().find(|a| {
        a.id != dragged_id
            && a.start_date == target.date
            && a.start_time.hour() == target.time.hour()
    });

    match occupant {
        Some(other) => {
            let occupant_retiming =
                Retiming::preserve_duration(other, dragged.start_date, dragged.start_time);
            observer.on_event(&ScheduleEvent::SwapPlanned {
                dragged: dragged_id,
                occupant: other.id,
            });
            Some(DropPlan::Swap {
                dragged: dragged_retiming,
                occupant: occupant_retiming,
            })
        }
        None => {
            observer.on_event(&ScheduleEvent::MovePlanned {
                activity: dragged_id,
                date: target.date,
                start: target.time,
            });
            Some(DropPlan::Move(dragged_retiming))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::observer::test_support::RecordingObserver;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, day).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn activity(title: &str, day: u32, start: NaiveTime, end: NaiveTime) -> Activity {
        Activity::new(title, 1, d(day), start, end).unwrap()
    }

    #[test]
    fn test_move_preserves_duration_across_days() {
        // 14:00-15:30 on 10-02 dropped on (10-03, 09:00).
        let a = activity("Meeting", 2, t(14, 0), t(15, 30));
        let observer = RecordingObserver::default();
        let plan = plan_drop(
            std::slice::from_ref(&a),
            a.id,
            DropTarget {
                date: d(3),
                time: t(9, 0),
            },
            &observer,
        )
        .unwrap();

        match plan {
            DropPlan::Move(retiming) => {
                assert_eq!(retiming.start_date, d(3));
                assert_eq!(retiming.start_time, t(9, 0));
                assert_eq!(retiming.end_date, d(3));
                assert_eq!(retiming.end_time, t(10, 30));
            }
            other => panic!("expected move, got {:?}", other),
        }
    }

    #[test]
    fn test_move_near_midnight_rolls_end_date() {
        let a = activity("Dinner", 2, t(19, 0), t(21, 30));
        let plan = plan_drop(
            std::slice::from_ref(&a),
            a.id,
            DropTarget {
                date: d(2),
                time: t(22, 0),
            },
            &RecordingObserver::default(),
        )
        .unwrap();

        match plan {
            DropPlan::Move(retiming) => {
                assert_eq!(retiming.end_date, d(3));
                assert_eq!(retiming.end_time, t(0, 30));
            }
            other => panic!("expected move, got {:?}", other),
        }
    }

    #[test]
    fn test_swap_exchanges_anchors_and_keeps_durations() {
        let a = activity("Cupping", 2, t(9, 0), t(10, 30)); // 90 min
        let b = activity("Lunch", 3, t(12, 15), t(13, 0)); // 45 min
        let activities = vec![a.clone(), b.clone()];

        let plan = plan_drop(
            &activities,
            a.id,
            DropTarget {
                date: d(3),
                time: t(12, 0),
            },
            &RecordingObserver::default(),
        )
        .unwrap();

        match plan {
            DropPlan::Swap { dragged, occupant } => {
                assert_eq!(dragged.id, a.id);
                assert_eq!(dragged.start_date, d(3));
                assert_eq!(dragged.start_time, t(12, 0));
                assert_eq!(dragged.end_time, t(13, 30)); // own 90 min kept

                assert_eq!(occupant.id, b.id);
                assert_eq!(occupant.start_date, d(2));
                assert_eq!(occupant.start_time, t(9, 0));
                assert_eq!(occupant.end_time, t(9, 45)); // own 45 min kept
            }
            other => panic!("expected swap, got {:?}", other),
        }
    }

    #[test]
    fn test_drop_on_own_cell_is_a_move() {
        let a = activity("Cupping", 2, t(9, 0), t(10, 0));
        let plan = plan_drop(
            std::slice::from_ref(&a),
            a.id,
            DropTarget {
                date: d(2),
                time: t(9, 0),
            },
            &RecordingObserver::default(),
        )
        .unwrap();
        assert!(matches!(plan, DropPlan::Move(_)));
    }

    #[test]
    fn test_occupancy_matches_by_hour_not_exact_minute() {
        let a = activity("Cupping", 2, t(9, 0), t(10, 0));
        let b = activity("Intro", 3, t(11, 45), t(12, 15));
        let activities = vec![a.clone(), b.clone()];

        let plan = plan_drop(
            &activities,
            a.id,
            DropTarget {
                date: d(3),
                time: t(11, 0),
            },
            &RecordingObserver::default(),
        )
        .unwrap();
        assert!(matches!(plan, DropPlan::Swap { .. }));
    }

    #[test]
    fn test_unknown_id_yields_no_plan() {
        let a = activity("Cupping", 2, t(9, 0), t(10, 0));
        let plan = plan_drop(
            std::slice::from_ref(&a),
            ActivityId::Persisted(999),
            DropTarget {
                date: d(2),
                time: t(9, 0),
            },
            &RecordingObserver::default(),
        );
        assert_eq!(plan, None);
    }

    #[test]
    fn test_affected_dates_deduplicated() {
        let a = activity("Cupping", 2, t(9, 0), t(10, 0));
        let b = activity("Lunch", 2, t(12, 0), t(13, 0));
        let activities = vec![a.clone(), b.clone()];

        let plan = plan_drop(
            &activities,
            a.id,
            DropTarget {
                date: d(2),
                time: t(12, 0),
            },
            &RecordingObserver::default(),
        )
        .unwrap();
        assert_eq!(plan.affected_dates(), vec![d(2)]);
    }
}
