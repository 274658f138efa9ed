//! Structured scheduling diagnostics.
//!
//! Every scheduling decision the host might want to explain (why a card was
//! not rendered, why a travel segment was or was not inserted, what a drop
//! resolved to) is reported through `ScheduleObserver` instead of ad hoc
//! console logging. The app installs one observer; tests install their own.

use chrono::{NaiveDate, NaiveTime};

use crate::models::activity::ActivityId;

/// A single scheduling decision.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleEvent {
    /// An activity was not rendered on a display date.
    PlacementSkipped {
        activity: ActivityId,
        date: NaiveDate,
        reason: String,
    },
    /// A drop resolved to a plain move.
    MovePlanned {
        activity: ActivityId,
        date: NaiveDate,
        start: NaiveTime,
    },
    /// A drop resolved to a swap with the cell occupant.
    SwapPlanned {
        dragged: ActivityId,
        occupant: ActivityId,
    },
    /// A resize edit was clamped to keep the span valid.
    ResizeClamped { activity: ActivityId, reason: String },
    /// The travel recalculation proposed inserting a filler segment.
    TravelProposed {
        from_location: String,
        to_location: String,
        date: NaiveDate,
        minutes: i64,
    },
    /// The travel recalculation proposed removing a stale filler.
    TravelRemovalProposed { activity: ActivityId },
    /// A split replaced one activity with two derived ones.
    SplitApplied {
        original: ActivityId,
        group_a: String,
        group_b: String,
    },
}

/// Host-subscribable sink for scheduling decisions.
pub trait ScheduleObserver {
    fn on_event(&self, event: &ScheduleEvent);
}

/// Observer that forwards decisions to the `log` crate.
#[derive(Default)]
pub struct LogObserver;

impl ScheduleObserver for LogObserver {
    fn on_event(&self, event: &ScheduleEvent) {
        match event {
            ScheduleEvent::PlacementSkipped {
                activity,
                date,
                reason,
            } => log::debug!("placement: hid {} on {}: {}", activity, date, reason),
            ScheduleEvent::MovePlanned {
                activity,
                date,
                start,
            } => log::info!("drop: move {} to {} {}", activity, date, start),
            ScheduleEvent::SwapPlanned { dragged, occupant } => {
                log::info!("drop: swap {} with {}", dragged, occupant)
            }
            ScheduleEvent::ResizeClamped { activity, reason } => {
                log::debug!("resize: clamped {}: {}", activity, reason)
            }
            ScheduleEvent::TravelProposed {
                from_location,
                to_location,
                date,
                minutes,
            } => log::info!(
                "travel: propose {} -> {} on {} ({} min)",
                from_location,
                to_location,
                date,
                minutes
            ),
            ScheduleEvent::TravelRemovalProposed { activity } => {
                log::info!("travel: propose removing {}", activity)
            }
            ScheduleEvent::SplitApplied {
                original,
                group_a,
                group_b,
            } => log::info!(
                "split: replaced {} with '{}' and '{}'",
                original,
                group_a,
                group_b
            ),
        }
    }
}

/// Observer that drops every event. Used where diagnostics are not wanted.
#[derive(Default)]
pub struct NullObserver;

impl ScheduleObserver for NullObserver {
    fn on_event(&self, _event: &ScheduleEvent) {}
}
