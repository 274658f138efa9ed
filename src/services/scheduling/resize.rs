//! Resize arithmetic for activity cards.
//!
//! Vertical pointer movement converts to signed 15-minute steps. Dragging an
//! edge past the visible window rolls it onto the neighbouring day: past the
//! closing hour wraps to the next day at `minutes - 24h` (clamped to 00:00
//! when that lands before midnight), past the opening hour wraps to the
//! previous day at `minutes + 24h` (clamped to 23:45 when that lands past
//! midnight). The wrap repeats so one session can cross several days.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::activity::{Activity, ActivityId, MIN_DURATION_MINUTES};
use crate::models::grid::GridBounds;
use crate::services::observer::{ScheduleEvent, ScheduleObserver};
use crate::utils::date::{minutes_since_midnight, time_from_minutes, MINUTES_PER_DAY};

/// One resize step is 15 minutes of activity time...
pub const STEP_MINUTES: i64 = 15;
/// ...and 15 pixels of pointer travel.
pub const STEP_PIXELS: f32 = 15.0;

/// Which boundary of the activity the handle adjusts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    /// Top handle.
    Start,
    /// Bottom handle.
    End,
}

/// The temporal tuple a resize session edits and emits on every qualifying
/// pointer move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSpan {
    pub start_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_date: NaiveDate,
    pub end_time: NaiveTime,
}

impl TimeSpan {
    pub fn of(activity: &Activity) -> Self {
        Self {
            start_date: activity.start_date,
            start_time: activity.start_time,
            end_date: activity.end_date,
            end_time: activity.end_time,
        }
    }

    pub fn start_at(&self) -> NaiveDateTime {
        self.start_date.and_time(self.start_time)
    }

    pub fn end_at(&self) -> NaiveDateTime {
        self.end_date.and_time(self.end_time)
    }
}

/// Signed number of 15-minute steps for a vertical pointer delta.
pub fn steps_from_drag(delta_y: f32) -> i64 {
    (delta_y / STEP_PIXELS).round() as i64
}

/// Apply `steps` to the chosen edge of `span`, enforcing the ordering
/// invariant afterwards: the untouched boundary is pushed to restore a
/// strictly positive span of at least 15 minutes, and `end_date` never
/// precedes `start_date`.
pub fn apply_resize(
    span: &TimeSpan,
    activity_id: ActivityId,
    edge: ResizeEdge,
    steps: i64,
    bounds: &GridBounds,
    observer: &dyn ScheduleObserver,
) -> TimeSpan {
    if steps == 0 {
        return span.clone();
    }

    let (date, time) = match edge {
        ResizeEdge::Start => (span.start_date, span.start_time),
        ResizeEdge::End => (span.end_date, span.end_time),
    };
    let (new_date, new_time) = wrap_edge(date, time, steps, bounds);

    let mut result = span.clone();
    match edge {
        ResizeEdge::Start => {
            result.start_date = new_date;
            result.start_time = new_time;
        }
        ResizeEdge::End => {
            result.end_date = new_date;
            result.end_time = new_time;
        }
    }

    if result.start_at() >= result.end_at() {
        // Push the untouched boundary 15 minutes past the edited one.
        match edge {
            ResizeEdge::Start => {
                let pushed = result.start_at() + Duration::minutes(MIN_DURATION_MINUTES);
                result.end_date = pushed.date();
                result.end_time = pushed.time();
            }
            ResizeEdge::End => {
                let pushed = result.end_at() - Duration::minutes(MIN_DURATION_MINUTES);
                result.start_date = pushed.date();
                result.start_time = pushed.time();
            }
        }
        observer.on_event(&ScheduleEvent::ResizeClamped {
            activity: activity_id,
            reason: "span fell below the 15-minute minimum".to_string(),
        });
    }

    if result.end_date < result.start_date {
        result.end_date = result.start_date;
        observer.on_event(&ScheduleEvent::ResizeClamped {
            activity: activity_id,
            reason: "end date clamped to start date".to_string(),
        });
    }

    result
}

fn wrap_edge(
    date: NaiveDate,
    time: NaiveTime,
    steps: i64,
    bounds: &GridBounds,
) -> (NaiveDate, NaiveTime) {
    let mut minutes = minutes_since_midnight(time) + steps * STEP_MINUTES;
    let mut date = date;

    if steps > 0 {
        while minutes > bounds.end_minute() {
            date = date.succ_opt().unwrap_or(date);
            minutes -= MINUTES_PER_DAY;
        }
        // Landing inside the hidden evening band maps to midnight.
        minutes = minutes.max(0);
    } else {
        while minutes < bounds.start_minute() {
            date = date.pred_opt().unwrap_or(date);
            minutes += MINUTES_PER_DAY;
        }
        // Landing inside the hidden morning band maps to the last slot
        // before midnight.
        if minutes >= MINUTES_PER_DAY {
            minutes = MINUTES_PER_DAY - STEP_MINUTES;
        }
    }

    let time = time_from_minutes(minutes).unwrap_or(time);
    (date, time)
}
