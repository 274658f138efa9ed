//! Activity placement engine.
//!
//! Maps an activity plus a display date (the day column being rendered) to a
//! renderable geometry, or signals that the activity is hidden on that day.
//! Pure functions; the grid view consumes the output and the observer
//! receives the reasons for every hidden card.

use chrono::{NaiveDate, Timelike};

use crate::models::activity::Activity;
use crate::models::grid::GridBounds;
use crate::services::observer::{ScheduleEvent, ScheduleObserver};
use crate::utils::date::{format_hhmm, minutes_since_midnight};

/// Pixel height of one hour row; one 15-minute unit is a quarter of this.
pub const SLOT_HEIGHT: f32 = 60.0;

/// Label shown on card edges that continue past the visible day.
pub const CONTINUATION_LABEL: &str = "cont.";

/// Which part of the activity the card on this day represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DaySegment {
    /// The whole activity fits on this day.
    Single,
    /// First day of a multi-day activity; the card runs off the bottom.
    Start,
    /// A day strictly between start and end dates.
    Continuation,
    /// Last day of a multi-day activity; the card runs in from the top.
    End,
}

/// Renderable geometry for one activity card on one day column.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub segment: DaySegment,
    /// Hour row the card starts in.
    pub start_hour: u32,
    /// Pixel offset from the top of that hour row.
    pub top_offset: f32,
    /// Height in 15-minute units, always at least 1.
    pub height_units: u32,
    pub start_label: String,
    pub end_label: String,
}

impl Placement {
    pub fn height_px(&self) -> f32 {
        self.height_units as f32 * SLOT_HEIGHT / 4.0
    }
}

/// Compute the card geometry for `activity` on `display_date`, or `None`
/// when nothing should render there.
pub fn compute_placement(
    activity: &Activity,
    display_date: NaiveDate,
    bounds: &GridBounds,
) -> Option<Placement> {
    placement_inner(activity, display_date, bounds).ok()
}

/// Like [`compute_placement`], but reports the reason whenever a card that
/// belongs to this date is hidden by the visible window.
pub fn placement_for_display(
    activity: &Activity,
    display_date: NaiveDate,
    bounds: &GridBounds,
    observer: &dyn ScheduleObserver,
) -> Option<Placement> {
    match placement_inner(activity, display_date, bounds) {
        Ok(placement) => Some(placement),
        Err(Some(reason)) => {
            observer.on_event(&ScheduleEvent::PlacementSkipped {
                activity: activity.id,
                date: display_date,
                reason,
            });
            None
        }
        Err(None) => None,
    }
}

/// `Err(None)` means the date is simply outside the activity's range;
/// `Err(Some(reason))` means the visible window hid a card that belongs here.
fn placement_inner(
    activity: &Activity,
    display_date: NaiveDate,
    bounds: &GridBounds,
) -> Result<Placement, Option<String>> {
    if display_date < activity.start_date || display_date > activity.end_date {
        return Err(None);
    }

    if !activity.is_multi_day() {
        return single_day(activity, bounds);
    }

    if display_date == activity.start_date {
        multi_day_start(activity, bounds)
    } else if display_date == activity.end_date {
        multi_day_end(activity, bounds)
    } else {
        Ok(continuation_day(bounds))
    }
}

fn single_day(activity: &Activity, bounds: &GridBounds) -> Result<Placement, Option<String>> {
    let start_hour = activity.start_time.hour();
    if !bounds.contains_hour(start_hour) {
        return Err(Some(format!(
            "start {} outside visible window {:02}:00-{:02}:00",
            format_hhmm(activity.start_time),
            bounds.day_start_hour,
            bounds.day_end_hour
        )));
    }

    let duration = minutes_since_midnight(activity.end_time)
        - minutes_since_midnight(activity.start_time);
    Ok(Placement {
        segment: DaySegment::Single,
        start_hour,
        top_offset: activity.start_time.minute() as f32 / 60.0 * SLOT_HEIGHT,
        height_units: units_for(duration),
        start_label: format_hhmm(activity.start_time),
        end_label: format_hhmm(activity.end_time),
    })
}

fn multi_day_start(activity: &Activity, bounds: &GridBounds) -> Result<Placement, Option<String>> {
    let start_minute = minutes_since_midnight(activity.start_time);
    if start_minute < bounds.start_minute() {
        return Err(Some(format!(
            "multi-day start {} before visible window",
            format_hhmm(activity.start_time)
        )));
    }

    if start_minute >= bounds.end_minute() {
        // Starts after the last slot: pin a minimal block at the bottom.
        return Ok(Placement {
            segment: DaySegment::Start,
            start_hour: bounds.day_end_hour,
            top_offset: 0.0,
            height_units: 1,
            start_label: format_hhmm(activity.start_time),
            end_label: CONTINUATION_LABEL.to_string(),
        });
    }

    // Run from the real start down to the synthetic bottom boundary so the
    // card visibly continues past the end of the day column.
    Ok(Placement {
        segment: DaySegment::Start,
        start_hour: activity.start_time.hour(),
        top_offset: activity.start_time.minute() as f32 / 60.0 * SLOT_HEIGHT,
        height_units: units_for(bounds.overflow_minute() - start_minute),
        start_label: format_hhmm(activity.start_time),
        end_label: CONTINUATION_LABEL.to_string(),
    })
}

fn multi_day_end(activity: &Activity, bounds: &GridBounds) -> Result<Placement, Option<String>> {
    let end_minute = minutes_since_midnight(activity.end_time);
    if end_minute < bounds.start_minute() {
        return Err(Some(format!(
            "multi-day end {} before visible window",
            format_hhmm(activity.end_time)
        )));
    }

    let clamped_end = end_minute.min(bounds.end_minute());
    Ok(Placement {
        segment: DaySegment::End,
        start_hour: bounds.day_start_hour,
        top_offset: 0.0,
        height_units: units_for(clamped_end - bounds.start_minute()),
        start_label: CONTINUATION_LABEL.to_string(),
        end_label: format_hhmm(activity.end_time),
    })
}

fn continuation_day(bounds: &GridBounds) -> Placement {
    Placement {
        segment: DaySegment::Continuation,
        start_hour: bounds.day_start_hour,
        top_offset: 0.0,
        height_units: units_for(bounds.overflow_minute() - bounds.start_minute()),
        start_label: CONTINUATION_LABEL.to_string(),
        end_label: CONTINUATION_LABEL.to_string(),
    }
}

fn units_for(minutes: i64) -> u32 {
    let units = (minutes + 14) / 15;
    units.max(1) as u32
}
