//! Split workflow: partition one activity's attendees into two groups with
//! their own time windows, producing two replacement activities.
//!
//! The dialog owns the form state; this module owns the timing rules,
//! validation and construction of the replacement records. Application is a
//! single transaction at the persistence boundary.

use chrono::NaiveTime;
use thiserror::Error;

use crate::models::activity::{Activity, ActivityId};
use crate::models::participant::AttendeeRef;
use crate::utils::date::add_minutes;

/// How the two groups relate in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitMode {
    /// Group B mirrors group A's window.
    Parallel,
    /// Group B starts when group A ends, defaulting to a 2-hour duration.
    Sequential,
}

pub const SEQUENTIAL_DEFAULT_MINUTES: i64 = 120;

/// One side of a split: a proposed title, optional location, assigned
/// attendees and a time window. Consumed once to build the replacement.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitGroup {
    pub title: String,
    pub location: Option<String>,
    pub attendees: Vec<AttendeeRef>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub notes: Option<String>,
}

impl SplitGroup {
    /// Seed a group from the source activity, suffixing the title.
    pub fn seeded(activity: &Activity, suffix: &str) -> Self {
        Self {
            title: format!("{} - {}", activity.title, suffix),
            location: activity.location.clone(),
            attendees: Vec::new(),
            start_time: activity.start_time,
            end_time: activity.end_time,
            notes: None,
        }
    }

    /// Move an attendee into this group; the caller removes it from the
    /// other group to keep assignment mutually exclusive.
    pub fn assign(&mut self, attendee: AttendeeRef) {
        if !self.attendees.contains(&attendee) {
            self.attendees.push(attendee);
        }
    }

    pub fn unassign(&mut self, attendee: AttendeeRef) {
        self.attendees.retain(|a| *a != attendee);
    }
}

/// Re-derive group B's window from group A per the selected mode. Called
/// whenever group A's window or the mode changes.
pub fn sync_group_windows(mode: SplitMode, group_a: &SplitGroup, group_b: &mut SplitGroup) {
    match mode {
        SplitMode::Parallel => {
            group_b.start_time = group_a.start_time;
            group_b.end_time = group_a.end_time;
        }
        SplitMode::Sequential => {
            group_b.start_time = group_a.end_time;
            // Wall-clock arithmetic only; the date roll is resolved when the
            // replacement activities are normalized.
            let (_, end) = add_minutes(
                chrono::NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
                group_a.end_time,
                SEQUENTIAL_DEFAULT_MINUTES,
            );
            group_b.end_time = end;
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SplitError {
    #[error("Group {0} must have at least one participant")]
    EmptyGroup(char),
    #[error("Split group title cannot be empty")]
    EmptyTitle,
    #[error("Could not encode the attendee list")]
    AttendeeEncoding,
}

/// Marker line inside a replacement activity's notes carrying the JSON
/// attendee list.
const ATTENDEES_NOTE_PREFIX: &str = "attendees: ";

/// Attendee list a previous split recorded in `notes`, if any. Notes without
/// the marker, or with an unreadable one, count as having no record.
pub fn recorded_attendees(notes: Option<&str>) -> Vec<AttendeeRef> {
    notes
        .and_then(|text| {
            text.lines()
                .find_map(|line| line.strip_prefix(ATTENDEES_NOTE_PREFIX))
        })
        .and_then(|json| serde_json::from_str(json).ok())
        .unwrap_or_default()
}

/// The complete outcome of a confirmed split: two replacement activities and
/// the id of the original to delete. Built atomically or not at all.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitPlan {
    pub original: ActivityId,
    pub replacements: [Activity; 2],
}

/// Validate the groups and construct the replacement activities. Submitting
/// with an empty group produces no activities at all.
pub fn build_split(
    activity: &Activity,
    group_a: &SplitGroup,
    group_b: &SplitGroup,
) -> Result<SplitPlan, SplitError> {
    if group_a.attendees.is_empty() {
        return Err(SplitError::EmptyGroup('A'));
    }
    if group_b.attendees.is_empty() {
        return Err(SplitError::EmptyGroup('B'));
    }

    let first = derived_activity(activity, group_a)?;
    let second = derived_activity(activity, group_b)?;

    Ok(SplitPlan {
        original: activity.id,
        replacements: [first, second],
    })
}

fn derived_activity(source: &Activity, group: &SplitGroup) -> Result<Activity, SplitError> {
    if group.title.trim().is_empty() {
        return Err(SplitError::EmptyTitle);
    }

    let attendee_json =
        serde_json::to_string(&group.attendees).map_err(|_| SplitError::AttendeeEncoding)?;
    let mut notes = format!(
        "Split from '{}'\n{}{}",
        source.title, ATTENDEES_NOTE_PREFIX, attendee_json
    );
    if let Some(extra) = group.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        notes.push_str("\n");
        notes.push_str(extra);
    }

    let mut derived = Activity::new(
        group.title.clone(),
        source.trip_id,
        source.start_date,
        group.start_time,
        group.end_time,
    )
    .map_err(|_| SplitError::EmptyTitle)?;
    derived.description = source.description.clone();
    derived.location = group.location.clone();
    derived.kind = source.kind;
    derived.notes = Some(notes);
    Ok(derived)
}
