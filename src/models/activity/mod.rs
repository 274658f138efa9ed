// Activity module
// Schedulable unit of trip time rendered on the itinerary grid.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

use crate::utils::date::{add_minutes, span_minutes};

/// Minimum duration of any activity, in minutes. Edits that would produce a
/// shorter span are expanded by pushing the end forward.
pub const MIN_DURATION_MINUTES: i64 = 15;

/// Activity identity. Draft ids exist only on the client until the record is
/// first written; the persistence layer assigns `Persisted` ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityId {
    /// Client-only, unsaved (optimistic) record.
    Draft(u64),
    /// Database row id.
    Persisted(i64),
}

impl ActivityId {
    pub fn is_draft(&self) -> bool {
        matches!(self, ActivityId::Draft(_))
    }

    /// Row id when persisted, `None` for drafts.
    pub fn row_id(&self) -> Option<i64> {
        match self {
            ActivityId::Persisted(id) => Some(*id),
            ActivityId::Draft(_) => None,
        }
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityId::Draft(n) => write!(f, "temp-{}", n),
            ActivityId::Persisted(id) => write!(f, "{}", id),
        }
    }
}

/// Activity category. Unknown values fall back to `Other`, which gets the
/// default visual treatment on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityKind {
    Meeting,
    Meal,
    Flight,
    Accommodation,
    Travel,
    Event,
    Break,
    Other,
}

impl ActivityKind {
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "meeting" => ActivityKind::Meeting,
            "meal" => ActivityKind::Meal,
            "flight" => ActivityKind::Flight,
            "accommodation" => ActivityKind::Accommodation,
            "travel" => ActivityKind::Travel,
            "event" => ActivityKind::Event,
            "break" => ActivityKind::Break,
            _ => ActivityKind::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Meeting => "meeting",
            ActivityKind::Meal => "meal",
            ActivityKind::Flight => "flight",
            ActivityKind::Accommodation => "accommodation",
            ActivityKind::Travel => "travel",
            ActivityKind::Event => "event",
            ActivityKind::Break => "break",
            ActivityKind::Other => "other",
        }
    }

    pub const ALL: [ActivityKind; 8] = [
        ActivityKind::Meeting,
        ActivityKind::Meal,
        ActivityKind::Flight,
        ActivityKind::Accommodation,
        ActivityKind::Travel,
        ActivityKind::Event,
        ActivityKind::Break,
        ActivityKind::Other,
    ];
}

/// A scheduled, time-boxed trip event. Times are wall-clock local to the
/// trip; `end_date` equals `start_date` for single-day activities.
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub id: ActivityId,
    pub trip_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub kind: ActivityKind,
    /// Free text; sometimes carries machine-parseable fragments such as
    /// distance annotations or split bookkeeping.
    pub notes: Option<String>,
    pub is_confirmed: bool,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub created_at: Option<DateTime<Local>>,
    pub updated_at: Option<DateTime<Local>>,
}

impl Activity {
    /// Create a single-day draft activity with required fields.
    ///
    /// # Examples
    /// ```
    /// use trip_scheduler::models::activity::Activity;
    /// use chrono::{NaiveDate, NaiveTime};
    ///
    /// let date = NaiveDate::from_ymd_opt(2025, 10, 2).unwrap();
    /// let start = NaiveTime::from_hms_opt(14, 0, 0).unwrap();
    /// let end = NaiveTime::from_hms_opt(15, 30, 0).unwrap();
    /// let activity = Activity::new("Cupping session", 1, date, start, end).unwrap();
    /// assert!(activity.id.is_draft());
    /// ```
    pub fn new(
        title: impl Into<String>,
        trip_id: i64,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<Self, String> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err("Activity title cannot be empty".to_string());
        }

        let mut activity = Self {
            id: ActivityId::Draft(next_draft_id()),
            trip_id,
            title,
            description: None,
            location: None,
            kind: ActivityKind::Meeting,
            notes: None,
            is_confirmed: false,
            start_date: date,
            end_date: date,
            start_time,
            end_time,
            created_at: None,
            updated_at: None,
        };
        activity.normalize();
        Ok(activity)
    }

    pub fn builder() -> ActivityBuilder {
        ActivityBuilder::new()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Activity title cannot be empty".to_string());
        }
        if self.end_date < self.start_date {
            return Err("Activity end date cannot precede start date".to_string());
        }
        if span_minutes(self.start_at(), self.end_at()) < MIN_DURATION_MINUTES {
            return Err(format!(
                "Activity must last at least {} minutes",
                MIN_DURATION_MINUTES
            ));
        }
        Ok(())
    }

    /// Restore the temporal invariants after a mutation: `end_date` never
    /// precedes `start_date`, and the span is at least 15 minutes (the end
    /// is pushed forward, possibly rolling its date).
    pub fn normalize(&mut self) {
        if self.end_date < self.start_date {
            self.end_date = self.start_date;
        }
        if span_minutes(self.start_at(), self.end_at()) < MIN_DURATION_MINUTES {
            let (date, time) =
                add_minutes(self.start_date, self.start_time, MIN_DURATION_MINUTES);
            self.end_date = date;
            self.end_time = time;
        }
    }

    pub fn start_at(&self) -> NaiveDateTime {
        self.start_date.and_time(self.start_time)
    }

    pub fn end_at(&self) -> NaiveDateTime {
        self.end_date.and_time(self.end_time)
    }

    /// Full duration in minutes, never less than the 15-minute floor.
    pub fn duration_minutes(&self) -> i64 {
        span_minutes(self.start_at(), self.end_at()).max(MIN_DURATION_MINUTES)
    }

    pub fn is_multi_day(&self) -> bool {
        self.end_date != self.start_date
    }

    /// Travel fillers are matched by kind or by the title heuristics the
    /// recalculation inherits from the route planner.
    pub fn is_travel(&self) -> bool {
        if self.kind == ActivityKind::Travel {
            return true;
        }
        let title = self.title.to_ascii_lowercase();
        title.contains("drive") || title.contains("travel") || title.contains("walk")
    }
}

fn next_draft_id() -> u64 {
    use std::sync::atomic::{AtomicU64, Ordering};
    static NEXT: AtomicU64 = AtomicU64::new(1);
    NEXT.fetch_add(1, Ordering::Relaxed)
}

/// Builder for activities with optional fields.
pub struct ActivityBuilder {
    title: Option<String>,
    trip_id: i64,
    description: Option<String>,
    location: Option<String>,
    kind: ActivityKind,
    notes: Option<String>,
    is_confirmed: bool,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    start_time: Option<NaiveTime>,
    end_time: Option<NaiveTime>,
}

impl ActivityBuilder {
    pub fn new() -> Self {
        Self {
            title: None,
            trip_id: 0,
            description: None,
            location: None,
            kind: ActivityKind::Meeting,
            notes: None,
            is_confirmed: false,
            start_date: None,
            end_date: None,
            start_time: None,
            end_time: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn trip_id(mut self, trip_id: i64) -> Self {
        self.trip_id = trip_id;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn kind(mut self, kind: ActivityKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn confirmed(mut self, is_confirmed: bool) -> Self {
        self.is_confirmed = is_confirmed;
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn end_date(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    pub fn start_time(mut self, time: NaiveTime) -> Self {
        self.start_time = Some(time);
        self
    }

    pub fn end_time(mut self, time: NaiveTime) -> Self {
        self.end_time = Some(time);
        self
    }

    pub fn build(self) -> Result<Activity, String> {
        let title = self.title.ok_or("Activity title is required")?;
        let start_date = self.start_date.ok_or("Activity start date is required")?;
        let start_time = self.start_time.ok_or("Activity start time is required")?;
        let end_time = self.end_time.ok_or("Activity end time is required")?;

        let mut activity = Activity {
            id: ActivityId::Draft(next_draft_id()),
            trip_id: self.trip_id,
            title,
            description: self.description,
            location: self.location,
            kind: self.kind,
            notes: self.notes,
            is_confirmed: self.is_confirmed,
            start_date,
            end_date: self.end_date.unwrap_or(start_date),
            start_time,
            end_time,
            created_at: None,
            updated_at: None,
        };
        activity.normalize();
        activity.validate()?;
        Ok(activity)
    }
}

impl Default for ActivityBuilder {
    fn default() -> Self {
        Self::new()
    }
}
