// Time grid model
// Derived, immutable views of the trip's day range and the visible hour
// window. Leaf data structures with no service dependencies.

use chrono::{Datelike, NaiveDate, NaiveTime};

/// Visible hour window of the grid. Defaults to business hours 06:00-22:00;
/// activities outside the window are hidden from the grid view, so the
/// boundary is configurable rather than hard-coded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridBounds {
    pub day_start_hour: u32,
    pub day_end_hour: u32,
}

impl Default for GridBounds {
    fn default() -> Self {
        Self {
            day_start_hour: 6,
            day_end_hour: 22,
        }
    }
}

impl GridBounds {
    pub fn new(day_start_hour: u32, day_end_hour: u32) -> Result<Self, String> {
        if day_start_hour >= day_end_hour || day_end_hour > 23 {
            return Err(format!(
                "Invalid grid bounds {:02}:00-{:02}:00",
                day_start_hour, day_end_hour
            ));
        }
        Ok(Self {
            day_start_hour,
            day_end_hour,
        })
    }

    pub fn start_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.day_start_hour, 0, 0).unwrap()
    }

    pub fn end_time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.day_end_hour, 0, 0).unwrap()
    }

    pub fn start_minute(&self) -> i64 {
        self.day_start_hour as i64 * 60
    }

    pub fn end_minute(&self) -> i64 {
        self.day_end_hour as i64 * 60
    }

    /// Synthetic bottom edge of a day column, one hour past the last slot.
    /// Cards that continue overnight are drawn down to this boundary.
    pub fn overflow_minute(&self) -> i64 {
        (self.day_end_hour as i64 + 1) * 60
    }

    pub fn contains_hour(&self, hour: u32) -> bool {
        hour >= self.day_start_hour && hour < self.day_end_hour
    }

    /// Number of hourly markers including the closing one (17 by default).
    pub fn slot_count(&self) -> usize {
        (self.day_end_hour - self.day_start_hour) as usize + 1
    }
}

/// One hourly marker row of the grid. Static for the lifetime of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    pub hour: u32,
    pub label: String,
}

impl TimeSlot {
    pub fn day_slots(bounds: &GridBounds) -> Vec<TimeSlot> {
        (bounds.day_start_hour..=bounds.day_end_hour)
            .map(|hour| TimeSlot {
                hour,
                label: format!("{:02}:00", hour),
            })
            .collect()
    }

    pub fn start(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour, 0, 0).unwrap()
    }
}

/// Derived view of one date in the trip range. Regenerated whenever the trip
/// start/end dates change; never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub iso: String,
    pub weekday_label: String,
    pub month_label: String,
    pub day_of_month: u32,
}

impl CalendarDay {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            date,
            iso: date.format("%Y-%m-%d").to_string(),
            weekday_label: date.format("%a").to_string(),
            month_label: date.format("%b").to_string(),
            day_of_month: date.day(),
        }
    }

    /// Inclusive day span of a trip. A backwards range collapses to the
    /// start date rather than producing an empty grid.
    pub fn span(start: NaiveDate, end: NaiveDate) -> Vec<CalendarDay> {
        let end = end.max(start);
        start
            .iter_days()
            .take_while(|d| *d <= end)
            .map(CalendarDay::from_date)
            .collect()
    }
}
