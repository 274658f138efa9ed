// Trip model
// A planned travel window owning the activities shown on the grid.

use chrono::{DateTime, Local, NaiveDate};

#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub id: Option<i64>,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: Option<DateTime<Local>>,
    pub updated_at: Option<DateTime<Local>>,
}

impl Trip {
    pub fn new(
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self, String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("Trip name cannot be empty".to_string());
        }
        if end_date < start_date {
            return Err("Trip end date must not precede start date".to_string());
        }
        Ok(Self {
            id: None,
            name,
            start_date,
            end_date,
            created_at: None,
            updated_at: None,
        })
    }

    pub fn day_count(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, day).unwrap()
    }

    #[test]
    fn test_new_trip() {
        let trip = Trip::new("Sul de Minas buying trip", d(2), d(6)).unwrap();
        assert_eq!(trip.day_count(), 5);
        assert!(trip.contains(d(4)));
        assert!(!trip.contains(d(7)));
    }

    #[test]
    fn test_new_trip_rejects_backwards_range() {
        assert!(Trip::new("X", d(6), d(2)).is_err());
    }

    #[test]
    fn test_new_trip_rejects_empty_name() {
        assert!(Trip::new("  ", d(2), d(3)).is_err());
    }
}
