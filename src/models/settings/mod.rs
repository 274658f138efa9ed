// Persisted application settings backing the grid view.

use crate::models::grid::GridBounds;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// First visible hour of the grid.
    pub day_start_hour: u32,
    /// Closing hour of the grid (exclusive for placement).
    pub day_end_hour: u32,
    /// Delay used to coalesce resize-driven persistence writes.
    pub resize_debounce_ms: u64,
    /// Apply travel-segment proposals automatically instead of only
    /// reporting them.
    pub auto_apply_travel: bool,
    pub theme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            day_start_hour: 6,
            day_end_hour: 22,
            resize_debounce_ms: 300,
            auto_apply_travel: false,
            theme: "light".to_string(),
        }
    }
}

impl Settings {
    /// Grid bounds derived from the stored hours; invalid combinations fall
    /// back to the default window rather than breaking the view.
    pub fn grid_bounds(&self) -> GridBounds {
        GridBounds::new(self.day_start_hour, self.day_end_hour).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.day_start_hour, 6);
        assert_eq!(settings.day_end_hour, 22);
        assert_eq!(settings.resize_debounce_ms, 300);
        assert!(!settings.auto_apply_travel);
    }

    #[test]
    fn test_invalid_hours_fall_back() {
        let settings = Settings {
            day_start_hour: 23,
            day_end_hour: 4,
            ..Settings::default()
        };
        assert_eq!(settings.grid_bounds(), GridBounds::default());
    }
}
