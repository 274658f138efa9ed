//! Persisted grid and behaviour settings (single-row table).

use anyhow::{Context, Result};

use crate::models::settings::Settings;
use crate::services::database::Database;

pub struct SettingsService<'a> {
    db: &'a Database,
}

impl<'a> SettingsService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub fn get(&self) -> Result<Settings> {
        let settings = self
            .db
            .connection()
            .query_row(
                "SELECT day_start_hour, day_end_hour, resize_debounce_ms,
                        auto_apply_travel, theme
                 FROM settings WHERE id = 1",
                [],
                |row| {
                    Ok(Settings {
                        day_start_hour: row.get(0)?,
                        day_end_hour: row.get(1)?,
                        resize_debounce_ms: row.get::<_, i64>(2)?.max(0) as u64,
                        auto_apply_travel: row.get::<_, i32>(3)? != 0,
                        theme: row.get(4)?,
                    })
                },
            )
            .context("Failed to load settings")?;

        Ok(settings)
    }

    pub fn update(&self, settings: &Settings) -> Result<()> {
        self.db
            .connection()
            .execute(
                "UPDATE settings
                 SET day_start_hour = ?1,
                     day_end_hour = ?2,
                     resize_debounce_ms = ?3,
                     auto_apply_travel = ?4,
                     theme = ?5,
                     updated_at = CURRENT_TIMESTAMP
                 WHERE id = 1",
                (
                    settings.day_start_hour,
                    settings.day_end_hour,
                    settings.resize_debounce_ms as i64,
                    settings.auto_apply_travel as i32,
                    &settings.theme,
                ),
            )
            .context("Failed to update settings")?;

        Ok(())
    }

    pub fn reset(&self) -> Result<()> {
        self.update(&Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn setup_test_db() -> Database {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();
        db
    }

    #[test]
    fn test_defaults_seeded_on_initialization() {
        let db = setup_test_db();
        let settings = SettingsService::new(&db).get().unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_update_round_trips() {
        let db = setup_test_db();
        let service = SettingsService::new(&db);

        let mut settings = service.get().unwrap();
        settings.day_start_hour = 7;
        settings.day_end_hour = 20;
        settings.auto_apply_travel = true;
        service.update(&settings).unwrap();

        let reloaded = service.get().unwrap();
        assert_eq!(reloaded.day_start_hour, 7);
        assert_eq!(reloaded.day_end_hour, 20);
        assert!(reloaded.auto_apply_travel);
        assert_eq!(reloaded.grid_bounds().day_start_hour, 7);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let db = setup_test_db();
        let service = SettingsService::new(&db);

        let mut settings = service.get().unwrap();
        settings.theme = "dark".to_string();
        service.update(&settings).unwrap();

        service.reset().unwrap();
        assert_eq!(service.get().unwrap(), Settings::default());
    }
}
