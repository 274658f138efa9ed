use crate::services::activity::ActivityService;
use crate::services::database::Database;
use crate::services::participant::ParticipantService;
use crate::services::settings::SettingsService;
use crate::services::trip::TripService;

/// Shared access point for the leaked database and the services built on it.
pub struct AppContext {
    database: &'static Database,
}

impl AppContext {
    pub fn new(database: &'static Database) -> Self {
        Self { database }
    }

    pub fn activity_service(&self) -> ActivityService<'_> {
        ActivityService::new(self.database.connection())
    }

    pub fn trip_service(&self) -> TripService<'_> {
        TripService::new(self.database.connection())
    }

    pub fn participant_service(&self) -> ParticipantService<'_> {
        ParticipantService::new(self.database.connection())
    }

    pub fn settings_service(&self) -> SettingsService<'_> {
        SettingsService::new(self.database)
    }
}
