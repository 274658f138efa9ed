use chrono::{Duration, Local};

use super::context::AppContext;
use super::TripPlannerApp;
use crate::models::settings::Settings;
use crate::models::trip::Trip;
use crate::services::config::AppConfig;
use crate::services::database::Database;
use crate::services::observer::LogObserver;
use crate::services::settings::SettingsService;
use crate::services::travel::RegionTableEstimator;
use crate::ui_egui::debounce::DebouncedSpanWriter;
use crate::ui_egui::views::palette::TripGridPalette;

impl TripPlannerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // The database outlives every frame; eframe wants 'static.
        let database = initialize_database();

        let settings_service = SettingsService::new(database);
        let settings = load_settings_or_default(&settings_service);
        let palette = TripGridPalette::for_theme(&settings.theme);

        cc.egui_ctx.set_embed_viewports(false);

        let context = AppContext::new(database);
        let trip = load_or_create_trip(&context);

        let mut app = Self {
            context,
            settings,
            palette,
            trip,
            activities: Vec::new(),
            observer: LogObserver,
            estimator: RegionTableEstimator,
            activity_dialog: None,
            split_dialog: None,
            debounce: DebouncedSpanWriter::default(),
            pending_travel: Vec::new(),
            status_line: None,
            search_query: String::new(),
            search_hits: None,
        };
        app.reload_activities();
        app
    }

    pub(super) fn reload_activities(&mut self) {
        let Some(trip_id) = self.trip.as_ref().and_then(|t| t.id) else {
            self.activities.clear();
            return;
        };
        match self.context.activity_service().by_trip(trip_id) {
            Ok(activities) => self.activities = activities,
            Err(e) => {
                log::error!("Failed to load activities: {:#}", e);
                self.status_line = Some(format!("Failed to load activities: {}", e));
            }
        }
        // Edits can change what the current query matches.
        self.refresh_search();
    }

    pub(super) fn persist_settings(&mut self) {
        if let Err(e) = self.context.settings_service().update(&self.settings) {
            log::error!("Failed to save settings: {:#}", e);
        }
        self.palette = TripGridPalette::for_theme(&self.settings.theme);
    }
}

fn initialize_database() -> &'static Database {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Failed to load config: {:#}, using defaults", e);
            AppConfig::default()
        }
    };

    let db_path = config.database_path();
    let db = Database::new(db_path.to_string_lossy().as_ref())
        .expect("Failed to create database connection");
    db.initialize_schema()
        .expect("Failed to initialize database schema");

    Box::leak(Box::new(db))
}

fn load_settings_or_default(settings_service: &SettingsService) -> Settings {
    match settings_service.get() {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Failed to load settings: {}, using defaults", e);
            Settings::default()
        }
    }
}

fn load_or_create_trip(context: &AppContext) -> Option<Trip> {
    let service = context.trip_service();
    match service.list_all() {
        Ok(trips) if !trips.is_empty() => trips.into_iter().next(),
        Ok(_) => {
            let today = Local::now().date_naive();
            let trip = Trip::new("New trip", today, today + Duration::days(6)).ok()?;
            match service.create(trip) {
                Ok(created) => {
                    log::info!("Created starter trip #{:?}", created.id);
                    Some(created)
                }
                Err(e) => {
                    log::error!("Failed to create starter trip: {:#}", e);
                    None
                }
            }
        }
        Err(e) => {
            log::error!("Failed to list trips: {:#}", e);
            None
        }
    }
}
