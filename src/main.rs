// Trip scheduler desktop application entry point.

use trip_scheduler::services::config::AppConfig;
use trip_scheduler::ui_egui::TripPlannerApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    log::info!("Starting trip scheduler");

    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config: {:#}, using defaults", e);
        AppConfig::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Trip Scheduler"),
        ..Default::default()
    };

    eframe::run_native(
        "Trip Scheduler",
        options,
        Box::new(|cc| Ok(Box::new(TripPlannerApp::new(cc)))),
    )
}
