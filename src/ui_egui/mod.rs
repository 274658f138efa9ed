//! egui/eframe desktop frontend for the trip grid.

pub mod app;
pub mod debounce;
pub mod dialogs;
pub mod drag;
pub mod resize;
pub mod views;

pub use app::TripPlannerApp;
