//! Trip scheduling for origin visits: a day-by-hour calendar grid with
//! drag-and-drop rescheduling, edge-resize across days, attendee splits and
//! travel-time recalculation between Brazilian coffee-region cities.

pub mod models;
pub mod services;
pub mod ui_egui;
pub mod utils;
