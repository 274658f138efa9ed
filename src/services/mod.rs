// Service layer: persistence, scheduling arithmetic and travel estimation.

pub mod activity;
pub mod config;
pub mod database;
pub mod observer;
pub mod participant;
pub mod placement;
pub mod scheduling;
pub mod settings;
pub mod travel;
pub mod trip;
