pub mod activity;
pub mod grid;
pub mod participant;
pub mod settings;
pub mod trip;
