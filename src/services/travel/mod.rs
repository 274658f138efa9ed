//! Travel-time estimation and recalculation between scheduled activities.

pub mod estimator;
pub mod recalc;
pub mod regions;

pub use estimator::{RegionTableEstimator, TravelEstimate, TravelMode, TravelTimeEstimator};
pub use recalc::{recalculate, TravelDetails, TravelUpdate};
