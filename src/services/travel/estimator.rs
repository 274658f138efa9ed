//! Travel-time estimation strategy.
//!
//! `TravelTimeEstimator` is the pluggable seam between the recalculation and
//! whatever answers "how long from A to B": the shipped implementation is a
//! fixed region table, a routing API client would implement the same trait.

use super::regions::{region_of, same_city, Region};

#[cfg(test)]
use mockall::automock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelMode {
    Walk,
    Drive,
}

/// Estimated leg between two cities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TravelEstimate {
    pub minutes: i64,
    pub mode: TravelMode,
}

/// Legs at or under this take are walked, not driven.
pub const WALK_THRESHOLD_MINUTES: i64 = 12;

#[cfg_attr(test, automock)]
pub trait TravelTimeEstimator {
    /// Estimate the leg between two city names (already extracted from
    /// activity locations).
    fn estimate(&self, from: &str, to: &str) -> TravelEstimate;
}

/// Table-driven estimator over the coffee-region city lists: walking inside
/// the Santos port area, fixed drive constants inside and between the
/// growing regions, and a conservative default for unknown cities.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegionTableEstimator;

impl RegionTableEstimator {
    const SAME_CITY_WALK: i64 = 10;
    const SANTOS_AREA_WALK: i64 = 12;
    const INTRA_REGION_DRIVE: i64 = 45;
    const UNKNOWN_DRIVE: i64 = 60;

    fn inter_region_minutes(a: Region, b: Region) -> i64 {
        use Region::*;
        match (a, b) {
            (Santos, SulDeMinas) | (SulDeMinas, Santos) => 240,
            (Santos, Cerrado) | (Cerrado, Santos) => 420,
            (SulDeMinas, Cerrado) | (Cerrado, SulDeMinas) => 300,
            _ => Self::INTRA_REGION_DRIVE,
        }
    }
}

impl TravelTimeEstimator for RegionTableEstimator {
    fn estimate(&self, from: &str, to: &str) -> TravelEstimate {
        let minutes = if same_city(from, to) {
            Self::SAME_CITY_WALK
        } else {
            match (region_of(from), region_of(to)) {
                (Some(Region::Santos), Some(Region::Santos)) => Self::SANTOS_AREA_WALK,
                (Some(a), Some(b)) if a == b => Self::INTRA_REGION_DRIVE,
                (Some(a), Some(b)) => Self::inter_region_minutes(a, b),
                _ => Self::UNKNOWN_DRIVE,
            }
        };

        let mode = if minutes <= WALK_THRESHOLD_MINUTES {
            TravelMode::Walk
        } else {
            TravelMode::Drive
        };
        TravelEstimate { minutes, mode }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_same_city_is_a_walk() {
        let estimate = RegionTableEstimator.estimate("Santos", "santos");
        assert_eq!(estimate.minutes, 10);
        assert_eq!(estimate.mode, TravelMode::Walk);
    }

    #[test]
    fn test_santos_area_is_walkable() {
        let estimate = RegionTableEstimator.estimate("Santos", "Guaruja");
        assert_eq!(estimate.mode, TravelMode::Walk);
    }

    #[test]
    fn test_intra_region_drive() {
        let estimate = RegionTableEstimator.estimate("Varginha", "Tres Pontas");
        assert_eq!(estimate.minutes, 45);
        assert_eq!(estimate.mode, TravelMode::Drive);
    }

    #[test]
    fn test_inter_region_constants_are_symmetric() {
        let there = RegionTableEstimator.estimate("Santos", "Varginha");
        let back = RegionTableEstimator.estimate("Varginha", "Santos");
        assert_eq!(there, back);
        assert_eq!(there.minutes, 240);
    }

    #[test]
    fn test_unknown_city_gets_default_drive() {
        let estimate = RegionTableEstimator.estimate("Oslo", "Santos");
        assert_eq!(estimate.minutes, 60);
        assert_eq!(estimate.mode, TravelMode::Drive);
    }
}
