//! Scheduling arithmetic behind the grid's interactions.
//! Pure planning code; the persistence layer applies the resulting plans.

pub mod drop;
pub mod resize;
pub mod split;
