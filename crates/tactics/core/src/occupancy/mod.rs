//! Hidden-target belief tracking.
//!
//! One [`OccupancyTracker`] per tracked entity keeps a [`TargetBelief`] and an
//! [`OccupancyMap`]. While the entity is hidden, cells observers can see are
//! cleared, the removed probability is handed back to the unseen cells, and
//! the distribution diffuses outward every tick.
mod belief;
mod map;
mod tracker;

pub use belief::{LastKnownState, TargetBelief, TargetState};
pub use map::{OccupancyMap, RenormalizeMode};
pub use tracker::{OccupancyTracker, TargetObservation};
