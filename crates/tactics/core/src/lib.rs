//! Tactical reasoning over a shared grid.
//!
//! `tactics-core` holds the three engines an agent consults every tick:
//! [`path::PathPlanner`] (A*, distance fields, smoothing, path following),
//! [`spatial::SpatialEvaluator`] (layered utility scoring of candidate
//! cells), and [`occupancy::OccupancyTracker`] (probability map over a hidden
//! target's location). Each engine receives its collaborators at
//! construction: the grid as a [`GridHandle`], perception through
//! [`PerceptionOracle`]. Everything is synchronous and allocation-bounded by
//! the grid window being processed.
pub mod config;
pub mod entity;
pub mod error;
pub mod grid;
pub mod occupancy;
pub mod path;
pub mod perception;
pub mod spatial;

pub use config::{OccupancyConfig, PerceptionConfig, PlannerConfig, SpatialConfig, TacticsConfig};
pub use entity::EntityId;
pub use error::{ErrorSeverity, TacticsError};
pub use grid::{
    CellRef, CellTraits, GridBounds, GridError, GridHandle, GridMap, GridOracle, Neighbors, TileGrid, WorldPoint,
};
pub use occupancy::{
    LastKnownState, OccupancyMap, OccupancyTracker, RenormalizeMode, TargetBelief, TargetObservation, TargetState,
};
pub use path::{DistanceField, Path, PathClaim, PathPlanner, PathState, PathStep, PlanError};
pub use perception::{HearingParameters, Observer, ObserverId, PerceptionOracle, PerceptionSystem, VisionParameters};
pub use spatial::{
    CombineOp, EvaluationContext, FunctionLayer, LayerInput, PositionChoice, ResponseCurve, SpatialEvaluator,
    SpatialFunction,
};
