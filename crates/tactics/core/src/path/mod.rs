//! Path planning over the shared grid.
//!
//! The free functions ([`astar`], [`dijkstra`], [`descend`], [`smooth_steps`])
//! are pure searches over a [`GridOracle`](crate::grid::GridOracle) and report
//! failures as [`PlanError`]. [`PathPlanner`] wraps them into the per-agent
//! state machine, where failures become [`PathState::Invalid`].
mod astar;
mod dijkstra;
mod error;
mod planner;
mod reconstruct;
mod search;
mod smoothing;
mod types;

pub use astar::{SearchResult, astar};
pub use dijkstra::{DistanceField, dijkstra};
pub use error::PlanError;
pub use planner::PathPlanner;
pub use reconstruct::descend;
pub use smoothing::smooth_steps;
pub use types::{Path, PathClaim, PathState, PathStep};
