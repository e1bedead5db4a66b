//! Data-driven content for the tactics engines.
//!
//! Loaders read RON/TOML data files into `tactics-core` types:
//! - Grid layouts (ASCII rows in RON)
//! - Spatial functions (layer stacks in RON)
//! - Tuning configuration (TOML)
//! - Simulation scenarios (RON)
//!
//! Content feeds engine construction and never appears in per-tick state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    AgentEntry, ConfigLoader, ContentFactory, FunctionLoader, GridLoader, LoadResult, Scenario, ScenarioLoader,
    TargetEntry,
};
