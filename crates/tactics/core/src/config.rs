//! Tunable parameters for every engine.
//!
//! Each section exposes its defaults as associated constants so hosts can
//! reference them without constructing a config. With the `serde` feature,
//! missing fields fall back to those defaults when loading from data files.

use crate::occupancy::RenormalizeMode;
use crate::perception::{HearingParameters, VisionParameters};

/// Aggregate configuration handed to the runtime and engines.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TacticsConfig {
    pub planner: PlannerConfig,
    pub spatial: SpatialConfig,
    pub occupancy: OccupancyConfig,
    pub perception: PerceptionConfig,
}

/// Path following parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    /// Within this world distance of the destination, the path is finished.
    pub arrival_distance: f32,
    /// String-pull searched paths before following them.
    pub smooth_paths: bool,
}

impl PlannerConfig {
    pub const DEFAULT_ARRIVAL_DISTANCE: f32 = 100.0;

    pub fn new() -> Self {
        Self {
            arrival_distance: Self::DEFAULT_ARRIVAL_DISTANCE,
            smooth_paths: true,
        }
    }

    pub fn with_arrival_distance(arrival_distance: f32) -> Self {
        Self {
            arrival_distance,
            ..Self::new()
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Tactical position search parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpatialConfig {
    /// World-space edge length of the candidate window centered on the agent.
    pub sample_dimensions: f32,
    /// Height added to a candidate cell before its line-of-sight test.
    pub eye_height: f32,
}

impl SpatialConfig {
    pub const DEFAULT_SAMPLE_DIMENSIONS: f32 = 8000.0;
    pub const DEFAULT_EYE_HEIGHT: f32 = 60.0;

    pub fn new() -> Self {
        Self {
            sample_dimensions: Self::DEFAULT_SAMPLE_DIMENSIONS,
            eye_height: Self::DEFAULT_EYE_HEIGHT,
        }
    }
}

impl Default for SpatialConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Hidden-target belief parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OccupancyConfig {
    /// Fraction of each cell's probability spread to neighbors per second.
    pub diffusion_per_second: f32,
    /// How mass removed by the visibility mask is returned to the map.
    pub renormalize: RenormalizeMode,
    /// Height added to the argmax cell when reporting the best estimate.
    pub eye_height: f32,
}

impl OccupancyConfig {
    pub const DEFAULT_DIFFUSION_PER_SECOND: f32 = 0.25;
    /// Upper bound for a single tick's diffusion rate; must stay below 1.
    pub const MAX_DIFFUSION_RATE: f32 = 0.95;
    pub const DEFAULT_EYE_HEIGHT: f32 = 50.0;

    pub fn new() -> Self {
        Self {
            diffusion_per_second: Self::DEFAULT_DIFFUSION_PER_SECOND,
            renormalize: RenormalizeMode::default(),
            eye_height: Self::DEFAULT_EYE_HEIGHT,
        }
    }

    /// Diffusion rate for a tick of `dt` seconds, clamped to `[0, MAX_DIFFUSION_RATE]`.
    pub fn diffusion_rate(&self, dt: f32) -> f32 {
        let rate = self.diffusion_per_second * dt;
        if rate.is_finite() {
            rate.clamp(0.0, Self::MAX_DIFFUSION_RATE)
        } else {
            0.0
        }
    }
}

impl Default for OccupancyConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Awareness gauge parameters for the bundled perception system.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PerceptionConfig {
    pub vision: VisionParameters,
    /// Seconds of continuous sight to go from 0 to full awareness.
    pub time_to_acknowledge: f32,
    /// Seconds without sight to go from full awareness to 0.
    pub time_to_lose: f32,
    /// Optional hearing channel; disabled unless configured.
    pub hearing: Option<HearingParameters>,
}

impl PerceptionConfig {
    pub const DEFAULT_TIME_TO_ACKNOWLEDGE: f32 = 2.0;
    pub const DEFAULT_TIME_TO_LOSE: f32 = 0.5;

    pub fn new() -> Self {
        Self {
            vision: VisionParameters::default(),
            time_to_acknowledge: Self::DEFAULT_TIME_TO_ACKNOWLEDGE,
            time_to_lose: Self::DEFAULT_TIME_TO_LOSE,
            hearing: None,
        }
    }
}

impl Default for PerceptionConfig {
    fn default() -> Self {
        Self::new()
    }
}
