//! Registration inputs.

use tactics_core::{SpatialFunction, WorldPoint};

/// Initial state of an agent.
#[derive(Clone, Debug)]
pub struct AgentSpec {
    pub position: WorldPoint,
    /// Facing direction for the agent's vision cone.
    pub forward: WorldPoint,
    /// World units per second.
    pub speed: f32,
    pub function: SpatialFunction,
}

impl AgentSpec {
    pub fn new(position: WorldPoint, speed: f32, function: SpatialFunction) -> Self {
        Self {
            position,
            forward: WorldPoint::planar(1.0, 0.0),
            speed,
            function,
        }
    }

    pub fn facing(mut self, forward: WorldPoint) -> Self {
        self.forward = forward;
        self
    }
}

/// Initial pose of a tracked target. Hosts move targets with
/// [`crate::TacticsRuntime::set_target_pose`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetSpec {
    pub position: WorldPoint,
}

impl TargetSpec {
    pub fn new(position: WorldPoint) -> Self {
        Self { position }
    }
}
