use tactics_core::{
    EntityId, GridHandle, OccupancyConfig, OccupancyTracker, PerceptionOracle, TargetObservation, WorldPoint,
};

use crate::api::TargetReport;

/// A tracked entity's true pose and the shared belief about it.
pub(crate) struct Target {
    pub(crate) id: EntityId,
    pub(crate) position: WorldPoint,
    pub(crate) velocity: WorldPoint,
    tracker: OccupancyTracker,
}

impl Target {
    pub(crate) fn new(id: EntityId, position: WorldPoint, grid: GridHandle, config: OccupancyConfig) -> Self {
        Self {
            id,
            position,
            velocity: WorldPoint::ZERO,
            tracker: OccupancyTracker::new(id, grid, config),
        }
    }

    pub(crate) fn tracker(&self) -> &OccupancyTracker {
        &self.tracker
    }

    pub(crate) fn update_belief(&mut self, perception: &dyn PerceptionOracle, dt: f32) {
        let observation = TargetObservation::new(self.position, self.velocity);
        self.tracker.tick(&observation, perception, dt);
    }

    pub(crate) fn estimate(&self) -> Option<WorldPoint> {
        self.tracker.belief().estimate()
    }

    pub(crate) fn report(&self) -> TargetReport {
        TargetReport {
            id: self.id,
            state: self.tracker.state(),
            estimate: self.estimate(),
            peak: self.tracker.map().argmax(),
        }
    }
}
