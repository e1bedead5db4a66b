use tactics_core::{
    EntityId, EvaluationContext, GridHandle, PathClaim, PathPlanner, PositionChoice, SpatialEvaluator, TacticsConfig,
    WorldPoint,
};
use tracing::trace;

use crate::api::{AgentReport, AgentSpec};

/// An agent's kinematic state and its private engines.
pub(crate) struct Agent {
    pub(crate) id: EntityId,
    pub(crate) position: WorldPoint,
    pub(crate) forward: WorldPoint,
    speed: f32,
    planner: PathPlanner,
    evaluator: SpatialEvaluator,
    chosen: Option<PositionChoice>,
}

impl Agent {
    pub(crate) fn new(id: EntityId, spec: AgentSpec, grid: &GridHandle, config: &TacticsConfig) -> Self {
        Self {
            id,
            position: spec.position,
            forward: spec.forward,
            speed: spec.speed,
            planner: PathPlanner::new(grid.clone(), config.planner.clone()),
            evaluator: SpatialEvaluator::new(grid.clone(), config.spatial.clone(), spec.function),
            chosen: None,
        }
    }

    pub(crate) fn planner(&self) -> &PathPlanner {
        &self.planner
    }

    pub(crate) fn evaluator_mut(&mut self) -> &mut SpatialEvaluator {
        &mut self.evaluator
    }

    pub(crate) fn claim(&self) -> PathClaim {
        self.planner.claim(self.position)
    }

    /// Chooses a position, ticks the planner and moves toward the first
    /// waypoint by at most `speed * dt`.
    pub(crate) fn step(&mut self, target: Option<WorldPoint>, allies: &[PathClaim], dt: f32) {
        let ctx = EvaluationContext::new(self.position, target, allies);
        self.chosen = self.evaluator.choose_position(&mut self.planner, &ctx, true);
        self.planner.tick(self.position);

        let Ok(direction) = self.planner.follow_path(self.position) else {
            return;
        };
        let Some(first) = self.planner.path().steps.first() else {
            return;
        };
        let remaining = self.position.planar_distance(first.point);
        let travel = (self.speed * dt).max(0.0).min(remaining);
        if travel > 0.0 {
            self.position += direction * travel;
            self.forward = direction;
            trace!(agent = %self.id, position = ?self.position, travel, "agent moved");
        }
    }

    pub(crate) fn report(&self) -> AgentReport {
        AgentReport {
            id: self.id,
            position: self.position,
            path_state: self.planner.state(),
            chosen: self.chosen,
            path_length: self.planner.path_length(self.position),
        }
    }
}
