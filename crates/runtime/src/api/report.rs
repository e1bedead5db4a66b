//! Per-tick summaries returned by [`crate::TacticsRuntime::tick`].

use serde::Serialize;
use tactics_core::{CellRef, EntityId, PathState, PositionChoice, TargetState, WorldPoint};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TickReport {
    /// Ticks completed, including this one.
    pub tick: u64,
    pub agents: Vec<AgentReport>,
    pub targets: Vec<TargetReport>,
}

impl TickReport {
    pub fn agent(&self, id: EntityId) -> Option<&AgentReport> {
        self.agents.iter().find(|agent| agent.id == id)
    }

    pub fn target(&self, id: EntityId) -> Option<&TargetReport> {
        self.targets.iter().find(|target| target.id == id)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AgentReport {
    pub id: EntityId,
    /// Position after this tick's movement.
    pub position: WorldPoint,
    pub path_state: PathState,
    pub chosen: Option<PositionChoice>,
    pub path_length: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TargetReport {
    pub id: EntityId,
    pub state: TargetState,
    /// Last known or estimated position; `None` while unknown.
    pub estimate: Option<WorldPoint>,
    /// Most likely cell and its probability.
    pub peak: Option<(CellRef, f64)>,
}
