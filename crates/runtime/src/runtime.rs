//! High-level tick orchestrator.
//!
//! The runtime owns every agent's planner and evaluator, one occupancy
//! tracker per target, and the shared perception system. Engines receive the
//! grid handle at construction; nothing is looked up per call.

use tactics_core::{
    EntityId, GridHandle, OccupancyTracker, Path, PathClaim, PerceptionSystem, SpatialFunction, TacticsConfig,
    WorldPoint,
};
use tracing::{debug, info};

use crate::agent::Agent;
use crate::api::{AgentSpec, Result, RuntimeError, TargetSpec, TickReport};
use crate::target::Target;

/// Drives agents and targets one fixed-order tick at a time.
pub struct TacticsRuntime {
    grid: GridHandle,
    config: TacticsConfig,
    perception: PerceptionSystem,
    agents: Vec<Agent>,
    targets: Vec<Target>,
    ticks: u64,
}

impl TacticsRuntime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn grid(&self) -> &GridHandle {
        &self.grid
    }

    pub fn config(&self) -> &TacticsConfig {
        &self.config
    }

    /// Ticks completed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn perception(&self) -> &PerceptionSystem {
        &self.perception
    }

    /// Registers an agent, which also becomes an observer.
    pub fn add_agent(&mut self, id: EntityId, spec: AgentSpec) -> Result<()> {
        self.ensure_unregistered(id)?;
        if !(spec.speed.is_finite() && spec.speed >= 0.0) {
            return Err(RuntimeError::InvalidSpec {
                field: "speed",
                value: spec.speed,
            });
        }

        self.perception.add_observer(id, spec.position, spec.forward);
        let agent = Agent::new(id, spec, &self.grid, &self.config);
        debug!(agent = %id, position = ?agent.position, "agent registered");
        self.agents.push(agent);
        Ok(())
    }

    pub fn remove_agent(&mut self, id: EntityId) -> Result<()> {
        let index = self.agent_index(id)?;
        self.agents.remove(index);
        self.perception.remove_observer(id);
        debug!(agent = %id, "agent removed");
        Ok(())
    }

    /// Starts tracking `id`. Its belief is `Unknown` until an observer
    /// becomes fully aware of it.
    pub fn add_target(&mut self, id: EntityId, spec: TargetSpec) -> Result<()> {
        self.ensure_unregistered(id)?;
        self.targets.push(Target::new(
            id,
            spec.position,
            self.grid.clone(),
            self.config.occupancy.clone(),
        ));
        debug!(target = %id, position = ?spec.position, "target registered");
        Ok(())
    }

    /// Stops tracking `id`, dropping its tracker and every awareness gauge.
    pub fn remove_target(&mut self, id: EntityId) -> Result<()> {
        let index = self.target_index(id)?;
        self.targets.remove(index);
        self.perception.forget_target(id);
        debug!(target = %id, "target removed");
        Ok(())
    }

    /// Moves a target. The pose is read by perception and the tracker on
    /// the next tick.
    pub fn set_target_pose(&mut self, id: EntityId, position: WorldPoint, velocity: WorldPoint) -> Result<()> {
        let index = self.target_index(id)?;
        let target = &mut self.targets[index];
        target.position = position;
        target.velocity = velocity;
        Ok(())
    }

    pub fn set_agent_function(&mut self, id: EntityId, function: SpatialFunction) -> Result<()> {
        let index = self.agent_index(id)?;
        self.agents[index].evaluator_mut().set_function(function);
        Ok(())
    }

    pub fn agent_position(&self, id: EntityId) -> Option<WorldPoint> {
        self.agent(id).map(|agent| agent.position)
    }

    pub fn agent_path(&self, id: EntityId) -> Option<&Path> {
        self.agent(id).map(|agent| agent.planner().path())
    }

    pub fn tracker(&self, id: EntityId) -> Option<&OccupancyTracker> {
        self.targets
            .iter()
            .find(|target| target.id == id)
            .map(|target| target.tracker())
    }

    /// Advances the world by `dt` seconds.
    ///
    /// 1. Observer poses and awareness gauges are refreshed.
    /// 2. Every tracker updates its belief.
    /// 3. Ally claims are snapshotted once for the whole tick.
    /// 4. Each agent chooses a position, ticks its planner and moves.
    pub fn tick(&mut self, dt: f32) -> TickReport {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        for agent in &self.agents {
            self.perception.set_pose(agent.id, agent.position, agent.forward);
        }
        for target in &self.targets {
            self.perception
                .update_target(target.id, target.position, target.velocity, dt);
        }

        for target in &mut self.targets {
            target.update_belief(&self.perception, dt);
        }

        let claims: Vec<(EntityId, PathClaim)> = self
            .agents
            .iter()
            .map(|agent| (agent.id, agent.claim()))
            .collect();
        let focus = self.targets.iter().find_map(Target::estimate);

        for agent in &mut self.agents {
            let allies: Vec<PathClaim> = claims
                .iter()
                .filter(|(id, _)| *id != agent.id)
                .map(|(_, claim)| *claim)
                .collect();
            agent.step(focus, &allies, dt);
        }

        self.ticks += 1;
        TickReport {
            tick: self.ticks,
            agents: self.agents.iter().map(Agent::report).collect(),
            targets: self.targets.iter().map(Target::report).collect(),
        }
    }

    fn agent(&self, id: EntityId) -> Option<&Agent> {
        self.agents.iter().find(|agent| agent.id == id)
    }

    fn agent_index(&self, id: EntityId) -> Result<usize> {
        self.agents
            .iter()
            .position(|agent| agent.id == id)
            .ok_or(RuntimeError::UnknownAgent(id))
    }

    fn target_index(&self, id: EntityId) -> Result<usize> {
        self.targets
            .iter()
            .position(|target| target.id == id)
            .ok_or(RuntimeError::UnknownTarget(id))
    }

    fn ensure_unregistered(&self, id: EntityId) -> Result<()> {
        let taken = self.agents.iter().any(|agent| agent.id == id)
            || self.targets.iter().any(|target| target.id == id);
        if taken {
            Err(RuntimeError::DuplicateEntity(id))
        } else {
            Ok(())
        }
    }
}

/// Builder for [`TacticsRuntime`].
#[derive(Default)]
pub struct RuntimeBuilder {
    grid: Option<GridHandle>,
    config: TacticsConfig,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Set the shared grid (required)
    pub fn grid(mut self, grid: GridHandle) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Override engine tuning
    pub fn config(mut self, config: TacticsConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<TacticsRuntime> {
        let grid = self.grid.ok_or(RuntimeError::MissingGrid)?;
        let bounds = grid.bounds();
        info!(
            width = bounds.width(),
            height = bounds.height(),
            cell_size = grid.cell_size(),
            "tactics runtime ready"
        );

        Ok(TacticsRuntime {
            perception: PerceptionSystem::new(grid.clone(), self.config.perception.clone()),
            grid,
            config: self.config,
            agents: Vec::new(),
            targets: Vec::new(),
            ticks: 0,
        })
    }
}
