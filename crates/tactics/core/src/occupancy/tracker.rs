use tracing::{debug, warn};

use super::{OccupancyMap, TargetBelief, TargetState};
use crate::config::OccupancyConfig;
use crate::entity::EntityId;
use crate::grid::{GridHandle, GridMap, WorldPoint};
use crate::perception::PerceptionOracle;

/// True pose of the tracked entity this tick.
///
/// Only read when an observer is fully aware of the entity, and to keep the
/// cell it stands on from being masked.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct TargetObservation {
    pub position: WorldPoint,
    pub velocity: WorldPoint,
}

impl TargetObservation {
    pub fn new(position: WorldPoint, velocity: WorldPoint) -> Self {
        Self { position, velocity }
    }
}

/// Belief about one hidden entity, created at registration and dropped at
/// deregistration.
pub struct OccupancyTracker {
    entity: EntityId,
    grid: GridHandle,
    config: OccupancyConfig,
    belief: TargetBelief,
    map: OccupancyMap,
}

impl OccupancyTracker {
    pub fn new(entity: EntityId, grid: GridHandle, config: OccupancyConfig) -> Self {
        let map = OccupancyMap::new(grid.bounds());
        Self {
            entity,
            grid,
            config,
            belief: TargetBelief::new(),
            map,
        }
    }

    #[inline]
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    #[inline]
    pub fn state(&self) -> TargetState {
        self.belief.state()
    }

    pub fn belief(&self) -> &TargetBelief {
        &self.belief
    }

    pub fn map(&self) -> &OccupancyMap {
        &self.map
    }

    /// One update cycle.
    ///
    /// 1. Any fully aware observer makes the entity `Immediate` and collapses
    ///    the map onto its cell.
    /// 2. Otherwise a known entity is `Hidden`: visible cells are zeroed, the
    ///    removed mass is returned to the rest, and the argmax becomes the
    ///    position estimate.
    /// 3. A known entity's map then diffuses by `dt`.
    pub fn tick(&mut self, observation: &TargetObservation, perception: &dyn PerceptionOracle, dt: f32) -> TargetState {
        if perception.is_immediate(self.entity) {
            self.observe(observation);
        } else {
            self.belief.lose_sight();
        }

        if self.belief.state() == TargetState::Hidden {
            self.update_hidden(observation, perception);
        }

        if self.belief.is_known() {
            let rate = self.config.diffusion_rate(dt);
            self.map.diffuse(self.grid.as_ref(), f64::from(rate));
        }
        self.belief.state()
    }

    fn observe(&mut self, observation: &TargetObservation) {
        if self.belief.state() != TargetState::Immediate {
            debug!(target = %self.entity, position = ?observation.position, "target acquired");
        }
        self.belief.observe(observation.position, observation.velocity);

        let cell = self.grid.point_to_cell(observation.position);
        if let Err(err) = self.map.collapse(cell) {
            warn!(target = %self.entity, error = %err, "observed target is off the grid");
        }
    }

    fn update_hidden(&mut self, observation: &TargetObservation, perception: &dyn PerceptionOracle) {
        let mask = self.visibility_mask(observation, perception);
        let removed = self.map.apply_mask(&mask);
        let renormalized = self
            .map
            .renormalize(self.grid.as_ref(), &mask, self.config.renormalize, removed);
        debug!(target = %self.entity, removed, renormalized, "hidden update");

        if let Some((cell, p)) = self.map.argmax() {
            let estimate = self.grid.cell_to_point(cell) + WorldPoint::new(0.0, 0.0, self.config.eye_height);
            self.belief.set_estimate(estimate);
            debug!(target = %self.entity, %cell, p, "estimate refreshed");
        }
    }

    /// Cells some observer can see, plus every non-traversable cell.
    ///
    /// The cell the entity stands on stays open when it is not traversable.
    pub fn visibility_mask(&self, observation: &TargetObservation, perception: &dyn PerceptionOracle) -> GridMap<bool> {
        let grid = self.grid.as_ref();
        let observers = perception.observers();
        let mut mask = GridMap::new(self.map.bounds(), false);

        for cell in self.map.bounds().cells() {
            let masked = !grid.is_traversable(cell)
                || observers
                    .iter()
                    .any(|&observer| perception.visible_from_observer(observer, cell));
            if masked {
                if let Some(slot) = mask.get_mut(cell) {
                    *slot = true;
                }
            }
        }

        let occupied = grid.point_to_cell(observation.position);
        if grid.is_valid_cell(occupied) && !grid.is_traversable(occupied) {
            if let Some(slot) = mask.get_mut(occupied) {
                *slot = false;
            }
        }
        mask
    }
}
