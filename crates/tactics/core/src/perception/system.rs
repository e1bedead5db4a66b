use tracing::{debug, trace};

use super::{Observer, ObserverId, PerceptionOracle};
use crate::config::PerceptionConfig;
use crate::entity::EntityId;
use crate::grid::{CellRef, GridHandle, WorldPoint};

/// Owns every observer and answers the tracker's perception queries.
pub struct PerceptionSystem {
    grid: GridHandle,
    config: PerceptionConfig,
    observers: Vec<Observer>,
}

impl PerceptionSystem {
    pub fn new(grid: GridHandle, config: PerceptionConfig) -> Self {
        Self {
            grid,
            config,
            observers: Vec::new(),
        }
    }

    pub fn config(&self) -> &PerceptionConfig {
        &self.config
    }

    /// Registers an observer with the configured vision. Returns false when
    /// the id is already taken.
    pub fn add_observer(&mut self, id: ObserverId, position: WorldPoint, forward: WorldPoint) -> bool {
        if self.observer(id).is_some() {
            return false;
        }
        self.observers
            .push(Observer::new(id, position, forward, self.config.vision));
        true
    }

    pub fn remove_observer(&mut self, id: ObserverId) -> Option<Observer> {
        let index = self.observers.iter().position(|observer| observer.id == id)?;
        Some(self.observers.remove(index))
    }

    pub fn observer(&self, id: ObserverId) -> Option<&Observer> {
        self.observers.iter().find(|observer| observer.id == id)
    }

    pub fn set_pose(&mut self, id: ObserverId, position: WorldPoint, forward: WorldPoint) -> bool {
        match self.observers.iter_mut().find(|observer| observer.id == id) {
            Some(observer) => {
                observer.set_pose(position, forward);
                true
            }
            None => false,
        }
    }

    /// Advances every observer's gauge for one target.
    pub fn update_target(&mut self, entity: EntityId, position: WorldPoint, velocity: WorldPoint, dt: f32) {
        let grid = self.grid.as_ref();
        for observer in &mut self.observers {
            let sees = observer.has_clear_los(grid, position);
            let hears = self
                .config
                .hearing
                .as_ref()
                .is_some_and(|hearing| observer.can_hear(hearing, position, velocity));
            let level = observer.update_awareness(entity, sees, hears, dt, &self.config);
            trace!(observer = %observer.id, target = %entity, sees, hears, level, "awareness updated");
        }
    }

    /// Drops every gauge held for `entity`.
    pub fn forget_target(&mut self, entity: EntityId) {
        debug!(target = %entity, "forgetting target");
        for observer in &mut self.observers {
            observer.forget(entity);
        }
    }
}

impl PerceptionOracle for PerceptionSystem {
    fn observers(&self) -> Vec<ObserverId> {
        self.observers.iter().map(|observer| observer.id).collect()
    }

    fn visible_from_observer(&self, observer: ObserverId, cell: CellRef) -> bool {
        let grid = self.grid.as_ref();
        if !grid.is_valid_cell(cell) {
            return false;
        }
        self.observer(observer)
            .is_some_and(|observer| observer.has_clear_los(grid, grid.cell_to_point(cell)))
    }

    fn awareness_of(&self, observer: ObserverId, entity: EntityId) -> f32 {
        self.observer(observer)
            .map_or(0.0, |observer| observer.awareness_of(entity))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::grid::TileGrid;

    fn system() -> PerceptionSystem {
        let grid = TileGrid::from_ascii(&[".....", ".....", "..#.."], 100.0, WorldPoint::ZERO).unwrap();
        PerceptionSystem::new(Arc::new(grid), PerceptionConfig::new())
    }

    #[test]
    fn registration_is_unique() {
        let mut system = system();
        assert!(system.add_observer(EntityId(1), WorldPoint::planar(50.0, 50.0), WorldPoint::planar(1.0, 0.0)));
        assert!(!system.add_observer(EntityId(1), WorldPoint::ZERO, WorldPoint::planar(1.0, 0.0)));
        assert_eq!(system.observers(), vec![EntityId(1)]);
        assert!(system.remove_observer(EntityId(1)).is_some());
        assert!(system.observers().is_empty());
        assert!(!system.set_pose(EntityId(1), WorldPoint::ZERO, WorldPoint::ZERO));
    }

    #[test]
    fn cell_visibility_respects_cone_and_walls() {
        let mut system = system();
        system.add_observer(EntityId(1), WorldPoint::planar(50.0, 250.0), WorldPoint::planar(1.0, 0.0));
        assert!(system.visible_from_observer(EntityId(1), CellRef::new(1, 2)));
        assert!(!system.visible_from_observer(EntityId(1), CellRef::new(3, 2)));
        assert!(!system.visible_from_observer(EntityId(1), CellRef::new(0, 0)));
        assert!(!system.visible_from_observer(EntityId(2), CellRef::new(1, 2)));
        assert!(!system.visible_from_observer(EntityId(1), CellRef::new(9, 9)));
    }

    #[test]
    fn sustained_sight_becomes_immediate() {
        let mut system = system();
        system.add_observer(EntityId(1), WorldPoint::planar(50.0, 50.0), WorldPoint::planar(1.0, 0.0));
        let target = EntityId(10);
        let seen = WorldPoint::planar(350.0, 50.0);

        system.update_target(target, seen, WorldPoint::ZERO, 1.0);
        assert!(!system.is_immediate(target));
        system.update_target(target, seen, WorldPoint::ZERO, 1.0);
        assert!(system.is_immediate(target));

        system.forget_target(target);
        assert_eq!(system.awareness_of(EntityId(1), target), 0.0);
    }
}
