use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;
use tactics_core::grid::{CellRef, GridMap, GridOracle, TileGrid, WorldPoint};
use tactics_core::{
    EntityId, OccupancyConfig, OccupancyMap, OccupancyTracker, ObserverId, PerceptionConfig, PerceptionOracle,
    PerceptionSystem, RenormalizeMode, TargetObservation, TargetState, VisionParameters,
};

const TARGET: EntityId = EntityId(1);

/// One observer with a fixed view and a switchable lock on the target.
#[derive(Default)]
struct FixedView {
    visible: HashSet<CellRef>,
    aware: bool,
}

impl PerceptionOracle for FixedView {
    fn observers(&self) -> Vec<ObserverId> {
        vec![EntityId(50)]
    }

    fn visible_from_observer(&self, _observer: ObserverId, cell: CellRef) -> bool {
        self.visible.contains(&cell)
    }

    fn awareness_of(&self, _observer: ObserverId, entity: EntityId) -> f32 {
        if self.aware && entity == TARGET { 1.0 } else { 0.0 }
    }
}

fn observation_at(grid: &TileGrid, x: i32, y: i32) -> TargetObservation {
    TargetObservation::new(grid.cell_to_point(CellRef::new(x, y)), WorldPoint::ZERO)
}

#[test]
fn seen_cell_mass_is_spread_over_the_rest() {
    let grid = TileGrid::open(10, 10).unwrap();
    let mut map = OccupancyMap::new(grid.bounds());
    map.collapse(CellRef::new(2, 2)).unwrap();

    let mut mask = GridMap::new(grid.bounds(), false);
    mask.set(CellRef::new(2, 2), true).unwrap();
    let removed = map.apply_mask(&mask);
    assert_eq!(removed, 1.0);
    assert!(map.renormalize(&grid, &mask, RenormalizeMode::Uniform, removed));

    assert_eq!(map.probability(CellRef::new(2, 2)), 0.0);
    for cell in grid.bounds().cells().filter(|&cell| cell != CellRef::new(2, 2)) {
        assert!((map.probability(cell) - 1.0 / 99.0).abs() < 1e-12);
    }
    assert!((map.total_mass() - 1.0).abs() < 1e-9);
}

const WATCHER: ObserverId = EntityId(50);

/// 10x10 open grid, a watcher standing on (2, 2) whose sight ends inside
/// that cell, and a tracker that has just collapsed onto (2, 2).
fn watched_belief(renormalize: RenormalizeMode) -> (TileGrid, PerceptionSystem, OccupancyTracker) {
    let grid = TileGrid::open(10, 10).unwrap();
    let handle: Arc<TileGrid> = Arc::new(grid.clone());
    let config = PerceptionConfig {
        vision: VisionParameters::new(90.0, 0.4),
        ..PerceptionConfig::new()
    };
    let mut perception = PerceptionSystem::new(handle.clone(), config);
    let post = grid.cell_to_point(CellRef::new(2, 2));
    perception.add_observer(WATCHER, post, WorldPoint::planar(1.0, 0.0));

    let mut tracker = OccupancyTracker::new(
        TARGET,
        handle,
        OccupancyConfig {
            renormalize,
            ..OccupancyConfig::new()
        },
    );
    perception.update_target(TARGET, post, WorldPoint::ZERO, PerceptionConfig::DEFAULT_TIME_TO_ACKNOWLEDGE);
    assert_eq!(tracker.tick(&observation_at(&grid, 2, 2), &perception, 0.0), TargetState::Immediate);
    assert_eq!(tracker.map().probability(CellRef::new(2, 2)), 1.0);

    // The target slips away; one lapse drains the gauge.
    let away = observation_at(&grid, 7, 7);
    perception.update_target(TARGET, away.position, WorldPoint::ZERO, PerceptionConfig::DEFAULT_TIME_TO_LOSE);
    assert!(!perception.is_immediate(TARGET));
    (grid, perception, tracker)
}

#[test]
fn watched_cell_mass_spreads_uniformly_through_tracker() {
    let (grid, perception, mut tracker) = watched_belief(RenormalizeMode::Uniform);
    let mask = tracker.visibility_mask(&observation_at(&grid, 7, 7), &perception);
    assert_eq!(mask.values().iter().filter(|&&masked| masked).count(), 1);
    assert_eq!(mask.get(CellRef::new(2, 2)), Some(true));

    assert_eq!(tracker.tick(&observation_at(&grid, 7, 7), &perception, 0.0), TargetState::Hidden);
    let map = tracker.map();
    assert_eq!(map.probability(CellRef::new(2, 2)), 0.0);
    for cell in grid.bounds().cells().filter(|&cell| cell != CellRef::new(2, 2)) {
        assert!((map.probability(cell) - 1.0 / 99.0).abs() < 1e-12);
    }
    assert!((map.total_mass() - 1.0).abs() < 1e-9);
}

#[test]
fn watched_cell_mass_is_dropped_when_nothing_remains_to_scale() {
    let (grid, perception, mut tracker) = watched_belief(RenormalizeMode::default());

    assert_eq!(tracker.tick(&observation_at(&grid, 7, 7), &perception, 0.0), TargetState::Hidden);
    let map = tracker.map();
    assert_eq!(map.probability(CellRef::new(2, 2)), 0.0);
    assert_eq!(map.total_mass(), 0.0);
    assert_eq!(map.argmax(), None);
    assert!(map.probabilities().values().iter().all(|p| p.is_finite()));
}

#[test]
fn tracker_spreads_into_unseen_corridor() {
    let grid = TileGrid::from_ascii(&["..........", "####.#####", ".........."], 1.0, WorldPoint::ZERO).unwrap();
    let handle: Arc<TileGrid> = Arc::new(grid.clone());
    let mut tracker = OccupancyTracker::new(TARGET, handle, OccupancyConfig::new());
    let mut view = FixedView {
        aware: true,
        ..FixedView::default()
    };

    assert_eq!(tracker.tick(&observation_at(&grid, 4, 1), &view, 0.1), TargetState::Immediate);

    view.aware = false;
    view.visible = (0..10).map(|x| CellRef::new(x, 0)).collect();
    for _ in 0..20 {
        assert_eq!(tracker.tick(&observation_at(&grid, 9, 2), &view, 0.5), TargetState::Hidden);
        assert!((tracker.map().total_mass() - 1.0).abs() < 1e-9);
    }

    for x in 0..10 {
        assert!(tracker.map().probability(CellRef::new(x, 0)) < 0.2);
    }
    let estimate = tracker.belief().estimate().unwrap();
    assert!(estimate.y >= 1.0);
}

proptest! {
    /// Diffusion redistributes without creating or destroying mass.
    #[test]
    fn prop_diffusion_conserves_mass(
        rate in 0.0f64..1.0,
        seed in (0..6i32, 0..6i32),
        rounds in 1usize..8,
    ) {
        let grid = TileGrid::from_ascii(&["......", ".#..~.", "......", "..##..", "......", "......"], 1.0, WorldPoint::ZERO).unwrap();
        let cell = CellRef::new(seed.0, seed.1);
        let mut map = OccupancyMap::new(grid.bounds());
        map.collapse(cell).unwrap();

        for _ in 0..rounds {
            map.diffuse(&grid, rate);
            prop_assert!((map.total_mass() - 1.0).abs() < 1e-9);
            prop_assert!(map.probabilities().values().iter().all(|&p| p >= 0.0));
        }
    }

    /// Any observe, mask and diffuse sequence keeps total mass at 1 while
    /// some traversable cell stays unseen.
    #[test]
    fn prop_tracker_keeps_unit_mass(
        ticks in prop::collection::vec((any::<bool>(), prop::collection::vec(0..25usize, 0..12), 0.0f32..2.0), 1..12),
        mode in prop::sample::select(vec![RenormalizeMode::Uniform, RenormalizeMode::Proportional]),
    ) {
        let grid = TileGrid::open(5, 5).unwrap();
        let config = OccupancyConfig { renormalize: mode, ..OccupancyConfig::new() };
        let mut tracker = OccupancyTracker::new(TARGET, Arc::new(grid.clone()), config);
        let mut view = FixedView { aware: true, ..FixedView::default() };
        tracker.tick(&observation_at(&grid, 2, 2), &view, 0.0);

        for (aware, seen, dt) in ticks {
            view.aware = aware;
            view.visible = seen.iter().map(|&index| grid.bounds().cell_at(index)).collect();
            let state = tracker.tick(&observation_at(&grid, 2, 2), &view, dt);
            prop_assert!(state.is_known());

            let mass = tracker.map().total_mass();
            prop_assert!(mass.is_finite());
            // Proportional scaling has nothing to scale once every massed cell is seen.
            if mode == RenormalizeMode::Uniform || mass > 0.0 {
                prop_assert!((mass - 1.0).abs() < 1e-9, "mass drifted to {}", mass);
            }
        }
    }
}
