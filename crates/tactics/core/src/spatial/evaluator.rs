//! Tactical position selection.
//!
//! # Pipeline
//!
//! 1. **Gather**: a distance field over a square window centered on the agent
//!    decides which cells are candidates at all.
//! 2. **Bias**: the previously chosen cell starts with the hysteresis bonus.
//! 3. **Score**: every layer is evaluated for every candidate in order and
//!    merged into the cell's running score.
//! 4. **Select**: the highest score wins; ties go to the first cell in
//!    row-major order.
//!
//! # Determinism
//!
//! Scoring is pure given the grid, the context, and the previous choice.
//! There is no randomness anywhere in the pipeline.

use tracing::{debug, trace};

use super::{FunctionLayer, LayerInput, SpatialFunction};
use crate::config::SpatialConfig;
use crate::grid::{CellRef, GridBounds, GridHandle, GridMap, GridOracle, WorldPoint};
use crate::path::{DistanceField, PathClaim, PathPlanner};

/// Read-only inputs for one evaluation.
#[derive(Clone, Copy, Debug)]
pub struct EvaluationContext<'a> {
    /// Where the agent stands; the window and distance field center here.
    pub origin: WorldPoint,
    /// Best estimate of the current target, if any.
    pub target: Option<WorldPoint>,
    /// Claims published by other agents this tick.
    pub allies: &'a [PathClaim],
}

impl<'a> EvaluationContext<'a> {
    pub fn new(origin: WorldPoint, target: Option<WorldPoint>, allies: &'a [PathClaim]) -> Self {
        Self {
            origin,
            target,
            allies,
        }
    }
}

/// Winning cell and its final score.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionChoice {
    pub cell: CellRef,
    pub score: f32,
}

/// Per-agent evaluator. Owns the hysteresis cell for its agent only.
pub struct SpatialEvaluator {
    grid: GridHandle,
    config: SpatialConfig,
    function: SpatialFunction,
    last_cell: Option<CellRef>,
}

impl SpatialEvaluator {
    pub fn new(grid: GridHandle, config: SpatialConfig, function: SpatialFunction) -> Self {
        Self {
            grid,
            config,
            function,
            last_cell: None,
        }
    }

    pub fn function(&self) -> &SpatialFunction {
        &self.function
    }

    pub fn set_function(&mut self, function: SpatialFunction) {
        self.function = function;
    }

    /// Cell picked by the most recent evaluation.
    pub fn last_choice(&self) -> Option<CellRef> {
        self.last_cell
    }

    /// Picks the best reachable cell around the agent.
    ///
    /// # Arguments
    ///
    /// * `planner` - The agent's planner; supplies the distance field and,
    ///   when `pathfind` is set, receives the path to the winning cell
    /// * `ctx` - Agent position, target estimate, and ally claims
    /// * `pathfind` - Rebuild the planner's path toward the result; clears
    ///   the path when nothing is reachable
    ///
    /// # Returns
    ///
    /// The winning cell and score, or `None` when the window holds no
    /// reachable cell.
    pub fn choose_position(
        &mut self,
        planner: &mut PathPlanner,
        ctx: &EvaluationContext<'_>,
        pathfind: bool,
    ) -> Option<PositionChoice> {
        let previous = self.last_cell.take();

        let window = self.grid.window_around(ctx.origin, self.config.sample_dimensions);
        let choice = planner
            .dijkstra(ctx.origin, window)
            .and_then(|field| {
                let scores = self.score_cells(&field, ctx, previous);
                let choice = select_best(self.grid.as_ref(), &field, &scores);
                if let (true, Some(choice)) = (pathfind, choice) {
                    planner.build_path_from_distance_field(ctx.origin, choice.cell, &field);
                }
                choice
            });

        match choice {
            Some(choice) => {
                debug!(cell = %choice.cell, score = choice.score, ?previous, "position chosen");
                self.last_cell = Some(choice.cell);
            }
            None => {
                debug!(origin = ?ctx.origin, "no reachable position");
                if pathfind {
                    planner.clear();
                }
            }
        }
        choice
    }

    /// Scores every reachable cell of `field`.
    ///
    /// Cells the field did not reach keep a score of 0 and are never
    /// candidates. `previous` receives the hysteresis bonus when it lies
    /// inside the window.
    pub fn score_cells(
        &self,
        field: &DistanceField,
        ctx: &EvaluationContext<'_>,
        previous: Option<CellRef>,
    ) -> GridMap<f32> {
        let mut scores = GridMap::new(field.bounds(), 0.0f32);
        if let Some(slot) = previous.and_then(|cell| scores.get_mut(cell)) {
            *slot = self.function.last_cell_bonus;
        }

        if ctx.target.is_none() && self.function.reads_target() {
            debug!("no target estimate; target layers read 0");
        }

        for layer in &self.function.layers {
            self.apply_layer(layer, field, ctx, &mut scores);
        }
        scores
    }

    fn apply_layer(
        &self,
        layer: &FunctionLayer,
        field: &DistanceField,
        ctx: &EvaluationContext<'_>,
        scores: &mut GridMap<f32>,
    ) {
        let grid = self.grid.as_ref();
        let far = window_diagonal(grid, field.bounds());

        for (cell, path_distance) in field.reachable_cells() {
            if !grid.is_traversable(cell) {
                continue;
            }
            let point = grid.cell_to_point(cell);
            let raw = match layer.input {
                LayerInput::None => 0.0,
                LayerInput::TargetRange => ctx.target.map_or(0.0, |target| point.distance(target)),
                LayerInput::PathDistance => path_distance,
                LayerInput::LineOfSight => {
                    let eye = point + WorldPoint::new(0.0, 0.0, self.config.eye_height);
                    match ctx.target {
                        Some(target) if grid.line_of_sight(eye, target) => 1.0,
                        _ => 0.0,
                    }
                }
                LayerInput::AllyDistance => nearest_contested_ally(point, path_distance, ctx.allies).unwrap_or(far),
            };

            let weighted = layer.curve.evaluate(raw);
            if let Some(score) = scores.get_mut(cell) {
                *score = layer.op.apply(*score, weighted);
                trace!(%cell, input = %layer.input, raw, weighted, score = *score, "layer applied");
            }
        }
    }
}

/// Distance to the closest ally whose claim still contests `cell`.
///
/// An ally already committed to a shorter path than ours to this cell is
/// ignored for it.
pub(crate) fn nearest_contested_ally(point: WorldPoint, path_distance: f32, allies: &[PathClaim]) -> Option<f32> {
    allies
        .iter()
        .filter(|ally| ally.path_distance >= path_distance)
        .map(|ally| point.distance(ally.position))
        .min_by(f32::total_cmp)
}

fn window_diagonal(grid: &dyn GridOracle, bounds: GridBounds) -> f32 {
    let size = grid.cell_size();
    let width = bounds.width() as f32 * size;
    let height = bounds.height() as f32 * size;
    width.hypot(height)
}

/// Highest-scoring traversable cell of `field`; the first in scan order on ties.
///
/// The field's source counts as reached even when it is blocked.
fn select_best(grid: &dyn GridOracle, field: &DistanceField, scores: &GridMap<f32>) -> Option<PositionChoice> {
    let mut best: Option<PositionChoice> = None;
    for (cell, _) in field.reachable_cells() {
        if !grid.is_traversable(cell) {
            continue;
        }
        let Some(score) = scores.get(cell) else {
            continue;
        };
        if best.is_none_or(|current| score > current.score) {
            best = Some(PositionChoice { cell, score });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::PlannerConfig;
    use crate::grid::TileGrid;
    use crate::path::PathState;
    use crate::spatial::{CombineOp, ResponseCurve};

    fn setup(rows: &[&str], function: SpatialFunction) -> (PathPlanner, SpatialEvaluator) {
        let grid: GridHandle = Arc::new(TileGrid::from_ascii(rows, 1.0, WorldPoint::ZERO).unwrap());
        let config = SpatialConfig {
            sample_dimensions: 100.0,
            eye_height: 0.5,
        };
        (
            PathPlanner::new(grid.clone(), PlannerConfig::with_arrival_distance(0.1)),
            SpatialEvaluator::new(grid, config, function),
        )
    }

    fn center(x: i32, y: i32) -> WorldPoint {
        WorldPoint::planar(x as f32 + 0.5, y as f32 + 0.5)
    }

    #[test]
    fn prefers_cells_far_along_the_path() {
        let function =
            SpatialFunction::new().with_layer(LayerInput::PathDistance, ResponseCurve::Identity, CombineOp::Add);
        let (mut planner, mut evaluator) = setup(&[".....", ".###.", "....."], function);
        let ctx = EvaluationContext::new(center(0, 0), None, &[]);

        let choice = evaluator.choose_position(&mut planner, &ctx, true).unwrap();
        assert_eq!(choice.cell, CellRef::new(4, 2));
        assert!((choice.score - 6.0).abs() < 1e-5);
        assert_eq!(evaluator.last_choice(), Some(CellRef::new(4, 2)));
        assert_eq!(planner.state(), PathState::Active);
        assert_eq!(planner.path().last_point(), Some(center(4, 2)));
    }

    #[test]
    fn ties_go_to_first_cell_in_scan_order() {
        let (mut planner, mut evaluator) = setup(&["...", "...", "..."], SpatialFunction::new());
        let ctx = EvaluationContext::new(center(1, 1), None, &[]);
        let choice = evaluator.choose_position(&mut planner, &ctx, false).unwrap();
        assert_eq!(choice, PositionChoice {
            cell: CellRef::new(0, 0),
            score: 0.0
        });
        assert_eq!(planner.state(), PathState::None);
    }

    #[test]
    fn blocked_origin_is_never_chosen() {
        // Every open cell scores below zero; the water cell under the agent
        // would win on its untouched score if it were a candidate.
        let function =
            SpatialFunction::new().with_layer(LayerInput::PathDistance, ResponseCurve::linear(-1.0, 0.0), CombineOp::Add);
        let (mut planner, mut evaluator) = setup(&["~.."], function);
        let ctx = EvaluationContext::new(center(0, 0), None, &[]);

        let choice = evaluator.choose_position(&mut planner, &ctx, false).unwrap();
        assert_eq!(choice.cell, CellRef::new(1, 0));
        assert!((choice.score + 1.0).abs() < 1e-5);
    }

    #[test]
    fn hysteresis_keeps_previous_choice() {
        let function = SpatialFunction::new()
            .with_layer(LayerInput::TargetRange, ResponseCurve::linear(-1.0, 0.0), CombineOp::Add)
            .with_last_cell_bonus(0.5);
        let (mut planner, mut evaluator) = setup(&["....."], function);
        let origin = center(2, 0);

        let first = EvaluationContext::new(origin, Some(center(0, 0)), &[]);
        assert_eq!(evaluator.choose_position(&mut planner, &first, false).unwrap().cell, CellRef::new(0, 0));

        // The old cell is now 0.2 worse than its neighbor but keeps a 0.5 bonus.
        let second = EvaluationContext::new(origin, Some(WorldPoint::planar(1.1, 0.5)), &[]);
        assert_eq!(evaluator.choose_position(&mut planner, &second, false).unwrap().cell, CellRef::new(0, 0));
    }

    #[test]
    fn replace_discards_earlier_layers() {
        let function = SpatialFunction::new()
            .with_layer(LayerInput::PathDistance, ResponseCurve::Identity, CombineOp::Add)
            .with_layer(LayerInput::None, ResponseCurve::Constant(1.0), CombineOp::Replace)
            .with_layer(LayerInput::PathDistance, ResponseCurve::linear(-1.0, 0.0), CombineOp::Add);
        let (mut planner, mut evaluator) = setup(&["....."], function);
        let ctx = EvaluationContext::new(center(2, 0), None, &[]);
        let choice = evaluator.choose_position(&mut planner, &ctx, false).unwrap();
        assert_eq!(choice, PositionChoice {
            cell: CellRef::new(2, 0),
            score: 1.0
        });
    }

    #[test]
    fn line_of_sight_layer_prefers_visible_cells() {
        let function = SpatialFunction::new()
            .with_layer(LayerInput::LineOfSight, ResponseCurve::Identity, CombineOp::Add)
            .with_layer(LayerInput::PathDistance, ResponseCurve::linear(-0.01, 0.0), CombineOp::Add);
        let (mut planner, mut evaluator) = setup(&["#....", "#.#..", "..#.."], function);
        let target = center(4, 2);
        let ctx = EvaluationContext::new(center(0, 2), Some(target), &[]);
        let choice = evaluator.choose_position(&mut planner, &ctx, false).unwrap();
        let grid = TileGrid::from_ascii(&["#....", "#.#..", "..#.."], 1.0, WorldPoint::ZERO).unwrap();
        assert!(grid.line_of_sight(grid.cell_to_point(choice.cell), target));
        assert!(choice.score > 0.9);
    }

    #[test]
    fn missing_target_reads_zero() {
        let function = SpatialFunction::new()
            .with_layer(LayerInput::TargetRange, ResponseCurve::Identity, CombineOp::Add)
            .with_layer(LayerInput::LineOfSight, ResponseCurve::Identity, CombineOp::Add);
        let (planner, evaluator) = setup(&["..."], function);
        let origin = center(0, 0);
        let field = planner.dijkstra(origin, GridBounds::from_dimensions(3, 1)).unwrap();
        let ctx = EvaluationContext::new(origin, None, &[]);
        let scores = evaluator.score_cells(&field, &ctx, None);
        assert!(scores.values().iter().all(|&score| score == 0.0));
    }

    #[test]
    fn no_reachable_cell_clears_the_path() {
        let (mut planner, mut evaluator) = setup(&["..", ".."], SpatialFunction::new());
        planner.set_destination(center(1, 1), center(0, 0));
        let ctx = EvaluationContext::new(WorldPoint::planar(-10.0, -10.0), None, &[]);
        assert_eq!(evaluator.choose_position(&mut planner, &ctx, true), None);
        assert_eq!(planner.state(), PathState::None);
        assert_eq!(evaluator.last_choice(), None);
    }

    #[test]
    fn ally_exclusion_by_claim_length() {
        let allies = [PathClaim {
            position: WorldPoint::planar(10.0, 0.0),
            path_distance: 3.0,
        }];
        let point = WorldPoint::planar(10.0, 4.0);
        assert_eq!(nearest_contested_ally(point, 5.0, &allies), None);
        assert_eq!(nearest_contested_ally(point, 3.0, &allies), Some(4.0));
        assert_eq!(nearest_contested_ally(point, 1.0, &allies), Some(4.0));
    }
}
