use std::sync::Arc;

use tactics_core::grid::{CellRef, GridHandle, TileGrid, WorldPoint};
use tactics_core::{
    CombineOp, EvaluationContext, LayerInput, PathClaim, PathPlanner, PathState, PlannerConfig, ResponseCurve,
    SpatialConfig, SpatialEvaluator, SpatialFunction,
};

fn corridor() -> (PathPlanner, SpatialEvaluator) {
    let grid: GridHandle = Arc::new(TileGrid::open(10, 1).unwrap());
    let function =
        SpatialFunction::new().with_layer(LayerInput::AllyDistance, ResponseCurve::Identity, CombineOp::Add);
    let config = SpatialConfig {
        sample_dimensions: 100.0,
        eye_height: 0.5,
    };
    (
        PathPlanner::new(grid.clone(), PlannerConfig::with_arrival_distance(0.1)),
        SpatialEvaluator::new(grid, config, function),
    )
}

fn claim_at_far_end(path_distance: f32) -> [PathClaim; 1] {
    [PathClaim {
        position: WorldPoint::planar(9.5, 0.5),
        path_distance,
    }]
}

#[test]
fn ally_with_shorter_claim_leaves_far_cells_uncontested() {
    let (mut planner, mut evaluator) = corridor();
    let origin = WorldPoint::planar(0.5, 0.5);
    let allies = claim_at_far_end(3.0);

    let choice = evaluator
        .choose_position(&mut planner, &EvaluationContext::new(origin, None, &allies), true)
        .unwrap();

    // Cells more than 3 away by path score the whole window diagonal;
    // the first of them in row-major order wins.
    assert_eq!(choice.cell, CellRef::new(4, 0));
    assert!((choice.score - 10.0f32.hypot(1.0)).abs() < 1e-4);
    assert_eq!(planner.state(), PathState::Active);
    let direction = planner.follow_path(origin).unwrap();
    assert!((direction.x - 1.0).abs() < 1e-6);
}

#[test]
fn ally_with_longer_claim_pushes_agent_away() {
    let (mut planner, mut evaluator) = corridor();
    let origin = WorldPoint::planar(0.5, 0.5);
    let allies = claim_at_far_end(50.0);

    let choice = evaluator
        .choose_position(&mut planner, &EvaluationContext::new(origin, None, &allies), false)
        .unwrap();

    assert_eq!(choice.cell, CellRef::new(0, 0));
    assert!((choice.score - 9.0).abs() < 1e-4);
    assert_eq!(planner.state(), PathState::None);
}
