//! String-pull smoothing.

use super::PathStep;
use crate::grid::{GridOracle, WorldPoint};

/// Drops waypoints that the previous committed waypoint can see past.
///
/// `from` anchors the walk and is not part of the output. A step is
/// committed when the step after it is not visible from the current anchor;
/// the final step is always kept. Inputs of one step or fewer are returned
/// as they are.
pub fn smooth_steps(grid: &dyn GridOracle, from: WorldPoint, steps: &[PathStep]) -> Vec<PathStep> {
    if steps.len() <= 1 {
        return steps.to_vec();
    }

    let mut smoothed = Vec::with_capacity(steps.len());
    let mut anchor = from;
    let mut committed: Option<usize> = None;

    for index in 1..steps.len() {
        if grid.line_of_sight(anchor, steps[index].point) {
            continue;
        }
        let previous = index - 1;
        if committed != Some(previous) {
            smoothed.push(steps[previous]);
            anchor = steps[previous].point;
            committed = Some(previous);
        }
    }

    if let Some(last) = steps.last() {
        smoothed.push(*last);
    }
    smoothed
}
