use tracing::trace;

use super::astar::step_cost;
use super::{DistanceField, PlanError};
use crate::grid::{CellRef, GridOracle};

/// Descends `field` from `destination` back to its source.
///
/// Each step moves to a neighbor with a strictly smaller value, choosing the
/// one that minimizes step cost plus recorded value. Returns the cells after
/// the source through `destination`, in travel order.
pub fn descend(grid: &dyn GridOracle, field: &DistanceField, destination: CellRef) -> Result<Vec<CellRef>, PlanError> {
    if !field.is_reachable(destination) {
        return Err(PlanError::NotInField(destination));
    }

    let cell_size = grid.cell_size();
    let source = field.source();
    let mut reversed = Vec::new();
    let mut current = destination;

    while current != source {
        reversed.push(current);
        let here = field.value(current);

        let mut best: Option<(CellRef, f32)> = None;
        for neighbor in grid.neighbors(current, true) {
            let there = field.value(neighbor);
            if there >= here {
                continue;
            }
            let score = step_cost(current, neighbor, cell_size) + there;
            if best.is_none_or(|(_, best_score)| score < best_score) {
                best = Some((neighbor, score));
            }
        }

        match best {
            Some((next, score)) => {
                trace!(from = %current, to = %next, score, "descend: step");
                current = next;
            }
            None => return Err(PlanError::NoDescent(current)),
        }
    }

    reversed.reverse();
    Ok(reversed)
}
