//! Single-pair shortest path over 8-connected cells.

use std::collections::HashMap;
use std::f32::consts::SQRT_2;

use tracing::{debug, trace};

use super::PlanError;
use super::search::{CellRecord, OpenSet};
use crate::grid::{CellRef, GridOracle};

/// Cells visited by a successful search.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    /// Cells from the first step after `start` through `goal`.
    pub cells: Vec<CellRef>,
    /// Total travel cost in world units.
    pub cost: f32,
    /// Number of cells popped from the open set.
    pub expanded: usize,
}

/// World-space cost of one step between adjacent cells.
#[inline]
pub(crate) fn step_cost(from: CellRef, to: CellRef, cell_size: f32) -> f32 {
    if from.is_diagonal_to(to) {
        SQRT_2 * cell_size
    } else {
        cell_size
    }
}

/// A* from `start` to `goal`.
///
/// Priority is cumulative cost plus the Euclidean distance to the goal;
/// orthogonal steps cost one cell and diagonal steps √2 cells. Closed cells
/// are never revisited.
pub fn astar(grid: &dyn GridOracle, start: CellRef, goal: CellRef) -> Result<SearchResult, PlanError> {
    if !grid.is_valid_cell(start) {
        return Err(PlanError::InvalidCell(start));
    }
    if !grid.is_valid_cell(goal) {
        return Err(PlanError::InvalidCell(goal));
    }

    let cell_size = grid.cell_size();
    let heuristic = |cell: CellRef| cell.distance(goal) * cell_size;

    let mut open = OpenSet::new();
    let mut closed: HashMap<CellRef, CellRecord> = HashMap::new();
    let mut expanded = 0usize;

    open.push_or_improve(CellRecord::new(start, CellRef::INVALID, 0.0, heuristic(start)));

    while let Some(current) = open.pop() {
        expanded += 1;
        closed.insert(current.cell, current);

        if current.cell == goal {
            let cells = reconstruct(&closed, start, goal);
            debug!(
                %start, %goal, cost = current.cost, expanded, steps = cells.len(),
                "astar: reached goal"
            );
            return Ok(SearchResult {
                cells,
                cost: current.cost,
                expanded,
            });
        }

        for neighbor in grid.neighbors(current.cell, true) {
            if closed.contains_key(&neighbor) {
                continue;
            }
            let cost = current.cost + step_cost(current.cell, neighbor, cell_size);
            let priority = cost + heuristic(neighbor);
            if open.push_or_improve(CellRecord::new(neighbor, current.cell, cost, priority)) {
                trace!(cell = %neighbor, cost, priority, "astar: queued");
            }
        }
    }

    debug!(%start, %goal, expanded, "astar: open set exhausted");
    Err(PlanError::Unreachable {
        start,
        goal,
        expanded,
    })
}

/// Walks predecessor links back from `goal`, returning cells after `start`.
fn reconstruct(closed: &HashMap<CellRef, CellRecord>, start: CellRef, goal: CellRef) -> Vec<CellRef> {
    let mut reversed = Vec::new();
    let mut cursor = goal;
    while cursor != start {
        reversed.push(cursor);
        match closed.get(&cursor) {
            Some(record) if record.previous.is_valid() => cursor = record.previous,
            _ => break,
        }
    }
    reversed.reverse();
    reversed
}
