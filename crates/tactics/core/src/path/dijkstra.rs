//! Single-source distance fields.

use std::collections::HashSet;

use tracing::debug;

use super::PlanError;
use super::astar::step_cost;
use super::search::{CellRecord, OpenSet};
use crate::grid::{CellRef, GridBounds, GridMap, GridOracle};

/// Travel cost from one source to every reachable cell of a window.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceField {
    source: CellRef,
    values: GridMap<f32>,
}

impl DistanceField {
    /// Value held by cells the flood fill never reached.
    pub const UNREACHABLE: f32 = f32::MAX;

    /// Creates a field with every cell unreachable.
    pub fn new(source: CellRef, bounds: GridBounds) -> Self {
        Self {
            source,
            values: GridMap::new(bounds, Self::UNREACHABLE),
        }
    }

    #[inline]
    pub fn source(&self) -> CellRef {
        self.source
    }

    #[inline]
    pub fn bounds(&self) -> GridBounds {
        self.values.bounds()
    }

    /// Recorded cost, or [`Self::UNREACHABLE`] outside the window.
    #[inline]
    pub fn value(&self, cell: CellRef) -> f32 {
        self.values.get(cell).unwrap_or(Self::UNREACHABLE)
    }

    #[inline]
    pub fn is_reachable(&self, cell: CellRef) -> bool {
        self.value(cell) < Self::UNREACHABLE
    }

    /// Reachable cells with their costs, row-major.
    pub fn reachable_cells(&self) -> impl Iterator<Item = (CellRef, f32)> + '_ {
        self.values
            .iter()
            .filter(|(_, value)| *value < Self::UNREACHABLE)
    }

    pub fn values(&self) -> &GridMap<f32> {
        &self.values
    }

    #[cfg(test)]
    pub(crate) fn values_mut(&mut self) -> &mut GridMap<f32> {
        &mut self.values
    }
}

/// Floods outward from `start` until every reachable cell in `bounds` has its
/// cheapest cost. The window is clipped to the grid.
pub fn dijkstra(grid: &dyn GridOracle, start: CellRef, bounds: GridBounds) -> Result<DistanceField, PlanError> {
    let bounds = bounds.intersect(&grid.bounds());
    if !grid.is_valid_cell(start) || !bounds.contains(start) {
        return Err(PlanError::InvalidCell(start));
    }

    let cell_size = grid.cell_size();
    let mut field = DistanceField::new(start, bounds);
    let mut open = OpenSet::new();
    let mut closed: HashSet<CellRef> = HashSet::new();

    open.push_or_improve(CellRecord::new(start, CellRef::INVALID, 0.0, 0.0));

    while let Some(current) = open.pop() {
        closed.insert(current.cell);
        if let Some(slot) = field.values.get_mut(current.cell) {
            *slot = current.cost;
        }

        for neighbor in grid.neighbors(current.cell, true) {
            if !bounds.contains(neighbor) || closed.contains(&neighbor) {
                continue;
            }
            let cost = current.cost + step_cost(current.cell, neighbor, cell_size);
            open.push_or_improve(CellRecord::new(neighbor, current.cell, cost, cost));
        }
    }

    debug!(%start, reached = closed.len(), window = bounds.cell_count(), "dijkstra: field complete");
    Ok(field)
}
