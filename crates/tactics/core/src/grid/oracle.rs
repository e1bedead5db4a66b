use std::sync::Arc;

use arrayvec::ArrayVec;

use super::{CellRef, CellTraits, GridBounds, WorldPoint};

/// Up to 8 neighboring cells, without heap allocation.
pub type Neighbors = ArrayVec<CellRef, 8>;

/// Shared, read-only handle to the grid injected into every engine.
pub type GridHandle = Arc<dyn GridOracle>;

/// Read-only topology and traversability store.
///
/// Engines receive the grid at construction and never look it up per call.
/// Only [`Self::bounds`], [`Self::cell_size`], [`Self::origin`],
/// [`Self::cell_traits`] and [`Self::line_of_sight`] are required; the
/// coordinate mapping and neighbor enumeration derive from them.
pub trait GridOracle: Send + Sync {
    /// Rectangle of valid cells.
    fn bounds(&self) -> GridBounds;

    /// World-space edge length of one cell.
    fn cell_size(&self) -> f32;

    /// World-space corner of cell (0, 0).
    fn origin(&self) -> WorldPoint;

    /// Capabilities of `cell`; empty for cells outside the grid.
    fn cell_traits(&self, cell: CellRef) -> CellTraits;

    /// True when nothing occludes the segment between two world points.
    fn line_of_sight(&self, from: WorldPoint, to: WorldPoint) -> bool;

    fn is_valid_cell(&self, cell: CellRef) -> bool {
        cell.is_valid() && self.bounds().contains(cell)
    }

    fn is_traversable(&self, cell: CellRef) -> bool {
        self.is_valid_cell(cell) && self.cell_traits(cell).is_traversable()
    }

    /// Center of `cell` in world space (z = origin height).
    fn cell_to_point(&self, cell: CellRef) -> WorldPoint {
        let size = self.cell_size();
        let origin = self.origin();
        WorldPoint::new(
            origin.x + (cell.x as f32 + 0.5) * size,
            origin.y + (cell.y as f32 + 0.5) * size,
            origin.z,
        )
    }

    /// Cell containing `point`, or [`CellRef::INVALID`] when outside the grid.
    fn point_to_cell(&self, point: WorldPoint) -> CellRef {
        if !point.is_finite() {
            return CellRef::INVALID;
        }
        let size = self.cell_size();
        let origin = self.origin();
        let x = ((point.x - origin.x) / size).floor();
        let y = ((point.y - origin.y) / size).floor();
        let limit = i32::MAX as f32;
        if x.abs() >= limit || y.abs() >= limit {
            return CellRef::INVALID;
        }
        let cell = CellRef::new(x as i32, y as i32);
        if self.is_valid_cell(cell) {
            cell
        } else {
            CellRef::INVALID
        }
    }

    /// Traversable neighbors of `cell`.
    ///
    /// A diagonal neighbor is only offered when both orthogonal cells it
    /// squeezes between are traversable.
    fn neighbors(&self, cell: CellRef, include_diagonals: bool) -> Neighbors {
        let mut out = Neighbors::new();
        for (dx, dy) in CellRef::NEIGHBOR_OFFSETS {
            let diagonal = dx != 0 && dy != 0;
            if diagonal {
                if !include_diagonals
                    || !self.is_traversable(cell.offset(dx, 0))
                    || !self.is_traversable(cell.offset(0, dy))
                {
                    continue;
                }
            }
            let neighbor = cell.offset(dx, dy);
            if self.is_traversable(neighbor) {
                out.push(neighbor);
            }
        }
        out
    }

    /// Cells covered by a world-space box centered on `center`, clipped to the grid.
    fn window_around(&self, center: WorldPoint, dimensions: f32) -> GridBounds {
        let half = dimensions.max(0.0) / 2.0;
        let size = self.cell_size();
        let origin = self.origin();
        let to_cell = |value: f32, base: f32| ((value - base) / size).floor() as i32;
        let window = GridBounds::new(
            to_cell(center.x - half, origin.x),
            to_cell(center.y - half, origin.y),
            to_cell(center.x + half, origin.x),
            to_cell(center.y + half, origin.y),
        );
        window.intersect(&self.bounds())
    }
}
