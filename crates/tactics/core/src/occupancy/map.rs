use std::f64::consts::SQRT_2;

use tracing::trace;

use crate::grid::{CellRef, GridBounds, GridError, GridMap, GridOracle};

/// How mass removed by the visibility mask is returned to the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenormalizeMode {
    /// Scale the remaining mass back up to the pre-mask total, keeping the
    /// shape of the belief. Skipped when nothing remains.
    #[default]
    Proportional,
    /// Spread the removed mass evenly over unmasked traversable cells.
    Uniform,
}

/// Discrete probability distribution over a target's location.
#[derive(Clone, Debug, PartialEq)]
pub struct OccupancyMap {
    probabilities: GridMap<f64>,
    scratch: GridMap<f64>,
}

impl OccupancyMap {
    /// Empty map: no mass until the first [`Self::collapse`].
    pub fn new(bounds: GridBounds) -> Self {
        Self {
            probabilities: GridMap::new(bounds, 0.0),
            scratch: GridMap::new(bounds, 0.0),
        }
    }

    #[inline]
    pub fn bounds(&self) -> GridBounds {
        self.probabilities.bounds()
    }

    /// Probability at `cell`; 0 outside the map.
    #[inline]
    pub fn probability(&self, cell: CellRef) -> f64 {
        self.probabilities.get(cell).unwrap_or(0.0)
    }

    pub fn probabilities(&self) -> &GridMap<f64> {
        &self.probabilities
    }

    pub fn total_mass(&self) -> f64 {
        self.probabilities.values().iter().sum()
    }

    /// All mass on `cell`.
    pub fn collapse(&mut self, cell: CellRef) -> Result<(), GridError> {
        if !self.probabilities.contains(cell) {
            return Err(GridError::OutOfBounds(cell));
        }
        self.probabilities.reset(0.0);
        self.probabilities.set(cell, 1.0)
    }

    /// Zeroes every masked cell and returns the mass removed.
    pub fn apply_mask(&mut self, mask: &GridMap<bool>) -> f64 {
        let mut removed = 0.0;
        for (cell, masked) in mask.iter() {
            if !masked {
                continue;
            }
            if let Some(p) = self.probabilities.get_mut(cell) {
                removed += *p;
                *p = 0.0;
            }
        }
        removed
    }

    /// Returns `removed` mass to the cells `mask` left open.
    ///
    /// Does nothing, returning false, when the map held no mass, when there is
    /// no open traversable cell, or in [`RenormalizeMode::Proportional`] when
    /// no mass survived the mask.
    pub fn renormalize(
        &mut self,
        grid: &dyn GridOracle,
        mask: &GridMap<bool>,
        mode: RenormalizeMode,
        removed: f64,
    ) -> bool {
        let remaining = self.total_mass();
        if remaining + removed <= 0.0 {
            return false;
        }
        let open: Vec<CellRef> = self
            .bounds()
            .cells()
            .filter(|&cell| !mask.get(cell).unwrap_or(true) && grid.is_traversable(cell))
            .collect();
        if open.is_empty() {
            return false;
        }

        match mode {
            RenormalizeMode::Uniform => {
                let share = removed / open.len() as f64;
                for cell in open {
                    if let Some(p) = self.probabilities.get_mut(cell) {
                        *p += share;
                    }
                }
            }
            RenormalizeMode::Proportional => {
                if remaining <= 0.0 {
                    return false;
                }
                let factor = (remaining + removed) / remaining;
                for cell in open {
                    if let Some(p) = self.probabilities.get_mut(cell) {
                        *p *= factor;
                    }
                }
            }
        }
        trace!(removed, remaining, ?mode, "occupancy renormalized");
        true
    }

    /// Spreads `rate` of each cell's mass to its traversable neighbors.
    ///
    /// Orthogonal neighbors receive `rate / (4 + 4/√2)` of the source mass
    /// and diagonal neighbors that share divided by √2. Whatever a cell does
    /// not hand out stays on it, so total mass is unchanged.
    pub fn diffuse(&mut self, grid: &dyn GridOracle, rate: f64) {
        if rate <= 0.0 {
            return;
        }
        let orthogonal = rate / (4.0 + 4.0 / SQRT_2);
        let diagonal = orthogonal / SQRT_2;

        self.scratch.reset(0.0);
        for (cell, p) in self.probabilities.iter() {
            if p <= 0.0 {
                continue;
            }
            let mut given = 0.0;
            for (dx, dy) in CellRef::NEIGHBOR_OFFSETS {
                let neighbor = cell.offset(dx, dy);
                if !grid.is_traversable(neighbor) {
                    continue;
                }
                let Some(slot) = self.scratch.get_mut(neighbor) else {
                    continue;
                };
                let weight = if dx != 0 && dy != 0 { diagonal } else { orthogonal };
                let share = weight * p;
                *slot += share;
                given += share;
            }
            if let Some(slot) = self.scratch.get_mut(cell) {
                *slot += p - given;
            }
        }
        self.probabilities.copy_from(&self.scratch);
    }

    /// Most likely cell; the first in row-major order on ties. `None` when
    /// the map holds no mass.
    pub fn argmax(&self) -> Option<(CellRef, f64)> {
        let mut best: Option<(CellRef, f64)> = None;
        for (cell, p) in self.probabilities.iter() {
            if p > 0.0 && best.is_none_or(|(_, best_p)| p > best_p) {
                best = Some((cell, p));
            }
        }
        best
    }
}
