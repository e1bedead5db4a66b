//! In-memory grid backed by a dense trait array.

use super::{CellRef, CellTraits, GridBounds, GridError, GridOracle, WorldPoint};

/// Fraction of a cell between consecutive line-of-sight samples.
const SIGHT_SAMPLE_FRACTION: f32 = 0.25;

/// Rectangular grid of [`CellTraits`] with a uniform cell size.
///
/// ASCII layouts use one character per cell, first row = `y = 0`:
///
/// | glyph | meaning |
/// |---|---|
/// | `.` | floor |
/// | `#` | wall (blocks movement and sight) |
/// | `~` | low obstacle (blocks movement only) |
#[derive(Clone, Debug, PartialEq)]
pub struct TileGrid {
    bounds: GridBounds,
    cell_size: f32,
    origin: WorldPoint,
    traits: Vec<CellTraits>,
}

impl TileGrid {
    /// All-floor grid.
    pub fn new(
        width: usize,
        height: usize,
        cell_size: f32,
        origin: WorldPoint,
    ) -> Result<Self, GridError> {
        if width == 0 || height == 0 || width > i32::MAX as usize || height > i32::MAX as usize {
            return Err(GridError::InvalidDimensions { width, height });
        }
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(GridError::InvalidCellSize);
        }
        let bounds = GridBounds::from_dimensions(width as u32, height as u32);
        Ok(Self {
            bounds,
            cell_size,
            origin,
            traits: vec![CellTraits::FLOOR; bounds.cell_count()],
        })
    }

    /// All-floor grid with unit cells anchored at the world origin.
    pub fn open(width: usize, height: usize) -> Result<Self, GridError> {
        Self::new(width, height, 1.0, WorldPoint::ZERO)
    }

    pub fn from_ascii<S: AsRef<str>>(
        rows: &[S],
        cell_size: f32,
        origin: WorldPoint,
    ) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map(|row| row.as_ref().chars().count()).unwrap_or(0);
        let mut grid = Self::new(width, height, cell_size, origin)?;

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != width {
                return Err(GridError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, glyph) in row.chars().enumerate() {
                let traits = Self::traits_for_glyph(glyph)
                    .ok_or(GridError::UnknownGlyph { glyph, x, y })?;
                grid.set_traits(CellRef::new(x as i32, y as i32), traits)?;
            }
        }

        Ok(grid)
    }

    pub fn traits_for_glyph(glyph: char) -> Option<CellTraits> {
        match glyph {
            '.' => Some(CellTraits::FLOOR),
            '#' => Some(CellTraits::WALL),
            '~' => Some(CellTraits::LOW_OBSTACLE),
            _ => None,
        }
    }

    pub fn set_traits(&mut self, cell: CellRef, traits: CellTraits) -> Result<(), GridError> {
        let index = self
            .bounds
            .index_of(cell)
            .ok_or(GridError::OutOfBounds(cell))?;
        self.traits[index] = traits;
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.bounds.width()
    }

    pub fn height(&self) -> usize {
        self.bounds.height()
    }

    pub fn traversable_count(&self) -> usize {
        self.traits.iter().filter(|t| t.is_traversable()).count()
    }
}

impl GridOracle for TileGrid {
    fn bounds(&self) -> GridBounds {
        self.bounds
    }

    fn cell_size(&self) -> f32 {
        self.cell_size
    }

    fn origin(&self) -> WorldPoint {
        self.origin
    }

    fn cell_traits(&self, cell: CellRef) -> CellTraits {
        self.bounds
            .index_of(cell)
            .map(|index| self.traits[index])
            .unwrap_or_else(CellTraits::empty)
    }

    fn line_of_sight(&self, from: WorldPoint, to: WorldPoint) -> bool {
        let distance = from.planar_distance(to);
        if !distance.is_finite() {
            return false;
        }
        let step = self.cell_size * SIGHT_SAMPLE_FRACTION;
        let samples = ((distance / step).ceil() as usize).max(1);
        let delta = to - from;

        (0..=samples).all(|i| {
            let t = i as f32 / samples as f32;
            let cell = self.point_to_cell(from + delta * t);
            cell.is_valid() && !self.cell_traits(cell).blocks_sight()
        })
    }
}
