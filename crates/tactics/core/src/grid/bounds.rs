use super::CellRef;

/// Inclusive rectangle of cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridBounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl GridBounds {
    pub const fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Bounds covering a `width` x `height` grid anchored at (0, 0).
    pub const fn from_dimensions(width: u32, height: u32) -> Self {
        Self::new(0, 0, width as i32 - 1, height as i32 - 1)
    }

    /// Square window of `radius` cells on each side of `center`.
    pub const fn around(center: CellRef, radius: i32) -> Self {
        Self::new(
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
        )
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.max_x < self.min_x || self.max_y < self.min_y
    }

    #[inline]
    pub const fn width(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.max_x - self.min_x + 1) as usize
        }
    }

    #[inline]
    pub const fn height(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.max_y - self.min_y + 1) as usize
        }
    }

    #[inline]
    pub const fn cell_count(&self) -> usize {
        self.width() * self.height()
    }

    #[inline]
    pub const fn contains(&self, cell: CellRef) -> bool {
        cell.x >= self.min_x && cell.x <= self.max_x && cell.y >= self.min_y && cell.y <= self.max_y
    }

    /// Overlap of two rectangles; may be empty.
    pub fn intersect(&self, other: &Self) -> Self {
        Self::new(
            self.min_x.max(other.min_x),
            self.min_y.max(other.min_y),
            self.max_x.min(other.max_x),
            self.max_y.min(other.max_y),
        )
    }

    /// Row-major index of `cell`, or `None` when outside.
    #[inline]
    pub fn index_of(&self, cell: CellRef) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let column = (cell.x - self.min_x) as usize;
        let row = (cell.y - self.min_y) as usize;
        Some(row * self.width() + column)
    }

    /// Inverse of [`Self::index_of`].
    #[inline]
    pub fn cell_at(&self, index: usize) -> CellRef {
        let width = self.width().max(1);
        CellRef::new(
            self.min_x + (index % width) as i32,
            self.min_y + (index / width) as i32,
        )
    }

    /// Iterates every cell in row-major order (y outer, x inner).
    pub fn cells(&self) -> impl Iterator<Item = CellRef> + '_ {
        let bounds = *self;
        (0..bounds.cell_count()).map(move |index| bounds.cell_at(index))
    }
}
