use super::{CellRef, GridBounds, GridError};

/// Dense per-cell values over a fixed rectangle of the grid.
///
/// Bounds are fixed at construction. Reads outside the bounds return `None`
/// and writes return [`GridError::OutOfBounds`]; neither panics.
#[derive(Clone, Debug, PartialEq)]
pub struct GridMap<T> {
    bounds: GridBounds,
    data: Vec<T>,
}

impl<T: Copy> GridMap<T> {
    pub fn new(bounds: GridBounds, fill: T) -> Self {
        Self {
            bounds,
            data: vec![fill; bounds.cell_count()],
        }
    }

    #[inline]
    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    #[inline]
    pub fn contains(&self, cell: CellRef) -> bool {
        self.bounds.contains(cell)
    }

    #[inline]
    pub fn get(&self, cell: CellRef) -> Option<T> {
        self.bounds.index_of(cell).map(|index| self.data[index])
    }

    #[inline]
    pub fn get_mut(&mut self, cell: CellRef) -> Option<&mut T> {
        self.bounds
            .index_of(cell)
            .map(move |index| &mut self.data[index])
    }

    pub fn set(&mut self, cell: CellRef, value: T) -> Result<(), GridError> {
        let slot = self.get_mut(cell).ok_or(GridError::OutOfBounds(cell))?;
        *slot = value;
        Ok(())
    }

    /// Overwrites every cell with `fill`.
    pub fn reset(&mut self, fill: T) {
        self.data.fill(fill);
    }

    /// Iterates `(cell, value)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellRef, T)> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(|(index, value)| (self.bounds.cell_at(index), *value))
    }

    #[inline]
    pub fn values(&self) -> &[T] {
        &self.data
    }

    /// Replaces the contents with another map over identical bounds.
    pub fn copy_from(&mut self, other: &Self) {
        debug_assert_eq!(self.bounds, other.bounds);
        self.data.copy_from_slice(&other.data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_and_set_within_bounds() {
        let mut map = GridMap::new(GridBounds::new(-1, -1, 1, 1), 0.0f32);
        assert_eq!(map.get(CellRef::new(0, 0)), Some(0.0));
        map.set(CellRef::new(-1, 1), 2.5).unwrap();
        assert_eq!(map.get(CellRef::new(-1, 1)), Some(2.5));
    }

    #[test]
    fn out_of_bounds_access_fails_gracefully() {
        let mut map = GridMap::new(GridBounds::from_dimensions(2, 2), 1u8);
        let outside = CellRef::new(5, 5);
        assert_eq!(map.get(outside), None);
        assert_eq!(map.set(outside, 3), Err(GridError::OutOfBounds(outside)));
        assert_eq!(map.get(CellRef::INVALID), None);
    }

    #[test]
    fn reset_and_iterate() {
        let mut map = GridMap::new(GridBounds::from_dimensions(3, 1), 0i32);
        map.set(CellRef::new(2, 0), 7).unwrap();
        let collected: Vec<_> = map.iter().collect();
        assert_eq!(collected[2], (CellRef::new(2, 0), 7));
        map.reset(4);
        assert!(map.values().iter().all(|&v| v == 4));
    }
}
