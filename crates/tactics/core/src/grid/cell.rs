use std::fmt;

use bitflags::bitflags;

/// Discrete grid coordinate identifying one cell.
///
/// Cells never own anything; equality and hashing are by coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRef {
    pub x: i32,
    pub y: i32,
}

impl CellRef {
    /// Reserved coordinate returned by lookups that did not resolve to a cell.
    pub const INVALID: Self = Self {
        x: i32::MIN,
        y: i32::MIN,
    };

    /// Offsets of the 8 surrounding cells, orthogonal first.
    pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
        (1, 0),
        (-1, 0),
        (0, 1),
        (0, -1),
        (1, 1),
        (1, -1),
        (-1, 1),
        (-1, -1),
    ];

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.x != Self::INVALID.x || self.y != Self::INVALID.y
    }

    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Euclidean distance in cells.
    pub fn distance(self, other: Self) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }

    /// True when `other` differs on both axes (a diagonal step).
    #[inline]
    pub fn is_diagonal_to(self, other: Self) -> bool {
        self.x != other.x && self.y != other.y
    }
}

impl Default for CellRef {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "({}, {})", self.x, self.y)
        } else {
            f.write_str("(invalid)")
        }
    }
}

bitflags! {
    /// Capability set attached to every cell of the grid.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CellTraits: u8 {
        /// Agents may stand on and path through the cell.
        const TRAVERSABLE = 1 << 0;
        /// The cell occludes line of sight.
        const BLOCKS_SIGHT = 1 << 1;
    }
}

impl CellTraits {
    pub const FLOOR: Self = Self::TRAVERSABLE;
    pub const WALL: Self = Self::BLOCKS_SIGHT;
    /// Blocks movement but not sight (water, low barriers).
    pub const LOW_OBSTACLE: Self = Self::empty();

    #[inline]
    pub fn is_traversable(self) -> bool {
        self.contains(Self::TRAVERSABLE)
    }

    #[inline]
    pub fn blocks_sight(self) -> bool {
        self.contains(Self::BLOCKS_SIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_sentinel_is_not_valid() {
        assert!(!CellRef::INVALID.is_valid());
        assert!(CellRef::new(0, 0).is_valid());
        assert_eq!(CellRef::default(), CellRef::INVALID);
    }

    #[test]
    fn distance_is_euclidean() {
        let a = CellRef::new(0, 0);
        assert_eq!(a.distance(CellRef::new(3, 4)), 5.0);
        assert!(a.is_diagonal_to(CellRef::new(1, 1)));
        assert!(!a.is_diagonal_to(CellRef::new(0, 1)));
    }

    #[test]
    fn traits_are_queried_by_membership() {
        assert!(CellTraits::FLOOR.is_traversable());
        assert!(!CellTraits::FLOOR.blocks_sight());
        assert!(CellTraits::WALL.blocks_sight());
        assert!(!CellTraits::LOW_OBSTACLE.is_traversable());
        assert!(!CellTraits::LOW_OBSTACLE.blocks_sight());
    }
}
