//! Grid access and construction errors.

use super::CellRef;
use crate::error::{ErrorSeverity, TacticsError};

/// Errors raised by grid maps and grid construction.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridError {
    /// Cell lies outside the bounds of the map being accessed.
    #[error("cell {0} is out of bounds")]
    OutOfBounds(CellRef),

    /// Grid has zero width or height.
    #[error("grid dimensions {width}x{height} are invalid")]
    InvalidDimensions { width: usize, height: usize },

    /// Row lengths differ within an ASCII layout.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Layout contains a character with no terrain meaning.
    #[error("unknown cell glyph {glyph:?} at ({x}, {y})")]
    UnknownGlyph { glyph: char, x: usize, y: usize },

    /// Cell size must be a positive finite number.
    #[error("cell size must be positive and finite")]
    InvalidCellSize,
}

impl TacticsError for GridError {
    fn severity(&self) -> ErrorSeverity {
        use GridError::*;
        match self {
            OutOfBounds(_) => ErrorSeverity::Validation,
            InvalidDimensions { .. } | RaggedRow { .. } | UnknownGlyph { .. } | InvalidCellSize => {
                ErrorSeverity::Fatal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        use GridError::*;
        match self {
            OutOfBounds(_) => "GRID_OUT_OF_BOUNDS",
            InvalidDimensions { .. } => "GRID_INVALID_DIMENSIONS",
            RaggedRow { .. } => "GRID_RAGGED_ROW",
            UnknownGlyph { .. } => "GRID_UNKNOWN_GLYPH",
            InvalidCellSize => "GRID_INVALID_CELL_SIZE",
        }
    }
}
