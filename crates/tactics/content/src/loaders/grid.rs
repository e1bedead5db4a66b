//! Grid layout loader.
//!
//! Layouts are ASCII rows; see [`TileGrid`] for the glyph table.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tactics_core::{TileGrid, WorldPoint};

use crate::loaders::{LoadResult, read_file};

/// Grid layout structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GridDataRon {
    #[serde(default = "default_cell_size")]
    cell_size: f32,
    #[serde(default)]
    origin: WorldPoint,
    rows: Vec<String>,
}

fn default_cell_size() -> f32 {
    100.0
}

/// Loader for grid layouts from RON files.
pub struct GridLoader;

impl GridLoader {
    /// Load a [`TileGrid`] from a RON file.
    ///
    /// RON format: `(cell_size: f32, origin: (x, y, z), rows: [String])`;
    /// `cell_size` defaults to 100 and `origin` to the world origin.
    pub fn load(path: &Path) -> LoadResult<TileGrid> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<TileGrid> {
        let data: GridDataRon =
            ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse grid RON: {}", e))?;

        TileGrid::from_ascii(&data.rows, data.cell_size, data.origin)
            .map_err(|e| anyhow::anyhow!("Invalid grid layout: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use tactics_core::{CellRef, GridOracle};

    use super::*;

    #[test]
    fn parses_rows_and_defaults() {
        let grid = GridLoader::parse(r#"(rows: ["..#", "~.."])"#).unwrap();
        assert_eq!(grid.cell_size(), 100.0);
        assert_eq!(grid.origin(), WorldPoint::ZERO);
        assert!(!grid.is_traversable(CellRef::new(2, 0)));
        assert!(!grid.is_traversable(CellRef::new(0, 1)));
        assert!(grid.is_traversable(CellRef::new(1, 1)));
    }

    #[test]
    fn honors_origin_and_cell_size() {
        let grid = GridLoader::parse(r#"(cell_size: 2.0, origin: (x: 10.0, y: -4.0), rows: ["..", ".."])"#).unwrap();
        assert_eq!(grid.cell_to_point(CellRef::new(1, 1)), WorldPoint::new(13.0, -1.0, 0.0));
    }

    #[test]
    fn ragged_and_unknown_glyphs_are_rejected() {
        assert!(GridLoader::parse(r#"(rows: ["...", ".."])"#).is_err());
        assert!(GridLoader::parse(r#"(rows: [".x."])"#).is_err());
        assert!(GridLoader::parse(r#"(rows: [])"#).is_err());
    }
}
