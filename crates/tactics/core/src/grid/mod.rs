//! Discretized grid abstraction shared by every engine.
//!
//! The grid itself is an external collaborator: engines only see it through
//! [`GridOracle`], injected once at construction as a [`GridHandle`].
//! [`TileGrid`] is the in-memory implementation used by the runtime, the
//! content loaders, and tests.
mod bounds;
mod cell;
mod error;
mod map;
mod oracle;
mod point;
mod tile_grid;

pub use bounds::GridBounds;
pub use cell::{CellRef, CellTraits};
pub use error::GridError;
pub use map::GridMap;
pub use oracle::{GridHandle, GridOracle, Neighbors};
pub use point::WorldPoint;
pub use tile_grid::TileGrid;
