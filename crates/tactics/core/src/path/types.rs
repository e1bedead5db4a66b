use crate::grid::{CellRef, WorldPoint};

/// Lifecycle of an agent's path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathState {
    /// No destination set.
    #[default]
    None,
    /// A valid path exists and is being followed.
    Active,
    /// The agent arrived within the arrival distance of its destination.
    Finished,
    /// The last planning attempt failed; recoverable by planning again.
    Invalid,
}

impl PathState {
    #[inline]
    pub fn is_active(self) -> bool {
        matches!(self, PathState::Active)
    }
}

/// One waypoint: a world point and the cell it was derived from.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathStep {
    pub point: WorldPoint,
    pub cell: CellRef,
}

impl PathStep {
    pub const fn new(point: WorldPoint, cell: CellRef) -> Self {
        Self { point, cell }
    }
}

/// Ordered waypoints plus the state they were produced in.
///
/// Paths are replaced wholesale on replanning, never patched.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    pub steps: Vec<PathStep>,
    pub state: PathState,
}

impl Path {
    pub fn active(steps: Vec<PathStep>) -> Self {
        Self {
            steps,
            state: PathState::Active,
        }
    }

    pub fn invalid() -> Self {
        Self {
            steps: Vec::new(),
            state: PathState::Invalid,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Sum of segment lengths from `from` through every step.
    pub fn length_from(&self, from: WorldPoint) -> f32 {
        let mut current = from;
        let mut length = 0.0;
        for step in &self.steps {
            length += current.distance(step.point);
            current = step.point;
        }
        length
    }

    pub fn last_point(&self) -> Option<WorldPoint> {
        self.steps.last().map(|step| step.point)
    }
}

/// Immutable snapshot of another agent's committed movement.
///
/// Published once per tick and consumed read-only by the ally-distance layer.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathClaim {
    /// Destination when a path is active, otherwise the agent's position.
    pub position: WorldPoint,
    /// Remaining path length to `position`; 0 when not moving.
    pub path_distance: f32,
}
