use tracing::{debug, warn};

use super::{DistanceField, Path, PathClaim, PathState, PathStep, PlanError, astar, descend, dijkstra, smooth_steps};
use crate::config::PlannerConfig;
use crate::error::TacticsError;
use crate::grid::{CellRef, GridBounds, GridHandle, WorldPoint};

/// How the current path was produced, which decides who refreshes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
enum PathOrigin {
    #[default]
    None,
    /// A* toward a requested point; replanned every tick.
    Searched,
    /// Descent of a distance field; refreshed by whoever owns the field.
    Field,
}

/// Per-agent path owner.
///
/// Planning failures never escape: they leave the path [`PathState::Invalid`]
/// and are logged. Calling [`Self::set_destination`] again recovers.
pub struct PathPlanner {
    grid: GridHandle,
    config: PlannerConfig,
    path: Path,
    destination: Option<WorldPoint>,
    origin: PathOrigin,
}

impl PathPlanner {
    pub fn new(grid: GridHandle, config: PlannerConfig) -> Self {
        Self {
            grid,
            config,
            path: Path::default(),
            destination: None,
            origin: PathOrigin::None,
        }
    }

    #[inline]
    pub fn state(&self) -> PathState {
        self.path.state
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn destination(&self) -> Option<WorldPoint> {
        self.destination
    }

    #[inline]
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Requests a searched path to `goal` and plans it immediately.
    pub fn set_destination(&mut self, goal: WorldPoint, from: WorldPoint) -> PathState {
        self.destination = Some(goal);
        self.origin = PathOrigin::Searched;
        self.astar(from, goal)
    }

    /// Advances the state machine for an agent standing at `from`.
    ///
    /// An active path within the arrival distance of its destination becomes
    /// finished. Otherwise searched paths are replanned from scratch.
    pub fn tick(&mut self, from: WorldPoint) -> PathState {
        if !self.path.is_active() {
            return self.path.state;
        }
        let Some(destination) = self.destination else {
            return self.path.state;
        };

        if from.planar_distance(destination) <= self.config.arrival_distance {
            debug!(?destination, "path finished");
            self.path = Path {
                steps: Vec::new(),
                state: PathState::Finished,
            };
            return PathState::Finished;
        }

        match self.origin {
            PathOrigin::Searched => self.astar(from, destination),
            PathOrigin::Field => {
                self.drop_reached_steps(from);
                self.path.state
            }
            PathOrigin::None => self.path.state,
        }
    }

    /// Plans a fresh path from `from` to `goal`, replacing the current one.
    pub fn astar(&mut self, from: WorldPoint, goal: WorldPoint) -> PathState {
        self.path = match self.search(from, goal) {
            Ok(steps) => Path::active(steps),
            Err(err) => {
                debug!(error = %err, code = err.error_code(), "astar planning failed");
                Path::invalid()
            }
        };
        self.path.state
    }

    fn search(&self, from: WorldPoint, goal: WorldPoint) -> Result<Vec<PathStep>, PlanError> {
        let grid = self.grid.as_ref();
        let start = grid.point_to_cell(from);
        if !start.is_valid() {
            return Err(PlanError::InvalidStart(from));
        }
        let goal_cell = grid.point_to_cell(goal);
        if !goal_cell.is_valid() {
            return Err(PlanError::InvalidGoal(goal));
        }

        let result = astar(grid, start, goal_cell)?;
        let mut steps: Vec<PathStep> = result
            .cells
            .iter()
            .map(|&cell| PathStep::new(grid.cell_to_point(cell), cell))
            .collect();
        match steps.last_mut() {
            Some(last) => last.point = goal,
            None => steps.push(PathStep::new(goal, goal_cell)),
        }

        Ok(self.maybe_smooth(from, steps))
    }

    /// Distance field from the cell under `from`, limited to `bounds`.
    pub fn dijkstra(&self, from: WorldPoint, bounds: GridBounds) -> Option<DistanceField> {
        let grid = self.grid.as_ref();
        let start = grid.point_to_cell(from);
        match dijkstra(grid, start, bounds) {
            Ok(field) => Some(field),
            Err(err) => {
                debug!(error = %err, ?from, "distance field unavailable");
                None
            }
        }
    }

    /// Replaces the path with a descent of `field` toward `destination`.
    ///
    /// Returns false, leaving the path invalid, when the destination is not
    /// reachable in the field.
    pub fn build_path_from_distance_field(
        &mut self,
        from: WorldPoint,
        destination: CellRef,
        field: &DistanceField,
    ) -> bool {
        let grid = self.grid.as_ref();
        let target = grid.cell_to_point(destination);
        self.destination = Some(target);
        self.origin = PathOrigin::Field;

        match descend(grid, field, destination) {
            Ok(cells) => {
                let mut steps: Vec<PathStep> = cells
                    .into_iter()
                    .map(|cell| PathStep::new(grid.cell_to_point(cell), cell))
                    .collect();
                if steps.is_empty() {
                    steps.push(PathStep::new(target, destination));
                }
                self.path = Path::active(self.maybe_smooth(from, steps));
                true
            }
            Err(err) => {
                if err.severity().is_internal() {
                    warn!(error = %err, code = err.error_code(), "distance field descent failed");
                } else {
                    debug!(error = %err, code = err.error_code(), "distance field descent failed");
                }
                self.path = Path::invalid();
                false
            }
        }
    }

    /// String-pulls `steps` as seen from `from`.
    pub fn smooth_path(&self, from: WorldPoint, steps: &[PathStep]) -> Vec<PathStep> {
        smooth_steps(self.grid.as_ref(), from, steps)
    }

    fn maybe_smooth(&self, from: WorldPoint, steps: Vec<PathStep>) -> Vec<PathStep> {
        if self.config.smooth_paths {
            self.smooth_path(from, &steps)
        } else {
            steps
        }
    }

    /// Unit planar direction from `from` toward the first waypoint.
    pub fn follow_path(&self, from: WorldPoint) -> Result<WorldPoint, PlanError> {
        if !self.path.is_active() {
            return Err(PlanError::NotActive);
        }
        let first = self.path.steps.first().ok_or(PlanError::EmptyPath)?;
        Ok((first.point - from).with_z(0.0).normalized())
    }

    /// Forgets the destination and path.
    pub fn clear(&mut self) {
        self.path = Path::default();
        self.destination = None;
        self.origin = PathOrigin::None;
    }

    /// Remaining travel length from `from`; 0 unless active.
    pub fn path_length(&self, from: WorldPoint) -> f32 {
        if self.path.is_active() {
            self.path.length_from(from)
        } else {
            0.0
        }
    }

    /// Snapshot of this agent's committed movement for other agents.
    pub fn claim(&self, from: WorldPoint) -> PathClaim {
        match (self.path.is_active(), self.destination) {
            (true, Some(destination)) => PathClaim {
                position: destination,
                path_distance: self.path_length(from),
            },
            _ => PathClaim {
                position: from,
                path_distance: 0.0,
            },
        }
    }

    /// Pops leading waypoints the agent already stands on, keeping the last.
    fn drop_reached_steps(&mut self, from: WorldPoint) {
        let tolerance = self.grid.cell_size() * REACHED_FRACTION;
        let last = self.path.steps.len().saturating_sub(1);
        let reached = self.path.steps[..last]
            .iter()
            .take_while(|step| step.point.planar_distance(from) <= tolerance)
            .count();
        self.path.steps.drain(..reached);
    }
}

/// Fraction of a cell within which a waypoint counts as reached.
const REACHED_FRACTION: f32 = 0.05;
