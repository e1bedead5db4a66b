//! Path planning errors.
//!
//! These never escape the planner's public surface: [`super::PathPlanner`]
//! converts them into [`super::PathState::Invalid`] after logging.

use crate::error::{ErrorSeverity, TacticsError};
use crate::grid::{CellRef, WorldPoint};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// Start point does not map to a valid cell.
    #[error("start point {0:?} is not on the grid")]
    InvalidStart(WorldPoint),

    /// Goal point does not map to a valid cell.
    #[error("goal point {0:?} is not on the grid")]
    InvalidGoal(WorldPoint),

    /// Search endpoint is outside the grid.
    #[error("cell {0} is not a valid search endpoint")]
    InvalidCell(CellRef),

    /// Open set emptied without reaching the goal.
    #[error("goal {goal} is unreachable from {start} ({expanded} cells expanded)")]
    Unreachable {
        start: CellRef,
        goal: CellRef,
        expanded: usize,
    },

    /// Destination cell has no finite value in the distance field.
    #[error("cell {0} is not reachable in the distance field")]
    NotInField(CellRef),

    /// Distance-field descent found no neighbor with a smaller value.
    #[error("no descending neighbor from {0} in the distance field")]
    NoDescent(CellRef),

    /// `follow_path` called while the path is not active.
    #[error("path is not active")]
    NotActive,

    /// `follow_path` called on an active path without steps.
    #[error("active path has no steps")]
    EmptyPath,
}

impl TacticsError for PlanError {
    fn severity(&self) -> ErrorSeverity {
        use PlanError::*;
        match self {
            InvalidStart(_) | InvalidGoal(_) | InvalidCell(_) | NotInField(_) => {
                ErrorSeverity::Validation
            }
            Unreachable { .. } | NotActive => ErrorSeverity::Recoverable,
            NoDescent(_) | EmptyPath => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use PlanError::*;
        match self {
            InvalidStart(_) => "PLAN_INVALID_START",
            InvalidGoal(_) => "PLAN_INVALID_GOAL",
            InvalidCell(_) => "PLAN_INVALID_CELL",
            Unreachable { .. } => "PLAN_UNREACHABLE",
            NotInField(_) => "PLAN_NOT_IN_FIELD",
            NoDescent(_) => "PLAN_NO_DESCENT",
            NotActive => "PLAN_NOT_ACTIVE",
            EmptyPath => "PLAN_EMPTY_PATH",
        }
    }
}
