//! Errors surfaced by the runtime API.
//!
//! Engine failures never reach this level; they are absorbed into path and
//! belief states. What remains is registration misuse.
use tactics_core::{EntityId, ErrorSeverity, TacticsError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error("runtime requires a grid to be configured before building")]
    MissingGrid,

    #[error("entity {0} is already registered")]
    DuplicateEntity(EntityId),

    #[error("no agent registered as {0}")]
    UnknownAgent(EntityId),

    #[error("no target registered as {0}")]
    UnknownTarget(EntityId),

    #[error("{field} must be finite and non-negative, got {value}")]
    InvalidSpec { field: &'static str, value: f32 },
}

impl TacticsError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::MissingGrid => ErrorSeverity::Fatal,
            RuntimeError::DuplicateEntity(_) | RuntimeError::InvalidSpec { .. } => ErrorSeverity::Validation,
            RuntimeError::UnknownAgent(_) | RuntimeError::UnknownTarget(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::MissingGrid => "RUNTIME_MISSING_GRID",
            RuntimeError::DuplicateEntity(_) => "RUNTIME_DUPLICATE_ENTITY",
            RuntimeError::UnknownAgent(_) => "RUNTIME_UNKNOWN_AGENT",
            RuntimeError::UnknownTarget(_) => "RUNTIME_UNKNOWN_TARGET",
            RuntimeError::InvalidSpec { .. } => "RUNTIME_INVALID_SPEC",
        }
    }
}
