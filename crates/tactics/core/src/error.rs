//! Common error infrastructure for tactics-core.
//!
//! Domain-specific errors (e.g., [`crate::GridError`], [`crate::PlanError`]) are
//! defined next to the code that raises them. This module holds the shared
//! classification used when those errors are logged or surfaced by the runtime.
//!
//! # Design Principles
//!
//! - **No exceptions at the engine surface**: engines convert errors into a
//!   state tag (`PathState::Invalid`), `false`, or `None` before returning
//! - **Severity Classification**: errors are categorized for recovery strategies
//! - **Stable codes**: every variant maps to a static identifier for logs and tests

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the caller can retry next tick (e.g. goal currently unreachable)
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected inconsistency that requires investigation
/// - **Fatal**: the collaborator data is unusable
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with same or alternative request.
    ///
    /// Examples: goal unreachable this tick, path not active yet
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: start point outside the grid, out-of-bounds map access
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: distance field without a descending neighbor
    Internal,

    /// Fatal error - collaborator data cannot be used at all.
    ///
    /// Examples: zero-sized grid, ragged map rows
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all tactics-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait TacticsError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
