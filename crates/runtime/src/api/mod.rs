//! Public runtime API surface.
//!
//! Registration specs, per-tick reports and errors, kept apart from the
//! orchestration code in [`crate::runtime`].

pub mod errors;
pub mod report;
pub mod spec;

pub use errors::{Result, RuntimeError};
pub use report::{AgentReport, TargetReport, TickReport};
pub use spec::{AgentSpec, TargetSpec};
