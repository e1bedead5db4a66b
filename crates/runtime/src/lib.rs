//! Runtime orchestration for tactical agents on a shared grid.
//!
//! This crate owns agents and tracked targets and advances them in a fixed
//! per-tick order: perception, occupancy trackers, ally-claim snapshot, then
//! each agent's position choice, planner tick and movement. Consumers build a
//! [`TacticsRuntime`] with [`RuntimeBuilder`] and call
//! [`TacticsRuntime::tick`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes registration specs, reports and errors
pub mod api;
pub mod runtime;

mod agent;
mod target;

pub use api::{AgentReport, AgentSpec, Result, RuntimeError, TargetReport, TargetSpec, TickReport};
pub use runtime::{RuntimeBuilder, TacticsRuntime};
