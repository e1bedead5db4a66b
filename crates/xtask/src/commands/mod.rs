//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod plan;
mod simulate;

pub use plan::Plan;
pub use simulate::Simulate;

/// Output format shared by every command
#[derive(Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Summary,
    /// JSON output (one document per line for simulations)
    Json,
}
