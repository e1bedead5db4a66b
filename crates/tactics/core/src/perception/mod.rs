//! Reference perception collaborator.
//!
//! The occupancy tracker only consumes [`PerceptionOracle`]. [`PerceptionSystem`]
//! is the bundled implementation: vision cones checked against grid line of
//! sight, an awareness gauge per observer and target, and an optional
//! hearing channel that raises awareness but never touches occupancy.
mod observer;
mod oracle;
mod system;
mod vision;

pub use observer::Observer;
pub use oracle::{ObserverId, PerceptionOracle};
pub use system::PerceptionSystem;
pub use vision::{HearingParameters, VisionParameters};
