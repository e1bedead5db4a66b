//! Simulation scenario loader.
//!
//! A scenario names a grid and the spatial functions its agents use; the
//! referenced files are resolved by [`crate::ContentFactory`].

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tactics_core::WorldPoint;

use crate::loaders::{LoadResult, read_file};

/// One agent placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentEntry {
    pub id: u32,
    pub position: WorldPoint,
    #[serde(default = "default_forward")]
    pub forward: WorldPoint,
    /// World units per second.
    pub speed: f32,
    /// Name of a file under `functions/`.
    pub function: String,
}

/// One tracked target and the route it walks during the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetEntry {
    pub id: u32,
    pub position: WorldPoint,
    /// Points visited in order after `position`; the target stops at the last.
    #[serde(default)]
    pub waypoints: Vec<WorldPoint>,
    #[serde(default)]
    pub speed: f32,
}

/// Scenario file contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Name of a file under `maps/`.
    pub map: String,
    #[serde(default = "default_ticks")]
    pub ticks: u32,
    #[serde(default = "default_dt")]
    pub dt: f32,
    #[serde(default)]
    pub agents: Vec<AgentEntry>,
    #[serde(default)]
    pub targets: Vec<TargetEntry>,
}

fn default_forward() -> WorldPoint {
    WorldPoint::planar(1.0, 0.0)
}

fn default_ticks() -> u32 {
    100
}

fn default_dt() -> f32 {
    0.1
}

/// Loader for scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))
    }

    /// Parses and validates a scenario.
    ///
    /// Ids must be unique across agents and targets, `dt` positive and
    /// speeds non-negative.
    pub fn parse(content: &str) -> LoadResult<Scenario> {
        let scenario: Scenario =
            ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;

        if !(scenario.dt.is_finite() && scenario.dt > 0.0) {
            anyhow::bail!("dt must be positive, got {}", scenario.dt);
        }

        let mut seen = HashSet::new();
        let ids = scenario
            .agents
            .iter()
            .map(|agent| agent.id)
            .chain(scenario.targets.iter().map(|target| target.id));
        for id in ids {
            if !seen.insert(id) {
                anyhow::bail!("duplicate entity id {}", id);
            }
        }

        for agent in &scenario.agents {
            if !(agent.speed.is_finite() && agent.speed >= 0.0) {
                anyhow::bail!("agent {}: speed must be non-negative", agent.id);
            }
        }
        for target in &scenario.targets {
            if !(target.speed.is_finite() && target.speed >= 0.0) {
                anyhow::bail!("target {}: speed must be non-negative", target.id);
            }
        }
        Ok(scenario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AMBUSH: &str = r#"(
        map: "courtyard",
        ticks: 20,
        agents: [
            (id: 1, position: (x: 150.0, y: 150.0), speed: 300.0, function: "flank"),
        ],
        targets: [
            (id: 10, position: (x: 850.0, y: 150.0), waypoints: [(x: 850.0, y: 750.0)], speed: 120.0),
        ],
    )"#;

    #[test]
    fn parses_with_defaults() {
        let scenario = ScenarioLoader::parse(AMBUSH).unwrap();
        assert_eq!(scenario.map, "courtyard");
        assert_eq!(scenario.ticks, 20);
        assert_eq!(scenario.dt, 0.1);
        assert_eq!(scenario.agents[0].forward, WorldPoint::planar(1.0, 0.0));
        assert_eq!(scenario.targets[0].waypoints.len(), 1);
    }

    #[test]
    fn rejects_shared_ids() {
        let err = ScenarioLoader::parse(
            r#"(map: "m", agents: [(id: 3, position: (x: 0.0, y: 0.0), speed: 1.0, function: "f")],
                targets: [(id: 3, position: (x: 1.0, y: 1.0))])"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate entity id 3"));
    }

    #[test]
    fn rejects_non_positive_dt() {
        assert!(ScenarioLoader::parse(r#"(map: "m", dt: 0.0)"#).is_err());
    }
}
