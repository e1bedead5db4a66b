//! Scenario simulation
//!
//! Loads a scenario and its map, functions and tuning, walks targets along
//! their routes, and prints the runtime's report every few ticks.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use tactics_content::{Scenario, TargetEntry};
use tactics_core::{EntityId, TargetState, WorldPoint};
use tactics_runtime::{AgentSpec, TacticsRuntime, TargetSpec, TickReport};
use tracing::info;

use super::OutputFormat;
use crate::utils;

/// Run a scenario
#[derive(Parser)]
pub struct Simulate {
    /// Scenario name under `scenarios/` (without `.ron`)
    #[arg(value_name = "SCENARIO")]
    scenario: String,

    /// Override the scenario's tick count
    #[arg(short, long)]
    ticks: Option<u32>,

    /// Print every Nth tick
    #[arg(long, default_value_t = 10)]
    every: u32,

    /// Content directory (defaults to $TACTICS_DATA or ./data)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        let factory = utils::content(self.data_dir);
        let config = utils::load_config(&factory)?;
        let scenario: Scenario = factory.load_scenario(&self.scenario)?;
        let grid = factory
            .load_grid(&scenario.map)
            .with_context(|| format!("scenario '{}' references map '{}'", self.scenario, scenario.map))?;

        let mut runtime = TacticsRuntime::builder()
            .grid(Arc::new(grid))
            .config(config)
            .build()?;

        for agent in &scenario.agents {
            let function = factory
                .load_function(&agent.function)
                .with_context(|| format!("agent {} references function '{}'", agent.id, agent.function))?;
            let spec = AgentSpec::new(agent.position, agent.speed, function).facing(agent.forward);
            runtime.add_agent(EntityId(agent.id), spec)?;
        }
        let mut routes = Vec::with_capacity(scenario.targets.len());
        for target in &scenario.targets {
            runtime.add_target(EntityId(target.id), TargetSpec::new(target.position))?;
            routes.push(Route::new(target));
        }

        let ticks = self.ticks.unwrap_or(scenario.ticks);
        let every = self.every.max(1);
        info!(scenario = %self.scenario, ticks, dt = scenario.dt, "simulation started");

        let mut last = None;
        for tick in 1..=ticks {
            for route in &mut routes {
                let (position, velocity) = route.advance(scenario.dt);
                runtime.set_target_pose(route.id, position, velocity)?;
            }
            let report = runtime.tick(scenario.dt);
            if tick % every == 0 || tick == ticks {
                match self.format {
                    OutputFormat::Json => println!("{}", serde_json::to_string(&report)?),
                    OutputFormat::Summary => print_tick(&report),
                }
            }
            last = Some(report);
        }

        if let (OutputFormat::Summary, Some(report)) = (self.format, last) {
            print_outcome(&report);
        }
        Ok(())
    }
}

/// A target walking its waypoints at constant speed.
struct Route {
    id: EntityId,
    position: WorldPoint,
    waypoints: VecDeque<WorldPoint>,
    speed: f32,
}

impl Route {
    fn new(entry: &TargetEntry) -> Self {
        Self {
            id: EntityId(entry.id),
            position: entry.position,
            waypoints: entry.waypoints.iter().copied().collect(),
            speed: entry.speed,
        }
    }

    /// New position and velocity after `dt` seconds.
    fn advance(&mut self, dt: f32) -> (WorldPoint, WorldPoint) {
        let start = self.position;
        let mut travel = self.speed * dt;
        while travel > 0.0 {
            let Some(&next) = self.waypoints.front() else {
                break;
            };
            let remaining = self.position.planar_distance(next);
            if remaining <= travel {
                self.position = next;
                self.waypoints.pop_front();
                travel -= remaining;
            } else {
                let direction = (next - self.position).with_z(0.0).normalized();
                self.position += direction * travel;
                travel = 0.0;
            }
        }
        let velocity = if dt > 0.0 {
            (self.position - start) * (1.0 / dt)
        } else {
            WorldPoint::ZERO
        };
        (self.position, velocity)
    }
}

fn print_tick(report: &TickReport) {
    println!("{} {}", style("Tick").bold().cyan(), report.tick);
    for agent in &report.agents {
        let chosen = agent
            .chosen
            .map(|choice| format!("{} ({:.2})", choice.cell, choice.score))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  agent {:<5} at ({:>7.1}, {:>7.1})  {:<8} -> {}  remaining {:.1}",
            agent.id, agent.position.x, agent.position.y, agent.path_state, chosen, agent.path_length
        );
    }
    for target in &report.targets {
        let state = match target.state {
            TargetState::Immediate => style(target.state.to_string()).red().bold(),
            TargetState::Hidden => style(target.state.to_string()).yellow(),
            TargetState::Unknown => style(target.state.to_string()).dim(),
        };
        let estimate = target
            .estimate
            .map(|p| format!("({:.1}, {:.1})", p.x, p.y))
            .unwrap_or_else(|| "-".to_string());
        let peak = target
            .peak
            .map(|(cell, p)| format!("{} p={:.3}", cell, p))
            .unwrap_or_else(|| "-".to_string());
        println!("  target {:<4} {:<9} estimate {}  peak {}", target.id, state, estimate, peak);
    }
}

fn print_outcome(report: &TickReport) {
    println!();
    println!("{}", style("=== Outcome ===").bold().green());
    let known = report.targets.iter().filter(|target| target.state.is_known()).count();
    println!("  Ticks: {}", report.tick);
    println!("  Targets known: {}/{}", known, report.targets.len());
    for agent in &report.agents {
        println!("  Agent {} final path state: {}", agent.id, agent.path_state);
    }
}
