//! Single path query on a map file
//!
//! Runs A* between two cells, optionally string-pulls the result, and draws
//! the grid with the path overlaid.

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;
use tactics_core::path::{PathStep, astar, smooth_steps};
use tactics_core::{CellRef, GridOracle, TileGrid};

use super::OutputFormat;
use crate::utils;

/// Run a single A* query
#[derive(Parser)]
pub struct Plan {
    /// Map name under `maps/` (without `.ron`)
    #[arg(value_name = "MAP")]
    map: String,

    /// Start cell as X,Y
    #[arg(long, value_name = "X,Y", value_parser = utils::parse_cell)]
    from: CellRef,

    /// Goal cell as X,Y
    #[arg(long, value_name = "X,Y", value_parser = utils::parse_cell)]
    to: CellRef,

    /// Also show the string-pulled waypoints
    #[arg(long)]
    smooth: bool,

    /// Content directory (defaults to $TACTICS_DATA or ./data)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

impl Plan {
    pub fn execute(self) -> Result<()> {
        let factory = utils::content(self.data_dir);
        let grid = factory.load_grid(&self.map)?;

        let result = astar(&grid, self.from, self.to)?;
        let steps: Vec<PathStep> = result
            .cells
            .iter()
            .map(|&cell| PathStep::new(grid.cell_to_point(cell), cell))
            .collect();
        let smoothed = if self.smooth {
            Some(smooth_steps(&grid, grid.cell_to_point(self.from), &steps))
        } else {
            None
        };

        match self.format {
            OutputFormat::Json => {
                let waypoints: Option<Vec<CellRef>> =
                    smoothed.as_ref().map(|steps| steps.iter().map(|step| step.cell).collect());
                let output = serde_json::json!({
                    "map": self.map,
                    "from": self.from,
                    "to": self.to,
                    "cost": result.cost,
                    "expanded": result.expanded,
                    "cells": result.cells,
                    "waypoints": waypoints,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Summary => {
                println!("{} {}", style("Map:").bold().cyan(), self.map);
                println!("{} {} -> {}", style("Query:").bold().cyan(), self.from, self.to);
                println!("{} {:.2}", style("Cost:").bold().cyan(), result.cost);
                println!("{} {}", style("Steps:").bold().cyan(), result.cells.len());
                println!("{} {}", style("Expanded:").bold().cyan(), result.expanded);
                if let Some(smoothed) = &smoothed {
                    let cells: Vec<String> = smoothed.iter().map(|step| step.cell.to_string()).collect();
                    println!("{} {}", style("Waypoints:").bold().cyan(), cells.join(" "));
                }
                println!();
                draw(&grid, self.from, &result.cells);
            }
        }
        Ok(())
    }
}

fn draw(grid: &TileGrid, start: CellRef, cells: &[CellRef]) {
    let on_path: HashSet<CellRef> = cells.iter().copied().collect();
    let bounds = grid.bounds();
    for y in bounds.min_y..=bounds.max_y {
        let mut line = String::with_capacity(bounds.width());
        for x in bounds.min_x..=bounds.max_x {
            let cell = CellRef::new(x, y);
            let glyph = if cell == start {
                style('S').green().bold()
            } else if on_path.contains(&cell) {
                style('*').yellow().bold()
            } else if !grid.cell_traits(cell).is_traversable() {
                if grid.cell_traits(cell).blocks_sight() {
                    style('#').dim()
                } else {
                    style('~').blue()
                }
            } else {
                style('.').dim()
            };
            line.push_str(&glyph.to_string());
        }
        println!("{}", line);
    }
}
