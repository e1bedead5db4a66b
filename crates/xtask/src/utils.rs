//! Utility functions for xtask commands

use std::path::PathBuf;

use anyhow::{Context, Result};
use tactics_content::{ConfigLoader, ContentFactory};
use tactics_core::{CellRef, TacticsConfig};

/// Environment variable naming the content directory.
const DATA_ENV: &str = "TACTICS_DATA";
/// Environment variable naming a tuning file that overrides `config.toml`.
const CONFIG_ENV: &str = "TACTICS_CONFIG";
/// Environment variable holding the log filter.
const LOG_ENV: &str = "TACTICS_LOG";

/// Install the stderr subscriber; `TACTICS_LOG` overrides the `info` default.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Content factory over `--data-dir`, `$TACTICS_DATA`, or `./data`.
pub fn content(data_dir: Option<PathBuf>) -> ContentFactory {
    let dir = data_dir
        .or_else(|| std::env::var_os(DATA_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("data"));
    ContentFactory::new(dir)
}

/// Tuning from `$TACTICS_CONFIG` when set, otherwise the data directory.
pub fn load_config(factory: &ContentFactory) -> Result<TacticsConfig> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => {
            let path = PathBuf::from(path);
            ConfigLoader::load(&path).with_context(|| format!("Failed to load {} from {}", CONFIG_ENV, path.display()))
        }
        None => factory.load_config(),
    }
}

/// Parses `X,Y` cell coordinates.
pub fn parse_cell(value: &str) -> Result<CellRef, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{}'", value))?;
    let x = x.trim().parse::<i32>().map_err(|e| format!("bad x '{}': {}", x, e))?;
    let y = y.trim().parse::<i32>().map_err(|e| format!("bad y '{}': {}", y, e))?;
    Ok(CellRef::new(x, y))
}
