//! Content factory for resolving data files by name.

use std::path::{Path, PathBuf};

use tactics_core::{SpatialFunction, TacticsConfig, TileGrid};

use crate::loaders::{ConfigLoader, FunctionLoader, GridLoader, LoadResult, Scenario, ScenarioLoader};

/// Content factory that loads all tactics content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── maps/
/// │   └── courtyard.ron
/// ├── functions/
/// │   ├── flank.ron
/// │   └── hold.ron
/// └── scenarios/
///     └── ambush.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load tuning from `config.toml`, or defaults when the file is absent.
    pub fn load_config(&self) -> LoadResult<TacticsConfig> {
        let path = self.data_dir.join("config.toml");
        if path.exists() {
            ConfigLoader::load(&path)
        } else {
            Ok(TacticsConfig::default())
        }
    }

    /// Load a grid from `maps/{name}.ron`.
    pub fn load_grid(&self, name: &str) -> LoadResult<TileGrid> {
        GridLoader::load(&self.named("maps", name))
    }

    /// Load a spatial function from `functions/{name}.ron`.
    pub fn load_function(&self, name: &str) -> LoadResult<SpatialFunction> {
        FunctionLoader::load(&self.named("functions", name))
    }

    /// Load a scenario from `scenarios/{name}.ron`.
    pub fn load_scenario(&self, name: &str) -> LoadResult<Scenario> {
        ScenarioLoader::load(&self.named("scenarios", name))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn named(&self, dir: &str, name: &str) -> PathBuf {
        self.data_dir.join(dir).join(format!("{}.ron", name))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tactics_core::GridOracle;
    use tempfile::TempDir;

    use super::*;

    fn setup() -> (TempDir, ContentFactory) {
        let temp_dir = TempDir::new().unwrap();
        let factory = ContentFactory::new(temp_dir.path());
        (temp_dir, factory)
    }

    #[test]
    fn resolves_named_files() {
        let (temp, factory) = setup();
        fs::create_dir_all(temp.path().join("maps")).unwrap();
        fs::create_dir_all(temp.path().join("functions")).unwrap();
        fs::write(temp.path().join("maps/yard.ron"), r#"(cell_size: 50.0, rows: ["...", ".#."])"#).unwrap();
        fs::write(temp.path().join("functions/hold.ron"), "(last_cell_bonus: 1.0)").unwrap();

        let grid = factory.load_grid("yard").unwrap();
        assert_eq!(grid.cell_size(), 50.0);
        assert_eq!(factory.load_function("hold").unwrap().last_cell_bonus, 1.0);
        assert!(factory.load_scenario("missing").is_err());
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let (_temp, factory) = setup();
        assert_eq!(factory.load_config().unwrap(), TacticsConfig::default());
    }
}
