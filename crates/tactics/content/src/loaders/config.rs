//! Tuning configuration loader.

use std::path::Path;

use tactics_core::TacticsConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for engine tuning from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a [`TacticsConfig`] from a TOML file.
    ///
    /// Missing sections and fields fall back to their defaults, so an empty
    /// file yields `TacticsConfig::default()`.
    pub fn load(path: &Path) -> LoadResult<TacticsConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<TacticsConfig> {
        let config: TacticsConfig =
            toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if !(config.occupancy.diffusion_per_second.is_finite() && config.occupancy.diffusion_per_second >= 0.0) {
            anyhow::bail!(
                "occupancy.diffusion_per_second must be a non-negative number, got {}",
                config.occupancy.diffusion_per_second
            );
        }
        if config.spatial.sample_dimensions <= 0.0 {
            anyhow::bail!("spatial.sample_dimensions must be positive, got {}", config.spatial.sample_dimensions);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tactics_core::{PlannerConfig, RenormalizeMode};
    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(ConfigLoader::parse("").unwrap(), TacticsConfig::default());
    }

    #[test]
    fn load_overrides_sections() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[planner]
smooth_paths = false

[occupancy]
diffusion_per_second = 0.5
renormalize = "Uniform"

[perception.hearing]
range = 500.0
"#
        )
        .unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert!(!config.planner.smooth_paths);
        assert_eq!(config.planner.arrival_distance, PlannerConfig::DEFAULT_ARRIVAL_DISTANCE);
        assert_eq!(config.occupancy.renormalize, RenormalizeMode::Uniform);
        assert_eq!(config.occupancy.diffusion_per_second, 0.5);
        let hearing = config.perception.hearing.unwrap();
        assert_eq!(hearing.range, 500.0);
        assert_eq!(hearing.min_speed, 200.0);
    }

    #[test]
    fn rejects_negative_diffusion() {
        let err = ConfigLoader::parse("[occupancy]\ndiffusion_per_second = -1.0\n").unwrap_err();
        assert!(err.to_string().contains("diffusion_per_second"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = ConfigLoader::load(Path::new("/nonexistent/tactics.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/tactics.toml"));
    }
}
