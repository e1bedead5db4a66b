//! Spatial function loader.

use std::path::Path;

use tactics_core::SpatialFunction;

use crate::loaders::{LoadResult, read_file};

/// Loader for spatial functions from RON files.
pub struct FunctionLoader;

impl FunctionLoader {
    /// Load a [`SpatialFunction`] from a RON file.
    ///
    /// RON format:
    ///
    /// ```ron
    /// (
    ///     last_cell_bonus: 0.25,
    ///     layers: [
    ///         (input: PathDistance, curve: Linear(slope: -0.001, intercept: 1.0), op: Add),
    ///         (input: LineOfSight, curve: Identity, op: Multiply),
    ///     ],
    /// )
    /// ```
    ///
    /// Custom curves cannot be expressed in data.
    pub fn load(path: &Path) -> LoadResult<SpatialFunction> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<SpatialFunction> {
        let function: SpatialFunction =
            ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse spatial function RON: {}", e))?;

        for (index, layer) in function.layers.iter().enumerate() {
            if !layer.curve.is_well_formed() {
                anyhow::bail!("layer {} ({}): piecewise keys must be finite and ascending", index, layer.input);
            }
        }
        if !function.last_cell_bonus.is_finite() {
            anyhow::bail!("last_cell_bonus must be finite");
        }
        Ok(function)
    }
}

#[cfg(test)]
mod tests {
    use tactics_core::{CombineOp, LayerInput};

    use super::*;

    #[test]
    fn parses_layer_stack() {
        let function = FunctionLoader::parse(
            r#"(
                last_cell_bonus: 0.5,
                layers: [
                    (input: TargetRange, curve: Piecewise([(0.0, 1.0), (1000.0, 0.0)]), op: Add),
                    (input: LineOfSight, curve: Constant(2.0), op: Multiply),
                    (input: AllyDistance),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(function.last_cell_bonus, 0.5);
        assert_eq!(function.layers.len(), 3);
        assert_eq!(function.layers[0].input, LayerInput::TargetRange);
        assert!((function.layers[0].curve.evaluate(250.0) - 0.75).abs() < 1e-6);
        assert_eq!(function.layers[1].op, CombineOp::Multiply);
        assert_eq!(function.layers[2].op, CombineOp::Add);
        assert!(function.reads_target());
    }

    #[test]
    fn rejects_unsorted_piecewise_keys() {
        let err = FunctionLoader::parse(
            r#"(layers: [(input: PathDistance, curve: Piecewise([(5.0, 1.0), (1.0, 0.0)]), op: Add)])"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("layer 0"));
    }

    #[test]
    fn empty_function_is_valid() {
        let function = FunctionLoader::parse("()").unwrap();
        assert!(function.layers.is_empty());
        assert_eq!(function.last_cell_bonus, 0.0);
    }
}
