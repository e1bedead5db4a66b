use super::ResponseCurve;

/// Raw per-cell feature a layer reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LayerInput {
    /// Always 0; the layer contributes only through its curve.
    #[default]
    None,
    /// Straight-line distance from the cell to the target estimate.
    TargetRange,
    /// Travel cost from the agent to the cell.
    PathDistance,
    /// 1.0 when the target is visible from the cell at eye height, else 0.0.
    LineOfSight,
    /// Straight-line distance to the nearest contested ally claim.
    AllyDistance,
}

/// How a layer's weighted value merges into the running cell score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombineOp {
    /// Discard the running score and use the value.
    Replace,
    #[default]
    Add,
    Multiply,
    /// Leave the running score untouched.
    Keep,
}

impl CombineOp {
    #[inline]
    pub fn apply(self, current: f32, value: f32) -> f32 {
        match self {
            CombineOp::Replace => value,
            CombineOp::Add => current + value,
            CombineOp::Multiply => current * value,
            CombineOp::Keep => current,
        }
    }
}

/// One scored feature of a [`SpatialFunction`].
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FunctionLayer {
    pub input: LayerInput,
    pub curve: ResponseCurve,
    pub op: CombineOp,
}

impl FunctionLayer {
    pub fn new(input: LayerInput, curve: ResponseCurve, op: CombineOp) -> Self {
        Self { input, curve, op }
    }
}

/// Ordered layers evaluated for every candidate cell, plus the hysteresis
/// bonus granted to the previously chosen cell.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpatialFunction {
    pub layers: Vec<FunctionLayer>,
    pub last_cell_bonus: f32,
}

impl SpatialFunction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layer(mut self, input: LayerInput, curve: ResponseCurve, op: CombineOp) -> Self {
        self.layers.push(FunctionLayer::new(input, curve, op));
        self
    }

    pub fn with_last_cell_bonus(mut self, bonus: f32) -> Self {
        self.last_cell_bonus = bonus;
        self
    }

    /// True when some layer depends on the target estimate.
    pub fn reads_target(&self) -> bool {
        self.layers
            .iter()
            .any(|layer| matches!(layer.input, LayerInput::TargetRange | LayerInput::LineOfSight))
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn combine_ops() {
        assert_eq!(CombineOp::Replace.apply(5.0, 2.0), 2.0);
        assert_eq!(CombineOp::Add.apply(5.0, 2.0), 7.0);
        assert_eq!(CombineOp::Multiply.apply(5.0, 2.0), 10.0);
        assert_eq!(CombineOp::Keep.apply(5.0, 2.0), 5.0);
    }

    #[test]
    fn inputs_are_enumerable() {
        let names: Vec<_> = LayerInput::iter().map(|input| input.to_string()).collect();
        assert_eq!(
            names,
            ["None", "TargetRange", "PathDistance", "LineOfSight", "AllyDistance"]
        );
    }

    #[test]
    fn builder_collects_layers_in_order() {
        let function = SpatialFunction::new()
            .with_layer(LayerInput::PathDistance, ResponseCurve::linear(-1.0, 0.0), CombineOp::Add)
            .with_layer(LayerInput::AllyDistance, ResponseCurve::Identity, CombineOp::Multiply)
            .with_last_cell_bonus(0.5);
        assert_eq!(function.layers.len(), 2);
        assert_eq!(function.layers[1].op, CombineOp::Multiply);
        assert_eq!(function.last_cell_bonus, 0.5);
        assert!(!function.reads_target());
    }
}
