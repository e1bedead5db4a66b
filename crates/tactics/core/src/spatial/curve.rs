use std::fmt;
use std::sync::Arc;

use tracing::warn;

/// User-supplied mapping for [`ResponseCurve::Custom`].
pub type CurveFn = Arc<dyn Fn(f32) -> f32 + Send + Sync>;

/// Maps a layer's raw feature value to the weight it contributes.
///
/// Every variant except [`ResponseCurve::Custom`] can be loaded from data.
/// Non-finite outputs are treated as a defect: they are logged and replaced
/// by 0 so they never reach a cell score.
#[derive(Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResponseCurve {
    /// Passes the raw value through.
    #[default]
    Identity,
    /// Ignores the raw value.
    Constant(f32),
    /// `slope * x + intercept`.
    Linear { slope: f32, intercept: f32 },
    /// Linear interpolation between `(x, y)` keys sorted by `x`, clamped to
    /// the end keys. An empty key list behaves like [`Self::Identity`].
    Piecewise(Vec<(f32, f32)>),
    #[cfg_attr(feature = "serde", serde(skip))]
    Custom(CurveFn),
}

impl ResponseCurve {
    pub fn linear(slope: f32, intercept: f32) -> Self {
        ResponseCurve::Linear { slope, intercept }
    }

    /// Piecewise curve; keys are sorted by `x`.
    pub fn piecewise(mut keys: Vec<(f32, f32)>) -> Self {
        keys.sort_by(|a, b| a.0.total_cmp(&b.0));
        ResponseCurve::Piecewise(keys)
    }

    pub fn custom(f: impl Fn(f32) -> f32 + Send + Sync + 'static) -> Self {
        ResponseCurve::Custom(Arc::new(f))
    }

    /// True when piecewise keys are in ascending `x` order. Always true for
    /// the other variants.
    pub fn is_well_formed(&self) -> bool {
        match self {
            ResponseCurve::Piecewise(keys) => keys
                .windows(2)
                .all(|pair| pair[0].0 <= pair[1].0 && pair[0].0.is_finite() && pair[1].0.is_finite()),
            _ => true,
        }
    }

    pub fn evaluate(&self, x: f32) -> f32 {
        let y = match self {
            ResponseCurve::Identity => x,
            ResponseCurve::Constant(value) => *value,
            ResponseCurve::Linear { slope, intercept } => slope * x + intercept,
            ResponseCurve::Piecewise(keys) => interpolate(keys, x),
            ResponseCurve::Custom(f) => f(x),
        };
        if y.is_finite() {
            y
        } else {
            warn!(input = x, output = y, curve = ?self, "response curve produced a non-finite value");
            0.0
        }
    }
}

fn interpolate(keys: &[(f32, f32)], x: f32) -> f32 {
    let (Some(&(first_x, first_y)), Some(&(last_x, last_y))) = (keys.first(), keys.last()) else {
        return x;
    };
    if x <= first_x {
        return first_y;
    }
    if x >= last_x {
        return last_y;
    }

    let upper = keys.partition_point(|&(key_x, _)| key_x <= x);
    let (x0, y0) = keys[upper - 1];
    let (x1, y1) = keys[upper];
    let span = x1 - x0;
    if span <= f32::EPSILON {
        return y1;
    }
    y0 + (y1 - y0) * (x - x0) / span
}

impl fmt::Debug for ResponseCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseCurve::Identity => f.write_str("Identity"),
            ResponseCurve::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            ResponseCurve::Linear { slope, intercept } => f
                .debug_struct("Linear")
                .field("slope", slope)
                .field("intercept", intercept)
                .finish(),
            ResponseCurve::Piecewise(keys) => f.debug_tuple("Piecewise").field(keys).finish(),
            ResponseCurve::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
