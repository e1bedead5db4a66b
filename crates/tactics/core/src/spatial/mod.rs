//! Spatial utility evaluation.
//!
//! A [`SpatialFunction`] is an ordered list of [`FunctionLayer`]s. Each layer
//! reads one raw feature per candidate cell, shapes it with a
//! [`ResponseCurve`], and merges it into the cell's score with a
//! [`CombineOp`]. [`SpatialEvaluator`] runs the function over the cells an
//! agent can reach and reports the best one.
mod curve;
mod evaluator;
mod layer;

pub use curve::{CurveFn, ResponseCurve};
pub use evaluator::{EvaluationContext, PositionChoice, SpatialEvaluator};
pub use layer::{CombineOp, FunctionLayer, LayerInput, SpatialFunction};
