//! Cycle-length regression. Input: the 11-feature vector, output: predicted days.

mod onnx;

pub use onnx::OnnxPredictor;

use crate::error::ModelError;
use crate::features::FeatureVector;

/// A trained regressor mapping a feature vector to a cycle length in days.
///
/// The prediction is continuous; rounding to whole days is left to the caller.
/// Implementations hold no per-call state.
pub trait CycleLengthModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError>;
}

impl<M: CycleLengthModel + ?Sized> CycleLengthModel for Box<M> {
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        (**self).predict(features)
    }
}
