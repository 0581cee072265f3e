//! ONNX Runtime inference. Input: [1, 11] f32, Output: predicted cycle length.
//! The artifact is the boosted-tree regressor exported to ONNX by the training side.

use super::CycleLengthModel;
use crate::error::ModelError;
use crate::features::{FeatureVector, FEATURE_COUNT};
use ndarray::{arr2, CowArray};
use sha2::{Digest, Sha256};
use std::path::Path;
use std::sync::Arc;

pub struct OnnxPredictor {
    session: ort::Session,
    _env: Arc<ort::Environment>,
}

impl OnnxPredictor {
    /// Load the model once. Any failure here is fatal to the caller; there is no
    /// fallback model.
    pub fn load(path: &Path, expected_sha256: Option<&str>) -> Result<Self, ModelError> {
        if !path.exists() {
            return Err(ModelError::NotFound(path.to_path_buf()));
        }
        if let Some(expected) = expected_sha256 {
            verify_checksum(path, expected)?;
        }

        let env = ort::Environment::builder()
            .with_name("cycle-predictor")
            .build()?
            .into_arc();
        let session = ort::SessionBuilder::new(&env)?
            .with_optimization_level(ort::GraphOptimizationLevel::Level1)?
            .with_intra_threads(1)?
            .with_model_from_file(path)?;

        // A fixed trailing dimension must match the encoder; dynamic ones are accepted
        if let Some(found) = session
            .inputs
            .first()
            .and_then(|i| i.dimensions.last().copied().flatten())
        {
            if found as usize != FEATURE_COUNT {
                return Err(ModelError::FeatureCountMismatch {
                    expected: FEATURE_COUNT,
                    found: found as usize,
                });
            }
        }

        tracing::info!(path = %path.display(), "cycle length model loaded");
        Ok(Self { session, _env: env })
    }
}

impl CycleLengthModel for OnnxPredictor {
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        let input = CowArray::from(arr2(&[features.values]).into_dyn());
        let value = ort::Value::from_array(self.session.allocator(), &input)?;
        let outputs = self.session.run(vec![value])?;

        let out = outputs.first().ok_or(ModelError::EmptyOutput)?;
        let tensor = out.try_extract::<f32>()?;
        let days = tensor
            .view()
            .iter()
            .next()
            .copied()
            .ok_or(ModelError::EmptyOutput)?;
        let days = f64::from(days);
        if !days.is_finite() {
            return Err(ModelError::NonFinite(days));
        }
        Ok(days)
    }
}

fn verify_checksum(path: &Path, expected: &str) -> Result<(), ModelError> {
    let data = std::fs::read(path)?;
    let actual = format!("{:x}", Sha256::digest(&data));
    if actual.eq_ignore_ascii_case(expected.trim()) {
        Ok(())
    } else {
        Err(ModelError::ChecksumMismatch {
            expected: expected.trim().to_string(),
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_artifact_is_a_load_failure() {
        match OnnxPredictor::load(Path::new("nonexistent.onnx"), None) {
            Err(ModelError::NotFound(p)) => assert_eq!(p, Path::new("nonexistent.onnx")),
            Err(e) => panic!("unexpected error {e}"),
            Ok(_) => panic!("loaded a model that does not exist"),
        }
    }

    #[test]
    fn checksum_mismatch_is_detected_before_runtime_init() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.onnx");
        std::fs::write(&path, b"not really a model").unwrap();
        let err = OnnxPredictor::load(&path, Some("00ff")).err().unwrap();
        assert!(matches!(err, ModelError::ChecksumMismatch { .. }));
    }

    #[test]
    fn checksum_comparison_ignores_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.onnx");
        std::fs::write(&path, b"abc").unwrap();
        // sha256("abc")
        let digest = "BA7816BF8F01CFEA414140DE5DAE2223B00361A396177A9CB410FF61F20015AD";
        assert!(verify_checksum(&path, digest).is_ok());
    }
}
