//! Hold-out metrics for a cycle-length model: mean absolute error and R².
//!
//! Datasets are CSV files whose header names every feature in
//! [`FEATURE_NAMES`] plus a `cycle_length` target column, in any order.

use crate::error::EvaluationError;
use crate::features::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
use crate::model::CycleLengthModel;
use serde::Serialize;
use std::path::Path;
use tracing::warn;

pub const TARGET_COLUMN: &str = "cycle_length";

#[derive(Debug, Clone, PartialEq)]
pub struct LabelledSample {
    pub features: FeatureVector,
    pub cycle_length: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub samples: Vec<LabelledSample>,
    /// Rows dropped for malformed values
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub samples: usize,
    pub mae: f64,
    /// `None` when every target is identical
    pub r2: Option<f64>,
}

pub fn read_dataset(path: &Path) -> Result<Dataset, EvaluationError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    let headers = reader.headers()?.clone();
    let position = |name: &str| headers.iter().position(|h| h == name);

    let mut missing = Vec::new();
    let mut columns = [0usize; FEATURE_COUNT];
    for (slot, name) in columns.iter_mut().zip(FEATURE_NAMES) {
        match position(name) {
            Some(i) => *slot = i,
            None => missing.push(name.to_string()),
        }
    }
    let target = position(TARGET_COLUMN);
    if target.is_none() {
        missing.push(TARGET_COLUMN.to_string());
    }
    let target = match target {
        Some(t) if missing.is_empty() => t,
        _ => return Err(EvaluationError::MissingColumns(missing)),
    };

    let mut dataset = Dataset::default();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let parse = |i: usize| {
            record
                .get(i)
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|v| v.is_finite())
        };

        let mut values = [0f32; FEATURE_COUNT];
        let mut complete = true;
        for (value, &col) in values.iter_mut().zip(columns.iter()) {
            match parse(col) {
                Some(v) => *value = v as f32,
                None => complete = false,
            }
        }
        match (complete, parse(target)) {
            (true, Some(cycle_length)) => dataset.samples.push(LabelledSample {
                features: FeatureVector::new(values),
                cycle_length,
            }),
            _ => {
                warn!(row = line + 1, "skipping malformed dataset row");
                dataset.skipped += 1;
            }
        }
    }
    Ok(dataset)
}

pub fn evaluate<M>(model: &M, samples: &[LabelledSample]) -> Result<Metrics, EvaluationError>
where
    M: CycleLengthModel + ?Sized,
{
    if samples.is_empty() {
        return Err(EvaluationError::Empty);
    }
    let mut predicted = Vec::with_capacity(samples.len());
    for s in samples {
        predicted.push(model.predict(&s.features)?);
    }
    let actual: Vec<f64> = samples.iter().map(|s| s.cycle_length).collect();
    Ok(Metrics {
        samples: samples.len(),
        mae: mean_absolute_error(&actual, &predicted),
        r2: r2_score(&actual, &predicted),
    })
}

fn mean_absolute_error(actual: &[f64], predicted: &[f64]) -> f64 {
    let n = actual.len() as f64;
    actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).abs())
        .sum::<f64>()
        / n
}

fn r2_score(actual: &[f64], predicted: &[f64]) -> Option<f64> {
    let mean = actual.iter().sum::<f64>() / actual.len() as f64;
    let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
    if ss_tot == 0.0 {
        return None;
    }
    let ss_res: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    Some(1.0 - ss_res / ss_tot)
}
