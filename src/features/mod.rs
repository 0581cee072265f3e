//! Feature encoding: form inputs → fixed-order numeric vector for the model.

mod encoder;
mod input;

pub use encoder::encode;
pub use input::{
    parse_date, Cramps, CycleInput, Mood, AGE_RANGE, BMI_RANGE, LUTEAL_PHASE_RANGE,
    MEAN_CYCLE_LENGTH_RANGE, MENSES_SCORE_RANGE, PEAK_DAYS_RANGE, PERIOD_LENGTH_RANGE,
};

use serde::{Deserialize, Serialize};

pub const FEATURE_COUNT: usize = 11;

/// Column names in vector order. The model was trained on exactly this order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "mean_cycle_length",
    "luteal_phase",
    "period_length",
    "peak_days",
    "menses_score",
    "age",
    "bmi",
    "mood_encoded",
    "cramps_encoded",
    "cycle_variability",
    "symptom_score",
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub values: [f32; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn new(values: [f32; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Value of a named feature.
    pub fn get(&self, name: &str) -> Option<f32> {
        FEATURE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| self.values[i])
    }
}
