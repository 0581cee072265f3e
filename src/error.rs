//! Error taxonomy. Each component owns its error enum; [`Error`] composes them
//! for callers that drive the whole pipeline.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: String,
        min: String,
        max: String,
    },
    #[error("unknown mood {0:?} (expected Happy, Normal, Moody or Sad)")]
    UnknownMood(String),
    #[error("unknown cramps level {0:?} (expected None, Mild or Severe)")]
    UnknownCramps(String),
    #[error("invalid date {0:?} (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("model artifact not found at {0}")]
    NotFound(PathBuf),
    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("model artifact checksum mismatch: expected {expected}, found {actual}")]
    ChecksumMismatch { expected: String, actual: String },
    #[error("model expects {found} input features, encoder produces {expected}")]
    FeatureCountMismatch { expected: usize, found: usize },
    #[error("onnx runtime: {0}")]
    Runtime(#[from] ort::OrtError),
    #[error("model produced no output value")]
    EmptyOutput,
    #[error("model produced a non-finite prediction ({0})")]
    NonFinite(f64),
}

#[derive(Debug, thiserror::Error)]
pub enum ProjectionError {
    #[error("predicted cycle length {0} does not round to a positive number of days")]
    InvalidCycleLength(f64),
    #[error("projected date is out of the supported calendar range")]
    OutOfRange,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("history file unavailable: {0}")]
    Unavailable(#[from] std::io::Error),
    #[error("history file: {0}")]
    Csv(#[from] csv::Error),
    #[error("history file is missing required columns: {}", .0.join(", "))]
    SchemaMismatch(Vec<&'static str>),
    #[error("history file uses schema version {found}, newest supported is {supported}")]
    UnsupportedSchema { found: u32, supported: u32 },
}

#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    #[error("dataset: {0}")]
    Csv(#[from] csv::Error),
    #[error("dataset is missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("dataset has no usable rows")]
    Empty,
    #[error(transparent)]
    Model(#[from] ModelError),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),
    #[error("model load failure: {0}")]
    ModelLoadFailure(#[source] ModelError),
    #[error("inference failed: {0}")]
    Inference(#[source] ModelError),
    #[error(transparent)]
    Projection(#[from] ProjectionError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
