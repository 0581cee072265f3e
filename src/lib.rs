//! Cycle predictor: next-cycle length from cycle and symptom data.
//!
//! Modular structure:
//! - [`features`] — Form inputs and the 11-feature encoding the model expects
//! - [`model`] — Cycle-length regression (ONNX)
//! - [`projection`] — Next and upcoming period dates
//! - [`storage`] — CSV prediction history
//! - [`trends`] — Cycle-length and symptom series over the history
//! - [`forecast`] — The end-to-end prediction pipeline
//! - [`report`] — Text rendering of results, history and charts
//! - [`form`] — Interactive prompt for the cycle form
//! - [`evaluation`] — MAE / R² of a model on a labelled dataset
//! - [`logging`] — Tracing setup

pub mod config;
pub mod error;
pub mod evaluation;
pub mod features;
pub mod forecast;
pub mod form;
pub mod logging;
pub mod model;
pub mod projection;
pub mod report;
pub mod storage;
pub mod trends;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use features::{encode, Cramps, CycleInput, FeatureVector, Mood};
pub use forecast::{Forecast, Forecaster};
pub use logging::StructuredLogger;
pub use model::{CycleLengthModel, OnnxPredictor};
pub use projection::{project_next, project_sequence, DateProjector};
pub use storage::{HistoryLog, HistoryStore, PredictionRecord};
pub use trends::{cycle_length_series, mood_cramp_series};
