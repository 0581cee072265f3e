//! Prediction pipeline: input → features → model → dates → history record.

use crate::error::{Error, Result};
use crate::features::{self, CycleInput};
use crate::model::CycleLengthModel;
use crate::projection::{self, DateProjector};
use crate::storage::PredictionRecord;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

/// Everything one form submission produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    /// Raw model output, in days
    pub predicted_days: f64,
    /// `predicted_days` rounded to whole days
    pub cycle_length_days: u32,
    pub next_period_date: NaiveDate,
    /// Next configured number of period dates, starting with `next_period_date`
    pub upcoming: Vec<NaiveDate>,
    /// Row to persist; the caller decides whether and when
    pub record: PredictionRecord,
}

pub struct Forecaster<M> {
    model: M,
    projector: DateProjector,
}

impl<M: CycleLengthModel> Forecaster<M> {
    pub fn new(model: M, projector: DateProjector) -> Self {
        Self { model, projector }
    }

    pub fn forecast(&self, input: &CycleInput, today: NaiveDate) -> Result<Forecast> {
        let features = features::encode(input)?;
        let predicted_days = self
            .model
            .predict(&features)
            .map_err(Error::Inference)?;

        let cycle_length_days = projection::round_days(predicted_days)?;
        let next_period_date = self.projector.next(input.last_period_date, predicted_days)?;
        let upcoming = self.projector.upcoming(input.last_period_date, predicted_days)?;

        info!(
            predicted_days,
            cycle_length_days,
            next_period = %next_period_date,
            "cycle forecast"
        );

        Ok(Forecast {
            predicted_days,
            cycle_length_days,
            next_period_date,
            upcoming,
            record: PredictionRecord {
                prediction_date: today,
                last_period_date: input.last_period_date,
                mean_cycle_length: input.mean_cycle_length,
                period_length: input.period_length,
                mood: input.mood,
                cramps: input.cramps,
                predicted_cycle_length: cycle_length_days,
                next_period_date,
            },
        })
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn projector(&self) -> &DateProjector {
        &self.projector
    }
}
