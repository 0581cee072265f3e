//! Period date arithmetic: a start date plus a predicted cycle length.

use crate::config::ProjectionConfig;
use crate::error::ProjectionError;
use chrono::{Days, NaiveDate};

/// Round a continuous prediction to whole days, half to even.
pub fn round_days(predicted_days: f64) -> Result<u32, ProjectionError> {
    if !predicted_days.is_finite() {
        return Err(ProjectionError::InvalidCycleLength(predicted_days));
    }
    let days = predicted_days.round_ties_even();
    if days < 1.0 {
        return Err(ProjectionError::InvalidCycleLength(predicted_days));
    }
    if days > u32::MAX as f64 {
        return Err(ProjectionError::OutOfRange);
    }
    Ok(days as u32)
}

/// `start + round(predicted_days)`.
pub fn project_next(start: NaiveDate, predicted_days: f64) -> Result<NaiveDate, ProjectionError> {
    let step = round_days(predicted_days)?;
    start
        .checked_add_days(Days::new(u64::from(step)))
        .ok_or(ProjectionError::OutOfRange)
}

/// The next `count` period dates, each one cycle after the previous.
pub fn project_sequence(
    start: NaiveDate,
    predicted_days: f64,
    count: usize,
) -> Result<Vec<NaiveDate>, ProjectionError> {
    let step = Days::new(u64::from(round_days(predicted_days)?));
    let mut dates = Vec::with_capacity(count);
    let mut current = start;
    for _ in 0..count {
        current = current
            .checked_add_days(step)
            .ok_or(ProjectionError::OutOfRange)?;
        dates.push(current);
    }
    Ok(dates)
}

pub struct DateProjector {
    config: ProjectionConfig,
}

impl DateProjector {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn next(
        &self,
        start: NaiveDate,
        predicted_days: f64,
    ) -> Result<NaiveDate, ProjectionError> {
        project_next(start, predicted_days)
    }

    /// Upcoming period dates, as many as configured.
    pub fn upcoming(
        &self,
        start: NaiveDate,
        predicted_days: f64,
    ) -> Result<Vec<NaiveDate>, ProjectionError> {
        project_sequence(start, predicted_days, self.config.upcoming_periods)
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }
}
