//! Raw form inputs and their accepted bounds.

use crate::error::InputError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

pub const MEAN_CYCLE_LENGTH_RANGE: RangeInclusive<u32> = 20..=40;
pub const LUTEAL_PHASE_RANGE: RangeInclusive<u32> = 10..=16;
pub const PERIOD_LENGTH_RANGE: RangeInclusive<u32> = 2..=8;
pub const PEAK_DAYS_RANGE: RangeInclusive<u32> = 0..=5;
pub const MENSES_SCORE_RANGE: RangeInclusive<u32> = 1..=100;
pub const AGE_RANGE: RangeInclusive<u32> = 10..=60;
pub const BMI_RANGE: RangeInclusive<f64> = 10.0..=40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Happy,
    Normal,
    Moody,
    Sad,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cramps {
    None,
    Mild,
    Severe,
}

impl Mood {
    pub const ALL: [Mood; 4] = [Mood::Happy, Mood::Normal, Mood::Moody, Mood::Sad];

    /// Integer encoding the model was trained with.
    pub fn code(self) -> u8 {
        match self {
            Mood::Happy => 0,
            Mood::Normal => 1,
            Mood::Moody => 2,
            Mood::Sad => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Normal => "Normal",
            Mood::Moody => "Moody",
            Mood::Sad => "Sad",
        }
    }
}

impl Cramps {
    pub const ALL: [Cramps; 3] = [Cramps::None, Cramps::Mild, Cramps::Severe];

    pub fn code(self) -> u8 {
        match self {
            Cramps::None => 0,
            Cramps::Mild => 1,
            Cramps::Severe => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Cramps::None => "None",
            Cramps::Mild => "Mild",
            Cramps::Severe => "Severe",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Cramps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Mood::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| InputError::UnknownMood(s.to_string()))
    }
}

impl FromStr for Cramps {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Cramps::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| InputError::UnknownCramps(s.to_string()))
    }
}

/// One submission of the cycle form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleInput {
    pub last_period_date: NaiveDate,
    pub mean_cycle_length: u32,
    pub luteal_phase: u32,
    pub period_length: u32,
    pub peak_days: u32,
    pub menses_score: u32,
    pub age: u32,
    pub bmi: f64,
    pub mood: Mood,
    pub cramps: Cramps,
}

impl CycleInput {
    /// Input prefilled with the form's default values.
    pub fn with_defaults(last_period_date: NaiveDate) -> Self {
        Self {
            last_period_date,
            mean_cycle_length: 28,
            luteal_phase: 12,
            period_length: 5,
            peak_days: 2,
            menses_score: 50,
            age: 25,
            bmi: 21.0,
            mood: Mood::Happy,
            cramps: Cramps::None,
        }
    }

    /// Check every numeric field against its bounds.
    pub fn validate(&self) -> Result<(), InputError> {
        check("mean_cycle_length", self.mean_cycle_length, &MEAN_CYCLE_LENGTH_RANGE)?;
        check("luteal_phase", self.luteal_phase, &LUTEAL_PHASE_RANGE)?;
        check("period_length", self.period_length, &PERIOD_LENGTH_RANGE)?;
        check("peak_days", self.peak_days, &PEAK_DAYS_RANGE)?;
        check("menses_score", self.menses_score, &MENSES_SCORE_RANGE)?;
        check("age", self.age, &AGE_RANGE)?;
        // NaN fails `contains`, so it is rejected here too
        check("bmi", self.bmi, &BMI_RANGE)
    }
}

fn check<T>(field: &'static str, value: T, range: &RangeInclusive<T>) -> Result<(), InputError>
where
    T: PartialOrd + fmt::Display,
{
    if range.contains(&value) {
        Ok(())
    } else {
        Err(InputError::OutOfRange {
            field,
            value: value.to_string(),
            min: range.start().to_string(),
            max: range.end().to_string(),
        })
    }
}

pub fn parse_date(s: &str) -> Result<NaiveDate, InputError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| InputError::InvalidDate(s.to_string()))
}
