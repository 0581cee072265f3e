use super::{LEGACY_SCHEMA_VERSION, SCHEMA_VERSION};
use crate::features::{Cramps, Mood};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// One prediction event, as produced by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub prediction_date: NaiveDate,
    pub last_period_date: NaiveDate,
    pub mean_cycle_length: u32,
    pub period_length: u32,
    pub mood: Mood,
    pub cramps: Cramps,
    pub predicted_cycle_length: u32,
    pub next_period_date: NaiveDate,
}

/// A history row exactly as persisted. Cells stay text so rows that fail to
/// parse are carried through a rewrite untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRow {
    #[serde(rename = "Prediction Date", default)]
    pub prediction_date: String,
    #[serde(rename = "Last Period Date", default)]
    pub last_period_date: String,
    #[serde(rename = "Avg Cycle", default)]
    pub avg_cycle: String,
    #[serde(rename = "Period Length", default)]
    pub period_length: String,
    #[serde(rename = "Mood", default)]
    pub mood: String,
    #[serde(rename = "Cramps", default)]
    pub cramps: String,
    #[serde(rename = "Predicted Cycle Length", default)]
    pub predicted_cycle_length: String,
    #[serde(rename = "Next Period Date", default)]
    pub next_period_date: String,
    /// Empty on rows written before the column existed.
    #[serde(rename = "Schema Version", default)]
    pub schema_version: String,
}

/// Columns a history file must carry to be readable at all.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "Prediction Date",
    "Last Period Date",
    "Avg Cycle",
    "Period Length",
    "Mood",
    "Cramps",
    "Predicted Cycle Length",
    "Next Period Date",
];

/// Columns written by this release, in file order.
pub const COLUMNS: [&str; 9] = [
    "Prediction Date",
    "Last Period Date",
    "Avg Cycle",
    "Period Length",
    "Mood",
    "Cramps",
    "Predicted Cycle Length",
    "Next Period Date",
    "Schema Version",
];

impl From<&PredictionRecord> for HistoryRow {
    fn from(r: &PredictionRecord) -> Self {
        Self {
            prediction_date: r.prediction_date.format(DATE_FORMAT).to_string(),
            last_period_date: r.last_period_date.format(DATE_FORMAT).to_string(),
            avg_cycle: r.mean_cycle_length.to_string(),
            period_length: r.period_length.to_string(),
            mood: r.mood.to_string(),
            cramps: r.cramps.to_string(),
            predicted_cycle_length: r.predicted_cycle_length.to_string(),
            next_period_date: r.next_period_date.format(DATE_FORMAT).to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
        }
    }
}

impl HistoryRow {
    /// Schema version the row was written under. `None` if the cell is garbage.
    pub fn version(&self) -> Option<u32> {
        let v = self.schema_version.trim();
        if v.is_empty() {
            Some(LEGACY_SCHEMA_VERSION)
        } else {
            v.parse().ok()
        }
    }

    /// Written under a version this release understands.
    pub fn is_supported(&self) -> bool {
        self.version().is_some_and(|v| v <= SCHEMA_VERSION)
    }

    pub fn prediction_date(&self) -> Option<NaiveDate> {
        parse_date(&self.prediction_date)
    }

    pub fn predicted_cycle_length(&self) -> Option<u32> {
        parse_int(&self.predicted_cycle_length)
    }

    pub fn mood(&self) -> Option<Mood> {
        self.mood.parse().ok()
    }

    pub fn cramps(&self) -> Option<Cramps> {
        self.cramps.parse().ok()
    }

    /// Typed view of the row; `None` if any cell is missing or malformed.
    pub fn record(&self) -> Option<PredictionRecord> {
        if !self.is_supported() {
            return None;
        }
        Some(PredictionRecord {
            prediction_date: self.prediction_date()?,
            last_period_date: parse_date(&self.last_period_date)?,
            mean_cycle_length: parse_int(&self.avg_cycle)?,
            period_length: parse_int(&self.period_length)?,
            mood: self.mood()?,
            cramps: self.cramps()?,
            predicted_cycle_length: self.predicted_cycle_length()?,
            next_period_date: parse_date(&self.next_period_date)?,
        })
    }
}

/// Dates are written as `YYYY-MM-DD`; older files may carry a time part.
pub(crate) fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}

/// Whole numbers, also accepting a zero fractional part ("28.0").
pub(crate) fn parse_int(s: &str) -> Option<u32> {
    let s = s.trim();
    if let Ok(v) = s.parse::<u32>() {
        return Some(v);
    }
    let f: f64 = s.parse().ok()?;
    (f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64).then_some(f as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> PredictionRecord {
        PredictionRecord {
            prediction_date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            last_period_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            mean_cycle_length: 28,
            period_length: 5,
            mood: Mood::Moody,
            cramps: Cramps::Mild,
            predicted_cycle_length: 29,
            next_period_date: NaiveDate::from_ymd_opt(2024, 1, 30).unwrap(),
        }
    }

    #[test]
    fn row_carries_current_schema_version() {
        let row = HistoryRow::from(&record());
        assert_eq!(row.version(), Some(SCHEMA_VERSION));
        assert_eq!(row.mood, "Moody");
        assert_eq!(row.prediction_date, "2024-01-03");
        assert_eq!(row.record(), Some(record()));
    }

    #[test]
    fn legacy_row_without_version_parses() {
        let mut row = HistoryRow::from(&record());
        row.schema_version.clear();
        row.predicted_cycle_length = "29.0".into();
        row.prediction_date = "2024-01-03 10:15:00".into();
        assert_eq!(row.version(), Some(LEGACY_SCHEMA_VERSION));
        assert_eq!(row.record(), Some(record()));
    }

    #[test]
    fn malformed_cells_yield_no_record() {
        let mut row = HistoryRow::from(&record());
        row.next_period_date = "soon".into();
        assert!(row.record().is_none());

        let mut row = HistoryRow::from(&record());
        row.predicted_cycle_length = "28.5".into();
        assert!(row.record().is_none());
        assert_eq!(row.prediction_date(), Some(record().prediction_date));
    }

    #[test]
    fn newer_or_garbage_version_yields_no_record() {
        let mut row = HistoryRow::from(&record());
        row.schema_version = "22".into();
        assert_eq!(row.version(), Some(22));
        assert!(!row.is_supported());
        assert!(row.record().is_none());

        row.schema_version = "x".into();
        assert!(row.record().is_none());
    }
}
