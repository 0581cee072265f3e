//! Time-ordered series over the prediction history, for charting.
//! Recomputed from the full log on every call.

use crate::storage::{HistoryLog, HistoryRow};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CyclePoint {
    pub date: NaiveDate,
    pub cycle_length: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SymptomPoint {
    pub date: NaiveDate,
    pub mood_score: u8,
    pub cramp_score: u8,
}

/// Predicted cycle length by prediction date, ascending. Rows with an
/// unparseable date or length, or an unknown schema version, are dropped.
pub fn cycle_length_series(log: &HistoryLog) -> Vec<CyclePoint> {
    let mut points: Vec<CyclePoint> = log
        .rows()
        .iter()
        .filter(|row| row.is_supported())
        .filter_map(|row: &HistoryRow| {
            Some(CyclePoint {
                date: row.prediction_date()?,
                cycle_length: row.predicted_cycle_length()?,
            })
        })
        .collect();
    // Stable: same-day predictions keep insertion order
    points.sort_by_key(|p| p.date);
    points
}

/// Mood and cramp codes by prediction date, ascending. Rows whose mood or
/// cramps do not map to a known level are dropped.
pub fn mood_cramp_series(log: &HistoryLog) -> Vec<SymptomPoint> {
    let mut points: Vec<SymptomPoint> = log
        .rows()
        .iter()
        .filter(|row| row.is_supported())
        .filter_map(|row: &HistoryRow| {
            Some(SymptomPoint {
                date: row.prediction_date()?,
                mood_score: row.mood()?.code(),
                cramp_score: row.cramps()?.code(),
            })
        })
        .collect();
    points.sort_by_key(|p| p.date);
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, len: &str, mood: &str, cramps: &str) -> HistoryRow {
        HistoryRow {
            prediction_date: date.into(),
            last_period_date: "2024-01-01".into(),
            avg_cycle: "28".into(),
            period_length: "5".into(),
            mood: mood.into(),
            cramps: cramps.into(),
            predicted_cycle_length: len.into(),
            next_period_date: "2024-01-29".into(),
            schema_version: "2".into(),
        }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn cycle_series_sorted_and_filtered() {
        let log = HistoryLog::from_rows(vec![
            row("2024-03-01", "30", "Happy", "None"),
            row("yesterday", "29", "Happy", "None"),
            row("2024-01-15", "28", "Sad", "Mild"),
            row("2024-02-01", "", "Sad", "Mild"),
        ]);
        assert_eq!(
            cycle_length_series(&log),
            vec![
                CyclePoint { date: d(2024, 1, 15), cycle_length: 28 },
                CyclePoint { date: d(2024, 3, 1), cycle_length: 30 },
            ]
        );
    }

    #[test]
    fn same_day_points_keep_insertion_order() {
        let log = HistoryLog::from_rows(vec![
            row("2024-01-15", "31", "Happy", "None"),
            row("2024-01-15", "27", "Happy", "None"),
        ]);
        let lens: Vec<u32> = cycle_length_series(&log).iter().map(|p| p.cycle_length).collect();
        assert_eq!(lens, vec![31, 27]);
    }

    #[test]
    fn symptom_series_uses_encoder_codes() {
        let log = HistoryLog::from_rows(vec![
            row("2024-02-01", "28", "Sad", "Severe"),
            row("2024-01-01", "28", "Normal", "Mild"),
            row("2024-01-20", "28", "Grumpy", "Mild"),
        ]);
        assert_eq!(
            mood_cramp_series(&log),
            vec![
                SymptomPoint { date: d(2024, 1, 1), mood_score: 1, cramp_score: 1 },
                SymptomPoint { date: d(2024, 2, 1), mood_score: 3, cramp_score: 2 },
            ]
        );
    }

    #[test]
    fn rows_from_a_newer_schema_are_dropped() {
        let mut newer = row("2024-01-10", "33", "Sad", "Mild");
        newer.schema_version = "3".into();
        let log = HistoryLog::from_rows(vec![newer, row("2024-01-20", "28", "Happy", "None")]);
        assert_eq!(cycle_length_series(&log).len(), 1);
        assert_eq!(mood_cramp_series(&log)[0].date, d(2024, 1, 20));
    }

    #[test]
    fn empty_log_gives_empty_series() {
        let log = HistoryLog::default();
        assert!(cycle_length_series(&log).is_empty());
        assert!(mood_cramp_series(&log).is_empty());
    }
}
