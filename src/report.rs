//! Plain-text rendering of prediction results, history and trend charts.

use crate::forecast::Forecast;
use crate::storage::{HistoryLog, REQUIRED_COLUMNS};
use crate::trends::{CyclePoint, SymptomPoint};
use chrono::NaiveDate;
use std::fmt::Write;

const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const DISPLAY_DATE: &str = "%B %d, %Y";
const MAX_MOOD: u8 = 3;
const MAX_CRAMPS: u8 = 2;

pub const NO_HISTORY: &str = "No prediction history yet.";
pub const NOT_ENOUGH_DATA: &str = "Not enough data to plot yet.";

pub fn success_message(forecast: &Forecast) -> String {
    format!("Predicted Cycle Length: {} days", forecast.cycle_length_days)
}

pub fn next_period_message(forecast: &Forecast) -> String {
    format!(
        "Estimated Next Period Start Date: {}",
        forecast.next_period_date.format(DISPLAY_DATE)
    )
}

pub fn upcoming_table(dates: &[NaiveDate]) -> String {
    let rows: Vec<Vec<String>> = dates
        .iter()
        .enumerate()
        .map(|(i, d)| vec![(i + 1).to_string(), d.format(DISPLAY_DATE).to_string()])
        .collect();
    table(&["Cycle", "Expected Start"], &rows)
}

/// History as stored, newest first. Malformed rows are shown verbatim.
pub fn history_table(log: &HistoryLog) -> String {
    if log.is_empty() {
        return NO_HISTORY.to_string();
    }
    let rows: Vec<Vec<String>> = log
        .rows()
        .iter()
        .rev()
        .map(|r| {
            vec![
                r.prediction_date.clone(),
                r.last_period_date.clone(),
                r.avg_cycle.clone(),
                r.period_length.clone(),
                r.mood.clone(),
                r.cramps.clone(),
                r.predicted_cycle_length.clone(),
                r.next_period_date.clone(),
            ]
        })
        .collect();
    table(&REQUIRED_COLUMNS, &rows)
}

pub fn cycle_trend_chart(points: &[CyclePoint]) -> String {
    if points.is_empty() {
        return NOT_ENOUGH_DATA.to_string();
    }
    let values: Vec<u32> = points.iter().map(|p| p.cycle_length).collect();
    let min = values.iter().copied().min().unwrap_or(0);
    let max = values.iter().copied().max().unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(out, "Cycle length ({min}-{max} days)");
    let _ = writeln!(out, "  {}", sparkline(&values, min, max));
    let rows: Vec<Vec<String>> = points
        .iter()
        .map(|p| vec![p.date.to_string(), p.cycle_length.to_string()])
        .collect();
    out.push_str(&table(&["Date", "Predicted Cycle Length"], &rows));
    out
}

pub fn symptom_trend_chart(points: &[SymptomPoint]) -> String {
    if points.is_empty() {
        return NOT_ENOUGH_DATA.to_string();
    }
    let mood: Vec<u32> = points.iter().map(|p| u32::from(p.mood_score)).collect();
    let cramps: Vec<u32> = points.iter().map(|p| u32::from(p.cramp_score)).collect();

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Mood   (0 Happy - 3 Sad)     {}",
        sparkline(&mood, 0, u32::from(MAX_MOOD))
    );
    let _ = writeln!(
        out,
        "Cramps (0 None - 2 Severe)   {}",
        sparkline(&cramps, 0, u32::from(MAX_CRAMPS))
    );
    let rows: Vec<Vec<String>> = points
        .iter()
        .map(|p| {
            vec![
                p.date.to_string(),
                p.mood_score.to_string(),
                p.cramp_score.to_string(),
            ]
        })
        .collect();
    out.push_str(&table(&["Date", "Mood Score", "Cramp Score"], &rows));
    out
}

/// One block per value, scaled between `min` and `max`.
pub fn sparkline(values: &[u32], min: u32, max: u32) -> String {
    let top = BLOCKS.len() - 1;
    values
        .iter()
        .map(|&v| {
            if max <= min {
                return BLOCKS[top / 2];
            }
            let v = v.clamp(min, max);
            let idx = ((v - min) as usize * top + (max - min) as usize / 2) / (max - min) as usize;
            BLOCKS[idx.min(top)]
        })
        .collect()
}

fn table<S: AsRef<str>>(headers: &[S], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.as_ref().chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<&str> = headers.iter().map(AsRef::as_ref).collect();
    push_row(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    for row in rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(c, w)| format!("{:<w$}", c.as_ref(), w = *w))
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{Cramps, Mood};
    use crate::storage::{HistoryRow, PredictionRecord};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn forecast() -> Forecast {
        Forecast {
            predicted_days: 28.2,
            cycle_length_days: 28,
            next_period_date: d(2024, 1, 29),
            upcoming: vec![d(2024, 1, 29), d(2024, 2, 26)],
            record: PredictionRecord {
                prediction_date: d(2024, 1, 2),
                last_period_date: d(2024, 1, 1),
                mean_cycle_length: 28,
                period_length: 5,
                mood: Mood::Happy,
                cramps: Cramps::None,
                predicted_cycle_length: 28,
                next_period_date: d(2024, 1, 29),
            },
        }
    }

    #[test]
    fn messages_use_long_date_format() {
        let f = forecast();
        assert_eq!(success_message(&f), "Predicted Cycle Length: 28 days");
        assert_eq!(
            next_period_message(&f),
            "Estimated Next Period Start Date: January 29, 2024"
        );
    }

    #[test]
    fn upcoming_table_numbers_cycles() {
        let t = upcoming_table(&forecast().upcoming);
        let lines: Vec<&str> = t.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with("1 "));
        assert!(lines[3].ends_with("February 26, 2024"));
    }

    #[test]
    fn history_is_newest_first() {
        let mut older = HistoryRow::from(&forecast().record);
        older.prediction_date = "2023-12-01".into();
        let newer = HistoryRow::from(&forecast().record);
        let t = history_table(&HistoryLog::from_rows(vec![older, newer]));
        let lines: Vec<&str> = t.lines().collect();
        assert!(lines[0].starts_with("Prediction Date"));
        assert!(lines[2].starts_with("2024-01-02"));
        assert!(lines[3].starts_with("2023-12-01"));
    }

    #[test]
    fn empty_states() {
        assert_eq!(history_table(&HistoryLog::default()), NO_HISTORY);
        assert_eq!(cycle_trend_chart(&[]), NOT_ENOUGH_DATA);
        assert_eq!(symptom_trend_chart(&[]), NOT_ENOUGH_DATA);
    }

    #[test]
    fn sparkline_scales_to_range() {
        assert_eq!(sparkline(&[0, 3], 0, 3), "▁█");
        assert_eq!(sparkline(&[28, 28], 28, 28), "▄▄");
        assert_eq!(sparkline(&[0, 1, 2], 0, 2), "▁▅█");
    }

    #[test]
    fn cycle_chart_lists_points() {
        let pts = [
            CyclePoint { date: d(2024, 1, 1), cycle_length: 26 },
            CyclePoint { date: d(2024, 2, 1), cycle_length: 30 },
        ];
        let chart = cycle_trend_chart(&pts);
        assert!(chart.starts_with("Cycle length (26-30 days)"));
        assert!(chart.contains("▁█"));
        assert!(chart.contains("2024-02-01  30"));
    }
}
