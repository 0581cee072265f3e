//! History storage benchmark: append (read-modify-write) and full read.

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use cycle_predictor::features::{Cramps, Mood};
use cycle_predictor::storage::{HistoryStore, PredictionRecord};
use tempfile::tempdir;

fn record() -> PredictionRecord {
    let d = |m, day| NaiveDate::from_ymd_opt(2024, m, day).unwrap();
    PredictionRecord {
        prediction_date: d(1, 3),
        last_period_date: d(1, 1),
        mean_cycle_length: 28,
        period_length: 5,
        mood: Mood::Normal,
        cramps: Cramps::Mild,
        predicted_cycle_length: 28,
        next_period_date: d(1, 29),
    }
}

fn bench_append(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let store = HistoryStore::new(dir.path().join("history.csv"));
    let record = record();

    c.bench_function("history_append", |b| {
        b.iter(|| {
            store.clear().unwrap();
            black_box(store.append(&record)).unwrap()
        })
    });
}

fn bench_read_all(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let store = HistoryStore::new(dir.path().join("history.csv"));
    let record = record();
    for _ in 0..200 {
        store.append(&record).unwrap();
    }

    c.bench_function("history_read_all_200", |b| {
        b.iter(|| black_box(store.read_all()).unwrap())
    });
}

criterion_group!(benches, bench_append, bench_read_all);
criterion_main!(benches);
