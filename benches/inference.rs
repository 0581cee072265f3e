//! Encoding and inference-path benchmark: form input → feature vector → stub model.

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use cycle_predictor::error::ModelError;
use cycle_predictor::features::{encode, CycleInput, FeatureVector};
use cycle_predictor::model::CycleLengthModel;

/// Linear stand-in so the bench does not need an ONNX runtime.
struct Linear;

impl CycleLengthModel for Linear {
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        Ok(features.values.iter().map(|v| f64::from(*v) * 0.1).sum())
    }
}

fn input() -> CycleInput {
    CycleInput::with_defaults(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
}

fn bench_encode(c: &mut Criterion) {
    let input = input();
    c.bench_function("encode_cycle_input", |b| b.iter(|| encode(black_box(&input))));
}

fn bench_encode_and_predict(c: &mut Criterion) {
    let input = input();
    let model = Linear;
    c.bench_function("encode_and_predict", |b| {
        b.iter(|| {
            let v = encode(black_box(&input)).unwrap();
            black_box(model.predict(&v))
        })
    });
}

criterion_group!(benches, bench_encode, bench_encode_and_predict);
criterion_main!(benches);
