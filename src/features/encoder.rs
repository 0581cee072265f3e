use super::{CycleInput, FeatureVector};
use crate::error::InputError;

/// Encode a validated form submission into the model's feature vector.
///
/// Order: the seven raw numeric fields, the mood and cramps codes, then the two
/// derived features `|mean_cycle_length - period_length|` and `mood + cramps`.
pub fn encode(input: &CycleInput) -> Result<FeatureVector, InputError> {
    input.validate()?;

    let mood = input.mood.code();
    let cramps = input.cramps.code();
    let cycle_variability = input.mean_cycle_length.abs_diff(input.period_length);
    let symptom_score = mood + cramps;

    Ok(FeatureVector::new([
        input.mean_cycle_length as f32,
        input.luteal_phase as f32,
        input.period_length as f32,
        input.peak_days as f32,
        input.menses_score as f32,
        input.age as f32,
        input.bmi as f32,
        f32::from(mood),
        f32::from(cramps),
        cycle_variability as f32,
        f32::from(symptom_score),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{Cramps, Mood, FEATURE_COUNT};
    use chrono::NaiveDate;

    fn input() -> CycleInput {
        CycleInput::with_defaults(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
    }

    #[test]
    fn default_form_encodes_in_model_order() {
        let v = encode(&input()).unwrap();
        assert_eq!(
            v.values,
            [28.0, 12.0, 5.0, 2.0, 50.0, 25.0, 21.0, 0.0, 0.0, 23.0, 0.0]
        );
        assert_eq!(v.as_slice().len(), FEATURE_COUNT);
    }

    #[test]
    fn sad_and_severe_sum_to_symptom_score() {
        let mut i = input();
        i.mood = Mood::Sad;
        i.cramps = Cramps::Severe;
        let v = encode(&i).unwrap();
        assert_eq!(v.get("mood_encoded"), Some(3.0));
        assert_eq!(v.get("cramps_encoded"), Some(2.0));
        assert_eq!(v.get("symptom_score"), Some(5.0));
    }

    #[test]
    fn variability_is_absolute_difference() {
        let mut i = input();
        i.mean_cycle_length = 20;
        i.period_length = 8;
        assert_eq!(encode(&i).unwrap().get("cycle_variability"), Some(12.0));
    }

    #[test]
    fn out_of_range_input_is_rejected() {
        let mut i = input();
        i.age = 61;
        assert!(matches!(encode(&i), Err(InputError::OutOfRange { field: "age", .. })));
    }
}
