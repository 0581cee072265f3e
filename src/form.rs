//! Interactive cycle form: prompts for every field with the usual defaults and bounds.

use crate::features::{
    parse_date, Cramps, CycleInput, Mood, AGE_RANGE, BMI_RANGE, LUTEAL_PHASE_RANGE,
    MEAN_CYCLE_LENGTH_RANGE, MENSES_SCORE_RANGE, PEAK_DAYS_RANGE, PERIOD_LENGTH_RANGE,
};
use chrono::NaiveDate;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use std::ops::RangeInclusive;

pub struct CycleForm;

impl CycleForm {
    /// Prompt for a full [`CycleInput`], starting from `defaults`.
    pub fn prompt(defaults: &CycleInput) -> dialoguer::Result<CycleInput> {
        let theme = ColorfulTheme::default();
        println!("Enter your recent cycle details and symptoms to predict your next cycle.");

        let last_period_date = Self::date(
            &theme,
            "Last period start date (YYYY-MM-DD)",
            defaults.last_period_date,
        )?;
        let mean_cycle_length = Self::number(
            &theme,
            "Average cycle length (days)",
            defaults.mean_cycle_length,
            MEAN_CYCLE_LENGTH_RANGE,
        )?;
        let luteal_phase = Self::number(
            &theme,
            "Luteal phase length",
            defaults.luteal_phase,
            LUTEAL_PHASE_RANGE,
        )?;
        let period_length = Self::number(
            &theme,
            "Period length (days)",
            defaults.period_length,
            PERIOD_LENGTH_RANGE,
        )?;
        let peak_days =
            Self::number(&theme, "Number of peak days", defaults.peak_days, PEAK_DAYS_RANGE)?;
        let menses_score = Self::number(
            &theme,
            "Menses intensity score",
            defaults.menses_score,
            MENSES_SCORE_RANGE,
        )?;
        let age = Self::number(&theme, "Age", defaults.age, AGE_RANGE)?;
        let bmi = Self::number(&theme, "BMI", defaults.bmi, BMI_RANGE)?;

        let mood_idx = Select::with_theme(&theme)
            .with_prompt("Mood")
            .items(&Mood::ALL)
            .default(Mood::ALL.iter().position(|m| *m == defaults.mood).unwrap_or(0))
            .interact()?;
        let cramps_idx = Select::with_theme(&theme)
            .with_prompt("Cramps level")
            .items(&Cramps::ALL)
            .default(Cramps::ALL.iter().position(|c| *c == defaults.cramps).unwrap_or(0))
            .interact()?;

        Ok(CycleInput {
            last_period_date,
            mean_cycle_length,
            luteal_phase,
            period_length,
            peak_days,
            menses_score,
            age,
            bmi,
            mood: Mood::ALL[mood_idx],
            cramps: Cramps::ALL[cramps_idx],
        })
    }

    fn date(
        theme: &ColorfulTheme,
        prompt: &str,
        default: NaiveDate,
    ) -> dialoguer::Result<NaiveDate> {
        let text: String = Input::with_theme(theme)
            .with_prompt(prompt)
            .default(default.to_string())
            .validate_with(|s: &String| parse_date(s).map(|_| ()).map_err(|e| e.to_string()))
            .interact_text()?;
        // validated above
        Ok(parse_date(&text).unwrap_or(default))
    }

    fn number<T>(
        theme: &ColorfulTheme,
        prompt: &str,
        default: T,
        range: RangeInclusive<T>,
    ) -> dialoguer::Result<T>
    where
        T: Clone + PartialOrd + std::fmt::Display + std::str::FromStr,
        <T as std::str::FromStr>::Err: std::fmt::Display + std::fmt::Debug,
    {
        let prompt = format!("{prompt} [{}-{}]", range.start(), range.end());
        Input::with_theme(theme)
            .with_prompt(prompt)
            .default(default)
            .validate_with(|v: &T| {
                if range.contains(v) {
                    Ok(())
                } else {
                    Err(format!("must be between {} and {}", range.start(), range.end()))
                }
            })
            .interact_text()
    }
}
