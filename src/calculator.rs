//! Metric calculation
//!
//! Pure functions deriving BMI, BMR, TDEE and calorie goals from validated
//! input. Nothing here re-validates or fails: the validator guarantees the
//! domain, and the few guards that remain only keep the arithmetic total.
//!
//! Rounding to whole Calories uses [`f64::round`], which rounds exact halves
//! away from zero (1642.5 becomes 1643).
//!
//! # References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
//!   *American Journal of Clinical Nutrition*, 51(2), 241-247.
//! - `McArdle` et al. (2010) - Exercise Physiology (activity factors)

use tracing::debug;

use crate::classifier::classify_bmi;
use crate::types::{ActivityLevel, Gender, MetricsResult, ValidatedInput};

/// Activity factor per level, in menu order
pub const ACTIVITY_FACTORS: [(ActivityLevel, f64); 5] = [
    (ActivityLevel::Sedentary, 1.2),
    (ActivityLevel::LightlyActive, 1.375),
    (ActivityLevel::ModeratelyActive, 1.55),
    (ActivityLevel::VeryActive, 1.725),
    (ActivityLevel::ExtraActive, 1.9),
];

/// Factor applied when a label is not in [`ACTIVITY_FACTORS`]
pub const DEFAULT_ACTIVITY_FACTOR: f64 = 1.2;

/// Daily Calorie deficit/surplus for the weight goals (about 0.5 kg/week)
pub const CALORIE_ADJUSTMENT: i64 = 500;

/// Mifflin-St Jeor gender constants
const MSJ_MALE_CONSTANT: f64 = 5.0;
const MSJ_FEMALE_CONSTANT: f64 = -161.0;

/// Calculate Body Mass Index: weight (kg) / height (m)^2, rounded to 2 decimals.
///
/// Returns 0 for a non-positive height.
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    if height_cm <= 0.0 {
        return 0.0;
    }

    let height_m = height_cm / 100.0;
    round_to_cents(weight_kg / (height_m * height_m))
}

/// Calculate Basal Metabolic Rate using the Mifflin-St Jeor equation
///
/// Formula: BMR = (10 x `weight_kg`) + (6.25 x `height_cm`) - (5 x age) + `gender_constant`
/// - Men: +5
/// - Women: -161
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age_yrs: u32, gender: Gender) -> i64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age_yrs);

    let gender_constant = match gender {
        Gender::Male => MSJ_MALE_CONSTANT,
        Gender::Female => MSJ_FEMALE_CONSTANT,
    };

    (base + gender_constant).round() as i64
}

/// Activity factor for a level
pub fn activity_factor(level: ActivityLevel) -> f64 {
    ACTIVITY_FACTORS
        .iter()
        .find(|(candidate, _)| *candidate == level)
        .map_or(DEFAULT_ACTIVITY_FACTOR, |(_, factor)| *factor)
}

/// Activity factor for a free-form label (case-insensitive).
///
/// Unknown labels get the sedentary factor.
pub fn activity_factor_for_label(label: &str) -> f64 {
    match ActivityLevel::from_label(label) {
        Some(level) => activity_factor(level),
        None => {
            debug!(label, "unknown activity level, using default factor");
            DEFAULT_ACTIVITY_FACTOR
        }
    }
}

/// Calculate Total Daily Energy Expenditure: BMR x activity factor, rounded
pub fn calculate_tdee(bmr: i64, level: ActivityLevel) -> i64 {
    apply_factor(bmr, activity_factor(level))
}

/// [`calculate_tdee`] keyed by a label instead of a typed level
pub fn calculate_tdee_for_label(bmr: i64, label: &str) -> i64 {
    apply_factor(bmr, activity_factor_for_label(label))
}

/// Weight-management Calorie targets derived from TDEE
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalorieGoals {
    pub loss: i64,
    pub gain: i64,
}

/// Loss and gain targets. Not clamped, so a tiny TDEE gives a negative loss target.
///
/// Saturates at the `i64` range for absurdly large inputs.
pub fn calorie_goals(tdee: i64) -> CalorieGoals {
    CalorieGoals {
        loss: tdee.saturating_sub(CALORIE_ADJUSTMENT),
        gain: tdee.saturating_add(CALORIE_ADJUSTMENT),
    }
}

/// Calculator for the full metrics record
pub struct MetricCalculator;

impl MetricCalculator {
    /// Derive every metric from validated input
    pub fn calculate(input: &ValidatedInput) -> MetricsResult {
        let bmi = calculate_bmi(input.weight_kg(), input.height_cm());
        let bmi_status = classify_bmi(bmi);
        let bmr = calculate_bmr(
            input.weight_kg(),
            input.height_cm(),
            input.age_yrs(),
            input.gender(),
        );
        let tdee = calculate_tdee(bmr, input.activity_level());
        let goals = calorie_goals(tdee);

        debug!(bmi, %bmi_status, bmr, tdee, "calculated metrics");

        MetricsResult {
            bmi,
            bmi_status,
            bmr,
            tdee,
            loss_calories: goals.loss,
            gain_calories: goals.gain,
        }
    }
}

fn apply_factor(bmr: i64, factor: f64) -> i64 {
    (bmr as f64 * factor).round() as i64
}

/// Round to 2 decimals from the exact binary value.
///
/// Scaling by 100 first can land on a spurious `.5` (24.895 becomes 2489.5),
/// so the decimal formatter does the rounding instead.
fn round_to_cents(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BmiStatus;

    fn make_test_input(gender: Gender) -> ValidatedInput {
        ValidatedInput::new(70.0, 175.0, 25, gender, ActivityLevel::ModeratelyActive).unwrap()
    }

    #[test]
    fn test_bmi() {
        // 70 / 1.75^2 = 22.857...
        assert!((calculate_bmi(70.0, 175.0) - 22.86).abs() < 1e-9);
        // 50 / 1.6^2 = 19.53125
        assert!((calculate_bmi(50.0, 160.0) - 19.53).abs() < 1e-9);
        // 120 / 1.8^2 = 37.037...
        assert!((calculate_bmi(120.0, 180.0) - 37.04).abs() < 1e-9);
    }

    #[test]
    fn test_bmi_matches_formula() {
        let cases = [
            (45.5, 150.0, 20.22),
            (82.3, 181.5, 24.98),
            (101.0, 199.0, 25.5),
            (3.2, 50.0, 12.8),
        ];
        for (weight, height, expected) in cases {
            assert_eq!(calculate_bmi(weight, height), expected);
        }
    }

    #[test]
    fn test_bmi_rounds_from_exact_value_near_ties() {
        // 24.895 is stored just below the tie, 18.495 just above it
        assert_eq!(calculate_bmi(24.895, 100.0), 24.89);
        assert_eq!(classify_bmi(calculate_bmi(24.895, 100.0)), BmiStatus::HealthyWeight);
        assert_eq!(calculate_bmi(18.495, 100.0), 18.5);
        assert_eq!(calculate_bmi(1.005, 100.0), 1.0);
    }

    #[test]
    fn test_bmi_non_positive_height() {
        assert_eq!(calculate_bmi(70.0, 0.0), 0.0);
        assert_eq!(calculate_bmi(70.0, -175.0), 0.0);
    }

    #[test]
    fn test_bmr_male() {
        // 700 + 1093.75 - 125 = 1668.75, + 5 = 1673.75
        assert_eq!(calculate_bmr(70.0, 175.0, 25, Gender::Male), 1674);
    }

    #[test]
    fn test_bmr_female() {
        // 1668.75 - 161 = 1507.75
        assert_eq!(calculate_bmr(70.0, 175.0, 25, Gender::Female), 1508);
    }

    #[test]
    fn test_bmr_rounds_half_away_from_zero() {
        // 700 + 1062.5 - 125 + 5 = 1642.5
        assert_eq!(calculate_bmr(70.0, 170.0, 25, Gender::Male), 1643);
        // 700 + 1062.5 - 125 - 161 = 1476.5
        assert_eq!(calculate_bmr(70.0, 170.0, 25, Gender::Female), 1477);
    }

    #[test]
    fn test_activity_factor_table() {
        assert_eq!(activity_factor(ActivityLevel::Sedentary), 1.2);
        assert_eq!(activity_factor(ActivityLevel::LightlyActive), 1.375);
        assert_eq!(activity_factor(ActivityLevel::ModeratelyActive), 1.55);
        assert_eq!(activity_factor(ActivityLevel::VeryActive), 1.725);
        assert_eq!(activity_factor(ActivityLevel::ExtraActive), 1.9);
    }

    #[test]
    fn test_activity_factor_label_is_case_insensitive() {
        assert_eq!(activity_factor_for_label("MODERATELY ACTIVE"), 1.55);
        assert_eq!(activity_factor_for_label("Very Active"), 1.725);
    }

    #[test]
    fn test_unknown_activity_label_falls_back_to_sedentary() {
        assert_eq!(activity_factor_for_label("marathoner"), DEFAULT_ACTIVITY_FACTOR);
        assert_eq!(activity_factor_for_label(""), 1.2);
        assert_eq!(calculate_tdee_for_label(1674, "unknown"), 2009);
    }

    #[test]
    fn test_tdee() {
        // 1674 * 1.55 = 2594.7
        assert_eq!(calculate_tdee(1674, ActivityLevel::ModeratelyActive), 2595);
        // 1674 * 1.2 = 2008.8
        assert_eq!(calculate_tdee(1674, ActivityLevel::Sedentary), 2009);
        assert_eq!(calculate_tdee_for_label(1674, "moderately active"), 2595);
    }

    #[test]
    fn test_calorie_goals() {
        assert_eq!(calorie_goals(2595), CalorieGoals { loss: 2095, gain: 3095 });
    }

    #[test]
    fn test_calorie_goals_not_clamped() {
        assert_eq!(calorie_goals(300), CalorieGoals { loss: -200, gain: 800 });
    }

    #[test]
    fn test_calorie_goals_saturate() {
        assert_eq!(calorie_goals(i64::MAX).gain, i64::MAX);
        assert_eq!(calorie_goals(i64::MIN).loss, i64::MIN);
    }

    #[test]
    fn test_calculate_metrics_huge_weight() {
        let input =
            ValidatedInput::new(1e18, 175.0, 25, Gender::Male, ActivityLevel::Sedentary).unwrap();
        let metrics = MetricCalculator::calculate(&input);

        assert_eq!(metrics.bmr, i64::MAX);
        assert_eq!(metrics.tdee, i64::MAX);
        assert_eq!(metrics.gain_calories, i64::MAX);
        assert_eq!(metrics.loss_calories, i64::MAX - CALORIE_ADJUSTMENT);
        assert_eq!(metrics.bmi_status, BmiStatus::Obese);
    }

    #[test]
    fn test_calculate_metrics() {
        let metrics = MetricCalculator::calculate(&make_test_input(Gender::Male));

        assert!((metrics.bmi - 22.86).abs() < 1e-9);
        assert_eq!(metrics.bmi_status, BmiStatus::HealthyWeight);
        assert_eq!(metrics.bmr, 1674);
        assert_eq!(metrics.tdee, 2595);
        assert_eq!(metrics.loss_calories, 2095);
        assert_eq!(metrics.gain_calories, 3095);
    }

    #[test]
    fn test_calculate_metrics_is_idempotent() {
        let input = make_test_input(Gender::Female);
        let first = MetricCalculator::calculate(&input);
        let second = MetricCalculator::calculate(&input);

        assert_eq!(first, second);
    }
}
