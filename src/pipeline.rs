//! Pipeline orchestration
//!
//! This module provides the public API for fitcalc.
//! It runs validated input through calculation, classification and
//! formatting to produce a [`HealthReport`].

use crate::calculator::MetricCalculator;
use crate::error::{SessionError, ValidationError};
use crate::report::{HealthReport, ReportFormatter};
use crate::types::ValidatedInput;
use crate::validator::{Console, RawInput, Validator};

/// Build the report for already-validated input.
///
/// Pipeline stages:
/// 1. MetricCalculator - BMI, BMR, TDEE and calorie goals
/// 2. Classifier - BMI status (applied by the calculator)
/// 3. ReportFormatter - ordered report sections
pub fn build_report(input: &ValidatedInput) -> HealthReport {
    let metrics = MetricCalculator::calculate(input);
    ReportFormatter::format(input, &metrics)
}

/// Validate a full set of raw field values and build the report.
///
/// # Example
/// ```
/// use fitcalc::validator::RawInput;
///
/// let report = fitcalc::report_from_raw(&RawInput {
///     weight: "70",
///     height: "175",
///     age: "25",
///     gender: "male",
///     activity: "3",
/// })
/// .unwrap();
/// assert_eq!(report.metrics.tdee, 2595);
/// ```
pub fn report_from_raw(raw: &RawInput<'_>) -> Result<HealthReport, ValidationError> {
    let input = Validator::validate(raw)?;
    Ok(build_report(&input))
}

/// Prompt for every field on `console`, then build the report
pub fn interactive_report<C: Console + ?Sized>(console: &mut C) -> Result<HealthReport, SessionError> {
    let input = Validator::collect(console)?;
    Ok(build_report(&input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::SectionKind;
    use crate::types::{ActivityLevel, BmiStatus, Field, Gender};
    use crate::validator::StreamConsole;
    use std::io::Cursor;

    fn sample_raw() -> RawInput<'static> {
        RawInput {
            weight: "70",
            height: "175",
            age: "25",
            gender: "Female",
            activity: "very active",
        }
    }

    #[test]
    fn test_build_report() {
        let input =
            ValidatedInput::new(95.0, 180.0, 35, Gender::Male, ActivityLevel::ExtraActive).unwrap();
        let report = build_report(&input);

        // 95 / 1.8^2 = 29.32
        assert!((report.metrics.bmi - 29.32).abs() < 1e-9);
        assert_eq!(report.metrics.bmi_status, BmiStatus::Overweight);
        // 950 + 1125 - 175 + 5 = 1905
        assert_eq!(report.metrics.bmr, 1905);
        // 1905 * 1.9 = 3619.5
        assert_eq!(report.metrics.tdee, 3620);
        assert_eq!(report.sections.len(), 6);
    }

    #[test]
    fn test_report_from_raw() {
        let report = report_from_raw(&sample_raw()).unwrap();

        assert_eq!(report.metrics.bmr, 1508);
        // 1508 * 1.725 = 2601.3
        assert_eq!(report.metrics.tdee, 2601);
        assert_eq!(report.metrics.loss_calories, 2101);
        assert_eq!(report.metrics.gain_calories, 3101);
    }

    #[test]
    fn test_report_from_raw_rejects_invalid_field() {
        let raw = RawInput {
            height: "-175",
            ..sample_raw()
        };
        let err = report_from_raw(&raw).unwrap_err();
        assert_eq!(err.field(), Field::Height);
    }

    #[test]
    fn test_interactive_report() {
        let mut console = StreamConsole::new(Cursor::new(b"70\n175\n25\nmale\n3\n".to_vec()), Vec::new());
        let report = interactive_report(&mut console).unwrap();

        let goals = report.section(SectionKind::CalorieGoals).unwrap();
        assert!(goals.lines[2].ends_with("2095 Calories/day"));
        assert!(goals.lines[3].ends_with("3095 Calories/day"));
    }

    #[test]
    fn test_interactive_report_cancelled() {
        let mut console = StreamConsole::new(Cursor::new(Vec::new()), Vec::new());
        assert!(matches!(
            interactive_report(&mut console),
            Err(SessionError::Cancelled)
        ));
    }
}
