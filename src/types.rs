//! Core types for fitcalc
//!
//! This module defines the records that flow through each stage: the
//! validated biometric input, the derived metrics, and the enums both share.

use serde::Serialize;
use std::fmt;

use crate::error::ValidationError;

/// Input fields collected from the user, in prompt order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Weight,
    Height,
    Age,
    Gender,
    Activity,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Weight => "weight",
            Field::Height => "height",
            Field::Age => "age",
            Field::Gender => "gender",
            Field::Activity => "activity",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gender used for the BMR adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    /// Capitalised form used in the report
    pub fn display_name(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

/// Exercise frequency/intensity bucket, in menu order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
    ExtraActive,
}

impl ActivityLevel {
    /// All levels in menu order (index 0 is menu choice 1)
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtraActive,
    ];

    /// Canonical lowercase label
    pub fn label(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::LightlyActive => "lightly active",
            ActivityLevel::ModeratelyActive => "moderately active",
            ActivityLevel::VeryActive => "very active",
            ActivityLevel::ExtraActive => "extra active",
        }
    }

    /// Title-case label used in the report
    pub fn display_name(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary",
            ActivityLevel::LightlyActive => "Lightly Active",
            ActivityLevel::ModeratelyActive => "Moderately Active",
            ActivityLevel::VeryActive => "Very Active",
            ActivityLevel::ExtraActive => "Extra Active",
        }
    }

    /// Menu line description
    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary (little or no exercise)",
            ActivityLevel::LightlyActive => "Lightly Active (light exercise 1-3 days/week)",
            ActivityLevel::ModeratelyActive => "Moderately Active (3-5 days/week - Gym-goer)",
            ActivityLevel::VeryActive => "Very Active (6-7 days/week - Athlete)",
            ActivityLevel::ExtraActive => "Extra Active (hard exercise + physical job)",
        }
    }

    /// 1-based menu index
    pub fn menu_index(&self) -> usize {
        match self {
            ActivityLevel::Sedentary => 1,
            ActivityLevel::LightlyActive => 2,
            ActivityLevel::ModeratelyActive => 3,
            ActivityLevel::VeryActive => 4,
            ActivityLevel::ExtraActive => 5,
        }
    }

    /// Look up a level by its canonical label, ignoring case.
    ///
    /// Underscores and hyphens are accepted in place of the space so that
    /// `moderately_active` and `Moderately-Active` resolve too.
    pub fn from_label(label: &str) -> Option<ActivityLevel> {
        let normalized = label.trim().to_lowercase().replace(['_', '-'], " ");
        ActivityLevel::ALL
            .into_iter()
            .find(|level| level.label() == normalized)
    }

    /// Look up a level by its 1-based menu index
    pub fn from_menu_index(index: usize) -> Option<ActivityLevel> {
        index
            .checked_sub(1)
            .and_then(|i| ActivityLevel::ALL.get(i).copied())
    }
}

/// Biometric input that has passed validation.
///
/// Fields are private so a value can only exist once every constraint holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValidatedInput {
    weight_kg: f64,
    height_cm: f64,
    age_yrs: u32,
    gender: Gender,
    activity_level: ActivityLevel,
}

impl ValidatedInput {
    /// Build a record from typed values, checking the domain constraints
    pub fn new(
        weight_kg: f64,
        height_cm: f64,
        age_yrs: u32,
        gender: Gender,
        activity_level: ActivityLevel,
    ) -> Result<Self, ValidationError> {
        if !(weight_kg.is_finite() && weight_kg > 0.0) {
            return Err(ValidationError::NotPositive {
                field: Field::Weight,
                raw: weight_kg.to_string(),
            });
        }
        if !(height_cm.is_finite() && height_cm > 0.0) {
            return Err(ValidationError::NotPositive {
                field: Field::Height,
                raw: height_cm.to_string(),
            });
        }
        if age_yrs == 0 {
            return Err(ValidationError::NotPositive {
                field: Field::Age,
                raw: age_yrs.to_string(),
            });
        }

        Ok(Self {
            weight_kg,
            height_cm,
            age_yrs,
            gender,
            activity_level,
        })
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }

    pub fn age_yrs(&self) -> u32 {
        self.age_yrs
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn activity_level(&self) -> ActivityLevel {
        self.activity_level
    }
}

/// BMI category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BmiStatus {
    #[serde(rename = "Underweight")]
    Underweight,
    #[serde(rename = "Healthy Weight")]
    HealthyWeight,
    #[serde(rename = "Overweight")]
    Overweight,
    #[serde(rename = "Obese")]
    Obese,
}

impl BmiStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BmiStatus::Underweight => "Underweight",
            BmiStatus::HealthyWeight => "Healthy Weight",
            BmiStatus::Overweight => "Overweight",
            BmiStatus::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Metrics derived from a [`ValidatedInput`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricsResult {
    /// Body Mass Index, rounded to 2 decimal places
    pub bmi: f64,
    /// BMI category
    pub bmi_status: BmiStatus,
    /// Basal Metabolic Rate (Calories/day at rest)
    pub bmr: i64,
    /// Total Daily Energy Expenditure (Calories/day at current activity)
    pub tdee: i64,
    /// Daily target for weight loss
    pub loss_calories: i64,
    /// Daily target for weight gain
    pub gain_calories: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_from_label() {
        assert_eq!(
            ActivityLevel::from_label("Moderately Active"),
            Some(ActivityLevel::ModeratelyActive)
        );
        assert_eq!(
            ActivityLevel::from_label("extra_active"),
            Some(ActivityLevel::ExtraActive)
        );
        assert_eq!(
            ActivityLevel::from_label(" very-active "),
            Some(ActivityLevel::VeryActive)
        );
        assert_eq!(ActivityLevel::from_label("couch potato"), None);
    }

    #[test]
    fn test_activity_menu_index() {
        for level in ActivityLevel::ALL {
            assert_eq!(ActivityLevel::from_menu_index(level.menu_index()), Some(level));
        }
        assert_eq!(ActivityLevel::from_menu_index(0), None);
        assert_eq!(ActivityLevel::from_menu_index(6), None);
    }

    #[test]
    fn test_validated_input_rejects_out_of_domain() {
        let gender = Gender::Female;
        let level = ActivityLevel::Sedentary;

        assert!(ValidatedInput::new(60.0, 165.0, 30, gender, level).is_ok());
        assert!(ValidatedInput::new(0.0, 165.0, 30, gender, level).is_err());
        assert!(ValidatedInput::new(60.0, -1.0, 30, gender, level).is_err());
        assert!(ValidatedInput::new(f64::NAN, 165.0, 30, gender, level).is_err());
        assert!(ValidatedInput::new(60.0, f64::INFINITY, 30, gender, level).is_err());

        let err = ValidatedInput::new(60.0, 165.0, 0, gender, level).unwrap_err();
        assert_eq!(err.field(), Field::Age);
    }

    #[test]
    fn test_bmi_status_serializes_as_label() {
        let json = serde_json::to_string(&BmiStatus::HealthyWeight).unwrap();
        assert_eq!(json, "\"Healthy Weight\"");
    }
}
