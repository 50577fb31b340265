//! BMI classification
//!
//! Maps a numeric BMI onto a category using a fixed band table. Bands are
//! scanned in order and the first match wins; anything no band claims is
//! classified as obese. That fallback also covers the [24.9, 25.0) gap
//! between the healthy and overweight bands.

use serde::Serialize;

use crate::types::BmiStatus;

/// A half-open BMI range `[lower, upper)` mapped to a status
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BmiBand {
    /// Inclusive lower bound (`None` = unbounded)
    pub lower: Option<f64>,
    /// Exclusive upper bound
    pub upper: f64,
    pub status: BmiStatus,
}

impl BmiBand {
    fn contains(&self, bmi: f64) -> bool {
        let above_lower = self.lower.map_or(true, |lower| bmi >= lower);
        above_lower && bmi < self.upper
    }
}

/// Ordered BMI bands
pub const BMI_BANDS: [BmiBand; 3] = [
    BmiBand {
        lower: None,
        upper: 18.5,
        status: BmiStatus::Underweight,
    },
    BmiBand {
        lower: Some(18.5),
        upper: 24.9,
        status: BmiStatus::HealthyWeight,
    },
    BmiBand {
        lower: Some(25.0),
        upper: 29.9,
        status: BmiStatus::Overweight,
    },
];

/// Status for any BMI outside every band
pub const FALLBACK_STATUS: BmiStatus = BmiStatus::Obese;

/// Classify a BMI value
pub fn classify_bmi(bmi: f64) -> BmiStatus {
    BMI_BANDS
        .iter()
        .find(|band| band.contains(bmi))
        .map_or(FALLBACK_STATUS, |band| band.status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_underweight() {
        assert_eq!(classify_bmi(15.0), BmiStatus::Underweight);
        assert_eq!(classify_bmi(18.49), BmiStatus::Underweight);
    }

    #[test]
    fn test_healthy_weight_bounds() {
        assert_eq!(classify_bmi(18.5), BmiStatus::HealthyWeight);
        assert_eq!(classify_bmi(22.86), BmiStatus::HealthyWeight);
        assert_eq!(classify_bmi(24.89), BmiStatus::HealthyWeight);
    }

    #[test]
    fn test_gap_between_healthy_and_overweight_is_obese() {
        assert_eq!(classify_bmi(24.9), BmiStatus::Obese);
        assert_eq!(classify_bmi(24.95), BmiStatus::Obese);
        assert_eq!(classify_bmi(24.99), BmiStatus::Obese);
    }

    #[test]
    fn test_overweight_bounds() {
        assert_eq!(classify_bmi(25.0), BmiStatus::Overweight);
        assert_eq!(classify_bmi(29.89), BmiStatus::Overweight);
    }

    #[test]
    fn test_obese() {
        assert_eq!(classify_bmi(29.9), BmiStatus::Obese);
        assert_eq!(classify_bmi(42.0), BmiStatus::Obese);
    }

    #[test]
    fn test_zero_and_nan() {
        // Zero is what calculate_bmi yields for a non-positive height
        assert_eq!(classify_bmi(0.0), BmiStatus::Underweight);
        assert_eq!(classify_bmi(f64::NAN), BmiStatus::Obese);
    }
}
