//! fitcalc - Health and calorie metrics calculator
//!
//! fitcalc turns a handful of biometric inputs into personal health metrics
//! through a deterministic, single-pass pipeline: input validation → metric
//! calculation → BMI classification → report formatting.
//!
//! ## Metrics
//!
//! - **BMI**: weight-to-height-squared ratio with a category label
//! - **BMR**: resting energy expenditure (Mifflin-St Jeor)
//! - **TDEE**: BMR scaled by an activity factor
//! - **Calorie goals**: TDEE ± 500 Calories/day for weight loss or gain

pub mod calculator;
pub mod classifier;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod types;
pub mod validator;

pub use calculator::MetricCalculator;
pub use error::{ReportError, SessionError, ValidationError};
pub use pipeline::{build_report, interactive_report, report_from_raw};
pub use report::{HealthReport, ReportEncoder, ReportFormatter};
pub use types::{ActivityLevel, BmiStatus, Gender, MetricsResult, ValidatedInput};
pub use validator::{Console, StreamConsole, Validator};

/// fitcalc version embedded in JSON reports
pub const FITCALC_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for JSON reports
pub const PRODUCER_NAME: &str = "fitcalc";
