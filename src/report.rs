//! Report formatting and encoding
//!
//! [`ReportFormatter`] lays calculated metrics out as an ordered list of
//! text sections; [`ReportEncoder`] wraps the same data in a JSON payload
//! with producer metadata. Neither does any calculation.

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::error::ReportError;
use crate::types::{MetricsResult, ValidatedInput};
use crate::{FITCALC_VERSION, PRODUCER_NAME};

/// Current report payload version
pub const REPORT_VERSION: &str = "1.0.0";

const REPORT_WIDTH: usize = 50;
const REPORT_TITLE: &str = "🏋️  HEALTH & CALORIE REPORT FOR ATHLETES/GYM-GOERS 📈";

/// Section of the rendered report, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Header,
    Subject,
    Bmi,
    Bmr,
    Tdee,
    CalorieGoals,
}

/// One labelled block of report lines
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSection {
    pub kind: SectionKind,
    pub lines: Vec<String>,
}

/// Display-ready report for one run
#[derive(Debug, Clone, PartialEq)]
pub struct HealthReport {
    pub input: ValidatedInput,
    pub metrics: MetricsResult,
    pub sections: Vec<ReportSection>,
}

impl HealthReport {
    /// All lines of every section, in order
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.sections
            .iter()
            .flat_map(|section| section.lines.iter().map(String::as_str))
    }

    /// Render as text, one line per report line
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in self.lines() {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    pub fn section(&self, kind: SectionKind) -> Option<&ReportSection> {
        self.sections.iter().find(|section| section.kind == kind)
    }
}

/// Formatter that turns input and metrics into a [`HealthReport`]
pub struct ReportFormatter;

impl ReportFormatter {
    pub fn format(input: &ValidatedInput, metrics: &MetricsResult) -> HealthReport {
        let heavy_rule = "=".repeat(REPORT_WIDTH);
        let light_rule = "-".repeat(REPORT_WIDTH);

        let sections = vec![
            ReportSection {
                kind: SectionKind::Header,
                lines: vec![
                    String::new(),
                    heavy_rule.clone(),
                    REPORT_TITLE.to_string(),
                    heavy_rule.clone(),
                ],
            },
            ReportSection {
                kind: SectionKind::Subject,
                lines: vec![
                    format!(
                        "Gender: {} | Age: {} years",
                        input.gender().display_name(),
                        input.age_yrs()
                    ),
                    format!(
                        "Weight: {} kg | Height: {} cm",
                        format_real(input.weight_kg()),
                        format_real(input.height_cm())
                    ),
                    format!("Activity Level: {}", input.activity_level().display_name()),
                    light_rule,
                ],
            },
            ReportSection {
                kind: SectionKind::Bmi,
                lines: vec![
                    format!("** Body Mass Index (BMI): {} **", format_real(metrics.bmi)),
                    format!("   Status: {}", metrics.bmi_status),
                ],
            },
            ReportSection {
                kind: SectionKind::Bmr,
                lines: vec![
                    String::new(),
                    format!("** Basal Metabolic Rate (BMR): {} Calories/day **", metrics.bmr),
                    "   (Energy your body needs at rest)".to_string(),
                ],
            },
            ReportSection {
                kind: SectionKind::Tdee,
                lines: vec![
                    String::new(),
                    format!(
                        "** Total Daily Energy Expenditure (TDEE): {} Calories/day **",
                        metrics.tdee
                    ),
                    "   (Maintenance calories to stay at current weight)".to_string(),
                ],
            },
            ReportSection {
                kind: SectionKind::CalorieGoals,
                lines: vec![
                    String::new(),
                    "--- Recommended Daily Calorie Goals ---".to_string(),
                    format!(
                        "🔥 For **Fat Loss** (Approx 0.5 kg/week deficit): {} Calories/day",
                        metrics.loss_calories
                    ),
                    format!(
                        "💪 For **Muscle Gain/Weight Gain** (Approx 0.5 kg/week surplus): {} Calories/day",
                        metrics.gain_calories
                    ),
                    heavy_rule,
                ],
            },
        ];

        HealthReport {
            input: *input,
            metrics: *metrics,
            sections,
        }
    }
}

/// Shortest round-trip form, printed the way Python's `repr` prints floats:
/// whole numbers keep one decimal (`70.0`), and values below 1e-4 or from
/// 1e16 up switch to exponent notation (`1e-05`, `1.5e+20`).
fn format_real(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let scientific = format!("{value:e}");
    if let Some((mantissa, exponent)) = scientific.split_once('e') {
        if let Ok(exponent) = exponent.parse::<i32>() {
            if !(-4..16).contains(&exponent) {
                let sign = if exponent < 0 { '-' } else { '+' };
                return format!("{mantissa}e{sign}{:02}", exponent.abs());
            }
        }
    }

    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Producer metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Structured report payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportPayload {
    pub report_version: String,
    pub producer: ReportProducer,
    pub computed_at_utc: String,
    pub input: ValidatedInput,
    pub metrics: MetricsResult,
}

/// Encoder for JSON report payloads
pub struct ReportEncoder {
    instance_id: String,
}

impl Default for ReportEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    pub fn encode(&self, report: &HealthReport) -> ReportPayload {
        ReportPayload {
            report_version: REPORT_VERSION.to_string(),
            producer: ReportProducer {
                name: PRODUCER_NAME.to_string(),
                version: FITCALC_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            computed_at_utc: Utc::now().to_rfc3339(),
            input: report.input,
            metrics: report.metrics,
        }
    }

    /// Encode to compact JSON
    pub fn encode_to_json(&self, report: &HealthReport) -> Result<String, ReportError> {
        Ok(serde_json::to_string(&self.encode(report))?)
    }

    /// Encode to indented JSON
    pub fn encode_to_json_pretty(&self, report: &HealthReport) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(&self.encode(report))?)
    }
}
