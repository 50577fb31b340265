//! fitcalc CLI - Command-line interface for the fitcalc calculator
//!
//! Commands:
//! - interactive: Prompt for each value and print the report (default)
//! - report: Compute the report from command-line values
//! - reference: Print the activity-factor and BMI band tables

use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use fitcalc::calculator::ACTIVITY_FACTORS;
use fitcalc::classifier::{BMI_BANDS, FALLBACK_STATUS};
use fitcalc::validator::RawInput;
use fitcalc::{
    interactive_report, report_from_raw, HealthReport, ReportEncoder, SessionError,
    StreamConsole, FITCALC_VERSION,
};

/// Environment variable holding the default log filter
const LOG_ENV_VAR: &str = "FITCALC_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";
const INTERRUPTED_MESSAGE: &str = "Program interrupted. Exiting.";
const EXIT_SUCCESS: u8 = 0;
const EXIT_FAILURE: u8 = 1;

/// fitcalc - Health and calorie metrics calculator
#[derive(Parser)]
#[command(name = "fitcalc")]
#[command(author = "Synheart AI Inc")]
#[command(version = FITCALC_VERSION)]
#[command(about = "Calculate BMI, BMR, TDEE and daily calorie goals", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log filter (e.g. "debug"); defaults to $FITCALC_LOG, then "warn"
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Prompt for each value and print the report (default)
    Interactive {
        /// Output format
        #[arg(long, default_value = "text")]
        output_format: OutputFormat,
    },

    /// Compute the report from command-line values
    Report {
        /// Weight in kilograms
        #[arg(long, allow_hyphen_values = true)]
        weight: String,

        /// Height in centimeters
        #[arg(long, allow_hyphen_values = true)]
        height: String,

        /// Age in whole years
        #[arg(long, allow_hyphen_values = true)]
        age: String,

        /// Gender (male or female)
        #[arg(long)]
        gender: String,

        /// Activity level: menu number 1-5 or a label such as "very active"
        #[arg(long)]
        activity: String,

        /// Output format
        #[arg(long, default_value = "text")]
        output_format: OutputFormat,
    },

    /// Print the activity-factor and BMI band tables
    Reference {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable report
    Text,
    /// Compact JSON payload
    Json,
    /// Pretty-printed JSON payload
    JsonPretty,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let result = run(cli);
    let status = exit_status(&result);

    match result {
        Ok(RunStatus::Completed) => {}
        Ok(RunStatus::Cancelled) => println!("\n{INTERRUPTED_MESSAGE}"),
        Err(e) => eprintln!("{}", error_json(e)),
    }

    ExitCode::from(status)
}

/// How a command finished when it did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunStatus {
    Completed,
    /// The user ended the session before every field was entered
    Cancelled,
}

/// Process exit status: 0 for a completed or cancelled run, 1 for any failure
fn exit_status(result: &Result<RunStatus, FitcalcCliError>) -> u8 {
    match result {
        Ok(_) => EXIT_SUCCESS,
        Err(_) => EXIT_FAILURE,
    }
}

fn error_json(e: FitcalcCliError) -> String {
    serde_json::to_string(&CliError::from(e)).unwrap_or_else(|_| "Unknown error".to_string())
}

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<RunStatus, FitcalcCliError> {
    match cli.command {
        None => cmd_interactive(&OutputFormat::Text),
        Some(Commands::Interactive { output_format }) => cmd_interactive(&output_format),
        Some(Commands::Report {
            weight,
            height,
            age,
            gender,
            activity,
            output_format,
        }) => {
            let raw = RawInput {
                weight: &weight,
                height: &height,
                age: &age,
                gender: &gender,
                activity: &activity,
            };
            cmd_report(&raw, &output_format)
        }
        Some(Commands::Reference { json }) => {
            cmd_reference(json)?;
            Ok(RunStatus::Completed)
        }
    }
}

fn cmd_interactive(output_format: &OutputFormat) -> Result<RunStatus, FitcalcCliError> {
    ctrlc::set_handler(|| {
        println!("\n{INTERRUPTED_MESSAGE}");
        std::process::exit(0);
    })?;

    // Keep stdout clean for JSON output by prompting on stderr
    let prompt_writer: Box<dyn Write> = match output_format {
        OutputFormat::Text => Box::new(io::stdout()),
        OutputFormat::Json | OutputFormat::JsonPretty => Box::new(io::stderr()),
    };

    debug!("starting interactive session");
    let report = {
        let mut console = StreamConsole::new(io::stdin().lock(), prompt_writer);
        match interactive_report(&mut console) {
            Ok(report) => report,
            Err(SessionError::Cancelled) => return Ok(RunStatus::Cancelled),
            Err(SessionError::Io(e)) => return Err(e.into()),
            Err(SessionError::Invalid(e)) => return Err(e.into()),
        }
    };

    write_report(&report, output_format)?;
    Ok(RunStatus::Completed)
}

fn cmd_report(raw: &RawInput<'_>, output_format: &OutputFormat) -> Result<RunStatus, FitcalcCliError> {
    let report = report_from_raw(raw)?;
    write_report(&report, output_format)?;
    Ok(RunStatus::Completed)
}

fn write_report(report: &HealthReport, output_format: &OutputFormat) -> Result<(), FitcalcCliError> {
    let output = match output_format {
        OutputFormat::Text => report.render(),
        OutputFormat::Json => ReportEncoder::new().encode_to_json(report)? + "\n",
        OutputFormat::JsonPretty => ReportEncoder::new().encode_to_json_pretty(report)? + "\n",
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn cmd_reference(json: bool) -> Result<(), FitcalcCliError> {
    if json {
        let factors: Vec<serde_json::Value> = ACTIVITY_FACTORS
            .iter()
            .map(|(level, factor)| {
                serde_json::json!({
                    "menu_index": level.menu_index(),
                    "label": level.label(),
                    "description": level.description(),
                    "factor": factor,
                })
            })
            .collect();

        let reference = serde_json::json!({
            "activity_factors": factors,
            "bmi_bands": BMI_BANDS,
            "bmi_fallback_status": FALLBACK_STATUS,
        });
        println!("{}", serde_json::to_string_pretty(&reference)?);
        return Ok(());
    }

    println!("Activity Factors");
    println!("================");
    for (level, factor) in ACTIVITY_FACTORS.iter() {
        println!("  [{}] {:<18} {}", level.menu_index(), level.label(), factor);
    }

    println!();
    println!("BMI Bands");
    println!("=========");
    for band in BMI_BANDS.iter() {
        let range = match band.lower {
            Some(lower) => format!("{} <= BMI < {}", lower, band.upper),
            None => format!("BMI < {}", band.upper),
        };
        println!("  {:<20} {}", range, band.status);
    }
    println!("  {:<20} {}", "otherwise", FALLBACK_STATUS);

    Ok(())
}

// Error types

#[derive(Debug)]
enum FitcalcCliError {
    Io(io::Error),
    Json(serde_json::Error),
    Validation(fitcalc::ValidationError),
    Report(fitcalc::ReportError),
    Interrupt(ctrlc::Error),
}

impl From<io::Error> for FitcalcCliError {
    fn from(e: io::Error) -> Self {
        FitcalcCliError::Io(e)
    }
}

impl From<serde_json::Error> for FitcalcCliError {
    fn from(e: serde_json::Error) -> Self {
        FitcalcCliError::Json(e)
    }
}

impl From<fitcalc::ValidationError> for FitcalcCliError {
    fn from(e: fitcalc::ValidationError) -> Self {
        FitcalcCliError::Validation(e)
    }
}

impl From<fitcalc::ReportError> for FitcalcCliError {
    fn from(e: fitcalc::ReportError) -> Self {
        FitcalcCliError::Report(e)
    }
}

impl From<ctrlc::Error> for FitcalcCliError {
    fn from(e: ctrlc::Error) -> Self {
        FitcalcCliError::Interrupt(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<FitcalcCliError> for CliError {
    fn from(e: FitcalcCliError) -> Self {
        match e {
            FitcalcCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check that stdin and stdout are available".to_string()),
            },
            FitcalcCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
            FitcalcCliError::Validation(e) => CliError {
                code: "VALIDATION_ERROR".to_string(),
                hint: Some(fitcalc::validator::retry_message(e.field()).to_string()),
                message: e.to_string(),
            },
            FitcalcCliError::Report(e) => CliError {
                code: "ENCODING_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
            FitcalcCliError::Interrupt(e) => CliError {
                code: "SIGNAL_ERROR".to_string(),
                message: format!("Cannot install interrupt handler: {}", e),
                hint: None,
            },
        }
    }
}
