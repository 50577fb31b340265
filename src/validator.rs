//! Input validation
//!
//! Turns raw text into typed, range-checked values. The parse functions are
//! pure; [`Validator::collect`] wraps them in a prompt loop that keeps asking
//! for a field until it parses, so a session either yields a complete
//! [`ValidatedInput`] or is cancelled.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::error::{SessionError, ValidationError};
use crate::types::{ActivityLevel, Field, Gender, ValidatedInput};

/// Banner printed when an interactive session starts
pub const SESSION_BANNER: &str = "--- Fitness Metric Calculator ---";

/// Heading printed above the activity menu
pub const ACTIVITY_MENU_HEADING: &str = "Select your Activity Level:";

/// Line-oriented console the validator prompts through
pub trait Console {
    /// Show `prompt` and read one line of input.
    ///
    /// Returns `Ok(None)` at end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Display one line of text
    fn write_line(&mut self, line: &str) -> io::Result<()>;
}

/// [`Console`] over any buffered reader and writer
pub struct StreamConsole<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> StreamConsole<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> Console for StreamConsole<R, W> {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.writer, "{prompt}")?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.writer, "{line}")
    }
}

/// Prompt shown for a field
pub fn prompt_for(field: Field) -> &'static str {
    match field {
        Field::Weight => "Enter your weight in kilograms (kg): ",
        Field::Height => "Enter your height in centimeters (cm): ",
        Field::Age => "Enter your age in years: ",
        Field::Gender => "Enter your gender (Male/Female): ",
        Field::Activity => "Enter the number corresponding to your activity level: ",
    }
}

/// Message shown after a field was rejected
pub fn retry_message(field: Field) -> &'static str {
    match field {
        Field::Weight => "Invalid input. Please enter a positive number for weight.",
        Field::Height => "Invalid input. Please enter a positive number for height.",
        Field::Age => "Invalid input. Please enter a positive integer for age.",
        Field::Gender => "Invalid input. Please enter 'Male' or 'Female'.",
        Field::Activity => "Invalid choice. Please enter a number from 1 to 5.",
    }
}

/// Parse a body weight in kilograms
pub fn parse_weight(raw: &str) -> Result<f64, ValidationError> {
    parse_positive_real(Field::Weight, raw)
}

/// Parse a height in centimeters
pub fn parse_height(raw: &str) -> Result<f64, ValidationError> {
    parse_positive_real(Field::Height, raw)
}

/// Parse an age in whole years
pub fn parse_age(raw: &str) -> Result<u32, ValidationError> {
    let trimmed = raw.trim();
    let value: i64 = trimmed.parse().map_err(|_| ValidationError::NotAnInteger {
        field: Field::Age,
        raw: raw.to_string(),
    })?;

    if value <= 0 {
        return Err(ValidationError::NotPositive {
            field: Field::Age,
            raw: raw.to_string(),
        });
    }

    u32::try_from(value).map_err(|_| ValidationError::NotAnInteger {
        field: Field::Age,
        raw: raw.to_string(),
    })
}

/// Parse a gender; only `male` and `female` are accepted, in any case
pub fn parse_gender(raw: &str) -> Result<Gender, ValidationError> {
    match raw.trim().to_lowercase().as_str() {
        "male" => Ok(Gender::Male),
        "female" => Ok(Gender::Female),
        _ => Err(ValidationError::UnknownGender(raw.to_string())),
    }
}

/// Parse an activity menu choice (`1`..=`5`)
pub fn parse_activity_choice(raw: &str) -> Result<ActivityLevel, ValidationError> {
    let trimmed = raw.trim();
    ActivityLevel::ALL
        .into_iter()
        .find(|level| level.menu_index().to_string() == trimmed)
        .ok_or_else(|| ValidationError::UnknownActivity(raw.to_string()))
}

/// Parse an activity level given either as a menu choice or as a label
pub fn parse_activity(raw: &str) -> Result<ActivityLevel, ValidationError> {
    parse_activity_choice(raw).or_else(|_| {
        ActivityLevel::from_label(raw).ok_or_else(|| ValidationError::UnknownActivity(raw.to_string()))
    })
}

fn parse_positive_real(field: Field, raw: &str) -> Result<f64, ValidationError> {
    let value: f64 = raw
        .trim()
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .ok_or_else(|| ValidationError::NotANumber {
            field,
            raw: raw.to_string(),
        })?;

    if value <= 0.0 {
        return Err(ValidationError::NotPositive {
            field,
            raw: raw.to_string(),
        });
    }

    Ok(value)
}

/// Raw field values supplied in one go (e.g. from command-line flags)
#[derive(Debug, Clone, Copy)]
pub struct RawInput<'a> {
    pub weight: &'a str,
    pub height: &'a str,
    pub age: &'a str,
    pub gender: &'a str,
    /// Menu choice or label
    pub activity: &'a str,
}

/// Validator for building a [`ValidatedInput`]
pub struct Validator;

impl Validator {
    /// Validate a complete set of raw values; the first invalid field is reported
    pub fn validate(raw: &RawInput<'_>) -> Result<ValidatedInput, ValidationError> {
        let weight = parse_weight(raw.weight)?;
        let height = parse_height(raw.height)?;
        let age = parse_age(raw.age)?;
        let gender = parse_gender(raw.gender)?;
        let activity = parse_activity(raw.activity)?;

        ValidatedInput::new(weight, height, age, gender, activity)
    }

    /// Run an interactive session, re-prompting each field until it is valid
    pub fn collect<C: Console + ?Sized>(console: &mut C) -> Result<ValidatedInput, SessionError> {
        console.write_line(SESSION_BANNER)?;

        let weight = prompt_until_valid(console, Field::Weight, parse_weight)?;
        let height = prompt_until_valid(console, Field::Height, parse_height)?;
        let age = prompt_until_valid(console, Field::Age, parse_age)?;
        let gender = prompt_until_valid(console, Field::Gender, parse_gender)?;

        console.write_line("")?;
        console.write_line(ACTIVITY_MENU_HEADING)?;
        for level in ActivityLevel::ALL {
            console.write_line(&format!("  [{}] {}", level.menu_index(), level.description()))?;
        }
        let activity = prompt_until_valid(console, Field::Activity, parse_activity_choice)?;

        Ok(ValidatedInput::new(weight, height, age, gender, activity)?)
    }
}

fn prompt_until_valid<C, T, F>(console: &mut C, field: Field, parse: F) -> Result<T, SessionError>
where
    C: Console + ?Sized,
    F: Fn(&str) -> Result<T, ValidationError>,
{
    loop {
        let Some(raw) = console.read_line(prompt_for(field))? else {
            debug!(%field, "input ended while prompting");
            return Err(SessionError::Cancelled);
        };

        match parse(&raw) {
            Ok(value) => return Ok(value),
            Err(e) => {
                debug!(%field, error = %e, "rejected input");
                console.write_line(retry_message(field))?;
            }
        }
    }
}
