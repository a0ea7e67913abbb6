use clap::{ArgAction, Parser};
use std::path::PathBuf;
use thiserror::Error;

/// Top-level CLI struct.
///
/// The required flags default to empty so that a missing flag goes through
/// the same shape check (and exit code) as a malformed one.
#[derive(Debug, Parser)]
#[command(
    name = "weather",
    version,
    about = "Current weather and 5-day forecasts from OpenWeatherMap",
    after_help = "Examples:\n  weather -w Philadelphia -u f -l en\n  weather -w here -u f -l ru\n  weather -w \"Las Vegas\" -u k -l es -t forecast"
)]
pub struct Cli {
    /// Location to get weather for, or "here" to locate by IP address.
    /// Wrap locations containing spaces in double quotes.
    #[arg(short = 'w', value_name = "LOCATION", default_value = "", hide_default_value = true)]
    pub location: String,

    /// Unit of measure: c (metric), f (imperial) or k (standard).
    #[arg(short = 'u', value_name = "UNIT", default_value = "", hide_default_value = true)]
    pub unit: String,

    /// Two-letter language code for condition descriptions.
    #[arg(short = 'l', value_name = "LANG", default_value = "", hide_default_value = true)]
    pub lang: String,

    /// current | forecast
    #[arg(short = 't', value_name = "MODE", default_value = "current")]
    pub mode: String,

    /// Only accept unit tokens verbatim instead of any input containing one.
    #[arg(long)]
    pub exact_units: bool,

    /// Config file to use instead of the platform default.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Verbosity level (repeat for more).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Current,
    Forecast,
}

impl Mode {
    /// Anything other than "current" asks for the forecast.
    pub fn parse(value: &str) -> Self {
        if value == "current" { Mode::Current } else { Mode::Forecast }
    }
}

/// Validated arguments handed to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub location: String,
    pub unit: String,
    pub lang: String,
    pub mode: Mode,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("-w: location must be longer than one character")]
    Location,
    #[error("-u: unit must be exactly one character")]
    Unit,
    #[error("-l: language must be exactly two characters")]
    Lang,
    #[error("-t: mode must be longer than one character")]
    Mode,
}

impl Cli {
    /// Shape checks only; unit and language values are judged later.
    pub fn request(&self) -> Result<Request, UsageError> {
        let len = |s: &str| s.chars().count();

        if len(&self.location) <= 1 {
            return Err(UsageError::Location);
        }
        if len(&self.unit) != 1 {
            return Err(UsageError::Unit);
        }
        if len(&self.lang) != 2 {
            return Err(UsageError::Lang);
        }
        if len(&self.mode) <= 1 {
            return Err(UsageError::Mode);
        }

        Ok(Request {
            location: self.location.clone(),
            unit: self.unit.clone(),
            lang: self.lang.clone(),
            mode: Mode::parse(&self.mode),
        })
    }
}
