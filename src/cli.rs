//! Command-line arguments and input validation

use std::path::PathBuf;

use argh::FromArgs;
use chrono::NaiveDate;

use crate::{Result, StargazerError};

/// Stargazing companion: weather, visible sky and observation point for a night.
#[derive(FromArgs, Debug)]
pub struct Args {
    /// place to stargaze from, e.g. "Berlin"
    #[argh(positional)]
    pub place: String,

    /// night to plan for as YYYY-MM-DD (default: today)
    #[argh(option, short = 'd')]
    pub date: Option<String>,

    /// path to a TOML config file
    #[argh(option, short = 'c')]
    pub config: Option<PathBuf>,

    /// print the report as JSON instead of text
    #[argh(switch)]
    pub json: bool,

    /// enable debug logging
    #[argh(switch, short = 'v')]
    pub verbose: bool,
}

/// A validated report request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    pub place_name: String,
    pub target_date: NaiveDate,
}

impl Args {
    /// Validate place and date against `today`
    pub fn to_request(&self, today: NaiveDate) -> Result<ReportRequest> {
        Ok(ReportRequest {
            place_name: validate_place(&self.place)?,
            target_date: parse_date(self.date.as_deref(), today)?,
        })
    }
}

/// Trimmed, non-empty place name
pub fn validate_place(place: &str) -> Result<String> {
    let place = place.trim();
    if place.is_empty() {
        return Err(StargazerError::validation("Location cannot be empty"));
    }
    Ok(place.to_string())
}

/// Parse a `YYYY-MM-DD` date, defaulting to `today`; past dates are rejected
pub fn parse_date(input: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    let Some(input) = input else {
        return Ok(today);
    };

    let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        StargazerError::validation(format!("Date must be in format YYYY-MM-DD, got: {input}"))
    })?;

    if date < today {
        return Err(StargazerError::validation(format!(
            "Date {date} is in the past; pick today or later"
        )));
    }

    Ok(date)
}
