//! Forecast entry model and display methods

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One point of a weather forecast time series
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastEntry {
    /// Main condition group (e.g. "Clear", "Clouds")
    pub condition_main: String,
    /// Condition detail (e.g. "scattered clouds")
    pub condition_description: String,
    /// Temperature in Celsius
    pub temperature_c: f64,
    /// Perceived temperature in Celsius
    pub feels_like_c: f64,
    /// Cloud cover percentage (0-100)
    pub cloud_cover_pct: u8,
    /// Visibility in meters, when the provider reports it
    pub visibility_m: Option<u32>,
    /// Start of the forecast slot
    pub timestamp: DateTime<Utc>,
}

impl ForecastEntry {
    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.1} °C", self.temperature_c)
    }

    #[must_use]
    pub fn format_feels_like(&self) -> String {
        format!("{:.1} °C", self.feels_like_c)
    }

    #[must_use]
    pub fn format_cloud_cover(&self) -> String {
        format!("{}%", self.cloud_cover_pct)
    }

    #[must_use]
    pub fn format_visibility(&self) -> String {
        match self.visibility_m {
            Some(meters) => format!("{meters} meters"),
            None => "not available".to_string(),
        }
    }

    /// Condition description in title case ("scattered clouds" -> "Scattered Clouds")
    #[must_use]
    pub fn format_description(&self) -> String {
        self.condition_description
            .split_whitespace()
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => {
                        first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                    }
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
