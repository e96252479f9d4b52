//! Night sky report: the aggregate handed to presentation

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Coordinates, ForecastEntry, ObservationPoint};

/// Why a text generation request produced no content
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{reason}")]
pub struct GenerationFailure {
    pub reason: String,
}

impl GenerationFailure {
    pub fn new<S: Into<String>>(reason: S) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Outcome of one content prompt
pub type GeneratedText = Result<String, GenerationFailure>;

/// Descriptive sky content; each field succeeds or fails on its own
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkyContent {
    pub constellations: GeneratedText,
    pub planets: GeneratedText,
    pub events: GeneratedText,
}

impl SkyContent {
    /// Number of fields that came back with text
    #[must_use]
    pub fn generated_count(&self) -> usize {
        [&self.constellations, &self.planets, &self.events]
            .iter()
            .filter(|field| field.is_ok())
            .count()
    }
}

/// Dark period between sunset on the target date and the next sunrise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightWindow {
    pub sunset: DateTime<Utc>,
    pub sunrise: DateTime<Utc>,
}

impl NightWindow {
    #[must_use]
    pub fn duration(&self) -> chrono::Duration {
        self.sunrise - self.sunset
    }
}

/// Stargazing report for one place and date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NightSkyReport {
    /// Place name as entered
    pub place_name: String,
    /// Night the report is for
    pub target_date: NaiveDate,
    /// Resolved coordinates; `None` when geocoding failed
    pub coordinates: Option<Coordinates>,
    /// Forecast entry for the target date; `None` on provider failure or
    /// when the date is outside the forecast horizon
    pub forecast: Option<ForecastEntry>,
    /// Generated sky content; `None` only when the report was cut short
    pub sky_content: Option<SkyContent>,
    /// Present exactly when `coordinates` is present
    pub observation_point: Option<ObservationPoint>,
    /// Sunset-to-sunrise window at the resolved place
    pub night: Option<NightWindow>,
    /// When this report was assembled
    pub generated_at: DateTime<Utc>,
}

impl NightSkyReport {
    /// Whether the place could not be resolved to coordinates
    #[must_use]
    pub fn resolution_failed(&self) -> bool {
        self.coordinates.is_none()
    }

    /// Whether any provider result is missing from the report
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.coordinates.is_none()
            || self.forecast.is_none()
            || self
                .sky_content
                .as_ref()
                .is_none_or(|content| content.generated_count() < 3)
    }
}
