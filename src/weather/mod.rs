//! Forecast retrieval and per-night selection
//!
//! The provider returns a time series (3-hour slots for OpenWeatherMap). For a
//! requested date we keep the first slot that starts inside that date's civil
//! day, i.e. in `[midnight(date), midnight(date + 1))`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Local, NaiveDate, Utc};
use tracing::{debug, instrument, warn};

use crate::Result;
use crate::models::ForecastEntry;

pub mod openweathermap;

pub use openweathermap::OpenWeatherMapClient;

/// A weather forecast provider
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Forecast series for a place name, in the provider's chronological order
    async fn forecast(&self, place_name: &str) -> Result<Vec<ForecastEntry>>;
}

/// Time zone whose civil day defines the selection window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WindowZone {
    /// The host's local time zone
    #[default]
    Local,
    /// A fixed UTC offset
    Fixed(FixedOffset),
}

impl WindowZone {
    /// Calendar date of an instant in this zone
    #[must_use]
    pub fn civil_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        match self {
            WindowZone::Local => instant.with_timezone(&Local).date_naive(),
            WindowZone::Fixed(offset) => instant.with_timezone(offset).date_naive(),
        }
    }
}

/// First entry of the series whose timestamp falls on `date` in `zone`.
///
/// Strict first match in provider order; no preference for any hour.
#[must_use]
pub fn select_entry<'a>(
    entries: &'a [ForecastEntry],
    date: NaiveDate,
    zone: WindowZone,
) -> Option<&'a ForecastEntry> {
    entries
        .iter()
        .find(|entry| zone.civil_date(entry.timestamp) == date)
}

/// Picks the forecast entry for a night
#[derive(Clone)]
pub struct ForecastSelector {
    provider: Arc<dyn ForecastProvider>,
    zone: WindowZone,
}

impl ForecastSelector {
    pub fn new(provider: Arc<dyn ForecastProvider>) -> Self {
        Self {
            provider,
            zone: WindowZone::Local,
        }
    }

    #[must_use]
    pub fn with_zone(mut self, zone: WindowZone) -> Self {
        self.zone = zone;
        self
    }

    /// Forecast entry for `place_name` on `target_date`.
    ///
    /// `None` when the provider fails or the date is outside the forecast
    /// horizon.
    #[instrument(skip(self))]
    pub async fn select(&self, place_name: &str, target_date: NaiveDate) -> Option<ForecastEntry> {
        let entries = match self.provider.forecast(place_name).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Forecast unavailable for '{}': {}", place_name, e);
                return None;
            }
        };

        match select_entry(&entries, target_date, self.zone) {
            Some(entry) => {
                debug!(
                    "Selected forecast slot {} ({}) for {}",
                    entry.timestamp, entry.condition_main, target_date
                );
                Some(entry.clone())
            }
            None => {
                warn!(
                    "No forecast entry on {} among {} slots for '{}'",
                    target_date,
                    entries.len(),
                    place_name
                );
                None
            }
        }
    }
}
