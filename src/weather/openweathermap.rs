//! OpenWeatherMap 5 day / 3 hour forecast client and response structures

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use super::ForecastProvider;
use crate::config::WeatherConfig;
use crate::http::{self, redact};
use crate::models::ForecastEntry;
use crate::{ProviderKind, Result, StargazerError};

/// Forecast client for the OpenWeatherMap API
pub struct OpenWeatherMapClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenWeatherMapClient {
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let client = http::build_client(ProviderKind::Weather, config.timeout())?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn forecast_url(&self, place_name: &str) -> String {
        format!(
            "{}/forecast?q={}&appid={}&units=metric",
            self.base_url,
            urlencoding::encode(place_name),
            urlencoding::encode(&self.api_key)
        )
    }
}

#[async_trait]
impl ForecastProvider for OpenWeatherMapClient {
    #[instrument(skip(self), fields(provider = "openweathermap"))]
    async fn forecast(&self, place_name: &str) -> Result<Vec<ForecastEntry>> {
        let url = self.forecast_url(place_name);
        debug!("OpenWeatherMap request URL: {}", redact(&url));

        let response: ForecastResponse =
            http::send_json(ProviderKind::Weather, self.client.get(&url)).await?;

        let entries = response.into_entries();
        info!(
            "Retrieved forecast with {} data points for '{}'",
            entries.len(),
            place_name
        );
        Ok(entries)
    }
}

/// Forecast response; only the fields the selector needs
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<ForecastItem>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastItem {
    /// Slot start, unix seconds
    pub dt: i64,
    pub main: MainReadings,
    pub weather: Vec<Condition>,
    pub clouds: Clouds,
    /// Missing for some slots
    pub visibility: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
}

#[derive(Debug, Deserialize)]
pub struct Condition {
    pub main: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct Clouds {
    pub all: u8,
}

impl ForecastResponse {
    /// Convert the series, keeping provider order. Unusable slots are
    /// skipped so they cannot hide the rest of the series.
    pub fn into_entries(self) -> Vec<ForecastEntry> {
        self.list
            .into_iter()
            .filter_map(|item| match ForecastEntry::try_from(item) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping forecast slot: {}", e);
                    None
                }
            })
            .collect()
    }
}

impl TryFrom<ForecastItem> for ForecastEntry {
    type Error = StargazerError;

    fn try_from(item: ForecastItem) -> Result<Self> {
        let timestamp = DateTime::from_timestamp(item.dt, 0).ok_or_else(|| {
            StargazerError::invalid_response(
                ProviderKind::Weather,
                format!("timestamp out of range: {}", item.dt),
            )
        })?;

        let condition = item.weather.into_iter().next().ok_or_else(|| {
            StargazerError::invalid_response(
                ProviderKind::Weather,
                format!("no weather condition for slot {}", item.dt),
            )
        })?;

        Ok(ForecastEntry {
            condition_main: condition.main,
            condition_description: condition.description,
            temperature_c: item.main.temp,
            feels_like_c: item.main.feels_like,
            cloud_cover_pct: item.clouds.all,
            visibility_m: item.visibility,
            timestamp,
        })
    }
}
