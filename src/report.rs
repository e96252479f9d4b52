//! Night sky report assembly
//!
//! Resolves the place first, then pulls the forecast and the three sky
//! content sections concurrently and merges everything into one
//! [`NightSkyReport`]. Every provider is its own failure domain: a missing
//! forecast never hides generated content and a failed prompt never hides the
//! forecast.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{info, instrument, warn};

use crate::Result;
use crate::config::StargazerConfig;
use crate::content::{ContentGenerator, OpenAiCompletionClient};
use crate::geocoding::{GeoResolver, OpenCageClient};
use crate::models::NightSkyReport;
use crate::sky;
use crate::weather::{ForecastSelector, OpenWeatherMapClient};

/// Builds night sky reports from the three providers
#[derive(Clone)]
pub struct NightSkyReportBuilder {
    geo_resolver: GeoResolver,
    forecast_selector: ForecastSelector,
    content_generator: ContentGenerator,
    require_geocoding: bool,
}

impl NightSkyReportBuilder {
    pub fn new(
        geo_resolver: GeoResolver,
        forecast_selector: ForecastSelector,
        content_generator: ContentGenerator,
    ) -> Self {
        Self {
            geo_resolver,
            forecast_selector,
            content_generator,
            require_geocoding: true,
        }
    }

    /// Wire the production provider clients from configuration
    pub fn from_config(config: &StargazerConfig) -> Result<Self> {
        let geocoder = Arc::new(OpenCageClient::new(&config.geocoding)?);
        let forecast = Arc::new(OpenWeatherMapClient::new(&config.weather)?);
        let text = Arc::new(OpenAiCompletionClient::new(&config.generation)?);

        Ok(Self::new(
            GeoResolver::new(geocoder),
            ForecastSelector::new(forecast),
            ContentGenerator::new(text),
        )
        .require_geocoding(config.report.require_geocoding))
    }

    /// Whether an unresolvable place aborts the rest of the report
    #[must_use]
    pub fn require_geocoding(mut self, require: bool) -> Self {
        self.require_geocoding = require;
        self
    }

    /// Build the report for `place_name` on `target_date`.
    ///
    /// Never fails: every provider failure shows up as an absent or `Err`
    /// field. Dropping the returned future cancels in-flight requests.
    #[instrument(skip(self))]
    pub async fn build(&self, place_name: &str, target_date: NaiveDate) -> NightSkyReport {
        let coordinates = self.geo_resolver.resolve(place_name).await;

        if coordinates.is_none() && self.require_geocoding {
            warn!(
                "Could not resolve '{}', skipping forecast and sky content",
                place_name
            );
            return NightSkyReport {
                place_name: place_name.to_string(),
                target_date,
                coordinates: None,
                forecast: None,
                sky_content: None,
                observation_point: None,
                night: None,
                generated_at: Utc::now(),
            };
        }

        let (forecast, sky_content) = tokio::join!(
            self.forecast_selector.select(place_name, target_date),
            self.content_generator
                .generate_sky_content(place_name, target_date),
        );

        let observation_point = coordinates.as_ref().map(sky::observation_point);
        let night = coordinates
            .as_ref()
            .and_then(|coordinates| sky::night_window(coordinates, target_date));

        info!(
            "Report for '{}' on {}: coordinates={}, forecast={}, sky sections={}/3",
            place_name,
            target_date,
            coordinates.is_some(),
            forecast.is_some(),
            sky_content.generated_count()
        );

        NightSkyReport {
            place_name: place_name.to_string(),
            target_date,
            coordinates,
            forecast,
            sky_content: Some(sky_content),
            observation_point,
            night,
            generated_at: Utc::now(),
        }
    }
}
