//! OpenCage geocoding client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use super::{Geocoder, GeocodingResult};
use crate::config::GeocodingConfig;
use crate::http::{self, redact};
use crate::{ProviderKind, Result};

/// Geocoding client for the OpenCage API
pub struct OpenCageClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenCageClient {
    pub fn new(config: &GeocodingConfig) -> Result<Self> {
        let client = http::build_client(ProviderKind::Geocoding, config.timeout())?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}/json?q={}&key={}",
            self.base_url,
            urlencoding::encode(query),
            urlencoding::encode(&self.api_key)
        )
    }
}

#[async_trait]
impl Geocoder for OpenCageClient {
    #[instrument(skip(self), fields(provider = "opencage"))]
    async fn geocode(&self, query: &str) -> Result<Vec<GeocodingResult>> {
        let url = self.search_url(query);
        debug!("OpenCage request URL: {}", redact(&url));

        let response: GeocodeResponse =
            http::send_json(ProviderKind::Geocoding, self.client.get(&url)).await?;

        let results: Vec<GeocodingResult> =
            response.results.into_iter().map(Into::into).collect();
        info!("Found {} geocoding results for '{}'", results.len(), query);

        Ok(results)
    }
}

/// Forward geocoding response
#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    #[serde(default)]
    formatted: String,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    lat: f64,
    lng: f64,
}

impl From<GeocodeResult> for GeocodingResult {
    fn from(result: GeocodeResult) -> Self {
        GeocodingResult {
            name: result.formatted,
            latitude: result.geometry.lat,
            longitude: result.geometry.lng,
        }
    }
}
