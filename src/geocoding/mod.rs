//! Place name resolution
//!
//! Resolves a free-text place name to coordinates through a geocoding
//! provider. The first result wins; there is no disambiguation.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::Result;
use crate::models::Coordinates;

pub mod opencage;

pub use opencage::OpenCageClient;

/// One match returned by a geocoding provider
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodingResult {
    /// Provider's display name for the match
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<GeocodingResult> for Coordinates {
    fn from(result: GeocodingResult) -> Self {
        Coordinates::new(result.latitude, result.longitude)
    }
}

/// A geocoding provider
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Look up a place; results in provider order, possibly empty
    async fn geocode(&self, query: &str) -> Result<Vec<GeocodingResult>>;
}

/// Service for resolving place names
#[derive(Clone)]
pub struct GeoResolver {
    geocoder: Arc<dyn Geocoder>,
}

impl GeoResolver {
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self { geocoder }
    }

    /// Resolve a place name to coordinates.
    ///
    /// Provider errors and empty result sets both yield `None`.
    #[instrument(skip(self))]
    pub async fn resolve(&self, place_name: &str) -> Option<Coordinates> {
        let results = match self.geocoder.geocode(place_name).await {
            Ok(results) => results,
            Err(e) => {
                warn!("Geocoding failed for '{}': {}", place_name, e);
                return None;
            }
        };

        let Some(first) = results.into_iter().next() else {
            warn!("No geocoding results for '{}'", place_name);
            return None;
        };

        debug!(
            "Resolved '{}' to {} ({:.4}, {:.4})",
            place_name, first.name, first.latitude, first.longitude
        );
        Some(first.into())
    }
}
