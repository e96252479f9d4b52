//! Stargazer - stargazing companion
//!
//! This library aggregates a geocoding provider, a weather forecast provider
//! and a generative text provider into one night sky report for a place and
//! date.

pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod geocoding;
pub mod http;
pub mod logging;
pub mod models;
pub mod render;
pub mod report;
pub mod sky;
pub mod weather;

// Re-export core types for public API
pub use config::StargazerConfig;
pub use content::{ContentGenerator, OpenAiCompletionClient, SkyPrompts, TextProvider};
pub use error::{ProviderKind, StargazerError};
pub use geocoding::{GeoResolver, Geocoder, GeocodingResult, OpenCageClient};
pub use models::{
    Coordinates, ForecastEntry, GeneratedText, GenerationFailure, NightSkyReport, NightWindow,
    ObservationPoint, SkyContent,
};
pub use report::NightSkyReportBuilder;
pub use weather::{ForecastProvider, ForecastSelector, OpenWeatherMapClient, WindowZone};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, StargazerError>;
