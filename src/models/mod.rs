//! Data models for stargazer
//!
//! This module contains the core domain models organized by concern:
//! - Coordinates: resolved place geometry and the derived observation point
//! - Forecast: the single forecast entry selected for a night
//! - Report: sky content and the aggregated night sky report

pub mod coordinates;
pub mod forecast;
pub mod report;

// Re-export all public types for convenient access
pub use coordinates::{Coordinates, ObservationPoint};
pub use forecast::ForecastEntry;
pub use report::{GeneratedText, GenerationFailure, NightSkyReport, NightWindow, SkyContent};
