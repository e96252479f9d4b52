//! Plain-text rendering of a [`NightSkyReport`]
//!
//! Presentation policy lives here, not in the pipeline: failed content is
//! shown inline as "An error occurred: ..." and missing data gets an explicit
//! "not available" line.

use std::fmt;

use crate::models::{ForecastEntry, GeneratedText, NightSkyReport};

pub const RESOLUTION_FAILED: &str = "Unable to fetch location data. Please try a different city.";
pub const FORECAST_MISSING: &str = "Weather data not available for the selected date.";

/// Inline rendering of one generated section
#[must_use]
pub fn inline_text(text: &GeneratedText) -> String {
    match text {
        Ok(text) => text.clone(),
        Err(failure) => format!("An error occurred: {failure}"),
    }
}

/// Renders a report as terminal text via `Display`
pub struct ReportView<'a>(pub &'a NightSkyReport);

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;

        if report.resolution_failed() && report.sky_content.is_none() {
            return writeln!(f, "{RESOLUTION_FAILED}");
        }

        let formatted_date = report.target_date.format("%b %d, %Y");
        writeln!(
            f,
            "🌡️ Weather conditions in {} on {}",
            report.place_name, formatted_date
        )?;
        match &report.forecast {
            Some(entry) => write_forecast(f, entry)?,
            None => writeln!(f, "   {FORECAST_MISSING}")?,
        }
        writeln!(f)?;

        match &report.observation_point {
            Some(point) => writeln!(f, "🔭 Observation point: {}", point.format_coordinates())?,
            None => writeln!(f, "🔭 Observation point: not available")?,
        }
        if let Some(night) = &report.night {
            writeln!(
                f,
                "🌙 Dark from {} to {} UTC",
                night.sunset.format("%H:%M"),
                night.sunrise.format("%H:%M")
            )?;
        }

        if let Some(content) = &report.sky_content {
            let sections = [
                ("Constellations", &content.constellations),
                ("Planets", &content.planets),
                ("Upcoming Celestial Events", &content.events),
            ];
            for (title, text) in sections {
                writeln!(f)?;
                writeln!(f, "{title}")?;
                writeln!(f, "{}", inline_text(text))?;
            }
        }

        Ok(())
    }
}

fn write_forecast(f: &mut fmt::Formatter<'_>, entry: &ForecastEntry) -> fmt::Result {
    writeln!(
        f,
        "   {}: {}",
        entry.condition_main,
        entry.format_description()
    )?;
    writeln!(f, "   Temperature: {}", entry.format_temperature())?;
    writeln!(f, "   Feels Like: {}", entry.format_feels_like())?;
    writeln!(f, "   Clouds: {}", entry.format_cloud_cover())?;
    writeln!(f, "   Visibility: {}", entry.format_visibility())
}
