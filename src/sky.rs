//! Quantities derived from resolved coordinates: observation point and the
//! night's dark window.

use chrono::NaiveDate;
use sunrise::{SolarDay, SolarEvent};
use tracing::debug;

use crate::models::{Coordinates, NightWindow, ObservationPoint};

/// Recommended observation point for a resolved place
#[must_use]
pub fn observation_point(coordinates: &Coordinates) -> ObservationPoint {
    ObservationPoint::from_coordinates(coordinates)
}

/// Sunset on `date` to sunrise on the following day at `coordinates`.
///
/// `None` for invalid coordinates or when the sun does not set or rise
/// (polar day and polar night).
#[must_use]
pub fn night_window(coordinates: &Coordinates, date: NaiveDate) -> Option<NightWindow> {
    let Some(solar_coordinates) =
        sunrise::Coordinates::new(coordinates.latitude, coordinates.longitude)
    else {
        debug!(
            "Invalid coordinates for solar events: {}",
            coordinates.format_coordinates()
        );
        return None;
    };

    let next_day = date.succ_opt()?;
    let sunset = SolarDay::new(solar_coordinates, date).event_time(SolarEvent::Sunset)?;
    let sunrise = SolarDay::new(solar_coordinates, next_day).event_time(SolarEvent::Sunrise)?;

    (sunrise > sunset).then_some(NightWindow { sunset, sunrise })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn test_night_window_berlin_october() {
        let berlin = Coordinates::new(52.52, 13.40);
        let night = night_window(&berlin, date()).unwrap();

        assert_eq!(night.sunset.date_naive(), date());
        assert!(night.sunrise > night.sunset);
        // Mid-October nights in Berlin last roughly 13-14 hours
        let hours = night.duration().num_hours();
        assert!((12..=15).contains(&hours), "unexpected night length {hours}h");
    }

    #[test]
    fn test_invalid_coordinates_have_no_window() {
        let nowhere = Coordinates::new(123.0, 13.40);
        assert!(night_window(&nowhere, date()).is_none());
    }

    #[test]
    fn test_observation_point_is_identity() {
        let coordinates = Coordinates::new(-33.8688, 151.2093);
        assert_eq!(
            observation_point(&coordinates).as_coordinates(),
            coordinates
        );
    }
}
