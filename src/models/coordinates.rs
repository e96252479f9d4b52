//! Coordinates model for resolved places and observation points

use serde::{Deserialize, Serialize};

/// Offset (latitude, longitude) applied to a resolved place to reach the
/// recommended observation point. Zero until dark-sky site lookup exists.
const OBSERVATION_OFFSET: (f64, f64) = (0.0, 0.0);

/// Geographic coordinates of a resolved place
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Format as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Recommended stargazing site for a resolved place
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct ObservationPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl ObservationPoint {
    /// Derive the observation point for a place. Pure: the same coordinates
    /// always yield the same point.
    #[must_use]
    pub fn from_coordinates(coordinates: &Coordinates) -> Self {
        Self {
            latitude: coordinates.latitude + OBSERVATION_OFFSET.0,
            longitude: coordinates.longitude + OBSERVATION_OFFSET.1,
        }
    }

    #[must_use]
    pub fn as_coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    #[must_use]
    pub fn format_coordinates(&self) -> String {
        self.as_coordinates().format_coordinates()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(52.52, 13.40)]
    #[case(0.0, 0.0)]
    #[case(-33.8688, -151.2093)]
    #[case(-90.0, 180.0)]
    fn test_observation_point_matches_coordinates(#[case] lat: f64, #[case] lon: f64) {
        let coordinates = Coordinates::new(lat, lon);
        let point = ObservationPoint::from_coordinates(&coordinates);
        assert_eq!(point.as_coordinates(), coordinates);
    }

    #[test]
    fn test_observation_point_is_deterministic() {
        let coordinates = Coordinates::new(46.8182, 8.2275);
        assert_eq!(
            ObservationPoint::from_coordinates(&coordinates),
            ObservationPoint::from_coordinates(&coordinates)
        );
    }

    #[test]
    fn test_format_coordinates() {
        let coordinates = Coordinates::new(52.520_008, 13.404_954);
        assert_eq!(coordinates.format_coordinates(), "52.5200, 13.4050");
    }
}
