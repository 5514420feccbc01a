//! Job locations handed to the optimiser.

use geo::{Coord, Point};

/// Largest accepted absolute latitude, in degrees.
pub const MAX_LATITUDE: f64 = 90.0;

/// Largest accepted absolute longitude, in degrees.
pub const MAX_LONGITUDE: f64 = 180.0;

/// A place the crew has to visit.
///
/// Coordinates are raw WGS84 degrees. When converted to `geo` types the
/// longitude becomes `x` and the latitude becomes `y`.
///
/// # Examples
/// ```
/// use greenroute_core::Stop;
///
/// let yard = Stop::new(51.5, -0.12);
/// assert_eq!(yard.coord().x, -0.12);
/// assert_eq!(yard.coord().y, 51.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stop {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl Stop {
    /// Construct a stop from latitude and longitude.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// The stop as a `geo` coordinate (`x = longitude`, `y = latitude`).
    #[must_use]
    pub const fn coord(&self) -> Coord<f64> {
        Coord {
            x: self.longitude,
            y: self.latitude,
        }
    }

    /// The stop as a `geo` point.
    #[must_use]
    pub fn point(&self) -> Point<f64> {
        Point::from(self.coord())
    }

    /// Whether both components are finite numbers.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Whether the stop lies on the globe: latitude within ±90 and longitude
    /// within ±180 degrees. Non-finite components are never in range.
    #[must_use]
    pub fn is_in_range(&self) -> bool {
        (-MAX_LATITUDE..=MAX_LATITUDE).contains(&self.latitude)
            && (-MAX_LONGITUDE..=MAX_LONGITUDE).contains(&self.longitude)
    }
}

impl From<Coord<f64>> for Stop {
    fn from(coord: Coord<f64>) -> Self {
        Self::new(coord.y, coord.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn coord_round_trips_through_stop() {
        let coord = Coord { x: 3.5, y: -7.25 };
        let stop = Stop::from(coord);
        assert_eq!(stop.latitude, -7.25);
        assert_eq!(stop.longitude, 3.5);
        assert_eq!(stop.coord(), coord);
    }

    #[rstest]
    #[case(f64::NAN, 0.0)]
    #[case(0.0, f64::INFINITY)]
    #[case(f64::NEG_INFINITY, f64::NAN)]
    fn non_finite_components_are_detected(#[case] latitude: f64, #[case] longitude: f64) {
        assert!(!Stop::new(latitude, longitude).is_finite());
    }

    #[rstest]
    #[case(90.0, 180.0, true)]
    #[case(-90.0, -180.0, true)]
    #[case(90.5, 0.0, false)]
    #[case(0.0, -180.5, false)]
    #[case(1e300, 0.0, false)]
    #[case(f64::NAN, 0.0, false)]
    fn range_check_follows_the_globe(
        #[case] latitude: f64,
        #[case] longitude: f64,
        #[case] expected: bool,
    ) {
        assert_eq!(Stop::new(latitude, longitude).is_in_range(), expected);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn deserialises_from_latitude_longitude_object() {
        let stop: Stop = serde_json::from_str(r#"{"latitude": 40.1, "longitude": -74.2}"#)
            .expect("stop should deserialise");
        assert_eq!(stop, Stop::new(40.1, -74.2));
    }
}
