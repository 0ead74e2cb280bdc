//! Core data types shared by the geo-math, the sample feed and the odometer

use crate::core::constants::{CM_PER_KM, GPS_MULT};
use serde::{Deserialize, Serialize};

/// Latitude/longitude pair in fixed-point degrees (scaled by `GPS_MULT`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub latitude: i32,
    pub longitude: i32,
}

impl GeoCoordinate {
    pub const fn new(latitude: i32, longitude: i32) -> Self {
        Self { latitude, longitude }
    }

    /// Build a coordinate from real-valued degrees.
    ///
    /// Values are truncated toward zero to the fixed-point grid.
    pub fn from_degrees(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: (latitude * GPS_MULT as f64) as i32,
            longitude: (longitude * GPS_MULT as f64) as i32,
        }
    }

    pub fn to_degrees(&self) -> (f64, f64) {
        (
            self.latitude as f64 / GPS_MULT as f64,
            self.longitude as f64 / GPS_MULT as f64,
        )
    }
}

/// One fix deposited by the GPS acquisition side
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GpsSample {
    pub coordinate: GeoCoordinate,
    /// Altitude above mean sea level (meters)
    pub altitude_m: f32,
    /// Speed over ground as reported by the receiver (knots)
    pub ground_speed_knots: u16,
}

impl GpsSample {
    pub fn new(coordinate: GeoCoordinate, altitude_m: f32, ground_speed_knots: u16) -> Self {
        Self {
            coordinate,
            altitude_m,
            ground_speed_knots,
        }
    }
}

/// Configured home coordinate; only used while `valid` is set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HomePosition {
    pub coordinate: GeoCoordinate,
    pub valid: bool,
}

impl HomePosition {
    pub fn new(coordinate: GeoCoordinate) -> Self {
        Self {
            coordinate,
            valid: true,
        }
    }

    pub fn unset() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<GeoCoordinate> {
        if self.valid {
            Some(self.coordinate)
        } else {
            None
        }
    }
}

/// Flight-state fields written by the odometer updater
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlightState {
    /// Bearing from the current position to home (degrees, 0-359)
    pub home_bearing: u16,
    /// Planar distance from the current position to home (kilometers)
    pub home_distance_km: f32,
    /// Cumulative travelled distance (centimeters)
    pub odometer_cm: u64,
}

impl FlightState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn odometer_m(&self) -> f64 {
        self.odometer_cm as f64 / 100.0
    }

    pub fn odometer_km(&self) -> f64 {
        self.odometer_cm as f64 / CM_PER_KM as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_from_degrees() {
        let coord = GeoCoordinate::from_degrees(48.25, -11.5);
        assert_eq!(coord.latitude, 482_500_000);
        assert_eq!(coord.longitude, -115_000_000);

        let (lat, lon) = coord.to_degrees();
        assert!((lat - 48.25).abs() < 1e-9);
        assert!((lon + 11.5).abs() < 1e-9);
    }

    #[test]
    fn test_home_position_gating() {
        let home = HomePosition::new(GeoCoordinate::new(1, 2));
        assert_eq!(home.active(), Some(GeoCoordinate::new(1, 2)));

        let mut disabled = home;
        disabled.valid = false;
        assert!(disabled.active().is_none());
        assert!(HomePosition::unset().active().is_none());
    }

    #[test]
    fn test_odometer_units() {
        let state = FlightState {
            odometer_cm: 250_000,
            ..FlightState::default()
        };
        assert!((state.odometer_m() - 2500.0).abs() < 1e-9);
        assert!((state.odometer_km() - 2.5).abs() < 1e-9);
    }
}
