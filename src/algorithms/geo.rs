//! Flat-earth bearing and distance between fixed-point GPS coordinates
//!
//! All functions work on coordinates scaled by `GPS_MULT` and approximate the
//! earth locally as a plane:
//! - one degree of latitude is `DEGREE_LENGTH_CM` long everywhere
//! - one degree of longitude is shortened by the cosine of the mean latitude,
//!   truncated toward zero to whole degrees
//!
//! This holds for the short hops between consecutive fixes (a few km at most).
//! Accuracy degrades with distance and close to the poles.

use crate::core::{GeoCoordinate, DEGREE_LENGTH_CM, GPS_MULT};
use nalgebra::{Vector2, Vector3};

/// Bearing from `from` to `to` in whole degrees (0 = north, 90 = east).
///
/// Longitude and latitude deltas are treated as planar axes without a
/// cosine correction. The angle is truncated toward zero before it is
/// folded into 0..=359. Coincident points yield 0.
pub fn bearing(from: GeoCoordinate, to: GeoCoordinate) -> u16 {
    let mult = GPS_MULT as f64;
    let dx = (to.longitude as f64 - from.longitude as f64) / mult;
    let dy = (to.latitude as f64 - from.latitude as f64) / mult;

    let degrees = dx.atan2(dy).to_degrees() as i16;
    ((degrees + 360) % 360) as u16
}

/// Horizontal distance between two coordinates in centimeters.
pub fn distance_2d(a: GeoCoordinate, b: GeoCoordinate) -> u32 {
    let mult = GPS_MULT as f64;

    // Width of a 1 degree cell at the mean latitude, in whole degrees
    let mean_lat = ((a.latitude as i64 + b.latitude as i64) / 2 / GPS_MULT as i64) as f64;
    let mean_lat = mean_lat.to_radians();

    let dlon = (a.longitude as i64 - b.longitude as i64).abs() as f64;
    let dlat = (a.latitude as i64 - b.latitude as i64).abs() as f64;

    let delta = Vector2::new(
        mean_lat.cos() * DEGREE_LENGTH_CM * dlon / mult,
        DEGREE_LENGTH_CM * dlat / mult,
    );

    delta.norm() as u32
}

/// Distance between two positions including altitude, in centimeters.
///
/// The horizontal part is assembled from two single-axis legs measured from
/// `a`: one along the parallel of `a` and one along the meridian of `a`. This
/// is not the same as `distance_2d(a, b)`; the two only agree closely for
/// small deltas.
pub fn distance_3d(a: GeoCoordinate, alt_a_m: f32, b: GeoCoordinate, alt_b_m: f32) -> u32 {
    let dx = distance_2d(a, GeoCoordinate::new(a.latitude, b.longitude));
    let dy = distance_2d(a, GeoCoordinate::new(b.latitude, a.longitude));
    let da = (alt_a_m - alt_b_m).abs() * 100.0;

    Vector3::new(dx as f64, dy as f64, da as f64).norm() as u32
}
