//! Core positioning algorithms

pub mod geo;

pub use geo::{bearing, distance_2d, distance_3d};
