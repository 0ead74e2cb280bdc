//! Core types and constants for the GPS odometer

pub mod types;
pub mod constants;

pub use types::*;
pub use constants::*;
