//! GPS Odometer
//!
//! Planar bearing and distance between fixed-point GPS fixes, and the
//! per-sample updater that keeps a travelled-distance odometer and a live
//! bearing/distance-to-home readout for a small GPS instrument.

pub mod core;
pub mod algorithms;
pub mod processing;
pub mod hardware;
pub mod utils;

// Re-export commonly used types
pub use self::core::{FlightState, GeoCoordinate, GpsSample, HomePosition, GPS_MULT};
pub use algorithms::{bearing, distance_2d, distance_3d};
pub use processing::{Odometer, RejectReason, StepOutcome};
pub use hardware::{GpsFeed, GpsReceiver, ReplayReceiver, SampleConsumer, TrackPoint};
pub use utils::{ConfigError, ConfigurationManager, InstrumentConfig, OdometerConfig};
