//! Unit conversions and fixed-point parameters

/// Fixed-point scale of GPS coordinates (degrees * GPS_MULT)
pub const GPS_MULT: i32 = 10_000_000;

/// Length of one degree of latitude in centimeters (111.3 km)
pub const DEGREE_LENGTH_CM: f64 = 11_130_000.0;

/// Meters per second to knots
pub const MPS_TO_KNOTS: f32 = 1.943_844_5;

/// Knots to kilometers per hour
pub const KNOTS_TO_KPH: f32 = 1.852;

/// Centimeters in a kilometer
pub const CM_PER_KM: f32 = 100_000.0;

/// Default maximum difference between computed and reported speed (10 km/h in knots)
pub const DEFAULT_MAX_SPEED_DIFF_KNOTS: f32 = 10.0 / KNOTS_TO_KPH;

/// Default minimum reported ground speed for accumulation (1 km/h in knots)
pub const DEFAULT_MIN_SPEED_KNOTS: f32 = 1.0 / KNOTS_TO_KPH;

/// Default time between two GPS samples (milliseconds)
pub const DEFAULT_SAMPLE_INTERVAL_MS: u32 = 1000;
