//! Per-sample processing of the GPS stream

pub mod odometer;

pub use odometer::{speed_knots, Odometer, RejectReason, StepOutcome};
