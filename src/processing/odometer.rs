//! Per-sample odometer and home readout update
//!
//! Each consumed GPS sample refreshes the bearing and distance to home, then
//! the 3D distance from the previous fix is added to the odometer if it is
//! plausible. A delta counts only when the speed implied by it agrees with the
//! speed reported by the receiver and the receiver reports real movement.
//! Implausible deltas are dropped silently; the previous fix always advances
//! so a single bad sample only spoils its own delta.

use crate::algorithms::geo::{bearing, distance_2d, distance_3d};
use crate::core::{FlightState, GeoCoordinate, GpsSample, HomePosition, CM_PER_KM, MPS_TO_KNOTS};
use crate::hardware::{GpsFeed, SampleConsumer};
use crate::utils::config::OdometerConfig;
use std::time::Duration;
use tracing::{debug, trace};

/// Why a delta was left out of the odometer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Reported ground speed does not exceed the minimum
    TooSlow { ground_speed_knots: u16 },
    /// Speed implied by the delta disagrees with the reported ground speed
    SpeedMismatch { computed_knots: u16, reported_knots: u16 },
}

/// Result of one updater invocation. None of these are failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// No new sample was pending for the odometer
    NoSample,
    /// First fix after start or reset; nothing to measure against yet
    Primed,
    /// Delta added to the odometer
    Accepted { distance_cm: u32 },
    /// Delta dropped by the plausibility filter
    Rejected { distance_cm: u32, reason: RejectReason },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PreviousFix {
    coordinate: GeoCoordinate,
    altitude_m: f32,
}

/// Odometer updater state
#[derive(Debug, Clone)]
pub struct Odometer {
    config: OdometerConfig,
    previous: Option<PreviousFix>,
}

impl Default for Odometer {
    fn default() -> Self {
        Self::new(OdometerConfig::default())
    }
}

impl Odometer {
    pub fn new(config: OdometerConfig) -> Self {
        Self {
            config,
            previous: None,
        }
    }

    pub fn config(&self) -> &OdometerConfig {
        &self.config
    }

    /// Swap the filter parameters; the previous fix is kept
    pub fn set_config(&mut self, config: OdometerConfig) {
        self.config = config;
    }

    pub fn has_previous_fix(&self) -> bool {
        self.previous.is_some()
    }

    /// Forget the previous fix (e.g. after losing the GPS fix).
    ///
    /// The next sample primes the updater again. The accumulated distance in
    /// `FlightState` is not touched.
    pub fn reset_track(&mut self) {
        self.previous = None;
    }

    /// Consume the odometer's pending sample, assuming the configured sampling interval
    pub fn step(
        &mut self,
        feed: &mut GpsFeed,
        home: &HomePosition,
        flight: &mut FlightState,
    ) -> StepOutcome {
        let interval = self.config.sample_interval();
        self.step_with_elapsed(feed, home, flight, interval)
    }

    /// Consume the odometer's pending sample taken `elapsed` after the previous one
    pub fn step_with_elapsed(
        &mut self,
        feed: &mut GpsFeed,
        home: &HomePosition,
        flight: &mut FlightState,
        elapsed: Duration,
    ) -> StepOutcome {
        match feed.take(SampleConsumer::Odometer) {
            Some(sample) => self.process(&sample, home, flight, elapsed),
            None => StepOutcome::NoSample,
        }
    }

    /// Apply one sample directly, bypassing the feed
    pub fn process(
        &mut self,
        sample: &GpsSample,
        home: &HomePosition,
        flight: &mut FlightState,
        elapsed: Duration,
    ) -> StepOutcome {
        if let Some(home) = home.active() {
            flight.home_bearing = bearing(sample.coordinate, home);
            flight.home_distance_km = distance_2d(sample.coordinate, home) as f32 / CM_PER_KM;
        }

        let outcome = match self.previous {
            None => {
                debug!(
                    latitude = sample.coordinate.latitude,
                    longitude = sample.coordinate.longitude,
                    "Odometer primed with first fix"
                );
                StepOutcome::Primed
            }
            Some(previous) => {
                let distance_cm = distance_3d(
                    previous.coordinate,
                    previous.altitude_m,
                    sample.coordinate,
                    sample.altitude_m,
                );
                let computed_knots = speed_knots(distance_cm, elapsed);

                match self.check(computed_knots, sample.ground_speed_knots) {
                    None => {
                        flight.odometer_cm = flight.odometer_cm.saturating_add(distance_cm as u64);
                        trace!(distance_cm, odometer_cm = flight.odometer_cm, "Odometer advanced");
                        StepOutcome::Accepted { distance_cm }
                    }
                    Some(reason) => {
                        debug!(distance_cm, ?reason, "Odometer delta dropped");
                        StepOutcome::Rejected { distance_cm, reason }
                    }
                }
            }
        };

        self.previous = Some(PreviousFix {
            coordinate: sample.coordinate,
            altitude_m: sample.altitude_m,
        });

        outcome
    }

    fn check(&self, computed_knots: u16, reported_knots: u16) -> Option<RejectReason> {
        if reported_knots as f32 <= self.config.min_speed_knots {
            return Some(RejectReason::TooSlow {
                ground_speed_knots: reported_knots,
            });
        }

        let difference = (computed_knots as f32 - reported_knots as f32).abs();
        if difference >= self.config.max_speed_diff_knots {
            return Some(RejectReason::SpeedMismatch {
                computed_knots,
                reported_knots,
            });
        }

        None
    }
}

/// Speed implied by covering `distance_cm` in `elapsed`, truncated to whole knots.
///
/// A zero interval saturates to `u16::MAX` so the delta can never pass the filter.
pub fn speed_knots(distance_cm: u32, elapsed: Duration) -> u16 {
    let seconds = elapsed.as_secs_f64();
    if seconds <= 0.0 {
        return u16::MAX;
    }

    let meters_per_second = distance_cm as f64 / 100.0 / seconds;
    (meters_per_second * MPS_TO_KNOTS as f64) as u16
}
