//! Recorded track playback as a GPS receiver

use crate::core::{GeoCoordinate, GpsSample};
use crate::hardware::{GpsReceiver, ReplayError, ReplayResult};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fs;
use std::path::Path;

/// One recorded fix in real-valued degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub altitude_m: f32,
    #[serde(default)]
    pub ground_speed_knots: u16,
}

impl TrackPoint {
    pub fn to_sample(&self) -> GpsSample {
        GpsSample::new(
            GeoCoordinate::from_degrees(self.latitude, self.longitude),
            self.altitude_m,
            self.ground_speed_knots,
        )
    }
}

/// Receiver that hands out a prerecorded sequence of fixes, one per poll
#[derive(Debug, Clone, Default)]
pub struct ReplayReceiver {
    queue: VecDeque<GpsSample>,
    delivered: usize,
}

impl ReplayReceiver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_samples<I: IntoIterator<Item = GpsSample>>(samples: I) -> Self {
        Self {
            queue: samples.into_iter().collect(),
            delivered: 0,
        }
    }

    /// Build a receiver from track points, rejecting out-of-range coordinates
    pub fn from_points(points: &[TrackPoint]) -> ReplayResult<Self> {
        for (index, point) in points.iter().enumerate() {
            if !(-90.0..=90.0).contains(&point.latitude) {
                return Err(ReplayError::InvalidPoint {
                    index,
                    field: "latitude".to_string(),
                    value: point.latitude,
                });
            }
            if !(-180.0..=180.0).contains(&point.longitude) {
                return Err(ReplayError::InvalidPoint {
                    index,
                    field: "longitude".to_string(),
                    value: point.longitude,
                });
            }
            if !point.altitude_m.is_finite() {
                return Err(ReplayError::InvalidPoint {
                    index,
                    field: "altitude_m".to_string(),
                    value: point.altitude_m as f64,
                });
            }
        }

        Ok(Self::from_samples(points.iter().map(TrackPoint::to_sample)))
    }

    /// Parse a JSON array of track points
    pub fn from_json_str(content: &str) -> ReplayResult<Self> {
        let points: Vec<TrackPoint> = serde_json::from_str(content)
            .map_err(|e| ReplayError::ParseError { details: e.to_string() })?;
        Self::from_points(&points)
    }

    /// Load a JSON track file
    pub fn from_file<P: AsRef<Path>>(path: P) -> ReplayResult<Self> {
        let content = fs::read_to_string(&path).map_err(|e| ReplayError::IoError {
            path: path.as_ref().to_string_lossy().to_string(),
            details: e.to_string(),
        })?;
        Self::from_json_str(&content)
    }

    /// Append a fix given in degrees
    pub fn add_fix(
        &mut self,
        latitude: f64,
        longitude: f64,
        altitude_m: f32,
        ground_speed_knots: u16,
    ) {
        self.queue.push_back(
            TrackPoint {
                latitude,
                longitude,
                altitude_m,
                ground_speed_knots,
            }
            .to_sample(),
        );
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn delivered(&self) -> usize {
        self.delivered
    }
}

impl GpsReceiver for ReplayReceiver {
    fn poll_fix(&mut self) -> Option<GpsSample> {
        let sample = self.queue.pop_front()?;
        self.delivered += 1;
        Some(sample)
    }
}
