//! Latest GPS fix with one "new sample" flag per consumer
//!
//! The acquisition side publishes a fix once per cycle. Every consumer of
//! the stream owns its own pending flag and clears only that flag when it
//! takes the sample, so consumers never interfere with each other.

use crate::core::GpsSample;

/// Number of independent consumers of the GPS stream
pub const SAMPLE_CONSUMER_COUNT: usize = 4;

/// Subsystems that each consume every GPS sample once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleConsumer {
    Odometer,
    Altitude,
    Wind,
    Logger,
}

impl SampleConsumer {
    pub const ALL: [SampleConsumer; SAMPLE_CONSUMER_COUNT] = [
        SampleConsumer::Odometer,
        SampleConsumer::Altitude,
        SampleConsumer::Wind,
        SampleConsumer::Logger,
    ];

    fn index(self) -> usize {
        match self {
            SampleConsumer::Odometer => 0,
            SampleConsumer::Altitude => 1,
            SampleConsumer::Wind => 2,
            SampleConsumer::Logger => 3,
        }
    }
}

/// Shared GPS store: the most recent fix plus per-consumer pending flags
#[derive(Debug, Clone, Default)]
pub struct GpsFeed {
    latest: Option<GpsSample>,
    pending: [bool; SAMPLE_CONSUMER_COUNT],
    published: u32,
}

impl GpsFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new fix and mark it pending for every consumer
    pub fn publish(&mut self, sample: GpsSample) {
        self.latest = Some(sample);
        self.pending = [true; SAMPLE_CONSUMER_COUNT];
        self.published = self.published.wrapping_add(1);
    }

    /// Consume the pending sample for one consumer.
    ///
    /// Returns `None` when this consumer has already seen the latest fix.
    pub fn take(&mut self, consumer: SampleConsumer) -> Option<GpsSample> {
        let flag = &mut self.pending[consumer.index()];
        if !*flag {
            return None;
        }

        *flag = false;
        self.latest
    }

    pub fn is_pending(&self, consumer: SampleConsumer) -> bool {
        self.pending[consumer.index()]
    }

    /// Most recent fix, without touching any flag
    pub fn latest(&self) -> Option<&GpsSample> {
        self.latest.as_ref()
    }

    /// Number of fixes published so far (wraps)
    pub fn published_count(&self) -> u32 {
        self.published
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GeoCoordinate;

    fn sample(lat: i32) -> GpsSample {
        GpsSample::new(GeoCoordinate::new(lat, 0), 100.0, 5)
    }

    #[test]
    fn test_empty_feed_has_nothing_pending() {
        let mut feed = GpsFeed::new();
        for consumer in SampleConsumer::ALL {
            assert!(!feed.is_pending(consumer));
            assert!(feed.take(consumer).is_none());
        }
        assert!(feed.latest().is_none());
    }

    #[test]
    fn test_take_clears_only_own_flag() {
        let mut feed = GpsFeed::new();
        feed.publish(sample(1));

        assert_eq!(feed.take(SampleConsumer::Odometer), Some(sample(1)));
        assert!(feed.take(SampleConsumer::Odometer).is_none());

        assert!(feed.is_pending(SampleConsumer::Altitude));
        assert!(feed.is_pending(SampleConsumer::Wind));
        assert!(feed.is_pending(SampleConsumer::Logger));
        assert_eq!(feed.take(SampleConsumer::Logger), Some(sample(1)));
    }

    #[test]
    fn test_publish_rearms_all_consumers() {
        let mut feed = GpsFeed::new();
        feed.publish(sample(1));
        for consumer in SampleConsumer::ALL {
            feed.take(consumer);
        }

        feed.publish(sample(2));
        for consumer in SampleConsumer::ALL {
            assert_eq!(feed.take(consumer), Some(sample(2)));
        }
        assert_eq!(feed.published_count(), 2);
    }

    #[test]
    fn test_unconsumed_sample_is_overwritten() {
        let mut feed = GpsFeed::new();
        feed.publish(sample(1));
        feed.publish(sample(2));

        assert_eq!(feed.take(SampleConsumer::Odometer), Some(sample(2)));
        assert_eq!(feed.latest(), Some(&sample(2)));
    }
}
