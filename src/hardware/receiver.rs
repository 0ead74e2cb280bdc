//! Acquisition seam between the GPS receiver and the sample feed

use crate::core::GpsSample;
use crate::hardware::GpsFeed;

/// Source of decoded GPS fixes
pub trait GpsReceiver {
    /// Next decoded fix, or `None` if the receiver has nothing new (non-blocking)
    fn poll_fix(&mut self) -> Option<GpsSample>;

    /// Poll once and publish the result to the feed.
    ///
    /// Returns true if a new fix was published.
    fn pump(&mut self, feed: &mut GpsFeed) -> bool {
        match self.poll_fix() {
            Some(sample) => {
                feed.publish(sample);
                true
            }
            None => false,
        }
    }
}
