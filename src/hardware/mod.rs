//! GPS acquisition seam
//!
//! The receiver itself lives outside this crate. This module provides the
//! shared sample feed the receiver publishes into, the trait it implements,
//! and a replay receiver for recorded tracks.

pub mod error;
pub mod feed;
pub mod receiver;
pub mod replay;

pub use error::{ReplayError, ReplayResult};
pub use feed::{GpsFeed, SampleConsumer, SAMPLE_CONSUMER_COUNT};
pub use receiver::GpsReceiver;
pub use replay::{ReplayReceiver, TrackPoint};
