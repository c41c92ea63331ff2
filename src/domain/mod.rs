//! Domain types shared by the fetch, aggregation, and publish stages.
mod channel;
mod measure;
mod thresholds;

pub use channel::ChannelMap;
pub use measure::{MeasureKind, MeasureRegistry};
pub use thresholds::{
    Clock, DEFAULT_FRESHNESS_DAYS, DEFAULT_MIN_VOLUME, FixedClock, SystemClock, ThresholdConfig,
    Thresholds, day_start,
};
