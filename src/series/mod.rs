//! Chart-ready series: point type, the closed set of output series, and
//! normalization before publication.
mod batch;
mod id;
mod normalize;


pub use batch::SeriesBatch;
pub use id::{ChartGroup, SeriesId};
pub use normalize::normalize;

use serde::{Serialize, Serializer};

/// A single (timestamp, value) sample. Values are rates in `[0, 1]` or raw
/// counts depending on the series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub timestamp_ms: i64,
    pub value: f64,
}

impl SeriesPoint {
    #[must_use]
    pub const fn new(timestamp_ms: i64, value: f64) -> Self {
        Self {
            timestamp_ms,
            value,
        }
    }
}

impl Serialize for SeriesPoint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (self.timestamp_ms, self.value).serialize(serializer)
    }
}
