//! Bucketed telemetry histograms and their decoding into category counts.
mod counts;
mod decode;
mod evolution;


pub use counts::{EnabledCounts, EventCounts, ShieldCounts};
pub use decode::decode;
pub use evolution::{EvolutionPoint, HistogramEvolution};

use serde::{Deserialize, Serialize};

/// One bucket of an enumerated histogram; `start` is the category index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramBucket {
    pub start: u64,
    pub count: u64,
}

/// A single day's histogram for one (version, measure) pair, as the source
/// provides it. Buckets may arrive in any order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Histogram {
    pub buckets: Vec<HistogramBucket>,
}

impl Histogram {
    /// Builds a histogram whose bucket `i` holds `counts[i]`.
    #[must_use]
    pub fn from_counts(counts: &[u64]) -> Self {
        let buckets = counts
            .iter()
            .zip(0u64..)
            .map(|(count, start)| HistogramBucket {
                start,
                count: *count,
            })
            .collect();
        Self { buckets }
    }
}
