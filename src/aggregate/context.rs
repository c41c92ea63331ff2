use chrono::{DateTime, Utc};

use crate::domain::MeasureKind;
use crate::error::HistogramError;

use super::{Accumulators, SummaryTotals};

/// Mutable state owned by one refresh generation.
///
/// Reducers borrow it mutably one at a time; it is dropped, never merged,
/// when the next refresh starts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RefreshContext {
    pub accumulators: Accumulators,
    pub summary: SummaryTotals,
    malformed: u64,
}

impl RefreshContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of histograms skipped because they failed to decode.
    #[must_use]
    pub const fn malformed(&self) -> u64 {
        self.malformed
    }

    pub(super) fn record_malformed(
        &mut self,
        kind: MeasureKind,
        day: DateTime<Utc>,
        error: &HistogramError,
    ) {
        self.malformed = self.malformed.saturating_add(1);
        tracing::warn!(
            "Skipping malformed {} histogram for {}: {}",
            kind,
            day.date_naive(),
            error
        );
    }
}

/// What one reducer run did with an evolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReduceStats {
    /// Dates that produced points.
    pub emitted: usize,
    /// Dates excluded by volume, window, or freshness thresholds.
    pub excluded: usize,
    /// Dates whose histogram failed to decode.
    pub malformed: usize,
}

impl ReduceStats {
    pub(super) const fn emit(&mut self) {
        self.emitted = self.emitted.saturating_add(1);
    }

    pub(super) const fn exclude(&mut self) {
        self.excluded = self.excluded.saturating_add(1);
    }

    pub(super) const fn skip_malformed(&mut self) {
        self.malformed = self.malformed.saturating_add(1);
    }
}
