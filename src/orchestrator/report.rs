use crate::aggregate::SummaryTotals;
use crate::error::SourceError;
use crate::series::SeriesId;

/// A list or fetch branch that did not contribute to the refresh.
#[derive(Debug)]
pub struct BranchFailure {
    pub version: String,
    /// `None` when listing the version's measures failed.
    pub measure: Option<String>,
    pub error: SourceError,
}

impl BranchFailure {
    #[must_use]
    pub const fn is_stalled(&self) -> bool {
        matches!(self.error, SourceError::Stalled { .. })
    }
}

#[derive(Debug, Default)]
pub struct RefreshReport {
    pub channel: String,
    pub generation: u64,
    pub versions: usize,
    pub fetches_dispatched: usize,
    pub fetches_completed: usize,
    pub failures: Vec<BranchFailure>,
    pub malformed_histograms: u64,
    pub stale_completions: usize,
    pub summary: SummaryTotals,
    /// Point count per published series; empty when nothing was published.
    pub series_points: Vec<(SeriesId, usize)>,
    pub sink_error: Option<String>,
}

#[derive(Debug)]
pub enum RefreshOutcome {
    /// The nine series were handed to the sink.
    Published(RefreshReport),
    /// The refresh finished but nothing was published.
    Failed(RefreshReport),
    /// A newer channel selection replaced this refresh before it finished.
    Superseded(RefreshReport),
    /// The channel selection was not accepted.
    Rejected { channel: String, reason: String },
}

impl RefreshOutcome {
    #[must_use]
    pub fn channel(&self) -> &str {
        match self {
            Self::Published(report) | Self::Failed(report) | Self::Superseded(report) => {
                &report.channel
            }
            Self::Rejected { channel, .. } => channel,
        }
    }

    #[must_use]
    pub const fn report(&self) -> Option<&RefreshReport> {
        match self {
            Self::Published(report) | Self::Failed(report) | Self::Superseded(report) => {
                Some(report)
            }
            Self::Rejected { .. } => None,
        }
    }

    /// True for outcomes that end a channel selection.
    #[must_use]
    pub const fn is_final(&self) -> bool {
        !matches!(self, Self::Superseded(_))
    }
}
