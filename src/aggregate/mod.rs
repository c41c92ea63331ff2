//! Measure-specific reducers that turn histogram evolutions into series
//! points inside a per-refresh context.
mod accumulators;
mod context;
mod enabled;
mod events;
mod shield;
mod summary;

#[cfg(test)]
mod tests;

pub use accumulators::Accumulators;
pub use context::{ReduceStats, RefreshContext};
pub use enabled::reduce_enabled;
pub use events::reduce_events;
pub use shield::reduce_shield;
pub use summary::{EnabledTotals, EventTotals, ShieldTotals, SummaryTotals};

use crate::domain::{MeasureKind, Thresholds};
use crate::histogram::HistogramEvolution;

/// Runs the reducer matching `kind` over one evolution.
pub fn reduce(
    kind: MeasureKind,
    evolution: &HistogramEvolution,
    thresholds: &Thresholds,
    context: &mut RefreshContext,
) -> ReduceStats {
    match kind {
        MeasureKind::Shield => reduce_shield(evolution, thresholds, context),
        MeasureKind::Enabled => reduce_enabled(evolution, thresholds, context),
        MeasureKind::Events => reduce_events(evolution, thresholds, context),
    }
}

const fn ratio(part: u64, whole: u64) -> f64 {
    part as f64 / whole as f64
}

const fn count_value(count: u64) -> f64 {
    count as f64
}
