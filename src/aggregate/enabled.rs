use crate::domain::{MeasureKind, Thresholds, day_start};
use crate::histogram::{EnabledCounts, HistogramEvolution};
use crate::series::{SeriesId, SeriesPoint};

use super::{ReduceStats, RefreshContext, ratio};

/// Emits the enabled-session rate for every settled day with at least one
/// session.
pub fn reduce_enabled(
    evolution: &HistogramEvolution,
    thresholds: &Thresholds,
    context: &mut RefreshContext,
) -> ReduceStats {
    let mut stats = ReduceStats::default();
    for (date, histogram) in evolution.iter() {
        let day = day_start(date);
        let counts = match EnabledCounts::decode(histogram) {
            Ok(counts) => counts,
            Err(err) => {
                context.record_malformed(MeasureKind::Enabled, day, &err);
                stats.skip_malformed();
                continue;
            }
        };

        let volume = counts.volume();
        if !thresholds.is_settled(day) || volume == 0 {
            tracing::trace!(
                "Excluding enabled sample for {} (volume {})",
                day.date_naive(),
                volume
            );
            stats.exclude();
            continue;
        }

        context.accumulators.push(
            SeriesId::EnabledRate,
            SeriesPoint::new(day.timestamp_millis(), ratio(counts.enabled, volume)),
        );
        if thresholds.in_window(day) {
            context.summary.enabled.add(volume, counts.enabled);
        }
        stats.emit();
    }
    stats
}
