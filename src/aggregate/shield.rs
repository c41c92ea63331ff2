use crate::domain::{MeasureKind, Thresholds, day_start};
use crate::histogram::{HistogramEvolution, ShieldCounts};
use crate::series::{SeriesId, SeriesPoint};

use super::{ReduceStats, RefreshContext, count_value, ratio};

/// Emits shield rate and volume points for every day above the volume floor
/// and after `min_date`.
pub fn reduce_shield(
    evolution: &HistogramEvolution,
    thresholds: &Thresholds,
    context: &mut RefreshContext,
) -> ReduceStats {
    let mut stats = ReduceStats::default();
    for (date, histogram) in evolution.iter() {
        let day = day_start(date);
        let counts = match ShieldCounts::decode(histogram) {
            Ok(counts) => counts,
            Err(err) => {
                context.record_malformed(MeasureKind::Shield, day, &err);
                stats.skip_malformed();
                continue;
            }
        };

        let volume = counts.volume();
        if volume <= thresholds.min_volume || day <= thresholds.min_date {
            tracing::trace!(
                "Excluding shield sample for {} (volume {})",
                day.date_naive(),
                volume
            );
            stats.exclude();
            continue;
        }

        let timestamp_ms = day.timestamp_millis();
        let not_shown_or_mixed = counts.not_shown_or_mixed();
        let accumulators = &mut context.accumulators;
        for (rate_id, volume_id, count) in [
            (
                SeriesId::ShieldRateNotShownOrMixed,
                SeriesId::ShieldVolumeNotShownOrMixed,
                not_shown_or_mixed,
            ),
            (
                SeriesId::ShieldRateLoaded,
                SeriesId::ShieldVolumeLoaded,
                counts.loaded,
            ),
            (
                SeriesId::ShieldRateBlocked,
                SeriesId::ShieldVolumeBlocked,
                counts.blocked,
            ),
        ] {
            accumulators.push(rate_id, SeriesPoint::new(timestamp_ms, ratio(count, volume)));
            accumulators.push(volume_id, SeriesPoint::new(timestamp_ms, count_value(count)));
        }

        if day < thresholds.end_date {
            context
                .summary
                .shield
                .add(volume, counts.loaded, counts.blocked);
        }
        stats.emit();
    }
    stats
}
