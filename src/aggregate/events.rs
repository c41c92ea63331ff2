use crate::domain::{MeasureKind, Thresholds, day_start};
use crate::histogram::{EventCounts, HistogramEvolution};
use crate::series::{SeriesId, SeriesPoint};

use super::{ReduceStats, RefreshContext, count_value};

/// Emits raw disable / re-enable click counts for every settled day. The
/// no-action category is decoded but never published.
pub fn reduce_events(
    evolution: &HistogramEvolution,
    thresholds: &Thresholds,
    context: &mut RefreshContext,
) -> ReduceStats {
    let mut stats = ReduceStats::default();
    for (date, histogram) in evolution.iter() {
        let day = day_start(date);
        let counts = match EventCounts::decode(histogram) {
            Ok(counts) => counts,
            Err(err) => {
                context.record_malformed(MeasureKind::Events, day, &err);
                stats.skip_malformed();
                continue;
            }
        };

        if !thresholds.is_settled(day) || counts.volume() == 0 {
            tracing::trace!("Excluding events sample for {}", day.date_naive());
            stats.exclude();
            continue;
        }

        let timestamp_ms = day.timestamp_millis();
        context.accumulators.push(
            SeriesId::EventsDisabledClicks,
            SeriesPoint::new(timestamp_ms, count_value(counts.disabled_clicks)),
        );
        context.accumulators.push(
            SeriesId::EventsReenabledClicks,
            SeriesPoint::new(timestamp_ms, count_value(counts.reenabled_clicks)),
        );
        if thresholds.in_window(day) {
            context
                .summary
                .events
                .add(counts.disabled_clicks, counts.reenabled_clicks);
        }
        stats.emit();
    }
    stats
}
