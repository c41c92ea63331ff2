use crate::series::{SeriesBatch, SeriesId, SeriesPoint, normalize};

/// Append-only point buffers, one per published series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Accumulators {
    shield_rate_not_shown_or_mixed: Vec<SeriesPoint>,
    shield_rate_loaded: Vec<SeriesPoint>,
    shield_rate_blocked: Vec<SeriesPoint>,
    shield_volume_not_shown_or_mixed: Vec<SeriesPoint>,
    shield_volume_loaded: Vec<SeriesPoint>,
    shield_volume_blocked: Vec<SeriesPoint>,
    enabled_rate: Vec<SeriesPoint>,
    events_disabled_clicks: Vec<SeriesPoint>,
    events_reenabled_clicks: Vec<SeriesPoint>,
}

impl Accumulators {
    pub fn push(&mut self, id: SeriesId, point: SeriesPoint) {
        self.slot_mut(id).push(point);
    }

    #[must_use]
    pub fn get(&self, id: SeriesId) -> &[SeriesPoint] {
        match id {
            SeriesId::ShieldRateNotShownOrMixed => &self.shield_rate_not_shown_or_mixed,
            SeriesId::ShieldRateLoaded => &self.shield_rate_loaded,
            SeriesId::ShieldRateBlocked => &self.shield_rate_blocked,
            SeriesId::ShieldVolumeNotShownOrMixed => &self.shield_volume_not_shown_or_mixed,
            SeriesId::ShieldVolumeLoaded => &self.shield_volume_loaded,
            SeriesId::ShieldVolumeBlocked => &self.shield_volume_blocked,
            SeriesId::EnabledRate => &self.enabled_rate,
            SeriesId::EventsDisabledClicks => &self.events_disabled_clicks,
            SeriesId::EventsReenabledClicks => &self.events_reenabled_clicks,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        SeriesId::ALL.into_iter().all(|id| self.get(id).is_empty())
    }

    /// Normalizes every accumulator and packages them for a single publish.
    #[must_use]
    pub fn into_batch(mut self, channel: String, generation: u64) -> SeriesBatch {
        let series = SeriesId::ALL
            .into_iter()
            .map(|id| (id, normalize(std::mem::take(self.slot_mut(id)))))
            .collect();
        SeriesBatch::new(channel, generation, series)
    }

    const fn slot_mut(&mut self, id: SeriesId) -> &mut Vec<SeriesPoint> {
        match id {
            SeriesId::ShieldRateNotShownOrMixed => &mut self.shield_rate_not_shown_or_mixed,
            SeriesId::ShieldRateLoaded => &mut self.shield_rate_loaded,
            SeriesId::ShieldRateBlocked => &mut self.shield_rate_blocked,
            SeriesId::ShieldVolumeNotShownOrMixed => &mut self.shield_volume_not_shown_or_mixed,
            SeriesId::ShieldVolumeLoaded => &mut self.shield_volume_loaded,
            SeriesId::ShieldVolumeBlocked => &mut self.shield_volume_blocked,
            SeriesId::EnabledRate => &mut self.enabled_rate,
            SeriesId::EventsDisabledClicks => &mut self.events_disabled_clicks,
            SeriesId::EventsReenabledClicks => &mut self.events_reenabled_clicks,
        }
    }
}
