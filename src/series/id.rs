use std::fmt;

/// Identifies one of the nine published series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SeriesId {
    ShieldRateNotShownOrMixed,
    ShieldRateLoaded,
    ShieldRateBlocked,
    ShieldVolumeNotShownOrMixed,
    ShieldVolumeLoaded,
    ShieldVolumeBlocked,
    EnabledRate,
    EventsDisabledClicks,
    EventsReenabledClicks,
}

impl SeriesId {
    pub const ALL: [Self; 9] = [
        Self::ShieldRateNotShownOrMixed,
        Self::ShieldRateLoaded,
        Self::ShieldRateBlocked,
        Self::ShieldVolumeNotShownOrMixed,
        Self::ShieldVolumeLoaded,
        Self::ShieldVolumeBlocked,
        Self::EnabledRate,
        Self::EventsDisabledClicks,
        Self::EventsReenabledClicks,
    ];

    /// Stable key used in exports.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::ShieldRateNotShownOrMixed => "shield_rate_not_shown_or_mixed",
            Self::ShieldRateLoaded => "shield_rate_loaded",
            Self::ShieldRateBlocked => "shield_rate_blocked",
            Self::ShieldVolumeNotShownOrMixed => "shield_volume_not_shown_or_mixed",
            Self::ShieldVolumeLoaded => "shield_volume_loaded",
            Self::ShieldVolumeBlocked => "shield_volume_blocked",
            Self::EnabledRate => "enabled_rate",
            Self::EventsDisabledClicks => "events_disabled_clicks",
            Self::EventsReenabledClicks => "events_reenabled_clicks",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ShieldRateNotShownOrMixed | Self::ShieldVolumeNotShownOrMixed => {
                "Not shown / mixed content"
            }
            Self::ShieldRateLoaded | Self::ShieldVolumeLoaded => "Loaded (strike shield)",
            Self::ShieldRateBlocked | Self::ShieldVolumeBlocked => "Blocked (shield)",
            Self::EnabledRate => "Enabled sessions",
            Self::EventsDisabledClicks => "Disable clicks",
            Self::EventsReenabledClicks => "Re-enable clicks",
        }
    }

    #[must_use]
    pub const fn group(self) -> ChartGroup {
        match self {
            Self::ShieldRateNotShownOrMixed | Self::ShieldRateLoaded | Self::ShieldRateBlocked => {
                ChartGroup::ShieldRate
            }
            Self::ShieldVolumeNotShownOrMixed
            | Self::ShieldVolumeLoaded
            | Self::ShieldVolumeBlocked => ChartGroup::ShieldVolume,
            Self::EnabledRate => ChartGroup::Enabled,
            Self::EventsDisabledClicks | Self::EventsReenabledClicks => ChartGroup::Events,
        }
    }
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The four charts the series are drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChartGroup {
    ShieldRate,
    ShieldVolume,
    Enabled,
    Events,
}

impl ChartGroup {
    pub const ALL: [Self; 4] = [
        Self::ShieldRate,
        Self::ShieldVolume,
        Self::Enabled,
        Self::Events,
    ];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::ShieldRate => "Shield State Rate",
            Self::ShieldVolume => "Shield State Volume",
            Self::Enabled => "Tracking Protection Enabled",
            Self::Events => "Shield Doorhanger Events",
        }
    }

    #[must_use]
    pub const fn y_desc(self) -> &'static str {
        match self {
            Self::ShieldRate => "Fraction of page loads",
            Self::ShieldVolume => "Page loads",
            Self::Enabled => "Fraction of sessions",
            Self::Events => "Clicks",
        }
    }

    #[must_use]
    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::ShieldRate => "shield_rate",
            Self::ShieldVolume => "shield_volume",
            Self::Enabled => "enabled_rate",
            Self::Events => "events",
        }
    }

    /// Rate charts are plotted on a fixed `[0, 1]` axis.
    #[must_use]
    pub const fn is_rate(self) -> bool {
        matches!(self, Self::ShieldRate | Self::Enabled)
    }

    pub fn series(self) -> impl Iterator<Item = SeriesId> {
        SeriesId::ALL
            .into_iter()
            .filter(move |series| series.group() == self)
    }
}
