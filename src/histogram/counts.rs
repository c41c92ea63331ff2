use crate::domain::MeasureKind;
use crate::error::HistogramError;

use super::{Histogram, decode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShieldCounts {
    pub not_shown: u64,
    pub loaded: u64,
    pub blocked: u64,
    pub mixed: u64,
}

impl ShieldCounts {
    /// # Errors
    ///
    /// Returns an error when the histogram is not a well-formed shield histogram.
    pub fn decode(histogram: &Histogram) -> Result<Self, HistogramError> {
        match decode(histogram, MeasureKind::Shield)?.as_slice() {
            [not_shown, loaded, blocked, mixed] => Ok(Self {
                not_shown: *not_shown,
                loaded: *loaded,
                blocked: *blocked,
                mixed: *mixed,
            }),
            other => Err(arity_error(MeasureKind::Shield, other.len())),
        }
    }

    #[must_use]
    pub const fn volume(&self) -> u64 {
        self.not_shown
            .saturating_add(self.loaded)
            .saturating_add(self.blocked)
            .saturating_add(self.mixed)
    }

    /// Page loads where the shield was not shown, including mixed-content pages.
    #[must_use]
    pub const fn not_shown_or_mixed(&self) -> u64 {
        self.not_shown.saturating_add(self.mixed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnabledCounts {
    pub disabled: u64,
    pub enabled: u64,
}

impl EnabledCounts {
    /// # Errors
    ///
    /// Returns an error when the histogram is not a well-formed enabled histogram.
    pub fn decode(histogram: &Histogram) -> Result<Self, HistogramError> {
        match decode(histogram, MeasureKind::Enabled)?.as_slice() {
            [disabled, enabled] => Ok(Self {
                disabled: *disabled,
                enabled: *enabled,
            }),
            other => Err(arity_error(MeasureKind::Enabled, other.len())),
        }
    }

    #[must_use]
    pub const fn volume(&self) -> u64 {
        self.disabled.saturating_add(self.enabled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventCounts {
    pub no_action: u64,
    pub disabled_clicks: u64,
    pub reenabled_clicks: u64,
}

impl EventCounts {
    /// # Errors
    ///
    /// Returns an error when the histogram is not a well-formed events histogram.
    pub fn decode(histogram: &Histogram) -> Result<Self, HistogramError> {
        match decode(histogram, MeasureKind::Events)?.as_slice() {
            [no_action, disabled_clicks, reenabled_clicks] => Ok(Self {
                no_action: *no_action,
                disabled_clicks: *disabled_clicks,
                reenabled_clicks: *reenabled_clicks,
            }),
            other => Err(arity_error(MeasureKind::Events, other.len())),
        }
    }

    #[must_use]
    pub const fn volume(&self) -> u64 {
        self.no_action
            .saturating_add(self.disabled_clicks)
            .saturating_add(self.reenabled_clicks)
    }
}

const fn arity_error(kind: MeasureKind, actual: usize) -> HistogramError {
    HistogramError::ArityMismatch {
        kind,
        expected: kind.arity(),
        actual,
    }
}
