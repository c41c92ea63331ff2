use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Histogram;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionPoint {
    pub date: DateTime<Utc>,
    #[serde(flatten)]
    pub histogram: Histogram,
}

/// Per-date histograms for one (version, measure), in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistogramEvolution {
    points: Vec<EvolutionPoint>,
}

impl HistogramEvolution {
    #[must_use]
    pub const fn new(points: Vec<EvolutionPoint>) -> Self {
        Self { points }
    }

    pub fn iter(&self) -> impl Iterator<Item = (DateTime<Utc>, &Histogram)> {
        self.points
            .iter()
            .map(|point| (point.date, &point.histogram))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl FromIterator<(DateTime<Utc>, Histogram)> for HistogramEvolution {
    fn from_iter<T: IntoIterator<Item = (DateTime<Utc>, Histogram)>>(iter: T) -> Self {
        let points = iter
            .into_iter()
            .map(|(date, histogram)| EvolutionPoint { date, histogram })
            .collect();
        Self { points }
    }
}
