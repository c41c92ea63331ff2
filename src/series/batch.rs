use super::{SeriesId, SeriesPoint};

/// The nine normalized series of one refresh, handed to a sink in one call.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesBatch {
    pub channel: String,
    pub generation: u64,
    series: Vec<(SeriesId, Vec<SeriesPoint>)>,
}

impl SeriesBatch {
    /// `series` is stored in [`SeriesId::ALL`] order; ids missing from it are
    /// published as empty series.
    #[must_use]
    pub fn new(
        channel: String,
        generation: u64,
        mut series: Vec<(SeriesId, Vec<SeriesPoint>)>,
    ) -> Self {
        let ordered = SeriesId::ALL
            .into_iter()
            .map(|id| {
                let points = series
                    .iter()
                    .position(|(candidate, _)| *candidate == id)
                    .map(|index| series.swap_remove(index).1)
                    .unwrap_or_default();
                (id, points)
            })
            .collect();
        Self {
            channel,
            generation,
            series: ordered,
        }
    }

    #[must_use]
    pub fn points(&self, id: SeriesId) -> &[SeriesPoint] {
        self.series
            .iter()
            .find(|(candidate, _)| *candidate == id)
            .map(|(_, points)| points.as_slice())
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SeriesId, &[SeriesPoint])> {
        self.series
            .iter()
            .map(|(id, points)| (*id, points.as_slice()))
    }

    /// Yields `(series, points, redraw_now)`; `redraw_now` is set on the last
    /// series of each chart so a chart is redrawn once with all its lines.
    pub fn publications(&self) -> impl Iterator<Item = (SeriesId, &[SeriesPoint], bool)> {
        self.iter().map(|(id, points)| {
            let redraw_now = id.group().series().last() == Some(id);
            (id, points, redraw_now)
        })
    }

    #[must_use]
    pub fn total_points(&self) -> usize {
        self.series.iter().map(|(_, points)| points.len()).sum()
    }
}
