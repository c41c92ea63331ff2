//! Rendering sinks that receive the published series.
mod chart;
mod json;

#[cfg(test)]
pub(crate) mod test_support;

pub use chart::ChartSink;
pub use json::JsonSink;

use crate::error::SinkError;
use crate::series::{SeriesBatch, SeriesId, SeriesPoint};

/// Receiver of normalized series.
///
/// The orchestrator only ever calls [`RenderSink::publish_batch`], once per
/// completed refresh, so a sink never observes a partially applied refresh.
pub trait RenderSink: Send {
    /// Replaces the data of one series. `redraw_now` is set when the caller
    /// has finished updating the chart the series belongs to.
    ///
    /// # Errors
    ///
    /// Returns an error when the sink fails to store or render the series.
    fn publish(
        &mut self,
        series: SeriesId,
        points: &[SeriesPoint],
        redraw_now: bool,
    ) -> Result<(), SinkError>;

    /// Publishes all nine series of a refresh.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by [`RenderSink::publish`].
    fn publish_batch(&mut self, batch: &SeriesBatch) -> Result<(), SinkError> {
        for (series, points, redraw_now) in batch.publications() {
            self.publish(series, points, redraw_now)?;
        }
        Ok(())
    }
}

/// Forwards every batch to several sinks in order.
#[derive(Default)]
pub struct MultiSink {
    sinks: Vec<Box<dyn RenderSink>>,
}

impl MultiSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sink: Box<dyn RenderSink>) {
        self.sinks.push(sink);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl RenderSink for MultiSink {
    fn publish(
        &mut self,
        series: SeriesId,
        points: &[SeriesPoint],
        redraw_now: bool,
    ) -> Result<(), SinkError> {
        for sink in &mut self.sinks {
            sink.publish(series, points, redraw_now)?;
        }
        Ok(())
    }

    fn publish_batch(&mut self, batch: &SeriesBatch) -> Result<(), SinkError> {
        for sink in &mut self.sinks {
            sink.publish_batch(batch)?;
        }
        Ok(())
    }
}
