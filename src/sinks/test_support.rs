use std::sync::{Arc, Mutex};

use crate::error::SinkError;
use crate::series::{SeriesBatch, SeriesId, SeriesPoint};

use super::RenderSink;

/// Records every published batch; clones share the same record.
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingSink {
    batches: Arc<Mutex<Vec<SeriesBatch>>>,
    publishes: Arc<Mutex<Vec<(SeriesId, usize, bool)>>>,
}

impl RecordingSink {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn batches(&self) -> Vec<SeriesBatch> {
        self.batches
            .lock()
            .map(|batches| batches.clone())
            .unwrap_or_default()
    }

    pub(crate) fn publishes(&self) -> Vec<(SeriesId, usize, bool)> {
        self.publishes
            .lock()
            .map(|publishes| publishes.clone())
            .unwrap_or_default()
    }
}

impl RenderSink for RecordingSink {
    fn publish(
        &mut self,
        series: SeriesId,
        points: &[SeriesPoint],
        redraw_now: bool,
    ) -> Result<(), SinkError> {
        if let Ok(mut publishes) = self.publishes.lock() {
            publishes.push((series, points.len(), redraw_now));
        }
        Ok(())
    }

    fn publish_batch(&mut self, batch: &SeriesBatch) -> Result<(), SinkError> {
        for (series, points, redraw_now) in batch.publications() {
            self.publish(series, points, redraw_now)?;
        }
        if let Ok(mut batches) = self.batches.lock() {
            batches.push(batch.clone());
        }
        Ok(())
    }
}
