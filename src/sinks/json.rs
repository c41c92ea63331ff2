use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::SinkError;
use crate::series::{SeriesBatch, SeriesId, SeriesPoint};

use super::RenderSink;

#[derive(Serialize)]
struct SeriesExport<'batch> {
    channel: &'batch str,
    generation: u64,
    series: BTreeMap<&'static str, &'batch [SeriesPoint]>,
}

/// Writes every published batch to a JSON file as `[timestamp_ms, value]` pairs.
#[derive(Debug)]
pub struct JsonSink {
    path: PathBuf,
    series: BTreeMap<SeriesId, Vec<SeriesPoint>>,
}

impl JsonSink {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            series: BTreeMap::new(),
        }
    }

    fn write(&self, channel: &str, generation: u64) -> Result<(), SinkError> {
        let export = SeriesExport {
            channel,
            generation,
            series: self
                .series
                .iter()
                .map(|(id, points)| (id.key(), points.as_slice()))
                .collect(),
        };
        let content = serde_json::to_string_pretty(&export)
            .map_err(|err| SinkError::SerializeJson { source: err })?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|err| SinkError::CreateDir {
                path: parent.to_path_buf(),
                source: err,
            })?;
        }
        std::fs::write(&self.path, content).map_err(|err| SinkError::WriteJson {
            path: self.path.clone(),
            source: err,
        })?;
        tracing::info!("Wrote series export to {}", self.path.display());
        Ok(())
    }
}

impl RenderSink for JsonSink {
    fn publish(
        &mut self,
        series: SeriesId,
        points: &[SeriesPoint],
        _redraw_now: bool,
    ) -> Result<(), SinkError> {
        self.series.insert(series, points.to_vec());
        Ok(())
    }

    fn publish_batch(&mut self, batch: &SeriesBatch) -> Result<(), SinkError> {
        for (series, points, redraw_now) in batch.publications() {
            self.publish(series, points, redraw_now)?;
        }
        self.write(&batch.channel, batch.generation)
    }
}
