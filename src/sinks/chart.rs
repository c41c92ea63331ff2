use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::charts::plot_series_chart;
use crate::error::SinkError;
use crate::series::{ChartGroup, SeriesBatch, SeriesId, SeriesPoint};

use super::RenderSink;

/// Draws each chart group to `<base_dir>/<channel>/<group>.png`.
#[derive(Debug)]
pub struct ChartSink {
    base_dir: PathBuf,
    channel: String,
    series: BTreeMap<SeriesId, Vec<SeriesPoint>>,
    written: Vec<PathBuf>,
}

impl ChartSink {
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            channel: String::new(),
            series: BTreeMap::new(),
            written: Vec::new(),
        }
    }

    /// Chart files written so far.
    #[must_use]
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn output_dir(&self) -> PathBuf {
        if self.channel.is_empty() {
            self.base_dir.clone()
        } else {
            self.base_dir.join(&self.channel)
        }
    }

    fn redraw(&mut self, group: ChartGroup) -> Result<(), SinkError> {
        let dir = self.output_dir();
        std::fs::create_dir_all(&dir).map_err(|err| SinkError::CreateDir {
            path: dir.clone(),
            source: err,
        })?;
        let path = dir.join(format!("{}.png", group.file_stem()));
        let series: Vec<(SeriesId, &[SeriesPoint])> = group
            .series()
            .map(|id| {
                let points = self.series.get(&id).map(Vec::as_slice).unwrap_or_default();
                (id, points)
            })
            .collect();
        if series.iter().all(|(_, points)| points.is_empty()) {
            tracing::debug!("Skipping empty {} chart", group.file_stem());
            return self.remove_stale(path);
        }

        let path_str = path_to_str(&path)?;
        plot_series_chart(group, &series, path_str).map_err(|err| SinkError::RenderChart {
            path: path.clone(),
            message: err.to_string(),
        })?;
        tracing::info!("Wrote {} chart to {}", group.title(), path.display());
        self.written.push(path);
        Ok(())
    }

    /// Deletes a chart drawn by an earlier publish whose group is now empty.
    fn remove_stale(&mut self, path: PathBuf) -> Result<(), SinkError> {
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!("Removed stale chart {}", path.display());
                self.written.retain(|written| written != &path);
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(SinkError::RemoveChart { path, source: err }),
        }
    }
}

fn path_to_str(path: &Path) -> Result<&str, SinkError> {
    path.to_str().ok_or_else(|| SinkError::RenderChart {
        path: path.to_path_buf(),
        message: "path is not valid UTF-8".to_owned(),
    })
}

impl RenderSink for ChartSink {
    fn publish(
        &mut self,
        series: SeriesId,
        points: &[SeriesPoint],
        redraw_now: bool,
    ) -> Result<(), SinkError> {
        self.series.insert(series, points.to_vec());
        if redraw_now {
            self.redraw(series.group())?;
        }
        Ok(())
    }

    fn publish_batch(&mut self, batch: &SeriesBatch) -> Result<(), SinkError> {
        self.channel.clone_from(&batch.channel);
        for (series, points, redraw_now) in batch.publications() {
            self.publish(series, points, redraw_now)?;
        }
        Ok(())
    }
}
