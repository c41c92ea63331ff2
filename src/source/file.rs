use std::path::Path;

use async_trait::async_trait;

use crate::error::SourceError;
use crate::histogram::HistogramEvolution;

use super::{MeasureListing, MetricsSource, TelemetryDump};

/// Serves a telemetry dump loaded into memory.
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    dump: TelemetryDump,
}

impl FileSource {
    #[must_use]
    pub const fn new(dump: TelemetryDump) -> Self {
        Self { dump }
    }

    /// Reads and parses a JSON telemetry dump.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or is not a valid dump.
    pub async fn load(path: &Path) -> Result<Self, SourceError> {
        let content =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|err| SourceError::ReadDump {
                    path: path.to_path_buf(),
                    source: err,
                })?;
        let dump = serde_json::from_str(&content).map_err(|err| SourceError::ParseDump {
            path: path.to_path_buf(),
            source: err,
        })?;
        tracing::debug!("Loaded telemetry dump from {}", path.display());
        Ok(Self { dump })
    }
}

#[async_trait]
impl MetricsSource for FileSource {
    async fn list_measures(&self, version: &str) -> Result<MeasureListing, SourceError> {
        self.dump
            .listing(version)
            .ok_or_else(|| SourceError::UnknownVersion {
                version: version.to_owned(),
            })
    }

    async fn fetch_evolution(
        &self,
        version: &str,
        measure: &str,
    ) -> Result<HistogramEvolution, SourceError> {
        self.dump
            .evolution(version, measure)
            .cloned()
            .ok_or_else(|| SourceError::UnknownMeasure {
                version: version.to_owned(),
                measure: measure.to_owned(),
            })
    }
}
