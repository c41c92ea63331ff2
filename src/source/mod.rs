//! Metrics source boundary: the trait the pipeline consumes, the fetcher that
//! guards it, and concrete adapters.
mod dump;
mod fetcher;
mod file;
mod http;

#[cfg(test)]
pub(crate) mod test_support;

pub use dump::{MeasureDump, TelemetryDump};
pub use fetcher::{ConfirmedMeasure, MeasureFetcher};
pub use file::FileSource;
pub use http::HttpSource;

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SourceError;
use crate::histogram::HistogramEvolution;

/// Descriptive metadata the source attaches to each listed measure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasureDescriptor {
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

pub type MeasureListing = BTreeMap<String, MeasureDescriptor>;

/// A telemetry backend keyed by opaque version strings.
///
/// `fetch_evolution` may never complete for a measure the version does not
/// expose, so callers go through [`MeasureFetcher`], which only fetches
/// measures confirmed by `list_measures` and bounds every call with a timeout.
#[async_trait]
pub trait MetricsSource: Send + Sync {
    async fn list_measures(&self, version: &str) -> Result<MeasureListing, SourceError>;

    async fn fetch_evolution(
        &self,
        version: &str,
        measure: &str,
    ) -> Result<HistogramEvolution, SourceError>;
}
