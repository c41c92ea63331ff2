use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{MeasureKind, MeasureRegistry};
use crate::error::SourceError;
use crate::histogram::HistogramEvolution;

use super::MetricsSource;

/// A recognized measure that the source listed for a version.
///
/// Only [`MeasureFetcher::list_recognized`] creates these, so every fetch is
/// preceded by a listing that confirmed the measure exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedMeasure {
    version: String,
    name: String,
    kind: MeasureKind,
}

impl ConfirmedMeasure {
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn kind(&self) -> MeasureKind {
        self.kind
    }
}

/// Wraps a [`MetricsSource`] with measure recognition and per-call timeouts.
#[derive(Clone)]
pub struct MeasureFetcher {
    source: Arc<dyn MetricsSource>,
    registry: MeasureRegistry,
    timeout: Duration,
}

impl MeasureFetcher {
    #[must_use]
    pub fn new(source: Arc<dyn MetricsSource>, registry: MeasureRegistry, timeout: Duration) -> Self {
        Self {
            source,
            registry,
            timeout,
        }
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Lists the measures on `version` that map to a known reducer.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Stalled`] when the listing exceeds the timeout,
    /// or the source's own error.
    pub async fn list_recognized(&self, version: &str) -> Result<Vec<ConfirmedMeasure>, SourceError> {
        let listing = self
            .bounded(
                "list_measures",
                version.to_owned(),
                self.source.list_measures(version),
            )
            .await?;

        let mut confirmed = Vec::new();
        for name in listing.keys() {
            match self.registry.kind_of(name) {
                Some(kind) => confirmed.push(ConfirmedMeasure {
                    version: version.to_owned(),
                    name: name.clone(),
                    kind,
                }),
                None => tracing::debug!("Ignoring unrecognized measure {} on {}", name, version),
            }
        }
        Ok(confirmed)
    }

    /// Fetches the evolution of a confirmed measure.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Stalled`] when the fetch exceeds the timeout, or
    /// the source's own error.
    pub async fn fetch(&self, measure: &ConfirmedMeasure) -> Result<HistogramEvolution, SourceError> {
        self.bounded(
            "fetch_evolution",
            format!("{}:{}", measure.version, measure.name),
            self.source.fetch_evolution(&measure.version, &measure.name),
        )
        .await
    }

    async fn bounded<T, F>(
        &self,
        operation: &'static str,
        target: String,
        call: F,
    ) -> Result<T, SourceError>
    where
        F: Future<Output = Result<T, SourceError>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_elapsed) => {
                tracing::warn!("{} for {} stalled after {:?}", operation, target, self.timeout);
                Err(SourceError::Stalled {
                    operation,
                    target,
                    timeout: self.timeout,
                })
            }
        }
    }
}

impl std::fmt::Debug for MeasureFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeasureFetcher")
            .field("registry", &self.registry)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
