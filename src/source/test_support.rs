use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::error::SourceError;
use crate::histogram::HistogramEvolution;

use super::{MeasureDescriptor, MeasureListing, MetricsSource};

type Branch = (String, String);

/// In-memory source whose fetches can be held back, or never answered.
///
/// Fetching a measure that was not registered for the version never
/// completes, matching the behavior of the real telemetry backend.
#[derive(Default)]
pub(crate) struct FakeSource {
    versions: BTreeMap<String, BTreeMap<String, HistogramEvolution>>,
    gates: BTreeMap<Branch, Arc<Notify>>,
    hung: BTreeSet<Branch>,
    fetch_log: Mutex<Vec<Branch>>,
    started: AtomicUsize,
    started_notify: Notify,
}

impl FakeSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_measure(
        mut self,
        version: &str,
        measure: &str,
        evolution: HistogramEvolution,
    ) -> Self {
        self.versions
            .entry(version.to_owned())
            .or_default()
            .insert(measure.to_owned(), evolution);
        self
    }

    /// Holds the fetch of `measure` on `version` until the returned gate is notified.
    pub(crate) fn gated(mut self, version: &str, measure: &str) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.gates
            .insert((version.to_owned(), measure.to_owned()), Arc::clone(&gate));
        (self, gate)
    }

    pub(crate) fn hung(mut self, version: &str, measure: &str) -> Self {
        self.hung.insert((version.to_owned(), measure.to_owned()));
        self
    }

    pub(crate) fn fetch_log(&self) -> Vec<Branch> {
        self.fetch_log
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    /// Waits until at least `count` fetches have started.
    pub(crate) async fn wait_for_fetches(&self, count: usize) {
        loop {
            let notified = self.started_notify.notified();
            if self.started.load(Ordering::SeqCst) >= count {
                return;
            }
            notified.await;
        }
    }
}

#[async_trait]
impl MetricsSource for FakeSource {
    async fn list_measures(&self, version: &str) -> Result<MeasureListing, SourceError> {
        let measures = self
            .versions
            .get(version)
            .ok_or_else(|| SourceError::UnknownVersion {
                version: version.to_owned(),
            })?;
        Ok(measures
            .keys()
            .map(|name| (name.clone(), MeasureDescriptor::default()))
            .collect())
    }

    async fn fetch_evolution(
        &self,
        version: &str,
        measure: &str,
    ) -> Result<HistogramEvolution, SourceError> {
        let branch = (version.to_owned(), measure.to_owned());
        if let Ok(mut log) = self.fetch_log.lock() {
            log.push(branch.clone());
        }
        self.started.fetch_add(1, Ordering::SeqCst);
        self.started_notify.notify_waiters();

        if self.hung.contains(&branch) {
            std::future::pending::<()>().await;
        }
        if let Some(gate) = self.gates.get(&branch) {
            gate.notified().await;
        }
        match self
            .versions
            .get(version)
            .and_then(|measures| measures.get(measure))
        {
            Some(evolution) => Ok(evolution.clone()),
            None => std::future::pending().await,
        }
    }
}
