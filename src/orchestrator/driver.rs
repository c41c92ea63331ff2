use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::aggregate::{RefreshContext, reduce};
use crate::domain::{ChannelMap, Clock, ThresholdConfig, Thresholds};
use crate::error::{OrchestratorError, SourceError};
use crate::histogram::HistogramEvolution;
use crate::sinks::RenderSink;
use crate::source::{ConfirmedMeasure, MeasureFetcher};

use super::{BranchFailure, Generation, JoinPolicy, RefreshOutcome, RefreshReport, RefreshState};

#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    pub channels: ChannelMap,
    pub thresholds: ThresholdConfig,
    pub join_policy: JoinPolicy,
}

/// Result of one spawned list or fetch branch, tagged with the generation
/// that dispatched it.
#[derive(Debug)]
pub(crate) enum Completion {
    Listed {
        generation: Generation,
        version: String,
        result: Result<Vec<ConfirmedMeasure>, SourceError>,
    },
    Fetched {
        generation: Generation,
        measure: ConfirmedMeasure,
        result: Result<HistogramEvolution, SourceError>,
    },
}

impl Completion {
    const fn generation(&self) -> Generation {
        match self {
            Self::Listed { generation, .. } | Self::Fetched { generation, .. } => *generation,
        }
    }
}

struct ActiveRefresh {
    channel: String,
    generation: Generation,
    thresholds: Thresholds,
    context: RefreshContext,
    versions: usize,
    outstanding: usize,
    dispatched: usize,
    completed: usize,
    failures: Vec<BranchFailure>,
    stale: usize,
}

impl ActiveRefresh {
    fn into_report(self) -> (RefreshReport, RefreshContext) {
        let report = RefreshReport {
            channel: self.channel,
            generation: self.generation.get(),
            versions: self.versions,
            fetches_dispatched: self.dispatched,
            fetches_completed: self.completed,
            failures: self.failures,
            malformed_histograms: self.context.malformed(),
            stale_completions: self.stale,
            summary: self.context.summary,
            series_points: Vec::new(),
            sink_error: None,
        };
        (report, self.context)
    }
}

/// Owns the state of the current refresh and processes branch completions
/// one at a time. Reducers run to completion inside [`RefreshDriver::handle`],
/// so the accumulators need no locking.
pub(crate) struct RefreshDriver<S> {
    fetcher: Arc<MeasureFetcher>,
    sink: S,
    config: OrchestratorConfig,
    clock: Arc<dyn Clock>,
    generation: Generation,
    active: Option<ActiveRefresh>,
    tasks: JoinSet<Completion>,
    state: watch::Sender<RefreshState>,
}

impl<S> RefreshDriver<S>
where
    S: RenderSink,
{
    pub(crate) fn new(
        fetcher: Arc<MeasureFetcher>,
        sink: S,
        config: OrchestratorConfig,
        clock: Arc<dyn Clock>,
        state: watch::Sender<RefreshState>,
    ) -> Self {
        Self {
            fetcher,
            sink,
            config,
            clock,
            generation: Generation::default(),
            active: None,
            tasks: JoinSet::new(),
            state,
        }
    }

    pub(crate) fn has_tasks(&self) -> bool {
        !self.tasks.is_empty()
    }

    pub(crate) const fn current_generation(&self) -> Generation {
        self.generation
    }

    /// Starts a refresh of `channel`, superseding any refresh in flight.
    ///
    /// Unknown channels are rejected without disturbing the current refresh.
    pub(crate) fn select(&mut self, channel: &str) -> Vec<RefreshOutcome> {
        match self.begin(channel) {
            Ok(outcomes) => outcomes,
            Err(err) => {
                warn!("{}", err);
                vec![RefreshOutcome::Rejected {
                    channel: channel.to_owned(),
                    reason: err.to_string(),
                }]
            }
        }
    }

    fn begin(&mut self, channel: &str) -> Result<Vec<RefreshOutcome>, OrchestratorError> {
        let versions = self
            .config
            .channels
            .versions(channel)
            .ok_or_else(|| OrchestratorError::UnknownChannel {
                channel: channel.to_owned(),
                known: self.config.channels.describe(),
            })?
            .to_vec();

        let mut outcomes = Vec::new();
        if let Some(previous) = self.active.take() {
            self.tasks.abort_all();
            info!(
                "Refresh of {} (generation {}) superseded by {}",
                previous.channel, previous.generation, channel
            );
            let (report, _) = previous.into_report();
            outcomes.push(RefreshOutcome::Superseded(report));
        }

        self.generation = self.generation.next();
        let generation = self.generation;
        let thresholds = Thresholds::resolve(&self.config.thresholds, self.clock.now());
        self.state.send_modify(|state| *state = RefreshState::Fetching);
        info!(
            "Refreshing {} ({} versions, generation {})",
            channel,
            versions.len(),
            generation
        );

        let version_count = versions.len();
        self.active = Some(ActiveRefresh {
            channel: channel.to_owned(),
            generation,
            thresholds,
            context: RefreshContext::new(),
            versions: version_count,
            outstanding: version_count,
            dispatched: 0,
            completed: 0,
            failures: Vec::new(),
            stale: 0,
        });
        for version in versions {
            spawn_listing(&mut self.tasks, &self.fetcher, generation, version);
        }
        Ok(outcomes)
    }

    /// Waits for the next branch to finish. Aborted branches are skipped.
    pub(crate) async fn next_completion(&mut self) -> Option<Completion> {
        while let Some(joined) = self.tasks.join_next().await {
            match joined {
                Ok(completion) => return Some(completion),
                Err(err) if err.is_cancelled() => {}
                Err(err) => error!("Refresh branch task failed: {}", err),
            }
        }
        None
    }

    /// Applies one branch completion; returns an outcome once the refresh's
    /// last outstanding branch has settled.
    pub(crate) fn handle(&mut self, completion: Completion) -> Option<RefreshOutcome> {
        let generation = completion.generation();
        let current = self.active.as_ref().map(|active| active.generation);
        if current != Some(generation) {
            debug!("Discarding completion from stale generation {}", generation);
            if let Some(active) = self.active.as_mut() {
                active.stale = active.stale.saturating_add(1);
            }
            return None;
        }
        let active = self.active.as_mut()?;

        match completion {
            Completion::Listed {
                version,
                result: Ok(measures),
                ..
            } => {
                debug!("{} exposes {} recognized measures", version, measures.len());
                for measure in measures {
                    spawn_fetch(&mut self.tasks, &self.fetcher, generation, measure);
                    active.outstanding = active.outstanding.saturating_add(1);
                    active.dispatched = active.dispatched.saturating_add(1);
                }
            }
            Completion::Listed {
                version,
                result: Err(err),
                ..
            } => {
                warn!("Listing measures for {} failed: {}", version, err);
                active.failures.push(BranchFailure {
                    version,
                    measure: None,
                    error: err,
                });
            }
            Completion::Fetched {
                measure,
                result: Ok(evolution),
                ..
            } => {
                self.state
                    .send_modify(|state| *state = RefreshState::Aggregating);
                let stats = reduce(
                    measure.kind(),
                    &evolution,
                    &active.thresholds,
                    &mut active.context,
                );
                debug!(
                    "Reduced {} on {}: {} emitted, {} excluded, {} malformed",
                    measure.name(),
                    measure.version(),
                    stats.emitted,
                    stats.excluded,
                    stats.malformed
                );
                active.completed = active.completed.saturating_add(1);
            }
            Completion::Fetched {
                measure,
                result: Err(err),
                ..
            } => {
                warn!(
                    "Fetching {} for {} failed: {}",
                    measure.name(),
                    measure.version(),
                    err
                );
                active.failures.push(BranchFailure {
                    version: measure.version().to_owned(),
                    measure: Some(measure.name().to_owned()),
                    error: err,
                });
            }
        }

        active.outstanding = active.outstanding.saturating_sub(1);
        if active.outstanding != 0 {
            return None;
        }
        let finished = self.active.take()?;
        Some(self.finish(finished))
    }

    fn finish(&mut self, finished: ActiveRefresh) -> RefreshOutcome {
        self.state
            .send_modify(|state| *state = RefreshState::Normalizing);
        let channel = finished.channel.clone();
        let generation = finished.generation;
        let (mut report, context) = finished.into_report();

        if self.config.join_policy == JoinPolicy::AllSucceed && !report.failures.is_empty() {
            warn!(
                "Not publishing {}: {} branch(es) failed under {}",
                channel,
                report.failures.len(),
                self.config.join_policy
            );
            self.state.send_modify(|state| *state = RefreshState::Idle);
            return RefreshOutcome::Failed(report);
        }

        let batch = context.accumulators.into_batch(channel, generation.get());
        report.series_points = batch.iter().map(|(id, points)| (id, points.len())).collect();
        let outcome = match self.sink.publish_batch(&batch) {
            Ok(()) => {
                self.state
                    .send_modify(|state| *state = RefreshState::Published);
                info!(
                    "Published {} points across 9 series for {} (generation {})",
                    batch.total_points(),
                    batch.channel,
                    generation
                );
                RefreshOutcome::Published(report)
            }
            Err(err) => {
                error!("Publishing {} failed: {}", batch.channel, err);
                report.sink_error = Some(err.to_string());
                RefreshOutcome::Failed(report)
            }
        };
        self.state.send_modify(|state| *state = RefreshState::Idle);
        outcome
    }

    pub(crate) fn shutdown(&mut self) {
        self.tasks.abort_all();
        self.active = None;
        self.state.send_modify(|state| *state = RefreshState::Idle);
    }

    #[cfg(test)]
    pub(crate) fn active_context(&self) -> Option<&RefreshContext> {
        self.active.as_ref().map(|active| &active.context)
    }
}

fn spawn_listing(
    tasks: &mut JoinSet<Completion>,
    fetcher: &Arc<MeasureFetcher>,
    generation: Generation,
    version: String,
) {
    let fetcher = Arc::clone(fetcher);
    tasks.spawn(async move {
        let result = AssertUnwindSafe(fetcher.list_recognized(&version))
            .catch_unwind()
            .await
            .unwrap_or_else(|_panic| {
                Err(SourceError::Panicked {
                    target: version.clone(),
                })
            });
        Completion::Listed {
            generation,
            version,
            result,
        }
    });
}

fn spawn_fetch(
    tasks: &mut JoinSet<Completion>,
    fetcher: &Arc<MeasureFetcher>,
    generation: Generation,
    measure: ConfirmedMeasure,
) {
    let fetcher = Arc::clone(fetcher);
    tasks.spawn(async move {
        let result = AssertUnwindSafe(fetcher.fetch(&measure))
            .catch_unwind()
            .await
            .unwrap_or_else(|_panic| {
                Err(SourceError::Panicked {
                    target: format!("{}:{}", measure.version(), measure.name()),
                })
            });
        Completion::Fetched {
            generation,
            measure,
            result,
        }
    });
}
