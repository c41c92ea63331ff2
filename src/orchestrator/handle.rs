use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::domain::Clock;
use crate::error::{AppResult, OrchestratorError};
use crate::sinks::RenderSink;
use crate::source::MeasureFetcher;

use super::driver::{OrchestratorConfig, RefreshDriver};
use super::{RefreshOutcome, RefreshState};

#[derive(Debug)]
enum Command {
    SelectChannel(String),
    Shutdown,
}

/// Client side of a running orchestrator task.
#[derive(Debug)]
pub struct OrchestratorHandle {
    commands: mpsc::UnboundedSender<Command>,
    outcomes: mpsc::UnboundedReceiver<RefreshOutcome>,
    state: watch::Receiver<RefreshState>,
    task: JoinHandle<()>,
}

/// Spawns the orchestrator onto the current runtime.
///
/// The task owns the sink and the per-refresh context; callers interact with
/// it only through the returned handle.
#[must_use]
pub fn spawn_orchestrator<S>(
    fetcher: MeasureFetcher,
    sink: S,
    config: OrchestratorConfig,
    clock: Arc<dyn Clock>,
) -> OrchestratorHandle
where
    S: RenderSink + 'static,
{
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(RefreshState::Idle);
    let driver = RefreshDriver::new(Arc::new(fetcher), sink, config, clock, state_tx);
    let task = tokio::spawn(run_orchestrator(driver, command_rx, outcome_tx));
    OrchestratorHandle {
        commands: command_tx,
        outcomes: outcome_rx,
        state: state_rx,
        task,
    }
}

async fn run_orchestrator<S>(
    mut driver: RefreshDriver<S>,
    mut commands: mpsc::UnboundedReceiver<Command>,
    outcomes: mpsc::UnboundedSender<RefreshOutcome>,
) where
    S: RenderSink,
{
    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(Command::SelectChannel(channel)) => {
                    for outcome in driver.select(&channel) {
                        if outcomes.send(outcome).is_err() {
                            debug!("Outcome receiver dropped");
                        }
                    }
                }
                Some(Command::Shutdown) | None => break,
            },
            Some(completion) = driver.next_completion(), if driver.has_tasks() => {
                if let Some(outcome) = driver.handle(completion)
                    && outcomes.send(outcome).is_err()
                {
                    debug!("Outcome receiver dropped");
                }
            }
        }
    }
    driver.shutdown();
    info!(
        "Orchestrator stopped after generation {}",
        driver.current_generation()
    );
}

impl OrchestratorHandle {
    /// Asks the orchestrator to refresh `channel`, superseding any refresh in flight.
    ///
    /// # Errors
    ///
    /// Returns an error when the orchestrator task has stopped.
    pub fn select_channel(&self, channel: &str) -> Result<(), OrchestratorError> {
        if self
            .commands
            .send(Command::SelectChannel(channel.to_owned()))
            .is_err()
        {
            return Err(OrchestratorError::Stopped);
        }
        Ok(())
    }

    /// Waits for the next outcome reported by the orchestrator.
    ///
    /// # Errors
    ///
    /// Returns an error when the orchestrator task has stopped.
    pub async fn next_outcome(&mut self) -> Result<RefreshOutcome, OrchestratorError> {
        self.outcomes.recv().await.ok_or(OrchestratorError::Stopped)
    }

    /// Selects `channel` and waits until that selection settles.
    ///
    /// Superseded outcomes of earlier selections are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error when the orchestrator task has stopped.
    pub async fn refresh(&mut self, channel: &str) -> Result<RefreshOutcome, OrchestratorError> {
        self.select_channel(channel)?;
        loop {
            let outcome = self.next_outcome().await?;
            if outcome.is_final() && outcome.channel() == channel {
                return Ok(outcome);
            }
            debug!("Skipping outcome for {}", outcome.channel());
        }
    }

    #[must_use]
    pub fn state(&self) -> RefreshState {
        *self.state.borrow()
    }

    /// Returns a receiver that observes every state transition.
    #[must_use]
    pub fn watch_state(&self) -> watch::Receiver<RefreshState> {
        self.state.clone()
    }

    /// Stops the orchestrator, cancelling any refresh in flight.
    ///
    /// # Errors
    ///
    /// Returns an error when the orchestrator task panicked.
    pub async fn shutdown(self) -> AppResult<()> {
        if self.commands.send(Command::Shutdown).is_err() {
            debug!("Orchestrator already stopped");
        }
        self.task.await?;
        Ok(())
    }
}
