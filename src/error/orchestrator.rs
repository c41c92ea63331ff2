use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("Unknown channel '{channel}'. Known channels: {known}.")]
    UnknownChannel { channel: String, known: String },
    #[error("Orchestrator task is no longer running.")]
    Stopped,
    #[error("Refresh of channel '{channel}' failed with {failures} failed branch(es).")]
    RefreshFailed { channel: String, failures: usize },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
