mod app;
mod config;
mod histogram;
mod orchestrator;
mod sink;
mod source;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use histogram::HistogramError;
pub use orchestrator::OrchestratorError;
pub use sink::SinkError;
pub use source::SourceError;
pub use validation::ValidationError;
