use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{operation} for '{target}' did not complete within {timeout:?}.")]
    Stalled {
        operation: &'static str,
        target: String,
        timeout: Duration,
    },
    #[error("Metrics source rejected {operation} for '{target}': {message}")]
    Rejected {
        operation: &'static str,
        target: String,
        message: String,
    },
    #[error("Version '{version}' is not known to the metrics source.")]
    UnknownVersion { version: String },
    #[error("Measure '{measure}' does not exist for version '{version}'.")]
    UnknownMeasure { version: String, measure: String },
    #[error("Metrics source task panicked while handling '{target}'.")]
    Panicked { target: String },
    #[error("Failed to read telemetry dump '{path}': {source}")]
    ReadDump {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse telemetry dump '{path}': {source}")]
    ParseDump {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid metrics source URL '{value}': {source}")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("HTTP request to '{url}' failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
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
