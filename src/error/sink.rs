use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to create chart directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to render chart '{path}': {message}")]
    RenderChart { path: PathBuf, message: String },
    #[error("Failed to remove stale chart '{path}': {source}")]
    RemoveChart {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize series export: {source}")]
    SerializeJson {
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to write series export '{path}': {source}")]
    WriteJson {
        path: PathBuf,
        #[source]
        source: std::io::Error,
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
