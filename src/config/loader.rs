use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

const DEFAULT_CONFIG_FILES: [&str; 2] = ["tpdash.toml", "tpdash.json"];

/// Loads the config file at `path`, or the first default file found in the
/// working directory.
///
/// # Errors
///
/// Returns an error when the config file cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> AppResult<Option<ConfigFile>> {
    if let Some(path) = path {
        return load_config_file(Path::new(path)).map(Some);
    }

    for candidate in DEFAULT_CONFIG_FILES {
        let candidate = PathBuf::from(candidate);
        if candidate.exists() {
            debug!("Using config file {}", candidate.display());
            return load_config_file(&candidate).map(Some);
        }
    }

    Ok(None)
}

pub(crate) fn load_config_file(path: &Path) -> AppResult<ConfigFile> {
    let content = std::fs::read_to_string(path).map_err(|err| ConfigError::ReadConfig {
        path: path.to_path_buf(),
        source: err,
    })?;
    let parsed = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|err| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source: err,
        }),
        Some("json") => serde_json::from_str(&content).map_err(|err| ConfigError::ParseJson {
            path: path.to_path_buf(),
            source: err,
        }),
        Some(ext) => Err(ConfigError::UnsupportedExtension {
            ext: ext.to_owned(),
        }),
        None => Err(ConfigError::MissingExtension),
    };
    parsed.map_err(AppError::config)
}
