use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use crate::args::parse_duration;
use crate::domain::MeasureKind;
use crate::error::ValidationError;
use crate::orchestrator::JoinPolicy;

/// Settings read from `tpdash.toml` / `tpdash.json`; every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub min_volume: Option<u64>,
    pub min_date: Option<String>,
    pub end_date: Option<String>,
    pub freshness_days: Option<u32>,
    pub fetch_timeout: Option<DurationValue>,
    pub join_policy: Option<JoinPolicy>,
    /// Channel name to the versions refreshed for it.
    pub channels: Option<BTreeMap<String, Vec<String>>>,
    /// Telemetry measure name to the reducer that consumes it.
    pub measures: Option<BTreeMap<String, MeasureKind>>,
    pub source_file: Option<String>,
    pub source_url: Option<String>,
    pub charts_path: Option<String>,
    pub no_charts: Option<bool>,
    pub export_json: Option<String>,
    pub summary: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(ValidationError::DurationZero)
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => parse_duration(text),
        }
    }
}
