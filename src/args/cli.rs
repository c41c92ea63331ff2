use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use clap::Parser;

use crate::domain::{
    ChannelMap, DEFAULT_FRESHNESS_DAYS, DEFAULT_MIN_VOLUME, MeasureKind, MeasureRegistry,
    ThresholdConfig,
};
use crate::error::ValidationError;
use crate::orchestrator::{JoinPolicy, OrchestratorConfig};

use super::defaults::{
    DEFAULT_CHANNEL, DEFAULT_END_DATE, DEFAULT_FETCH_TIMEOUT, DEFAULT_MIN_DATE,
    default_charts_path,
};
use super::parsers::{parse_date_arg, parse_duration_arg, parse_join_policy};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Tracking-protection telemetry dashboard: fetches histogram evolutions per release channel and renders shield, enabled, and event series."
)]
pub struct DashArgs {
    /// Path to config file (TOML or JSON); defaults to ./tpdash.toml or ./tpdash.json
    #[arg(long, env = "TPDASH_CONFIG")]
    pub config: Option<String>,

    /// Release channel to refresh (repeatable; refreshed in order)
    #[arg(long = "channel", short = 'c', default_value = DEFAULT_CHANNEL)]
    pub channels: Vec<String>,

    /// Read telemetry from a JSON dump file
    #[arg(long = "source-file", conflicts_with = "source_url")]
    pub source_file: Option<String>,

    /// Read telemetry from an HTTP endpoint serving the dump layout
    #[arg(long = "source-url")]
    pub source_url: Option<String>,

    /// Minimum per-day sample count for shield points (exclusive)
    #[arg(long = "min-volume", default_value_t = DEFAULT_MIN_VOLUME)]
    pub min_volume: u64,

    /// Reporting window start (YYYY-MM-DD)
    #[arg(long = "min-date", default_value = DEFAULT_MIN_DATE, value_parser = parse_date_arg)]
    pub min_date: NaiveDate,

    /// Reporting window end, exclusive (YYYY-MM-DD)
    #[arg(long = "end-date", default_value = DEFAULT_END_DATE, value_parser = parse_date_arg)]
    pub end_date: NaiveDate,

    /// Hide the most recent N days of enabled and event data
    #[arg(long = "freshness-days", default_value_t = DEFAULT_FRESHNESS_DAYS)]
    pub freshness_days: u32,

    /// Timeout for each list or fetch call (supports ms/s/m/h)
    #[arg(long = "fetch-timeout", default_value = DEFAULT_FETCH_TIMEOUT, value_parser = parse_duration_arg)]
    pub fetch_timeout: Duration,

    /// Barrier policy: all-succeed or all-settled
    #[arg(long = "join-policy", default_value = "all-settled", value_parser = parse_join_policy)]
    pub join_policy: JoinPolicy,

    /// Directory for rendered charts
    #[arg(long = "charts-path", default_value_t = default_charts_path())]
    pub charts_path: String,

    /// Skip chart rendering
    #[arg(long = "no-charts")]
    pub no_charts: bool,

    /// Write the published series to a JSON file
    #[arg(long = "export-json")]
    pub export_json: Option<String>,

    /// Print summary totals after each refresh
    #[arg(long)]
    pub summary: bool,

    /// Enable debug logging
    #[arg(long, short)]
    pub verbose: bool,

    /// Channel map from the config file; the built-in map when unset.
    #[arg(skip)]
    pub channel_map: Option<BTreeMap<String, Vec<String>>>,

    /// Measure names from the config file; the built-in names when unset.
    #[arg(skip)]
    pub measures: Option<BTreeMap<String, MeasureKind>>,
}

/// Where telemetry is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceChoice {
    File(PathBuf),
    Url(String),
}

impl DashArgs {
    /// # Errors
    ///
    /// Returns an error when the reporting window is empty or inverted.
    pub fn threshold_config(&self) -> Result<ThresholdConfig, ValidationError> {
        if self.min_date >= self.end_date {
            return Err(ValidationError::DateWindowInverted {
                min_date: self.min_date.to_string(),
                end_date: self.end_date.to_string(),
            });
        }
        Ok(ThresholdConfig {
            min_volume: self.min_volume,
            min_date: self.min_date,
            end_date: self.end_date,
            freshness_days: self.freshness_days,
        })
    }

    /// # Errors
    ///
    /// Returns an error when a configured channel lists no versions.
    pub fn channel_map(&self) -> Result<ChannelMap, ValidationError> {
        self.channel_map.as_ref().map_or_else(
            || Ok(ChannelMap::default()),
            |channels| ChannelMap::try_new(channels.clone()),
        )
    }

    /// # Errors
    ///
    /// Returns an error when configured measure names do not map each kind exactly once.
    pub fn registry(&self) -> Result<MeasureRegistry, ValidationError> {
        self.measures.as_ref().map_or_else(
            || Ok(MeasureRegistry::default()),
            |measures| MeasureRegistry::try_new(measures.clone()),
        )
    }

    /// # Errors
    ///
    /// Returns an error when neither or both sources are set.
    pub fn source_choice(&self) -> Result<SourceChoice, ValidationError> {
        match (self.source_file.as_ref(), self.source_url.as_ref()) {
            (Some(_), Some(_)) => Err(ValidationError::ConflictingSources),
            (Some(path), None) => Ok(SourceChoice::File(PathBuf::from(path))),
            (None, Some(url)) => Ok(SourceChoice::Url(url.clone())),
            (None, None) => Err(ValidationError::MissingSource),
        }
    }

    /// # Errors
    ///
    /// Returns an error when thresholds or the channel map are invalid.
    pub fn orchestrator_config(&self) -> Result<OrchestratorConfig, ValidationError> {
        Ok(OrchestratorConfig {
            channels: self.channel_map()?,
            thresholds: self.threshold_config()?,
            join_policy: self.join_policy,
        })
    }
}
