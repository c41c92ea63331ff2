use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{DashArgs, parse_date};
use crate::error::{ConfigError, ValidationError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments.
///
/// Values given explicitly on the command line win over the config file.
///
/// # Errors
///
/// Returns an error when config values are invalid or conflict with each other.
pub fn apply_config(
    args: &mut DashArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> Result<(), ConfigError> {
    if config.source_file.is_some() && config.source_url.is_some() {
        return Err(ConfigError::Conflict {
            left: "source_file",
            right: "source_url",
        });
    }

    if !is_cli(matches, "min_volume")
        && let Some(min_volume) = config.min_volume
    {
        args.min_volume = min_volume;
    }

    if !is_cli(matches, "min_date")
        && let Some(min_date) = config.min_date.as_deref()
    {
        args.min_date = parse_date(min_date).map_err(|err| invalid("min_date", err))?;
    }

    if !is_cli(matches, "end_date")
        && let Some(end_date) = config.end_date.as_deref()
    {
        args.end_date = parse_date(end_date).map_err(|err| invalid("end_date", err))?;
    }

    if !is_cli(matches, "freshness_days")
        && let Some(days) = config.freshness_days
    {
        args.freshness_days = days;
    }

    if !is_cli(matches, "fetch_timeout")
        && let Some(timeout) = config.fetch_timeout.as_ref()
    {
        args.fetch_timeout = timeout
            .to_duration()
            .map_err(|err| invalid("fetch_timeout", err))?;
    }

    if !is_cli(matches, "join_policy")
        && let Some(policy) = config.join_policy
    {
        args.join_policy = policy;
    }

    if let Some(channels) = config.channels.as_ref() {
        if channels.is_empty() {
            return Err(invalid("channels", ValidationError::NoChannels));
        }
        args.channel_map = Some(channels.clone());
    }

    if let Some(measures) = config.measures.as_ref() {
        args.measures = Some(measures.clone());
    }

    let cli_source = is_cli(matches, "source_file") || is_cli(matches, "source_url");
    if !cli_source {
        if let Some(path) = config.source_file.clone() {
            args.source_file = Some(path);
        }
        if let Some(url) = config.source_url.clone() {
            args.source_url = Some(url);
        }
    }

    if !is_cli(matches, "charts_path")
        && let Some(path) = config.charts_path.clone()
    {
        args.charts_path = path;
    }

    if !is_cli(matches, "no_charts")
        && let Some(no_charts) = config.no_charts
    {
        args.no_charts = no_charts;
    }

    if !is_cli(matches, "export_json")
        && let Some(path) = config.export_json.clone()
    {
        args.export_json = Some(path);
    }

    if !is_cli(matches, "summary")
        && let Some(summary) = config.summary
    {
        args.summary = summary;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

const fn invalid(field: &'static str, source: ValidationError) -> ConfigError {
    ConfigError::InvalidField { field, source }
}
