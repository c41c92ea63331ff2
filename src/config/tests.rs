use std::time::Duration;

use chrono::NaiveDate;
use clap::{CommandFactory, FromArgMatches};
use tempfile::tempdir;

use super::types::{ConfigFile, DurationValue};
use super::{apply_config, load_config_file};
use crate::args::DashArgs;
use crate::domain::MeasureKind;
use crate::error::{AppError, ConfigError, ValidationError};
use crate::orchestrator::JoinPolicy;

fn parse_with_matches(argv: &[&str]) -> Result<(DashArgs, clap::ArgMatches), String> {
    let matches = DashArgs::command()
        .try_get_matches_from(argv)
        .map_err(|err| format!("parse failed: {}", err))?;
    let args = DashArgs::from_arg_matches(&matches)
        .map_err(|err| format!("from_arg_matches failed: {}", err))?;
    Ok((args, matches))
}

#[test]
fn parse_toml_config() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("tpdash.toml");
    let content = r#"
min_volume = 500
min_date = "2014-12-20"
fetch_timeout = "45s"
join_policy = "all-succeed"
source_file = "dump.json"

[channels]
release = ["release/34", "release/35"]

[measures]
SHIELD_V2 = "shield"
ENABLED_V2 = "enabled"
EVENTS_V2 = "events"
"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| err.to_string())?;
    if config.min_volume != Some(500) || config.join_policy != Some(JoinPolicy::AllSucceed) {
        return Err("Unexpected scalar fields".to_owned());
    }
    let versions = config
        .channels
        .as_ref()
        .and_then(|channels| channels.get("release"))
        .ok_or_else(|| "Expected release channel".to_owned())?;
    if versions.len() != 2 {
        return Err(format!("Unexpected versions {:?}", versions));
    }
    if config
        .measures
        .as_ref()
        .and_then(|measures| measures.get("EVENTS_V2"))
        != Some(&MeasureKind::Events)
    {
        return Err("Expected EVENTS_V2 mapping".to_owned());
    }
    Ok(())
}

#[test]
fn parse_json_config_with_numeric_timeout() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("tpdash.json");
    let content = r#"{ "fetch_timeout": 12, "no_charts": true, "summary": true }"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| err.to_string())?;
    let timeout = config
        .fetch_timeout
        .as_ref()
        .ok_or_else(|| "Expected fetch_timeout".to_owned())?
        .to_duration()
        .map_err(|err| err.to_string())?;
    if timeout != Duration::from_secs(12) {
        return Err(format!("Unexpected timeout {:?}", timeout));
    }
    if config.no_charts != Some(true) || config.summary != Some(true) {
        return Err("Expected flags to be set".to_owned());
    }
    Ok(())
}

#[test]
fn unsupported_extension_is_rejected() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("tpdash.yaml");
    std::fs::write(&path, "min_volume: 1").map_err(|err| format!("write failed: {}", err))?;
    match load_config_file(&path) {
        Err(AppError::Config(ConfigError::UnsupportedExtension { ext })) if ext == "yaml" => {
            Ok(())
        }
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Expected unsupported extension".to_owned()),
    }
}

#[test]
fn apply_config_fills_unset_fields() -> Result<(), String> {
    let (mut args, matches) = parse_with_matches(&["tpdash"])?;
    let config = ConfigFile {
        min_volume: Some(250),
        end_date: Some("2015-02-01".to_owned()),
        fetch_timeout: Some(DurationValue::Text("2m".to_owned())),
        join_policy: Some(JoinPolicy::AllSucceed),
        source_url: Some("http://localhost/api".to_owned()),
        export_json: Some("series.json".to_owned()),
        ..ConfigFile::default()
    };
    apply_config(&mut args, &matches, &config).map_err(|err| err.to_string())?;

    if args.min_volume != 250
        || Some(args.end_date) != NaiveDate::from_ymd_opt(2015, 2, 1)
        || args.fetch_timeout != Duration::from_secs(120)
        || args.join_policy != JoinPolicy::AllSucceed
    {
        return Err(format!("Config not applied: {:?}", args));
    }
    if args.source_url.as_deref() != Some("http://localhost/api")
        || args.export_json.as_deref() != Some("series.json")
    {
        return Err("Expected source and export from config".to_owned());
    }
    Ok(())
}

#[test]
fn apply_config_keeps_cli_values() -> Result<(), String> {
    let (mut args, matches) = parse_with_matches(&[
        "tpdash",
        "--min-volume",
        "10",
        "--source-file",
        "local.json",
    ])?;
    let config = ConfigFile {
        min_volume: Some(250),
        source_url: Some("http://localhost/api".to_owned()),
        ..ConfigFile::default()
    };
    apply_config(&mut args, &matches, &config).map_err(|err| err.to_string())?;

    if args.min_volume != 10 {
        return Err("CLI min_volume must win".to_owned());
    }
    if args.source_file.as_deref() != Some("local.json") || args.source_url.is_some() {
        return Err("CLI source must replace the configured one".to_owned());
    }
    Ok(())
}

#[test]
fn apply_config_rejects_invalid_fields() -> Result<(), String> {
    let (mut args, matches) = parse_with_matches(&["tpdash"])?;
    let config = ConfigFile {
        min_date: Some("24/12/2014".to_owned()),
        ..ConfigFile::default()
    };
    match apply_config(&mut args, &matches, &config) {
        Err(ConfigError::InvalidField {
            field: "min_date",
            source: ValidationError::InvalidDate { .. },
        }) => {}
        other => return Err(format!("Expected InvalidField, got {:?}", other)),
    }

    let config = ConfigFile {
        source_file: Some("dump.json".to_owned()),
        source_url: Some("http://localhost".to_owned()),
        ..ConfigFile::default()
    };
    match apply_config(&mut args, &matches, &config) {
        Err(ConfigError::Conflict { .. }) => Ok(()),
        other => Err(format!("Expected Conflict, got {:?}", other)),
    }
}

#[test]
fn configured_channels_and_measures_reach_args() -> Result<(), String> {
    let (mut args, matches) = parse_with_matches(&["tpdash"])?;
    let config = ConfigFile {
        channels: Some(
            [("release".to_owned(), vec!["release/35".to_owned()])]
                .into_iter()
                .collect(),
        ),
        ..ConfigFile::default()
    };
    apply_config(&mut args, &matches, &config).map_err(|err| err.to_string())?;
    let channels = args.channel_map().map_err(|err| err.to_string())?;
    if channels.versions("release") != Some(vec!["release/35".to_owned()].as_slice()) {
        return Err("Expected configured channel map".to_owned());
    }
    if channels.versions("nightly").is_some() {
        return Err("Configured map must replace the built-in one".to_owned());
    }
    Ok(())
}
