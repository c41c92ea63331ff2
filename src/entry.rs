use std::sync::Arc;

use clap::{ArgMatches, CommandFactory, FromArgMatches};
use tracing::{info, warn};

use crate::args::{DashArgs, SourceChoice};
use crate::config::{apply_config, load_config};
use crate::domain::{ChannelMap, SystemClock};
use crate::error::{AppError, AppResult, OrchestratorError};
use crate::orchestrator::{RefreshOutcome, RefreshReport, spawn_orchestrator};
use crate::sinks::{ChartSink, JsonSink, MultiSink};
use crate::source::{FileSource, HttpSource, MeasureFetcher, MetricsSource};

/// Parses arguments, applies the config file, and refreshes every requested
/// channel in order.
///
/// # Errors
///
/// Returns an error when arguments or config are invalid, the source cannot
/// be opened, or any refresh ends without publishing.
pub fn run() -> AppResult<()> {
    let (args, matches) = parse_args()?;
    let args = resolve_args(args, &matches)?;

    crate::logger::init_logging(args.verbose);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args))
}

fn parse_args() -> AppResult<(DashArgs, ArgMatches)> {
    let matches = DashArgs::command().get_matches();
    let args = DashArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

fn resolve_args(mut args: DashArgs, matches: &ArgMatches) -> AppResult<DashArgs> {
    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, matches, &config)?;
    }
    Ok(args)
}

async fn run_async(args: DashArgs) -> AppResult<()> {
    let config = args.orchestrator_config()?;
    ensure_known_channels(&args.channels, &config.channels)?;
    let registry = args.registry()?;

    let source: Arc<dyn MetricsSource> = match args.source_choice()? {
        SourceChoice::File(path) => Arc::new(FileSource::load(&path).await?),
        SourceChoice::Url(url) => Arc::new(HttpSource::new(&url, args.fetch_timeout)?),
    };
    let fetcher = MeasureFetcher::new(source, registry, args.fetch_timeout);
    let sink = build_sink(&args);
    if sink.is_empty() {
        warn!("No output selected; refreshed series will only be logged.");
    }

    let mut handle = spawn_orchestrator(fetcher, sink, config, Arc::new(SystemClock));
    let mut first_failure = None;
    for channel in &args.channels {
        let outcome = handle.refresh(channel).await?;
        match &outcome {
            RefreshOutcome::Published(report) => {
                info!(
                    "{} published with {} failed branch(es)",
                    channel,
                    report.failures.len()
                );
                if args.summary {
                    print_report(report);
                }
            }
            RefreshOutcome::Failed(report) => {
                if args.summary {
                    print_report(report);
                }
                if first_failure.is_none() {
                    first_failure = Some(OrchestratorError::RefreshFailed {
                        channel: channel.clone(),
                        failures: report.failures.len(),
                    });
                }
            }
            RefreshOutcome::Superseded(_) | RefreshOutcome::Rejected { .. } => {
                warn!("Refresh of {} did not complete: {:?}", channel, outcome);
                if first_failure.is_none() {
                    first_failure = Some(OrchestratorError::RefreshFailed {
                        channel: channel.clone(),
                        failures: 0,
                    });
                }
            }
        }
    }
    handle.shutdown().await?;

    first_failure.map_or(Ok(()), |err| Err(AppError::orchestrator(err)))
}

fn ensure_known_channels(requested: &[String], channels: &ChannelMap) -> AppResult<()> {
    if let Some(unknown) = requested
        .iter()
        .find(|channel| channels.versions(channel).is_none())
    {
        return Err(AppError::orchestrator(OrchestratorError::UnknownChannel {
            channel: unknown.clone(),
            known: channels.describe(),
        }));
    }
    Ok(())
}

fn build_sink(args: &DashArgs) -> MultiSink {
    let mut sink = MultiSink::new();
    if !args.no_charts {
        sink.push(Box::new(ChartSink::new(&args.charts_path)));
    }
    if let Some(path) = args.export_json.as_deref() {
        sink.push(Box::new(JsonSink::new(path)));
    }
    sink
}

fn print_report(report: &RefreshReport) {
    println!(
        "Channel {} (generation {}): {} versions, {}/{} fetches completed, {} malformed histograms",
        report.channel,
        report.generation,
        report.versions,
        report.fetches_completed,
        report.fetches_dispatched,
        report.malformed_histograms
    );
    for failure in &report.failures {
        let branch = failure.measure.as_deref().map_or_else(
            || failure.version.clone(),
            |measure| format!("{} {}", failure.version, measure),
        );
        println!("  failed {}: {}", branch, failure.error);
    }
    for line in report.summary.lines() {
        println!("  {}", line);
    }
    if let Some(err) = report.sink_error.as_deref() {
        println!("  sink error: {}", err);
    }
}
