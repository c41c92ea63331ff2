use chrono::{DateTime, TimeZone, Utc};
use rand::Rng;

use super::*;
use crate::domain::{ThresholdConfig, Thresholds};
use crate::histogram::{Histogram, HistogramBucket, HistogramEvolution};
use crate::series::SeriesId;

fn at(year: i32, month: u32, day: u32, hour: u32) -> Result<DateTime<Utc>, String> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .ok_or_else(|| "invalid timestamp".to_owned())
}

fn thresholds_at(now: DateTime<Utc>) -> Thresholds {
    Thresholds::resolve(&ThresholdConfig::default(), now)
}

fn evolution(points: &[(DateTime<Utc>, &[u64])]) -> HistogramEvolution {
    points
        .iter()
        .map(|(date, counts)| (*date, Histogram::from_counts(counts)))
        .collect()
}

fn close(left: f64, right: f64) -> bool {
    (left - right).abs() < 1e-5
}

fn single_value(context: &RefreshContext, id: SeriesId) -> Result<f64, String> {
    match context.accumulators.get(id) {
        [point] => Ok(point.value),
        other => Err(format!("Expected one {} point, got {}", id, other.len())),
    }
}

#[test]
fn shield_reference_scenario() -> Result<(), String> {
    let thresholds = thresholds_at(at(2015, 3, 1, 0)?);
    let mut context = RefreshContext::new();

    let excluded = evolution(&[(at(2014, 12, 28, 7)?, &[100, 400, 450, 50])]);
    let stats = reduce_shield(&excluded, &thresholds, &mut context);
    if stats.excluded != 1 || !context.accumulators.is_empty() {
        return Err("Volume equal to min_volume must be excluded".to_owned());
    }

    let included = evolution(&[(at(2014, 12, 28, 7)?, &[150, 400, 450, 50])]);
    let stats = reduce_shield(&included, &thresholds, &mut context);
    if stats.emitted != 1 {
        return Err(format!("Expected one emitted date, got {:?}", stats));
    }

    let blocked = single_value(&context, SeriesId::ShieldRateBlocked)?;
    let loaded = single_value(&context, SeriesId::ShieldRateLoaded)?;
    let other = single_value(&context, SeriesId::ShieldRateNotShownOrMixed)?;
    if !close(blocked, 0.42857) || !close(loaded, 0.38095) || !close(other, 0.19048) {
        return Err(format!(
            "Unexpected rates: blocked={} loaded={} other={}",
            blocked, loaded, other
        ));
    }
    if !close(single_value(&context, SeriesId::ShieldVolumeNotShownOrMixed)?, 200.0)
        || !close(single_value(&context, SeriesId::ShieldVolumeBlocked)?, 450.0)
    {
        return Err("Unexpected shield volumes".to_owned());
    }

    let point = context
        .accumulators
        .get(SeriesId::ShieldRateLoaded)
        .first()
        .ok_or_else(|| "Missing point".to_owned())?;
    if point.timestamp_ms != at(2014, 12, 28, 0)?.timestamp_millis() {
        return Err("Timestamp must be truncated to the day".to_owned());
    }
    if context.summary.shield.loads != 1050 || context.summary.shield.blocked != 450 {
        return Err(format!("Unexpected totals: {:?}", context.summary.shield));
    }
    Ok(())
}

#[test]
fn shield_volume_floor_is_exclusive() -> Result<(), String> {
    let thresholds = thresholds_at(at(2015, 3, 1, 0)?);
    let mut context = RefreshContext::new();
    let at_floor = evolution(&[(at(2015, 1, 5, 0)?, &[0, 1000, 0, 0])]);
    let above_floor = evolution(&[(at(2015, 1, 6, 0)?, &[0, 1001, 0, 0])]);

    reduce_shield(&at_floor, &thresholds, &mut context);
    if !context.accumulators.is_empty() {
        return Err("Volume == min_volume must not emit".to_owned());
    }
    reduce_shield(&above_floor, &thresholds, &mut context);
    if context.accumulators.get(SeriesId::ShieldRateLoaded).len() != 1 {
        return Err("Volume == min_volume + 1 must emit".to_owned());
    }
    if context.summary.shield.loads != 0 {
        return Err("Dates after end_date must not feed totals".to_owned());
    }
    Ok(())
}

#[test]
fn shield_skips_dates_up_to_min_date() -> Result<(), String> {
    let thresholds = thresholds_at(at(2015, 3, 1, 0)?);
    let mut context = RefreshContext::new();
    let data = evolution(&[
        (at(2014, 12, 24, 9)?, &[500, 500, 500, 500]),
        (at(2014, 12, 25, 9)?, &[500, 500, 500, 500]),
    ]);
    let stats = reduce_shield(&data, &thresholds, &mut context);
    if stats.emitted != 1 || stats.excluded != 1 {
        return Err(format!("Unexpected stats: {:?}", stats));
    }
    Ok(())
}

#[test]
fn enabled_freshness_boundary() -> Result<(), String> {
    let now = at(2015, 2, 10, 0)?;
    let thresholds = thresholds_at(now);
    let mut context = RefreshContext::new();
    let data = evolution(&[
        (at(2015, 2, 3, 15)?, &[10, 30]),
        (at(2015, 2, 2, 15)?, &[10, 30]),
    ]);
    reduce_enabled(&data, &thresholds, &mut context);
    match context.accumulators.get(SeriesId::EnabledRate) {
        [point] => {
            if point.timestamp_ms != at(2015, 2, 2, 0)?.timestamp_millis() {
                return Err("Only the eight-day-old sample may survive".to_owned());
            }
            if !close(point.value, 0.75) {
                return Err(format!("Unexpected enabled rate {}", point.value));
            }
            Ok(())
        }
        other => Err(format!("Expected one enabled point, got {}", other.len())),
    }
}

#[test]
fn enabled_keeps_day_older_than_cutoff_instant() -> Result<(), String> {
    let thresholds = thresholds_at(at(2015, 2, 10, 15)?);
    let expected_ms = at(2015, 2, 3, 0)?.timestamp_millis();
    let mut context = RefreshContext::new();
    let data = evolution(&[
        (at(2015, 2, 3, 0)?, &[10, 30]),
        (at(2015, 2, 4, 0)?, &[10, 30]),
    ]);
    let stats = reduce_enabled(&data, &thresholds, &mut context);
    if stats.emitted != 1 || stats.excluded != 1 {
        return Err(format!("Unexpected stats {:?}", stats));
    }
    match context.accumulators.get(SeriesId::EnabledRate) {
        [point] if point.timestamp_ms == expected_ms => Ok(()),
        other => Err(format!("Expected the 2015-02-03 point, got {:?}", other)),
    }
}

#[test]
fn enabled_skips_zero_volume_days() -> Result<(), String> {
    let thresholds = thresholds_at(at(2015, 3, 1, 0)?);
    let mut context = RefreshContext::new();
    let data = evolution(&[(at(2015, 1, 10, 0)?, &[0, 0])]);
    let stats = reduce_enabled(&data, &thresholds, &mut context);
    if stats.excluded != 1 || !context.accumulators.is_empty() {
        return Err("Zero-volume enabled sample must be skipped".to_owned());
    }
    Ok(())
}

#[test]
fn enabled_totals_use_reporting_window() -> Result<(), String> {
    let thresholds = thresholds_at(at(2015, 3, 1, 0)?);
    let mut context = RefreshContext::new();
    let data = evolution(&[
        (at(2014, 12, 24, 0)?, &[1, 3]),
        (at(2014, 12, 31, 0)?, &[2, 2]),
        (at(2015, 1, 1, 0)?, &[5, 5]),
    ]);
    reduce_enabled(&data, &thresholds, &mut context);
    let totals = context.summary.enabled;
    if totals.sessions != 8 || totals.enabled_sessions != 5 {
        return Err(format!("Unexpected enabled totals: {:?}", totals));
    }
    if context.accumulators.get(SeriesId::EnabledRate).len() != 3 {
        return Err("Window must not filter displayed points".to_owned());
    }
    Ok(())
}

#[test]
fn events_publish_raw_click_counts() -> Result<(), String> {
    let thresholds = thresholds_at(at(2015, 3, 1, 0)?);
    let mut context = RefreshContext::new();
    let data = evolution(&[(at(2014, 12, 30, 4)?, &[900, 12, 3])]);
    reduce_events(&data, &thresholds, &mut context);
    if !close(single_value(&context, SeriesId::EventsDisabledClicks)?, 12.0)
        || !close(single_value(&context, SeriesId::EventsReenabledClicks)?, 3.0)
    {
        return Err("Unexpected event counts".to_owned());
    }
    let totals = context.summary.events;
    if totals.disabled_clicks != 12 || totals.reenabled_clicks != 3 {
        return Err(format!("Unexpected event totals: {:?}", totals));
    }
    Ok(())
}

#[test]
fn malformed_histogram_skips_only_its_date() -> Result<(), String> {
    let thresholds = thresholds_at(at(2015, 3, 1, 0)?);
    let mut context = RefreshContext::new();
    let mut data: Vec<(DateTime<Utc>, Histogram)> = vec![
        (at(2015, 1, 10, 0)?, Histogram::from_counts(&[1, 2, 3])),
        (at(2015, 1, 11, 0)?, Histogram::from_counts(&[1, 2, 3])),
    ];
    data.push((
        at(2015, 1, 12, 0)?,
        Histogram {
            buckets: vec![HistogramBucket { start: 0, count: 9 }],
        },
    ));
    let data: HistogramEvolution = data.into_iter().collect();

    let stats = reduce(crate::domain::MeasureKind::Events, &data, &thresholds, &mut context);
    if stats.malformed != 1 || stats.emitted != 2 {
        return Err(format!("Unexpected stats: {:?}", stats));
    }
    if context.malformed() != 1 {
        return Err("Malformed histogram must be counted".to_owned());
    }
    Ok(())
}

#[test]
fn emitted_rates_stay_within_unit_interval() -> Result<(), String> {
    let thresholds = thresholds_at(at(2015, 6, 1, 0)?);
    let mut rng = rand::thread_rng();
    let mut context = RefreshContext::new();
    for offset in 0..60u32 {
        let date = at(2015, 1, 1, 0)? + chrono::TimeDelta::days(i64::from(offset));
        let shield: Vec<u64> = (0..4).map(|_| rng.gen_range(0..2_000)).collect();
        let enabled: Vec<u64> = (0..2).map(|_| rng.gen_range(0..50)).collect();
        reduce_shield(&evolution(&[(date, &shield)]), &thresholds, &mut context);
        reduce_enabled(&evolution(&[(date, &enabled)]), &thresholds, &mut context);
    }
    for id in [
        SeriesId::ShieldRateNotShownOrMixed,
        SeriesId::ShieldRateLoaded,
        SeriesId::ShieldRateBlocked,
        SeriesId::EnabledRate,
    ] {
        if let Some(point) = context
            .accumulators
            .get(id)
            .iter()
            .find(|point| !(0.0..=1.0).contains(&point.value))
        {
            return Err(format!("{} emitted out-of-range rate {}", id, point.value));
        }
    }
    Ok(())
}

#[test]
fn summary_lines_skip_empty_sections() -> Result<(), String> {
    let mut totals = SummaryTotals::default();
    if !totals.lines().is_empty() {
        return Err("Empty totals must render nothing".to_owned());
    }
    totals.shield.add(100, 40, 50);
    let lines = totals.lines();
    if lines.first().map(String::as_str) != Some("Total loads: 100") || lines.len() != 3 {
        return Err(format!("Unexpected summary lines: {:?}", lines));
    }
    Ok(())
}
