use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};

/// Days of recent data hidden from the enabled and event series.
pub const DEFAULT_FRESHNESS_DAYS: u32 = 7;
/// Sample-size floor for the shield series.
pub const DEFAULT_MIN_VOLUME: u64 = 1000;

/// Threshold settings as configured, before they are pinned to a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdConfig {
    pub min_volume: u64,
    pub min_date: NaiveDate,
    pub end_date: NaiveDate,
    pub freshness_days: u32,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            min_volume: DEFAULT_MIN_VOLUME,
            min_date: NaiveDate::from_ymd_opt(2014, 12, 24).unwrap_or(NaiveDate::MIN),
            end_date: NaiveDate::from_ymd_opt(2015, 1, 1).unwrap_or(NaiveDate::MIN),
            freshness_days: DEFAULT_FRESHNESS_DAYS,
        }
    }
}

/// Thresholds resolved for a single refresh.
///
/// `min_date` and `end_date` bound the reporting window used for summary
/// totals (and the shield series floor). `freshness_cutoff` is the exact
/// instant `now - freshness_days`; enabled and event days at or after it are
/// too recent to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub min_volume: u64,
    pub min_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub freshness_cutoff: DateTime<Utc>,
}

impl Thresholds {
    #[must_use]
    pub fn resolve(config: &ThresholdConfig, now: DateTime<Utc>) -> Self {
        let window = TimeDelta::try_days(i64::from(config.freshness_days)).unwrap_or(TimeDelta::MAX);
        let cutoff = now
            .checked_sub_signed(window)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Self {
            min_volume: config.min_volume,
            min_date: config.min_date.and_time(NaiveTime::MIN).and_utc(),
            end_date: config.end_date.and_time(NaiveTime::MIN).and_utc(),
            freshness_cutoff: cutoff,
        }
    }

    /// True when `day` is old enough to have complete submissions.
    #[must_use]
    pub fn is_settled(&self, day: DateTime<Utc>) -> bool {
        day < self.freshness_cutoff
    }

    /// True when `day` lies in the `[min_date, end_date)` reporting window.
    #[must_use]
    pub fn in_window(&self, day: DateTime<Utc>) -> bool {
        day >= self.min_date && day < self.end_date
    }
}

/// Truncates a timestamp to midnight UTC of the same calendar day.
#[must_use]
pub fn day_start(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    timestamp.date_naive().and_time(NaiveTime::MIN).and_utc()
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a fixed instant; used to make freshness filtering reproducible.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
