// Time range resolution for charts and session tables
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("unknown range key: {0}")]
    UnknownKey(String),
    #[error("custom range requires explicit from/to bounds")]
    MissingCustomBounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeKey {
    Today,
    LastHour,
    Last3Hours,
    Last6Hours,
    Last24Hours,
    Last3Days,
    Last7Days,
    Last30Days,
    Custom,
}

/// Presets ordered by span, used to pick a tick for custom ranges
const PRESETS: [RangeKey; 7] = [
    RangeKey::LastHour,
    RangeKey::Last3Hours,
    RangeKey::Last6Hours,
    RangeKey::Last24Hours,
    RangeKey::Last3Days,
    RangeKey::Last7Days,
    RangeKey::Last30Days,
];

impl RangeKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            RangeKey::Today => "today",
            RangeKey::LastHour => "1h",
            RangeKey::Last3Hours => "3h",
            RangeKey::Last6Hours => "6h",
            RangeKey::Last24Hours => "24h",
            RangeKey::Last3Days => "3d",
            RangeKey::Last7Days => "7d",
            RangeKey::Last30Days => "30d",
            RangeKey::Custom => "custom",
        }
    }

    /// Look-back span for rolling presets
    fn span(&self) -> Option<TimeDelta> {
        match self {
            RangeKey::LastHour => Some(TimeDelta::hours(1)),
            RangeKey::Last3Hours => Some(TimeDelta::hours(3)),
            RangeKey::Last6Hours => Some(TimeDelta::hours(6)),
            RangeKey::Last24Hours => Some(TimeDelta::hours(24)),
            RangeKey::Last3Days => Some(TimeDelta::days(3)),
            RangeKey::Last7Days => Some(TimeDelta::days(7)),
            RangeKey::Last30Days => Some(TimeDelta::days(30)),
            RangeKey::Today | RangeKey::Custom => None,
        }
    }

    /// Axis tick interval; custom ranges are handled by `custom_tick`
    pub fn tick_interval(&self) -> TimeDelta {
        match self {
            RangeKey::Today => TimeDelta::hours(2),
            RangeKey::LastHour => TimeDelta::minutes(10),
            RangeKey::Last3Hours => TimeDelta::minutes(30),
            RangeKey::Last6Hours => TimeDelta::hours(1),
            RangeKey::Last24Hours => TimeDelta::hours(3),
            RangeKey::Last3Days => TimeDelta::hours(12),
            RangeKey::Last7Days => TimeDelta::days(1),
            RangeKey::Last30Days | RangeKey::Custom => TimeDelta::days(3),
        }
    }
}

impl FromStr for RangeKey {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "today" => Ok(RangeKey::Today),
            "1h" => Ok(RangeKey::LastHour),
            "3h" => Ok(RangeKey::Last3Hours),
            "6h" => Ok(RangeKey::Last6Hours),
            "24h" => Ok(RangeKey::Last24Hours),
            "3d" => Ok(RangeKey::Last3Days),
            "7d" => Ok(RangeKey::Last7Days),
            "30d" => Ok(RangeKey::Last30Days),
            "custom" => Ok(RangeKey::Custom),
            other => Err(RangeError::UnknownKey(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub tick_interval: TimeDelta,
}

/// Resolve `key` against the current local time.
pub fn resolve_range(
    key: RangeKey,
    custom: Option<(DateTime<Utc>, DateTime<Utc>)>,
) -> Result<ResolvedRange, RangeError> {
    resolve_range_at(key, custom, Local::now())
}

/// Resolve `key` against an explicit `now`. The time zone of `now` defines
/// what "local midnight" means for `RangeKey::Today`.
///
/// Custom bounds are passed through untouched: rejecting `from >= to` is the
/// caller's job.
pub fn resolve_range_at<Tz: TimeZone>(
    key: RangeKey,
    custom: Option<(DateTime<Utc>, DateTime<Utc>)>,
    now: DateTime<Tz>,
) -> Result<ResolvedRange, RangeError> {
    let to = now.with_timezone(&Utc);

    match key {
        RangeKey::Custom => {
            let (from, to) = custom.ok_or(RangeError::MissingCustomBounds)?;
            Ok(ResolvedRange {
                from,
                to,
                tick_interval: custom_tick(to - from),
            })
        }
        RangeKey::Today => {
            let midnight = now
                .date_naive()
                .and_hms_opt(0, 0, 0)
                .and_then(|naive| naive.and_local_timezone(now.timezone()).earliest())
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or(to - TimeDelta::hours(24));
            let from = if midnight < to {
                midnight
            } else {
                to - TimeDelta::minutes(1)
            };
            Ok(ResolvedRange {
                from,
                to,
                tick_interval: key.tick_interval(),
            })
        }
        preset => {
            let span = preset.span().unwrap_or(TimeDelta::hours(24));
            Ok(ResolvedRange {
                from: to - span,
                to,
                tick_interval: preset.tick_interval(),
            })
        }
    }
}

fn custom_tick(span: TimeDelta) -> TimeDelta {
    PRESETS
        .iter()
        .find(|preset| preset.span().is_some_and(|s| span <= s))
        .map(|preset| preset.tick_interval())
        .unwrap_or(RangeKey::Last30Days.tick_interval())
}
