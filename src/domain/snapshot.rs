// Snapshot domain model
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown stat key: {0}")]
pub struct StatKeyError(pub String);

/// Numeric stats tracked per character snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatKey {
    Level,
    TotalLevel,
    Xp,
    XpPercent,
    PlaytimeHours,
    MobsKilled,
    ChestsFound,
    BlocksWalked,
    ItemsIdentified,
    Logins,
    Deaths,
    Discoveries,
    ContentCompletion,
    Wars,
    PvpKills,
    PvpDeaths,
    DungeonsTotal,
    RaidsTotal,
    WorldEvents,
    Caves,
    Lootruns,
    QuestsCount,
}

impl StatKey {
    pub const ALL: [StatKey; 22] = [
        StatKey::Level,
        StatKey::TotalLevel,
        StatKey::Xp,
        StatKey::XpPercent,
        StatKey::PlaytimeHours,
        StatKey::MobsKilled,
        StatKey::ChestsFound,
        StatKey::BlocksWalked,
        StatKey::ItemsIdentified,
        StatKey::Logins,
        StatKey::Deaths,
        StatKey::Discoveries,
        StatKey::ContentCompletion,
        StatKey::Wars,
        StatKey::PvpKills,
        StatKey::PvpDeaths,
        StatKey::DungeonsTotal,
        StatKey::RaidsTotal,
        StatKey::WorldEvents,
        StatKey::Caves,
        StatKey::Lootruns,
        StatKey::QuestsCount,
    ];

    /// Cumulative counters summarised per play session
    pub const SESSION_COUNTERS: [StatKey; 7] = [
        StatKey::MobsKilled,
        StatKey::ChestsFound,
        StatKey::BlocksWalked,
        StatKey::DungeonsTotal,
        StatKey::QuestsCount,
        StatKey::Caves,
        StatKey::Deaths,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatKey::Level => "level",
            StatKey::TotalLevel => "total_level",
            StatKey::Xp => "xp",
            StatKey::XpPercent => "xp_percent",
            StatKey::PlaytimeHours => "playtime_hours",
            StatKey::MobsKilled => "mobs_killed",
            StatKey::ChestsFound => "chests_found",
            StatKey::BlocksWalked => "blocks_walked",
            StatKey::ItemsIdentified => "items_identified",
            StatKey::Logins => "logins",
            StatKey::Deaths => "deaths",
            StatKey::Discoveries => "discoveries",
            StatKey::ContentCompletion => "content_completion",
            StatKey::Wars => "wars",
            StatKey::PvpKills => "pvp_kills",
            StatKey::PvpDeaths => "pvp_deaths",
            StatKey::DungeonsTotal => "dungeons_total",
            StatKey::RaidsTotal => "raids_total",
            StatKey::WorldEvents => "world_events",
            StatKey::Caves => "caves",
            StatKey::Lootruns => "lootruns",
            StatKey::QuestsCount => "quests_count",
        }
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatKey {
    type Err = StatKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| StatKeyError(s.to_string()))
    }
}

/// A point-in-time stat record for one character.
///
/// `valid_from` is `None` when the source instant could not be parsed; such
/// snapshots carry no usable timing and are skipped by every pipeline stage.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    pub valid_from: Option<DateTime<Utc>>,
    pub stats: HashMap<StatKey, f64>,
}

impl Snapshot {
    pub fn new(valid_from: Option<DateTime<Utc>>, stats: HashMap<StatKey, f64>) -> Self {
        Self { valid_from, stats }
    }

    pub fn at(valid_from: DateTime<Utc>) -> Self {
        Self::new(Some(valid_from), HashMap::new())
    }

    pub fn with_stat(mut self, key: StatKey, value: f64) -> Self {
        self.stats.insert(key, value);
        self
    }

    pub fn stat(&self, key: StatKey) -> Option<f64> {
        self.stats.get(&key).copied()
    }
}

/// Snapshots with a usable instant, sorted ascending. Sorting is stable, so
/// snapshots sharing an instant keep their input order.
pub fn timed_snapshots(snapshots: &[Snapshot]) -> Vec<(DateTime<Utc>, &Snapshot)> {
    let mut timed: Vec<_> = snapshots
        .iter()
        .filter_map(|s| s.valid_from.map(|t| (t, s)))
        .collect();
    timed.sort_by_key(|(t, _)| *t);
    timed
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_stat_key_round_trips_through_wire_name() {
        for key in StatKey::ALL {
            assert_eq!(key.as_str().parse::<StatKey>(), Ok(key));
        }
        assert_eq!(
            "mana".parse::<StatKey>(),
            Err(StatKeyError("mana".to_string()))
        );
    }

    #[test]
    fn test_timed_snapshots_sorts_and_drops_untimed() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2024, 1, 1, 11, 0, 0).unwrap();
        let snapshots = vec![
            Snapshot::at(t1).with_stat(StatKey::Level, 2.0),
            Snapshot::default(),
            Snapshot::at(t0).with_stat(StatKey::Level, 1.0),
        ];

        let timed = timed_snapshots(&snapshots);
        assert_eq!(timed.len(), 2);
        assert_eq!(timed[0].0, t0);
        assert_eq!(timed[1].1.stat(StatKey::Level), Some(2.0));
    }
}
