// Play session detection from raw snapshot histories
use crate::domain::character::Series;
use crate::domain::snapshot::{timed_snapshots, Snapshot, StatKey};
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashSet;

pub const DEFAULT_SESSION_GAP_MINUTES: i64 = 60;
pub const DEFAULT_MIN_SESSION_MINUTES: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionParams {
    /// A gap strictly longer than this between two snapshots ends a session
    pub gap: TimeDelta,
    /// Sessions shorter than this are dropped
    pub min_duration: TimeDelta,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            gap: TimeDelta::minutes(DEFAULT_SESSION_GAP_MINUTES),
            min_duration: TimeDelta::minutes(DEFAULT_MIN_SESSION_MINUTES),
        }
    }
}

/// Non-negative counter gains over one session
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SessionDeltas {
    pub mobs_killed: f64,
    pub chests_found: f64,
    pub blocks_walked: f64,
    pub dungeons: f64,
    pub quests: f64,
    pub caves: f64,
    pub deaths: f64,
}

impl SessionDeltas {
    fn between(start: &Snapshot, end: &Snapshot) -> Self {
        let delta = |key| counter_delta(start, end, key);
        Self {
            mobs_killed: delta(StatKey::MobsKilled),
            chests_found: delta(StatKey::ChestsFound),
            blocks_walked: delta(StatKey::BlocksWalked),
            dungeons: delta(StatKey::DungeonsTotal),
            quests: delta(StatKey::QuestsCount),
            caves: delta(StatKey::Caves),
            deaths: delta(StatKey::Deaths),
        }
    }
}

/// Counter gain clamped at zero. A counter missing on either side counts as
/// no progress.
fn counter_delta(start: &Snapshot, end: &Snapshot, key: StatKey) -> f64 {
    match (start.stat(key), end.stat(key)) {
        (Some(from), Some(to)) => (to - from).max(0.0),
        _ => 0.0,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub character_id: String,
    pub character_name: String,
    pub color: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration: TimeDelta,
    pub start_level: Option<f64>,
    pub end_level: Option<f64>,
    pub deltas: SessionDeltas,
}

/// Sessions of all visible characters with the default gap and minimum
/// duration, most recent first.
pub fn compute_sessions(series: &[Series], visible: &HashSet<String>) -> Vec<Session> {
    compute_sessions_with(series, visible, &SessionParams::default())
}

pub fn compute_sessions_with(
    series: &[Series],
    visible: &HashSet<String>,
    params: &SessionParams,
) -> Vec<Session> {
    let mut sessions: Vec<Session> = series
        .iter()
        .filter(|s| visible.contains(&s.id))
        .flat_map(|s| segment_series(s, params))
        .collect();

    // Stable: ties keep character order.
    sessions.sort_by(|a, b| b.end.cmp(&a.end));
    sessions
}

/// Split one character's history at inactivity gaps and summarise each run.
pub fn segment_series(series: &Series, params: &SessionParams) -> Vec<Session> {
    let timed = timed_snapshots(&series.snapshots);
    let Some((first, _)) = timed.first() else {
        return Vec::new();
    };

    let mut runs: Vec<(usize, usize)> = Vec::new();
    let mut run_start = 0;
    let mut prev = *first;

    for (i, (t, _)) in timed.iter().enumerate().skip(1) {
        if *t - prev > params.gap {
            runs.push((run_start, i - 1));
            run_start = i;
        }
        prev = *t;
    }
    runs.push((run_start, timed.len() - 1));

    let sessions: Vec<Session> = runs
        .into_iter()
        .map(|(start_idx, end_idx)| {
            let (start, start_snapshot) = timed[start_idx];
            let (end, end_snapshot) = timed[end_idx];
            Session {
                character_id: series.id.clone(),
                character_name: series.name.clone(),
                color: series.color.clone(),
                start,
                end,
                duration: end - start,
                start_level: start_snapshot.stat(StatKey::Level),
                end_level: end_snapshot.stat(StatKey::Level),
                deltas: SessionDeltas::between(start_snapshot, end_snapshot),
            }
        })
        .filter(|session| session.duration >= params.min_duration)
        .collect();

    tracing::debug!(
        "Character {} has {} sessions from {} snapshots",
        series.id,
        sessions.len(),
        timed.len()
    );

    sessions
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + TimeDelta::minutes(minutes)
    }

    fn series(id: &str, minutes: &[i64]) -> Series {
        let snapshots = minutes
            .iter()
            .map(|m| {
                Snapshot::at(t(*m))
                    .with_stat(StatKey::Level, (*m / 10) as f64)
                    .with_stat(StatKey::MobsKilled, *m as f64)
            })
            .collect();
        Series::new(id.to_string(), id.to_uppercase(), "#abcdef".to_string(), snapshots)
    }

    fn visible(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn test_split_at_inactivity_gap() {
        let s = series("a", &[0, 10, 20, 200, 210, 220]);
        let sessions = segment_series(&s, &SessionParams::default());

        assert_eq!(sessions.len(), 2);
        assert_eq!((sessions[0].start, sessions[0].end), (t(0), t(20)));
        assert_eq!((sessions[1].start, sessions[1].end), (t(200), t(220)));
        assert_eq!(sessions[1].duration, TimeDelta::minutes(20));
        assert_eq!(sessions[1].deltas.mobs_killed, 20.0);
        assert_eq!(sessions[1].start_level, Some(20.0));
        assert_eq!(sessions[1].end_level, Some(22.0));
    }

    #[test]
    fn test_gap_equal_to_threshold_does_not_split() {
        let s = series("a", &[0, 60, 120]);
        let sessions = segment_series(&s, &SessionParams::default());
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].duration, TimeDelta::minutes(120));
    }

    #[test]
    fn test_unsorted_input_is_sorted_first() {
        let s = series("a", &[220, 0, 210, 20, 10, 200]);
        let sessions = segment_series(&s, &SessionParams::default());
        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].start, t(0));
    }

    #[test]
    fn test_short_sessions_are_dropped() {
        let params = SessionParams::default();
        assert!(segment_series(&series("a", &[0]), &params).is_empty());
        assert!(segment_series(&series("a", &[0, 9]), &params).is_empty());
        assert_eq!(segment_series(&series("a", &[0, 10]), &params).len(), 1);
        assert!(segment_series(&series("a", &[]), &params).is_empty());
    }

    #[test]
    fn test_negative_deltas_clamp_to_zero() {
        let s = Series::new(
            "a".into(),
            "A".into(),
            "#fff".into(),
            vec![
                Snapshot::at(t(0))
                    .with_stat(StatKey::Deaths, 12.0)
                    .with_stat(StatKey::ChestsFound, 4.0),
                Snapshot::at(t(30))
                    .with_stat(StatKey::Deaths, 3.0)
                    .with_stat(StatKey::ChestsFound, 9.0)
                    .with_stat(StatKey::Caves, 2.0),
            ],
        );
        let sessions = segment_series(&s, &SessionParams::default());
        let deltas = sessions[0].deltas;
        assert_eq!(deltas.deaths, 0.0);
        assert_eq!(deltas.chests_found, 5.0);
        assert_eq!(deltas.caves, 0.0);
    }

    #[test]
    fn test_untimed_snapshots_ignored() {
        let mut s = series("a", &[0, 30]);
        s.snapshots.insert(1, Snapshot::default().with_stat(StatKey::MobsKilled, 999.0));
        let sessions = segment_series(&s, &SessionParams::default());
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].deltas.mobs_killed, 30.0);
    }

    #[test]
    fn test_two_characters_scenario() {
        let a = Series::new(
            "a".into(),
            "A".into(),
            "#111".into(),
            vec![
                Snapshot::at(t(0)).with_stat(StatKey::Level, 10.0),
                Snapshot::at(t(90)).with_stat(StatKey::Level, 10.0),
            ],
        );
        let b = Series::new(
            "b".into(),
            "B".into(),
            "#222".into(),
            vec![Snapshot::at(t(45)).with_stat(StatKey::Level, 5.0)],
        );
        let params = SessionParams {
            gap: TimeDelta::minutes(120),
            ..SessionParams::default()
        };

        let sessions = compute_sessions_with(&[a, b], &visible(&["a", "b"]), &params);
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].character_id, "a");
        assert_eq!(sessions[0].duration, TimeDelta::minutes(90));
        assert_eq!(sessions[0].color, "#111");
    }

    #[test]
    fn test_sessions_sorted_most_recent_first_and_filtered() {
        let all = vec![
            series("a", &[0, 30, 300, 330]),
            series("b", &[100, 150]),
            series("c", &[1000, 1100]),
        ];
        let sessions = compute_sessions(&all, &visible(&["a", "b"]));

        let ends: Vec<_> = sessions.iter().map(|s| s.end).collect();
        assert_eq!(ends, vec![t(330), t(150), t(30)]);
        assert!(sessions.iter().all(|s| s.character_id != "c"));
    }

    #[test]
    fn test_all_deltas_non_negative() {
        let all = vec![series("a", &[0, 15, 30, 500, 520]), series("b", &[5, 40])];
        for session in compute_sessions(&all, &visible(&["a", "b"])) {
            let d = session.deltas;
            for value in [
                d.mobs_killed,
                d.chests_found,
                d.blocks_walked,
                d.dungeons,
                d.quests,
                d.caves,
                d.deaths,
            ] {
                assert!(value >= 0.0);
            }
            assert!(session.duration >= TimeDelta::minutes(10));
        }
    }
}
