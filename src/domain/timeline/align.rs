// Exact-instant projection of one series onto the shared grid
use crate::domain::character::Series;
use crate::domain::snapshot::{timed_snapshots, StatKey};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Project `series` onto `grid` for one stat. A slot holds a value only when
/// a snapshot exists at exactly that instant and carries the stat; when
/// several snapshots share an instant the last one in input order wins.
/// Hidden series project to all-absent.
pub fn align_series(
    grid: &[DateTime<Utc>],
    series: &Series,
    stat: StatKey,
    visible: bool,
) -> Vec<Option<f64>> {
    if !visible {
        return vec![None; grid.len()];
    }

    let observed: HashMap<DateTime<Utc>, f64> = timed_snapshots(&series.snapshots)
        .into_iter()
        .filter_map(|(t, snapshot)| snapshot.stat(stat).map(|v| (t, v)))
        .collect();

    grid.iter().map(|t| observed.get(t).copied()).collect()
}
