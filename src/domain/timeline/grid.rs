// Shared time axis construction
use crate::domain::character::Series;
use crate::domain::range::ResolvedRange;
use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashSet};

/// Build the shared time axis: the range bounds plus every snapshot instant
/// of every visible series, strictly increasing.
///
/// Hidden series contribute no instants. An empty series list yields an
/// empty grid.
pub fn build_grid(
    range: &ResolvedRange,
    series: &[Series],
    visible: &HashSet<String>,
) -> Vec<DateTime<Utc>> {
    if series.is_empty() {
        return Vec::new();
    }

    let mut instants = BTreeSet::from([range.from, range.to]);
    for s in series.iter().filter(|s| visible.contains(&s.id)) {
        instants.extend(s.snapshots.iter().filter_map(|snapshot| snapshot.valid_from));
    }

    instants.into_iter().collect()
}
