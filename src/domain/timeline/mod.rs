// Snapshot-to-timeline pipeline: grid -> align -> interpolate -> classify
pub mod align;
pub mod classify;
pub mod grid;
pub mod interpolate;

use crate::domain::character::Series;
use crate::domain::range::ResolvedRange;
use crate::domain::snapshot::StatKey;
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashSet;

use self::align::align_series;
use self::classify::{classify_gaps, SegmentTag, DEFAULT_SOLID_THRESHOLD_MINUTES};
use self::grid::build_grid;
use self::interpolate::fill_gaps;

/// Renderable traces for one series, aligned with `Timeline::grid`
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesTrace {
    pub id: String,
    pub name: String,
    pub color: String,
    pub solid: Vec<Option<f64>>,
    pub dashed: Vec<Option<f64>>,
    pub tags: Vec<SegmentTag>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    pub grid: Vec<DateTime<Utc>>,
    pub traces: Vec<SeriesTrace>,
}

impl Timeline {
    pub fn trace(&self, id: &str) -> Option<&SeriesTrace> {
        self.traces.iter().find(|trace| trace.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }
}

/// Build the timeline with the default one-hour solid threshold.
pub fn build_timeline(
    series: &[Series],
    range: &ResolvedRange,
    visible: &HashSet<String>,
    stat: StatKey,
) -> Timeline {
    build_timeline_with(
        series,
        range,
        visible,
        stat,
        TimeDelta::minutes(DEFAULT_SOLID_THRESHOLD_MINUTES),
    )
}

/// Build the timeline for `stat`. Every series gets a trace in input order;
/// hidden series get all-absent traces.
pub fn build_timeline_with(
    series: &[Series],
    range: &ResolvedRange,
    visible: &HashSet<String>,
    stat: StatKey,
    solid_threshold: TimeDelta,
) -> Timeline {
    let grid = build_grid(range, series, visible);

    let traces = series
        .iter()
        .map(|s| {
            let aligned = align_series(&grid, s, stat, visible.contains(&s.id));
            let filled = fill_gaps(&aligned);
            let classified = classify_gaps(&grid, &aligned, &filled, solid_threshold);
            SeriesTrace {
                id: s.id.clone(),
                name: s.name.clone(),
                color: s.color.clone(),
                solid: classified.solid,
                dashed: classified.dashed,
                tags: classified.tags,
            }
        })
        .collect();

    tracing::debug!(
        "Built timeline for {}: {} grid instants, {} series",
        stat,
        grid.len(),
        series.len()
    );

    Timeline { grid, traces }
}
