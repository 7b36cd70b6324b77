// JSON view models for HTTP responses
use crate::application::character_service::CharacterSummary;
use crate::domain::range::{RangeKey, ResolvedRange};
use crate::domain::session::Session;
use crate::domain::snapshot::StatKey;
use crate::domain::timeline::classify::SegmentTag;
use crate::domain::timeline::{SeriesTrace, Timeline};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CharacterView {
    pub id: String,
    pub name: String,
    pub color: String,
    pub class: Option<String>,
    pub level: Option<f64>,
    pub recently_active: bool,
}

#[derive(Debug, Serialize)]
pub struct RangeView {
    pub key: &'static str,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub tick_interval_seconds: i64,
}

#[derive(Debug, Serialize)]
pub struct TraceView {
    pub id: String,
    pub name: String,
    pub color: String,
    pub solid: Vec<Option<f64>>,
    pub dashed: Vec<Option<f64>>,
    pub tags: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct TimelineView {
    pub range: RangeView,
    pub stat: &'static str,
    pub grid: Vec<DateTime<Utc>>,
    pub series: Vec<TraceView>,
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub character_id: String,
    pub character_name: String,
    pub color: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_seconds: i64,
    pub start_level: Option<f64>,
    pub end_level: Option<f64>,
    pub mobs_killed: f64,
    pub chests_found: f64,
    pub blocks_walked: f64,
    pub dungeons: f64,
    pub quests: f64,
    pub caves: f64,
    pub deaths: f64,
}

impl From<CharacterSummary> for CharacterView {
    fn from(summary: CharacterSummary) -> Self {
        Self {
            level: summary
                .profile
                .latest
                .as_ref()
                .and_then(|s| s.stat(StatKey::Level)),
            id: summary.profile.id,
            name: summary.name,
            color: summary.color,
            class: summary.profile.class,
            recently_active: summary.recently_active,
        }
    }
}

pub fn range_view(key: RangeKey, range: &ResolvedRange) -> RangeView {
    RangeView {
        key: key.as_str(),
        from: range.from,
        to: range.to,
        tick_interval_seconds: range.tick_interval.num_seconds(),
    }
}

pub fn timeline_view(
    key: RangeKey,
    range: &ResolvedRange,
    stat: StatKey,
    timeline: Timeline,
) -> TimelineView {
    TimelineView {
        range: range_view(key, range),
        stat: stat.as_str(),
        grid: timeline.grid,
        series: timeline.traces.into_iter().map(trace_view).collect(),
    }
}

fn trace_view(trace: SeriesTrace) -> TraceView {
    TraceView {
        id: trace.id,
        name: trace.name,
        color: trace.color,
        solid: trace.solid,
        dashed: trace.dashed,
        tags: trace.tags.into_iter().map(tag_name).collect(),
    }
}

fn tag_name(tag: SegmentTag) -> &'static str {
    match tag {
        SegmentTag::Solid => "solid",
        SegmentTag::Dashed => "dashed",
        SegmentTag::Absent => "absent",
    }
}

impl From<Session> for SessionView {
    fn from(session: Session) -> Self {
        let d = session.deltas;
        Self {
            character_id: session.character_id,
            character_name: session.character_name,
            color: session.color,
            start: session.start,
            end: session.end,
            duration_seconds: session.duration.num_seconds(),
            start_level: session.start_level,
            end_level: session.end_level,
            mobs_killed: d.mobs_killed,
            chests_found: d.chests_found,
            blocks_walked: d.blocks_walked,
            dungeons: d.dungeons,
            quests: d.quests,
            caves: d.caves,
            deaths: d.deaths,
        }
    }
}
