// Solid/dashed segment classification
use chrono::{DateTime, TimeDelta, Utc};

/// Grid values further than this from a real observation render dashed
pub const DEFAULT_SOLID_THRESHOLD_MINUTES: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentTag {
    Solid,
    Dashed,
    Absent,
}

/// Two co-located traces for one series. `solid` and `dashed` overlap by one
/// point at every transition so the rendered lines join up.
#[derive(Debug, Clone, PartialEq)]
pub struct Classified {
    pub solid: Vec<Option<f64>>,
    pub dashed: Vec<Option<f64>>,
    pub tags: Vec<SegmentTag>,
}

/// Split a filled projection into solid and dashed traces.
///
/// `aligned` is the exact-match projection (which slots were observed),
/// `filled` its interpolated counterpart; both are aligned with `grid`.
pub fn classify_gaps(
    grid: &[DateTime<Utc>],
    aligned: &[Option<f64>],
    filled: &[Option<f64>],
    threshold: TimeDelta,
) -> Classified {
    let observed: Vec<DateTime<Utc>> = grid
        .iter()
        .zip(aligned)
        .filter(|(_, value)| value.is_some())
        .map(|(t, _)| *t)
        .collect();

    let beyond: Vec<bool> = grid
        .iter()
        .map(|t| nearest_distance(&observed, *t).is_none_or(|d| d > threshold))
        .collect();

    let len = grid.len().min(filled.len());
    let mut solid = vec![None; len];
    let mut dashed = vec![None; len];
    let mut tags = vec![SegmentTag::Absent; len];

    for i in 0..len {
        let Some(value) = filled[i] else { continue };

        let prev_beyond = i > 0 && beyond[i - 1];
        let next_beyond = i + 1 < len && beyond[i + 1];

        if beyond[i] {
            tags[i] = SegmentTag::Dashed;
            dashed[i] = Some(value);
        } else {
            tags[i] = SegmentTag::Solid;
            solid[i] = Some(value);
            if prev_beyond || next_beyond {
                dashed[i] = Some(value);
            }
        }
    }

    Classified {
        solid,
        dashed,
        tags,
    }
}

/// Smallest absolute distance from `t` to any instant in sorted `observed`
fn nearest_distance(observed: &[DateTime<Utc>], t: DateTime<Utc>) -> Option<TimeDelta> {
    let idx = observed.partition_point(|o| *o < t);
    let after = observed.get(idx).map(|o| *o - t);
    let before = idx.checked_sub(1).map(|i| t - observed[i]);

    match (before, after) {
        (Some(b), Some(a)) => Some(b.min(a)),
        (b, a) => b.or(a),
    }
}
