// Recent-activity flag for character listings
use crate::domain::snapshot::Snapshot;
use chrono::{DateTime, TimeDelta, Utc};

pub const DEFAULT_ONLINE_THRESHOLD_MINUTES: i64 = 15;

/// True when the latest snapshot is no older than `threshold`. Instants in
/// the future count as active.
pub fn is_recently_active(
    latest: Option<&Snapshot>,
    now: DateTime<Utc>,
    threshold: TimeDelta,
) -> bool {
    latest
        .and_then(|snapshot| snapshot.valid_from)
        .is_some_and(|valid_from| valid_from >= now - threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_is_recently_active() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let threshold = TimeDelta::minutes(DEFAULT_ONLINE_THRESHOLD_MINUTES);

        let fresh = Snapshot::at(now - TimeDelta::minutes(15));
        let stale = Snapshot::at(now - TimeDelta::minutes(16));
        let future = Snapshot::at(now + TimeDelta::hours(2));

        assert!(is_recently_active(Some(&fresh), now, threshold));
        assert!(!is_recently_active(Some(&stale), now, threshold));
        assert!(is_recently_active(Some(&future), now, threshold));
        assert!(!is_recently_active(Some(&Snapshot::default()), now, threshold));
        assert!(!is_recently_active(None, now, threshold));
    }
}
