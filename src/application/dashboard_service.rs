// Dashboard service - Use case for building timelines and session tables
use crate::application::character_repository::CharacterRepository;
use crate::domain::character::{palette_color, Series};
use crate::domain::range::ResolvedRange;
use crate::domain::session::{compute_sessions_with, Session, SessionParams};
use crate::domain::snapshot::StatKey;
use crate::domain::timeline::{build_timeline_with, Timeline};
use chrono::TimeDelta;
use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn CharacterRepository>,
    solid_threshold: TimeDelta,
    session_params: SessionParams,
}

impl DashboardService {
    pub fn new(
        repository: Arc<dyn CharacterRepository>,
        solid_threshold: TimeDelta,
        session_params: SessionParams,
    ) -> Self {
        Self {
            repository,
            solid_threshold,
            session_params,
        }
    }

    /// Chart `stat` over `range`. `visible` of `None` shows every character.
    pub async fn timeline(
        &self,
        range: &ResolvedRange,
        stat: StatKey,
        visible: Option<&HashSet<String>>,
    ) -> anyhow::Result<Timeline> {
        let series = self.load_series(range).await?;
        let visible = resolve_visible(&series, visible);
        Ok(build_timeline_with(
            &series,
            range,
            &visible,
            stat,
            self.solid_threshold,
        ))
    }

    /// Play sessions inside `range`, most recent first.
    pub async fn sessions(
        &self,
        range: &ResolvedRange,
        visible: Option<&HashSet<String>>,
    ) -> anyhow::Result<Vec<Session>> {
        let series = self.load_series(range).await?;
        let visible = resolve_visible(&series, visible);
        Ok(compute_sessions_with(&series, &visible, &self.session_params))
    }

    /// Fetch every character's history for `range` concurrently. A failed
    /// history fetch leaves that character with no snapshots.
    async fn load_series(&self, range: &ResolvedRange) -> anyhow::Result<Vec<Series>> {
        let profiles = self.repository.list_characters().await?;

        let histories = join_all(profiles.iter().map(|profile| {
            self.repository
                .stats_history(&profile.id, Some(range.from), Some(range.to))
        }))
        .await;

        let series: Vec<Series> = profiles
            .into_iter()
            .zip(histories)
            .enumerate()
            .map(|(index, (profile, history))| {
                let snapshots = history.unwrap_or_else(|e| {
                    tracing::warn!("Error fetching history for {}: {:#}", profile.id, e);
                    Vec::new()
                });
                Series::new(
                    profile.id.clone(),
                    profile.display_name(),
                    palette_color(index),
                    snapshots,
                )
            })
            .collect();

        tracing::debug!(
            "Loaded {} series with {} snapshots",
            series.len(),
            series.iter().map(|s| s.snapshots.len()).sum::<usize>()
        );

        Ok(series)
    }
}

fn resolve_visible(series: &[Series], visible: Option<&HashSet<String>>) -> HashSet<String> {
    match visible {
        Some(ids) => ids.clone(),
        None => series.iter().map(|s| s.id.clone()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::character_repository::fake::InMemoryRepository;
    use crate::domain::character::CharacterProfile;
    use crate::domain::snapshot::Snapshot;
    use crate::domain::timeline::classify::SegmentTag;
    use chrono::{DateTime, TimeZone, Utc};
    use std::collections::HashMap;

    fn t(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap() + TimeDelta::minutes(minutes)
    }

    fn range() -> ResolvedRange {
        ResolvedRange {
            from: t(0),
            to: t(90),
            tick_interval: TimeDelta::minutes(30),
        }
    }

    fn profile(id: &str) -> CharacterProfile {
        CharacterProfile {
            id: id.to_string(),
            nickname: Some(id.to_uppercase()),
            ..Default::default()
        }
    }

    fn service(repo: InMemoryRepository) -> DashboardService {
        DashboardService::new(
            Arc::new(repo),
            TimeDelta::hours(1),
            SessionParams::default(),
        )
    }

    fn repository() -> InMemoryRepository {
        let mut history = HashMap::new();
        history.insert(
            "a".to_string(),
            vec![
                Snapshot::at(t(90))
                    .with_stat(StatKey::Level, 11.0)
                    .with_stat(StatKey::MobsKilled, 40.0),
                Snapshot::at(t(0))
                    .with_stat(StatKey::Level, 10.0)
                    .with_stat(StatKey::MobsKilled, 10.0),
                Snapshot::at(t(45))
                    .with_stat(StatKey::Level, 10.0)
                    .with_stat(StatKey::MobsKilled, 25.0),
                Snapshot::at(t(-600)).with_stat(StatKey::Level, 1.0),
            ],
        );
        history.insert(
            "b".to_string(),
            vec![Snapshot::at(t(45)).with_stat(StatKey::Level, 5.0)],
        );
        InMemoryRepository {
            characters: vec![profile("a"), profile("b")],
            history,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_timeline_for_all_characters() {
        let timeline = service(repository())
            .timeline(&range(), StatKey::Level, None)
            .await
            .unwrap();

        assert_eq!(timeline.grid, vec![t(0), t(45), t(90)]);
        let a = timeline.trace("a").unwrap();
        assert_eq!(a.name, "A");
        assert_eq!(a.solid, vec![Some(10.0), Some(10.0), Some(11.0)]);
        let b = timeline.trace("b").unwrap();
        assert_eq!(b.tags, vec![SegmentTag::Solid; 3]);
    }

    #[tokio::test]
    async fn test_timeline_respects_visible_filter() {
        let visible = HashSet::from(["b".to_string()]);
        let timeline = service(repository())
            .timeline(&range(), StatKey::Level, Some(&visible))
            .await
            .unwrap();

        assert_eq!(timeline.grid, vec![t(0), t(45), t(90)]);
        assert!(timeline.trace("a").unwrap().solid.iter().all(Option::is_none));
    }

    #[tokio::test]
    async fn test_failed_history_is_treated_as_empty() {
        let mut repo = repository();
        repo.failing.push("a".to_string());
        let timeline = service(repo)
            .timeline(&range(), StatKey::Level, None)
            .await
            .unwrap();

        assert_eq!(timeline.grid, vec![t(0), t(45), t(90)]);
        assert!(timeline.trace("a").unwrap().dashed.iter().all(Option::is_none));
    }

    #[tokio::test]
    async fn test_sessions_within_range() {
        let sessions = service(repository())
            .sessions(&range(), None)
            .await
            .unwrap();

        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].character_id, "a");
        assert_eq!(sessions[0].duration, TimeDelta::minutes(90));
        assert_eq!(sessions[0].deltas.mobs_killed, 30.0);
        assert_eq!(sessions[0].start_level, Some(10.0));
    }

    #[tokio::test]
    async fn test_backend_failure_is_an_error() {
        let repo = InMemoryRepository {
            unavailable: true,
            ..Default::default()
        };
        assert!(service(repo).sessions(&range(), None).await.is_err());
    }
}
