// Repository trait for tracked characters and their stat history
use crate::domain::character::CharacterProfile;
use crate::domain::snapshot::Snapshot;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait CharacterRepository: Send + Sync {
    /// List every tracked character with display metadata and latest stats
    async fn list_characters(&self) -> anyhow::Result<Vec<CharacterProfile>>;

    /// Stat snapshots for one character, optionally bounded by `valid_from`.
    /// No ordering is guaranteed.
    async fn stats_history(
        &self,
        character_id: &str,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> anyhow::Result<Vec<Snapshot>>;
}
