// Tracker backend repository implementation
use crate::application::character_repository::CharacterRepository;
use crate::domain::character::CharacterProfile;
use crate::domain::snapshot::Snapshot;
use crate::infrastructure::stats_mapper::{
    to_profile, to_snapshot, CharacterDetailRecord, CharacterRecord, StatsRecord,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use futures::future::try_join_all;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone)]
pub struct TrackerRepository {
    base_url: String,
    client: reqwest::Client,
}

impl TrackerRepository {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn character_url(&self, character_id: &str) -> String {
        format!(
            "{}/api/characters/{}",
            self.base_url,
            urlencoding::encode(character_id)
        )
    }

    fn history_url(
        &self,
        character_id: &str,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> String {
        let mut params = Vec::new();
        if let Some(from) = from {
            params.push(format!("from_date={}", encode_instant(from)));
        }
        if let Some(to) = to {
            params.push(format!("to_date={}", encode_instant(to)));
        }

        let mut url = format!(
            "{}/api/stats/{}/history",
            self.base_url,
            urlencoding::encode(character_id)
        );
        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.join("&"));
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request to tracker backend")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Tracker request failed with status {}: {}", status, body);
        }

        response
            .json::<T>()
            .await
            .context("Failed to parse tracker response")
    }
}

fn encode_instant(instant: DateTime<Utc>) -> String {
    urlencoding::encode(&instant.to_rfc3339_opts(SecondsFormat::Secs, true)).into_owned()
}

#[async_trait]
impl CharacterRepository for TrackerRepository {
    async fn list_characters(&self) -> Result<Vec<CharacterProfile>> {
        let url = format!("{}/api/characters", self.base_url);
        let characters: Vec<CharacterRecord> = self.get_json(&url).await?;

        let details = try_join_all(characters.iter().map(|c| async move {
            self.get_json::<CharacterDetailRecord>(&self.character_url(&c.uuid))
                .await
                .with_context(|| format!("Failed to fetch character {}", c.uuid))
        }))
        .await?;

        tracing::debug!("Found {} tracked characters", details.len());
        Ok(details.into_iter().map(to_profile).collect())
    }

    async fn stats_history(
        &self,
        character_id: &str,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<Snapshot>> {
        let url = self.history_url(character_id, from, to);
        let records: Vec<StatsRecord> = self.get_json(&url).await?;
        Ok(records.into_iter().map(to_snapshot).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_history_url() {
        let repo = TrackerRepository::new("http://tracker:8000/".to_string());
        let from = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 1, 16, 10, 30, 0).unwrap();

        assert_eq!(
            repo.history_url("c1", None, None),
            "http://tracker:8000/api/stats/c1/history"
        );
        assert_eq!(
            repo.history_url("c1", Some(from), Some(to)),
            "http://tracker:8000/api/stats/c1/history?from_date=2024-01-15T10%3A30%3A00Z&to_date=2024-01-16T10%3A30%3A00Z"
        );
        assert_eq!(
            repo.character_url("a b"),
            "http://tracker:8000/api/characters/a%20b"
        );
    }
}
