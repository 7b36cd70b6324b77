// Character service - Use case for listing tracked characters
use crate::application::character_repository::CharacterRepository;
use crate::domain::activity::is_recently_active;
use crate::domain::character::{palette_color, CharacterProfile};
use chrono::{TimeDelta, Utc};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct CharacterSummary {
    pub profile: CharacterProfile,
    pub name: String,
    pub color: String,
    pub recently_active: bool,
}

#[derive(Clone)]
pub struct CharacterService {
    repository: Arc<dyn CharacterRepository>,
    online_threshold: TimeDelta,
}

impl CharacterService {
    pub fn new(repository: Arc<dyn CharacterRepository>, online_threshold: TimeDelta) -> Self {
        Self {
            repository,
            online_threshold,
        }
    }

    pub async fn list_characters(&self) -> anyhow::Result<Vec<CharacterSummary>> {
        let profiles = self.repository.list_characters().await?;
        let now = Utc::now();

        Ok(profiles
            .into_iter()
            .enumerate()
            .map(|(index, profile)| CharacterSummary {
                name: profile.display_name(),
                color: palette_color(index),
                recently_active: is_recently_active(
                    profile.latest.as_ref(),
                    now,
                    self.online_threshold,
                ),
                profile,
            })
            .collect())
    }
}
