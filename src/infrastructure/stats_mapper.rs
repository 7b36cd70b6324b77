// Mapper from tracker backend JSON records to domain types
use crate::domain::character::CharacterProfile;
use crate::domain::snapshot::{Snapshot, StatKey};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

#[derive(Debug, Deserialize)]
pub struct StatsRecord {
    #[serde(default)]
    pub valid_from: Option<String>,
    #[serde(flatten)]
    pub fields: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct CharacterRecord {
    pub uuid: String,
    pub player_uuid: String,
    #[serde(rename = "type", default)]
    pub class: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlayerRecord {
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct CharacterDetailRecord {
    #[serde(flatten)]
    pub character: CharacterRecord,
    #[serde(default)]
    pub player: Option<PlayerRecord>,
    #[serde(default)]
    pub current_stats: Option<StatsRecord>,
}

/// Parse a tracker timestamp. Naive timestamps are UTC wall-clock times.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

pub fn to_snapshot(record: StatsRecord) -> Snapshot {
    let valid_from = match record.valid_from.as_deref() {
        Some(raw) => {
            let parsed = parse_instant(raw);
            if parsed.is_none() {
                tracing::warn!("Ignoring unparseable snapshot instant: {}", raw);
            }
            parsed
        }
        None => None,
    };

    let stats = StatKey::ALL
        .iter()
        .filter_map(|key| {
            record
                .fields
                .get(key.as_str())
                .and_then(serde_json::Value::as_f64)
                .map(|value| (*key, value))
        })
        .collect();

    Snapshot::new(valid_from, stats)
}

pub fn to_profile(record: CharacterDetailRecord) -> CharacterProfile {
    CharacterProfile {
        id: record.character.uuid,
        player_id: record.character.player_uuid,
        username: record.player.map(|p| p.username),
        class: record.character.class,
        nickname: record.character.nickname,
        latest: record.current_stats.map(to_snapshot),
    }
}
