use crate::domain::activity::DEFAULT_ONLINE_THRESHOLD_MINUTES;
use crate::domain::session::{SessionParams, DEFAULT_MIN_SESSION_MINUTES, DEFAULT_SESSION_GAP_MINUTES};
use crate::domain::timeline::classify::DEFAULT_SOLID_THRESHOLD_MINUTES;
use chrono::TimeDelta;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    pub tracker: TrackerSettings,
    #[serde(default)]
    pub pipeline: PipelineSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct TrackerSettings {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PipelineSettings {
    #[serde(default = "default_solid_threshold")]
    pub solid_threshold_minutes: i64,
    #[serde(default = "default_session_gap")]
    pub session_gap_minutes: i64,
    #[serde(default = "default_min_session")]
    pub min_session_minutes: i64,
    #[serde(default = "default_online_threshold")]
    pub online_threshold_minutes: i64,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            solid_threshold_minutes: default_solid_threshold(),
            session_gap_minutes: default_session_gap(),
            min_session_minutes: default_min_session(),
            online_threshold_minutes: default_online_threshold(),
        }
    }
}

impl PipelineSettings {
    pub fn solid_threshold(&self) -> TimeDelta {
        TimeDelta::minutes(self.solid_threshold_minutes)
    }

    pub fn online_threshold(&self) -> TimeDelta {
        TimeDelta::minutes(self.online_threshold_minutes)
    }

    pub fn session_params(&self) -> SessionParams {
        SessionParams {
            gap: TimeDelta::minutes(self.session_gap_minutes),
            min_duration: TimeDelta::minutes(self.min_session_minutes),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_solid_threshold() -> i64 {
    DEFAULT_SOLID_THRESHOLD_MINUTES
}

fn default_session_gap() -> i64 {
    DEFAULT_SESSION_GAP_MINUTES
}

fn default_min_session() -> i64 {
    DEFAULT_MIN_SESSION_MINUTES
}

fn default_online_threshold() -> i64 {
    DEFAULT_ONLINE_THRESHOLD_MINUTES
}

/// Load `config/app.*` overlaid with `TIMELINE__SECTION__KEY` env vars
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/app").required(false))
        .add_source(config::Environment::with_prefix("TIMELINE").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
