use ondeck_models::{ProviderMode, SORT_BY_RELEASE_DATE_DESC};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub lists: ListsConfig,
    #[serde(default)]
    pub eligibility: EligibilityConfig,
    #[serde(default)]
    pub pacing: PacingConfig,
    #[serde(default)]
    pub scheduler: Option<SchedulerConfig>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("list name for '{0}' cannot be empty")]
    EmptyListName(&'static str),
    #[error("allowed_providers cannot be empty unless mode is 'all'")]
    EmptyProviderAllowList,
    #[error("region must be a two-letter uppercase country code, got '{0}'")]
    InvalidRegion(String),
    #[error("scheduler schedule cannot be empty")]
    EmptySchedule,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    /// Watch-provider region (ISO 3166-1)
    #[serde(default = "default_region")]
    pub region: String,
    /// Language for lists created by ondeck (ISO 639-1)
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_api_v3_url")]
    pub api_v3_url: String,
    #[serde(default = "default_api_v4_url")]
    pub api_v4_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListsConfig {
    #[serde(default = "default_number_one_list")]
    pub number_one: String,
    #[serde(default = "default_watched_list")]
    pub watched: String,
    #[serde(default = "default_on_deck_list")]
    pub on_deck: String,
    /// Movies in this list only qualify in `all` mode. Empty disables it.
    #[serde(default = "default_excluded_list")]
    pub excluded: String,
    #[serde(default = "default_sort_by")]
    pub sort_by: i64,
    #[serde(default = "default_true")]
    pub create_missing: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityConfig {
    #[serde(default)]
    pub mode: ProviderMode,
    #[serde(default)]
    pub genre_filter: bool,
    #[serde(default = "default_allowed_providers")]
    pub allowed_providers: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PacingConfig {
    /// Delay between successive list writes
    #[serde(default)]
    pub write_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Six-field cron expression (seconds first)
    #[serde(default = "default_schedule")]
    pub schedule: String,
    #[serde(default = "default_true")]
    pub run_on_startup: bool,
}

fn default_true() -> bool {
    true
}

fn default_region() -> String {
    "US".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_api_v3_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_api_v4_url() -> String {
    "https://api.themoviedb.org/4".to_string()
}

fn default_number_one_list() -> String {
    "Box Office Number One Hits".to_string()
}

fn default_watched_list() -> String {
    "Watched".to_string()
}

fn default_on_deck_list() -> String {
    "On Deck".to_string()
}

fn default_excluded_list() -> String {
    "Marvel Cinematic Universe".to_string()
}

fn default_sort_by() -> i64 {
    SORT_BY_RELEASE_DATE_DESC
}

fn default_schedule() -> String {
    "0 0 6 * * *".to_string() // Daily at 06:00
}

pub fn default_allowed_providers() -> Vec<String> {
    [
        "Amazon Prime Video",
        "Disney Plus",
        "FXNow",
        "HBO Max",
        "Hulu",
        "Netflix",
        "Peacock Premium",
        "Showtime",
        "TBS",
        "TNT",
        "tru TV",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

pub fn default_scheduler_config() -> SchedulerConfig {
    SchedulerConfig {
        schedule: default_schedule(),
        run_on_startup: default_true(),
    }
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            language: default_language(),
            api_v3_url: default_api_v3_url(),
            api_v4_url: default_api_v4_url(),
        }
    }
}

impl Default for ListsConfig {
    fn default() -> Self {
        Self {
            number_one: default_number_one_list(),
            watched: default_watched_list(),
            on_deck: default_on_deck_list(),
            excluded: default_excluded_list(),
            sort_by: default_sort_by(),
            create_missing: default_true(),
        }
    }
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            mode: ProviderMode::default(),
            genre_filter: false,
            allowed_providers: default_allowed_providers(),
        }
    }
}

impl ListsConfig {
    pub fn excluded_list(&self) -> Option<&str> {
        let name = self.excluded.trim();
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Missing file means defaults; a file that fails to parse is an error.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let names = [
            ("number_one", &self.lists.number_one),
            ("watched", &self.lists.watched),
            ("on_deck", &self.lists.on_deck),
        ];
        for (key, name) in names {
            if name.trim().is_empty() {
                return Err(ConfigError::EmptyListName(key));
            }
        }

        if self.eligibility.mode != ProviderMode::All && self.eligibility.allowed_providers.is_empty() {
            return Err(ConfigError::EmptyProviderAllowList);
        }

        let region = &self.tmdb.region;
        if region.len() != 2 || !region.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ConfigError::InvalidRegion(region.clone()));
        }

        if let Some(scheduler) = &self.scheduler {
            if scheduler.schedule.trim().is_empty() {
                return Err(ConfigError::EmptySchedule);
            }
        }

        Ok(())
    }
}
