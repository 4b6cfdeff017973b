// src/config/file.rs
// File-based configuration from ~/.rootmate/config.toml

use crate::entitlement::{DEFAULT_PLANT_CEILING, SubscriptionStatus};
use crate::error::ConfigError;
use crate::messages::feed::DEFAULT_FEED_CAP;
use crate::notify::DailyTime;
use crate::persona::Persona;
use crate::plant::{Plant, UserId, species};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Top-level config structure
#[derive(Debug, Deserialize, Default)]
pub struct RootmateConfig {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub plants: Vec<PlantEntry>,
}

/// `[settings]` section
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Weather location for plants without one
    pub location: Option<String>,
    pub notification_time: DailyTime,
    pub backend_url: Option<String>,
    pub feed_cap: usize,
    pub plant_ceiling: usize,
    pub subscription: SubscriptionStatus,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            location: None,
            notification_time: DailyTime::default(),
            backend_url: None,
            feed_cap: DEFAULT_FEED_CAP,
            plant_ceiling: DEFAULT_PLANT_CEILING,
            subscription: SubscriptionStatus::Active,
        }
    }
}

/// One `[[plants]]` entry
#[derive(Debug, Clone, Deserialize)]
pub struct PlantEntry {
    pub nickname: String,
    pub species: String,
    /// Display name or id, e.g. "Drama Queen" or "dramatic"
    pub persona: String,
    pub location: Option<String>,
    /// Quoted RFC 3339 timestamp
    pub last_watered: Option<DateTime<Utc>>,
    #[serde(default)]
    pub health_streak: u32,
}

impl PlantEntry {
    pub fn to_plant(&self, owner: UserId, now: DateTime<Utc>) -> Result<Plant, ConfigError> {
        let persona: Persona = self.persona.parse().map_err(|reason| ConfigError::Invalid {
            key: "plants.persona",
            reason,
        })?;

        let species = species::canonical(&self.species).unwrap_or(self.species.as_str());
        let mut plant = Plant::new(owner, &self.nickname, species, persona);
        if let Some(location) = &self.location {
            plant = plant.with_location(location);
        }
        if let Some(last_watered) = self.last_watered {
            plant = plant.with_history(last_watered, self.health_streak, now);
        } else {
            plant.health_streak = self.health_streak;
        }
        Ok(plant)
    }
}

impl RootmateConfig {
    /// Load config from ~/.rootmate/config.toml
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    debug!(path = %path.display(), "Loaded config from file");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to parse config file");
                    Self::default()
                }
            },
            Err(_) => {
                debug!(path = %path.display(), "Config file not found, using defaults");
                Self::default()
            }
        }
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        super::rootmate_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use crate::plant::PlantStatus;

    #[test]
    fn test_parse_config() {
        let toml = r#"
[settings]
location = "Edinburgh"
notification_time = "07:30"
feed_cap = 10
subscription = "trialing"

[[plants]]
nickname = "Fiona"
species = "Fiddle Leaf Fig"
persona = "dramatic"
last_watered = "2025-06-10T08:00:00Z"
health_streak = 3

[[plants]]
nickname = "Zed"
species = "snake plant"
persona = "Zen Master"
location = "London"
"#;
        let config: RootmateConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.settings.location.as_deref(), Some("Edinburgh"));
        assert_eq!(config.settings.notification_time, DailyTime::new(7, 30).unwrap());
        assert_eq!(config.settings.feed_cap, 10);
        assert_eq!(config.settings.plant_ceiling, DEFAULT_PLANT_CEILING);
        assert_eq!(config.settings.subscription, SubscriptionStatus::Trialing);
        assert_eq!(config.plants.len(), 2);

        let now = Utc.with_ymd_and_hms(2025, 6, 15, 8, 0, 0).unwrap();
        let fiona = config.plants[0].to_plant(UserId::new(), now).unwrap();
        assert_eq!(fiona.persona, Persona::DramaQueen);
        assert_eq!(fiona.status, PlantStatus::Thirsty);
        assert_eq!(fiona.health_streak, 3);

        let zed = config.plants[1].to_plant(UserId::new(), now).unwrap();
        assert_eq!(zed.location.as_deref(), Some("London"));
        assert_eq!(zed.species, "Snake Plant");
        assert!(zed.last_watered.is_none());
    }

    #[test]
    fn test_parse_empty_config() {
        let config: RootmateConfig = toml::from_str("").unwrap();
        assert!(config.plants.is_empty());
        assert_eq!(config.settings.notification_time, DailyTime::default());
        assert_eq!(config.settings.feed_cap, DEFAULT_FEED_CAP);
    }

    #[test]
    fn test_unknown_persona() {
        let entry = PlantEntry {
            nickname: "X".to_string(),
            species: "Cactus".to_string(),
            persona: "Pirate".to_string(),
            location: None,
            last_watered: None,
            health_streak: 0,
        };
        assert!(entry.to_plant(UserId::new(), Utc::now()).is_err());
    }

    #[test]
    fn test_unlisted_species_kept_verbatim() {
        let entry = PlantEntry {
            nickname: "Audrey".to_string(),
            species: "Venus Flytrap".to_string(),
            persona: "grumpy".to_string(),
            location: None,
            last_watered: None,
            health_streak: 0,
        };
        let plant = entry.to_plant(UserId::new(), Utc::now()).unwrap();
        assert_eq!(plant.species, "Venus Flytrap");
    }

    #[test]
    fn test_load_missing_and_invalid_files() {
        let dir = tempfile::tempdir().unwrap();

        let missing = RootmateConfig::load_from(&dir.path().join("nope.toml"));
        assert!(missing.plants.is_empty());

        let bad = dir.path().join("config.toml");
        std::fs::write(&bad, "[settings\nfeed_cap = ").unwrap();
        let config = RootmateConfig::load_from(&bad);
        assert!(config.plants.is_empty());
        assert_eq!(config.settings.feed_cap, DEFAULT_FEED_CAP);
    }
}
