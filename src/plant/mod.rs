// src/plant/mod.rs
// Plant model: identity, persona, derived hydration status

pub mod species;
pub mod status;

use crate::persona::Persona;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub use status::{classify, record_care, refresh};

/// Opaque plant identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlantId(Uuid);

impl PlantId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Owner of a set of plants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Hydration classification derived from the last watering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlantStatus {
    #[default]
    Hydrated,
    Thirsty,
    Critical,
}

impl PlantStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PlantStatus::Hydrated => "Hydrated",
            PlantStatus::Thirsty => "Thirsty",
            PlantStatus::Critical => "Critical",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            PlantStatus::Hydrated => "💧",
            PlantStatus::Thirsty => "😓",
            PlantStatus::Critical => "🚨",
        }
    }
}

impl fmt::Display for PlantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PlantStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hydrated" => Ok(PlantStatus::Hydrated),
            "thirsty" => Ok(PlantStatus::Thirsty),
            "critical" => Ok(PlantStatus::Critical),
            other => Err(format!("unknown plant status '{other}'")),
        }
    }
}

/// A plant owned by exactly one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    pub id: PlantId,
    pub owner_id: UserId,
    pub nickname: String,
    /// Free text; only matched against the species catalogue for icons
    pub species: String,
    pub persona: Persona,
    pub status: PlantStatus,
    pub last_watered: Option<DateTime<Utc>>,
    /// Consecutive good-care count
    pub health_streak: u32,
    /// Location used for weather enrichment, if any
    pub location: Option<String>,
    pub qr_code: Option<String>,
}

impl Plant {
    /// A freshly created plant: hydrated, no streak, never watered.
    pub fn new(
        owner_id: UserId,
        nickname: impl Into<String>,
        species: impl Into<String>,
        persona: Persona,
    ) -> Self {
        Self {
            id: PlantId::new(),
            owner_id,
            nickname: nickname.into(),
            species: species.into(),
            persona,
            status: PlantStatus::Hydrated,
            last_watered: None,
            health_streak: 0,
            location: None,
            qr_code: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Seed a plant with a known watering history, status derived from it.
    pub fn with_history(mut self, last_watered: DateTime<Utc>, health_streak: u32, now: DateTime<Utc>) -> Self {
        self.last_watered = Some(last_watered);
        self.health_streak = health_streak;
        self.status = classify(last_watered, now);
        self
    }

    pub fn icon(&self) -> &'static str {
        species::icon_for(&self.species)
    }
}
