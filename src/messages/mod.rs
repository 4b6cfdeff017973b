// src/messages/mod.rs
// Daily message wire format, provider interface and the recent-message feed

pub mod client;
pub mod feed;

use crate::error::MessageError;
use crate::plant::Plant;
use crate::weather::WeatherReport;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use client::ProxyClient;
pub use feed::{DailyMessage, MessageFeed};

/// Returned when the generator produces nothing usable
pub const FALLBACK_MESSAGE: &str = "I'm doing great! 🌿";

/// Path of the generation endpoint on the proxy
pub const GENERATE_MESSAGE_PATH: &str = "/api/generate-message";

/// Plant facts sent to the proxy.
///
/// Persona and status travel as display strings; the proxy only quotes them
/// into the prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantFacts {
    pub nickname: String,
    pub species: String,
    #[serde(alias = "vibe")]
    pub persona: String,
    pub status: String,
    #[serde(default)]
    pub health_streak: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_watered: Option<DateTime<Utc>>,
}

impl From<&Plant> for PlantFacts {
    fn from(plant: &Plant) -> Self {
        Self {
            nickname: plant.nickname.clone(),
            species: plant.species.clone(),
            persona: plant.persona.to_string(),
            status: plant.status.to_string(),
            health_streak: plant.health_streak,
            last_watered: plant.last_watered,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub humidity: f64,
    pub precipitation: f64,
}

/// The slice of a weather report the proxy cares about
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherData {
    pub current: CurrentConditions,
}

impl From<&WeatherReport> for WeatherData {
    fn from(report: &WeatherReport) -> Self {
        Self {
            current: CurrentConditions {
                temperature: report.current.temperature,
                humidity: report.current.humidity,
                precipitation: report.current.precipitation,
            },
        }
    }
}

/// Body of `POST /api/generate-message`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub plant: PlantFacts,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather_data: Option<WeatherData>,
    pub system_prompt: String,
}

/// Either `{message}` or `{error}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Something that turns a prompt request into plant-voiced text
#[async_trait]
pub trait MessageProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn generate(&self, request: &GenerateRequest) -> Result<String, MessageError>;
}
