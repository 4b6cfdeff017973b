// src/weather/mod.rs
// Weather enrichment: location lookup and current/daily forecast

pub mod geocode;
pub mod open_meteo;

use crate::error::WeatherError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use geocode::Gazetteer;
pub use open_meteo::OpenMeteoClient;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Conditions right now. Field names follow Open-Meteo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    #[serde(rename = "temperature_2m")]
    pub temperature: f64,
    #[serde(rename = "relative_humidity_2m")]
    pub humidity: f64,
    pub precipitation: f64,
    #[serde(rename = "weather_code", default)]
    pub weather_code: i32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DailyWeather {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(rename = "temperature_2m_max", default)]
    pub temperature_max: Vec<f64>,
    #[serde(rename = "precipitation_sum", default)]
    pub precipitation_sum: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: CurrentWeather,
    #[serde(default)]
    pub daily: DailyWeather,
}

/// Anything that can turn a location into weather.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn geocode(&self, location: &str) -> Result<Coordinates, WeatherError>;

    async fn fetch_current_and_daily(&self, coords: Coordinates) -> Result<WeatherReport, WeatherError>;

    /// Geocode then fetch
    async fn weather_for(&self, location: &str) -> Result<WeatherReport, WeatherError> {
        let coords = self.geocode(location).await?;
        self.fetch_current_and_daily(coords).await
    }
}
