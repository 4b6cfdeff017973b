// src/weather/open_meteo.rs
// Open-Meteo forecast client (no API key, single GET, no retry)

use super::{Coordinates, Gazetteer, WeatherReport, WeatherSource};
use crate::error::WeatherError;
use async_trait::async_trait;
use tracing::{debug, instrument};

pub const OPEN_METEO_BASE: &str = "https://api.open-meteo.com";

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,precipitation,weather_code";
const DAILY_FIELDS: &str = "temperature_2m_max,precipitation_sum";

pub struct OpenMeteoClient {
    client: reqwest::Client,
    base_url: String,
    gazetteer: Gazetteer,
}

impl OpenMeteoClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_base_url(client, OPEN_METEO_BASE)
    }

    /// Point at a different host (self-hosted Open-Meteo, tests)
    pub fn with_base_url(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            gazetteer: Gazetteer,
        }
    }

    fn forecast_url(&self) -> String {
        format!("{}/v1/forecast", self.base_url)
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoClient {
    async fn geocode(&self, location: &str) -> Result<Coordinates, WeatherError> {
        self.gazetteer.lookup(location)
    }

    #[instrument(skip(self), fields(lat = coords.latitude, lon = coords.longitude))]
    async fn fetch_current_and_daily(&self, coords: Coordinates) -> Result<WeatherReport, WeatherError> {
        let response = self
            .client
            .get(self.forecast_url())
            .query(&[
                ("latitude", coords.latitude.to_string()),
                ("longitude", coords.longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let report: WeatherReport = serde_json::from_str(&body)?;
        debug!(
            temperature = report.current.temperature,
            humidity = report.current.humidity,
            "Weather fetched"
        );
        Ok(report)
    }
}
