// src/proxy/prompt.rs
// User prompt assembly for the upstream model

use crate::messages::{PlantFacts, WeatherData};
use chrono::{DateTime, Utc};

/// Describe the plant, its weather and its care history in one paragraph
pub fn build_user_prompt(plant: &PlantFacts, weather: Option<&WeatherData>, now: DateTime<Utc>) -> String {
    let mut prompt = format!(
        "Generate a message from {}, a {} with a {} vibe.",
        plant.nickname, plant.species, plant.persona
    );

    if let Some(weather) = weather {
        let c = &weather.current;
        prompt.push_str(&format!(
            " Current weather: {}°C, {}% humidity, {}mm precipitation.",
            c.temperature, c.humidity, c.precipitation
        ));
    }

    prompt.push_str(&format!(
        " Plant status: {}. Health streak: {} days.",
        plant.status, plant.health_streak
    ));

    if let Some(last_watered) = plant.last_watered {
        let days = (now - last_watered).num_days();
        prompt.push_str(&format!(" Last watered: {days} days ago."));
    }

    prompt
}

pub fn full_prompt(system_prompt: &str, user_prompt: &str) -> String {
    format!("{system_prompt}\n\n{user_prompt}")
}
