// src/cli/inspect.rs
// Offline-ish helpers: weather lookup, persona prompts, status classification

use anyhow::{Result, anyhow};
use rootmate::http::create_shared_client;
use rootmate::persona::{self, Persona};
use rootmate::plant::status::{CRITICAL_AFTER_DAYS, THIRSTY_AFTER_DAYS, classify_days};
use rootmate::weather::{OpenMeteoClient, WeatherSource};

pub async fn run_weather(location: &str) -> Result<()> {
    let client = OpenMeteoClient::new(create_shared_client());
    let report = client.weather_for(location).await?;

    let c = &report.current;
    println!(
        "{location}: {}°C, {}% humidity, {}mm precipitation (code {})",
        c.temperature, c.humidity, c.precipitation, c.weather_code
    );
    for (i, day) in report.daily.time.iter().enumerate() {
        let max = report.daily.temperature_max.get(i).copied().unwrap_or_default();
        let rain = report.daily.precipitation_sum.get(i).copied().unwrap_or_default();
        println!("  {day}: max {max}°C, {rain}mm");
    }
    Ok(())
}

pub fn run_prompt(species: &str, persona: &str) -> Result<()> {
    let persona: Persona = persona.parse().map_err(|e: String| anyhow!(e))?;
    eprintln!("{persona}: {}", persona.description());
    println!("{}", persona::prompt_for(species, persona));
    Ok(())
}

pub fn run_status(watered_days_ago: i64) {
    let status = classify_days(watered_days_ago.max(0));
    println!("{} {}", status.emoji(), status);
    println!("  thirsty after {THIRSTY_AFTER_DAYS} days, critical after {CRITICAL_AFTER_DAYS}");
}
