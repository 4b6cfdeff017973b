// src/cli/message.rs
// Daily message commands: one plant, or the whole configured garden

use super::{build_orchestrator, resolve_backend};
use anyhow::{Result, anyhow};
use chrono::{Duration, Utc};
use rootmate::config::{EnvConfig, RootmateConfig};
use rootmate::notify::DailyTime;
use rootmate::persona::Persona;
use rootmate::plant::{Plant, UserId, species};
use tracing::warn;

pub struct MessageArgs {
    pub nickname: String,
    pub species: String,
    pub persona: String,
    pub location: Option<String>,
    pub watered_days_ago: Option<i64>,
    pub streak: u32,
    pub backend: Option<String>,
}

pub async fn run_message(env: EnvConfig, args: MessageArgs) -> Result<()> {
    let persona: Persona = args.persona.parse().map_err(|e: String| anyhow!(e))?;
    let config = RootmateConfig::load();
    let backend = resolve_backend(args.backend, &env, &config.settings);
    let orchestrator = build_orchestrator(&backend, &config.settings);

    let now = Utc::now();
    let species = species::canonical(&args.species).unwrap_or(args.species.as_str());
    let mut plant = Plant::new(UserId::new(), args.nickname, species, persona);
    if let Some(location) = args.location {
        plant = plant.with_location(location);
    }
    match args.watered_days_ago {
        Some(days) => plant = plant.with_history(now - Duration::days(days), args.streak, now),
        None => plant.health_streak = args.streak,
    }

    let outcome = orchestrator
        .generate_daily_message(&plant)
        .await
        .map_err(|e| anyhow!(e.user_message()))?;

    println!("{} {} ({}):", plant.icon(), plant.nickname, plant.status);
    println!("{}", outcome.into_text());
    Ok(())
}

pub async fn run_daily(env: EnvConfig, force: bool) -> Result<()> {
    let config = RootmateConfig::load();
    if config.plants.is_empty() {
        println!(
            "No plants configured. Add [[plants]] entries to {}",
            RootmateConfig::config_path().display()
        );
        return Ok(());
    }

    let backend = resolve_backend(None, &env, &config.settings);
    let orchestrator = build_orchestrator(&backend, &config.settings);

    let now = Utc::now();
    let owner = UserId::new();
    for entry in &config.plants {
        let plant = match entry.to_plant(owner, now) {
            Ok(plant) => plant,
            Err(e) => {
                warn!(plant = %entry.nickname, error = %e, "Skipping plant");
                continue;
            }
        };
        if let Err(e) = orchestrator.add_plant(plant).await {
            warn!(plant = %entry.nickname, error = %e, "Skipping plant");
        }
    }

    // Midnight has always passed
    let schedule = if force {
        DailyTime::new(0, 0).unwrap_or_default()
    } else {
        config.settings.notification_time
    };

    let report = orchestrator.generate_daily_messages_if_needed(schedule).await;
    if !report.due {
        println!("Not yet: daily messages go out at {schedule}. Use --force to run now.");
        return Ok(());
    }

    for message in orchestrator.recent_messages() {
        println!("{} ({}): {}", message.plant_nickname, message.plant_persona, message.message);
    }
    println!(
        "\n{} generated, {} skipped, {} failed",
        report.generated,
        report.skipped,
        report.failed.len()
    );
    for (id, error) in &report.failed {
        let name = orchestrator
            .plant(*id)
            .map(|p| p.nickname)
            .unwrap_or_else(|| id.to_string());
        println!("  {name}: {error}");
    }

    Ok(())
}
