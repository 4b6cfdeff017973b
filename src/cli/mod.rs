// src/cli/mod.rs
// CLI module for RootMate commands

use clap::{Parser, Subcommand};
use rootmate::clock::{SystemClock, local_offset};
use rootmate::config::{EnvConfig, Settings};
use rootmate::entitlement::StaticEntitlements;
use rootmate::http::create_shared_client;
use rootmate::messages::ProxyClient;
use rootmate::notify::LoggingScheduler;
use rootmate::orchestrator::{DailyMessageOrchestrator, OrchestratorSettings, Services};
use rootmate::plant::UserId;
use rootmate::weather::OpenMeteoClient;
use std::sync::Arc;

pub mod inspect;
pub mod message;
pub mod serve;

pub use inspect::{run_prompt, run_status, run_weather};
pub use message::{run_daily, run_message};
pub use serve::run_serve;

#[derive(Parser)]
#[command(name = "rootmate")]
#[command(about = "Plant care companion: status, personas and daily plant messages")]
#[command(version)]
pub struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the message proxy (needs GEMINI_API_KEY)
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Generate today's message for a single plant
    Message {
        #[arg(long)]
        nickname: String,

        #[arg(long)]
        species: String,

        /// Persona id or name, e.g. "dramatic" or "Zen Master"
        #[arg(long)]
        persona: String,

        /// Location for weather (falls back to the config file's)
        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        watered_days_ago: Option<i64>,

        #[arg(long, default_value = "0")]
        streak: u32,

        /// Proxy base URL (overrides ROOTMATE_BACKEND_URL)
        #[arg(long)]
        backend: Option<String>,
    },

    /// Run the daily batch over the plants in ~/.rootmate/config.toml
    Daily {
        /// Run even if the notification time has not passed yet
        #[arg(long)]
        force: bool,
    },

    /// Show current weather for a location
    Weather {
        location: String,
    },

    /// Print the system prompt for a species and persona
    Prompt {
        #[arg(long)]
        species: String,

        #[arg(long)]
        persona: String,
    },

    /// Classify a plant by days since watering
    Status {
        #[arg(long)]
        watered_days_ago: i64,
    },
}

/// Proxy URL: flag, then environment, then config file, then a local `serve`
pub fn resolve_backend(flag: Option<String>, env: &EnvConfig, settings: &Settings) -> String {
    flag.or_else(|| env.backend_url.clone())
        .or_else(|| settings.backend_url.clone())
        .unwrap_or_else(|| format!("http://{}:{}", env.host, env.port))
}

/// Wire the orchestrator with the real network clients
pub fn build_orchestrator(backend_url: &str, settings: &Settings) -> Arc<DailyMessageOrchestrator> {
    let client = create_shared_client();

    let services = Services {
        entitlements: Arc::new(StaticEntitlements::new(settings.subscription, settings.plant_ceiling)),
        weather: Arc::new(OpenMeteoClient::new(client.clone())),
        provider: Arc::new(ProxyClient::new(client, backend_url)),
        notifier: Arc::new(LoggingScheduler::new()),
        clock: Arc::new(SystemClock),
    };

    let orchestrator_settings = OrchestratorSettings {
        feed_cap: settings.feed_cap,
        day_offset: local_offset(),
        default_location: settings.location.clone(),
        notification_time: settings.notification_time,
    };

    Arc::new(DailyMessageOrchestrator::new(UserId::new(), services, orchestrator_settings))
}
