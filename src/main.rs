// src/main.rs
// RootMate - plant care companion CLI and message proxy

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::message::MessageArgs;
use cli::{Cli, Commands};
use rootmate::config::{EnvConfig, rootmate_dir};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Existing variables win, so the project .env goes first
    let _ = dotenvy::dotenv();
    let _ = dotenvy::from_path(rootmate_dir().join(".env"));

    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        match &cli.command {
            Commands::Serve { .. } => Level::INFO,
            _ => Level::WARN,
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let env = EnvConfig::from_env()?;

    match cli.command {
        Commands::Serve { host, port } => {
            cli::run_serve(env, host, port).await?;
        }
        Commands::Message {
            nickname,
            species,
            persona,
            location,
            watered_days_ago,
            streak,
            backend,
        } => {
            let args = MessageArgs {
                nickname,
                species,
                persona,
                location,
                watered_days_ago,
                streak,
                backend,
            };
            cli::run_message(env, args).await?;
        }
        Commands::Daily { force } => {
            cli::run_daily(env, force).await?;
        }
        Commands::Weather { location } => {
            cli::run_weather(&location).await?;
        }
        Commands::Prompt { species, persona } => {
            cli::run_prompt(&species, &persona)?;
        }
        Commands::Status { watered_days_ago } => {
            cli::run_status(watered_days_ago);
        }
    }

    Ok(())
}
