// src/config/mod.rs
// Configuration: environment variables and the optional config file

pub mod env;
pub mod file;

pub use env::EnvConfig;
pub use file::{PlantEntry, RootmateConfig, Settings};

use std::path::PathBuf;

/// ~/.rootmate, or ./.rootmate when there is no home directory
pub fn rootmate_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".rootmate")
}
