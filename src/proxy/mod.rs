// src/proxy/mod.rs
// Message proxy: holds the model credential and turns plant facts into text

mod gemini;
pub mod prompt;
mod routes;
mod server;

pub use gemini::{DEFAULT_MODEL, GEMINI_API_BASE, GeminiClient, TextGenerator};
pub use routes::{ProxyError, create_router};
pub use server::ProxyServer;
