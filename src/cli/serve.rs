// src/cli/serve.rs
// Message proxy server command

use anyhow::Result;
use rootmate::config::EnvConfig;
use rootmate::http::{UPSTREAM_TIMEOUT, create_client};
use rootmate::proxy::{GeminiClient, ProxyServer, TextGenerator};
use std::sync::Arc;
use tracing::info;

/// Start the proxy. Refuses to start without a credential.
pub async fn run_serve(env: EnvConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    let api_key = env.require_api_key()?.to_string();

    let generator: Arc<dyn TextGenerator> = Arc::new(GeminiClient::new(
        create_client(UPSTREAM_TIMEOUT),
        api_key,
        env.gemini_model.clone(),
    ));

    let server = ProxyServer::new(
        host.unwrap_or(env.host),
        port.unwrap_or(env.port),
        Some(generator),
    );

    info!(addr = %server.addr(), model = %env.gemini_model, "Starting RootMate proxy");
    server.run().await?;

    Ok(())
}
