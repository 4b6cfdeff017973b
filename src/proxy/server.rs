// src/proxy/server.rs
// Axum HTTP server for the message proxy

use super::TextGenerator;
use crate::clock::{Clock, SystemClock};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Shared state for the proxy server
#[derive(Clone)]
pub struct ProxyServer {
    pub host: String,
    pub port: u16,
    /// `None` when no credential was configured; requests then fail with a generic 500
    pub generator: Option<Arc<dyn TextGenerator>>,
    /// Used for "days since watered"
    pub clock: Arc<dyn Clock>,
}

impl ProxyServer {
    pub fn new(host: impl Into<String>, port: u16, generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self {
            host: host.into(),
            port,
            generator,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.generator.is_some()
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Bind the configured address and serve until the process stops
    pub async fn run(self) -> std::io::Result<()> {
        let listener = TcpListener::bind(self.addr()).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener
    pub async fn serve(self, listener: TcpListener) -> std::io::Result<()> {
        let local = listener.local_addr()?;
        tracing::info!(
            model = self.generator.as_ref().map(|g| g.model()).unwrap_or("<unconfigured>"),
            "RootMate proxy listening on {}",
            local
        );

        let app = super::routes::create_router(self);
        axum::serve(listener, app).await
    }
}
