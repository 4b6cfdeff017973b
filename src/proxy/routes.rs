// src/proxy/routes.rs
// HTTP route handlers for the message proxy

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

use super::{ProxyServer, prompt};
use crate::error::UpstreamError;
use crate::messages::{FALLBACK_MESSAGE, GENERATE_MESSAGE_PATH, GenerateRequest, GenerateResponse};

const MISSING_FIELDS: &str = "Missing required fields: plant and systemPrompt are required";
const NOT_CONFIGURED: &str = "Server configuration error. Please contact support.";
const METHOD_NOT_ALLOWED: &str = "Method not allowed";

/// Create the axum router with all proxy routes
pub fn create_router(server: ProxyServer) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            GENERATE_MESSAGE_PATH,
            post(generate_message)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(server)
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> ProxyError {
    ProxyError::MethodNotAllowed
}

/// Body is taken raw so malformed JSON gets the same 400 as missing fields
fn parse_request(body: &[u8]) -> Result<GenerateRequest, ProxyError> {
    let request: GenerateRequest = serde_json::from_slice(body).map_err(|e| {
        debug!(error = %e, "Rejecting generate request");
        ProxyError::MissingFields
    })?;

    if request.system_prompt.trim().is_empty() {
        return Err(ProxyError::MissingFields);
    }
    Ok(request)
}

/// Build the prompt and relay it to the model
async fn generate_message(State(server): State<ProxyServer>, body: Bytes) -> Result<Json<GenerateResponse>, ProxyError> {
    let Some(generator) = server.generator.as_ref() else {
        error!("GEMINI_API_KEY is not set; refusing to generate");
        return Err(ProxyError::NotConfigured);
    };

    let request = parse_request(&body)?;

    let user_prompt = prompt::build_user_prompt(&request.plant, request.weather_data.as_ref(), server.clock.now());
    let full = prompt::full_prompt(&request.system_prompt, &user_prompt);

    let message = generator
        .generate_text(&full)
        .await
        .map_err(ProxyError::Upstream)?
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_string());

    Ok(Json(GenerateResponse {
        message: Some(message),
        error: None,
    }))
}

/// Proxy error types
#[derive(Debug)]
pub enum ProxyError {
    MissingFields,
    NotConfigured,
    MethodNotAllowed,
    Upstream(UpstreamError),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ProxyError::MissingFields => (StatusCode::BAD_REQUEST, MISSING_FIELDS.to_string()),
            ProxyError::NotConfigured => (StatusCode::INTERNAL_SERVER_ERROR, NOT_CONFIGURED.to_string()),
            ProxyError::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED.to_string()),
            ProxyError::Upstream(err) => {
                let status = StatusCode::from_u16(err.status)
                    .ok()
                    .filter(|s| s.is_client_error() || s.is_server_error())
                    .unwrap_or_else(|| {
                        warn!(status = err.status, "Unusable upstream status, answering 500");
                        StatusCode::INTERNAL_SERVER_ERROR
                    });
                (status, err.message)
            }
        };

        let body = GenerateResponse {
            message: None,
            error: Some(message),
        };

        (status, Json(body)).into_response()
    }
}
