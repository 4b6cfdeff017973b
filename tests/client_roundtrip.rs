// tests/client_roundtrip.rs
// Network clients against in-process axum servers


use axum::Json;
use axum::extract::Query;
use axum::http::{StatusCode, Uri};
use axum::routing::{get, post};
use rootmate::error::{MessageError, UpstreamError, WeatherError};
use rootmate::http::RetryPolicy;
use rootmate::messages::{FALLBACK_MESSAGE, GenerateRequest, MessageProvider, PlantFacts, ProxyClient};
use rootmate::persona::{Persona, prompt_for};
use rootmate::plant::{Plant, UserId};
use rootmate::proxy::{GeminiClient, TextGenerator};
use rootmate::weather::{OpenMeteoClient, WeatherSource};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use test_helpers::{FakeGenerator, proxy_server, spawn_app};

fn request() -> GenerateRequest {
    let plant = Plant::new(UserId::new(), "Fiona", "Fiddle Leaf Fig", Persona::DramaQueen);
    GenerateRequest {
        plant: PlantFacts::from(&plant),
        weather_data: None,
        system_prompt: prompt_for(&plant.species, plant.persona),
    }
}

async fn spawn_proxy(generator: Arc<FakeGenerator>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = proxy_server(Some(generator));
    tokio::spawn(async move {
        let _ = server.serve(listener).await;
    });
    format!("http://{addr}")
}

// ============================================================================
// ProxyClient <-> proxy
// ============================================================================

#[tokio::test]
async fn test_client_through_proxy() {
    let generator = FakeGenerator::replying("Fetch the watering can, darling.");
    let base = spawn_proxy(generator.clone()).await;
    let client = ProxyClient::new(reqwest::Client::new(), &base);

    let text = client.generate(&request()).await.unwrap();

    assert_eq!(text, "Fetch the watering can, darling.");
    assert!(generator.last_prompt().unwrap().contains("Ficus lyrata"));
}

#[tokio::test]
async fn test_client_surfaces_proxy_error_verbatim() {
    let generator = FakeGenerator::with_reply(Err(UpstreamError::new(429, "Quota exceeded for today")));
    let base = spawn_proxy(generator).await;
    let client = ProxyClient::new(reqwest::Client::new(), &base);

    let err = client.generate(&request()).await.unwrap_err();
    assert_eq!(err, MessageError::ProviderUnavailable("Quota exceeded for today".to_string()));
}

#[tokio::test]
async fn test_client_gets_fallback_for_empty_upstream() {
    let base = spawn_proxy(FakeGenerator::with_reply(Ok(None))).await;
    let client = ProxyClient::new(reqwest::Client::new(), &base);

    assert_eq!(client.generate(&request()).await.unwrap(), FALLBACK_MESSAGE);
}

// ============================================================================
// ProxyClient <-> odd servers
// ============================================================================

#[tokio::test]
async fn test_empty_message_becomes_fallback() {
    let app = axum::Router::new().route(
        "/api/generate-message",
        post(|| async { Json(json!({"message": ""})) }),
    );
    let base = spawn_app(app).await;

    let text = ProxyClient::new(reqwest::Client::new(), &base)
        .generate(&request())
        .await
        .unwrap();
    assert_eq!(text, FALLBACK_MESSAGE);
}

#[tokio::test]
async fn test_plain_text_error_body() {
    let app = axum::Router::new().route(
        "/api/generate-message",
        post(|| async { (StatusCode::BAD_GATEWAY, "upstream unavailable") }),
    );
    let base = spawn_app(app).await;

    let err = ProxyClient::new(reqwest::Client::new(), &base)
        .generate(&request())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        MessageError::ProviderUnavailable("API request failed: upstream unavailable".to_string())
    );
}

#[tokio::test]
async fn test_malformed_success_is_decode_error() {
    let app = axum::Router::new().route("/api/generate-message", post(|| async { "not json" }));
    let base = spawn_app(app).await;

    let err = ProxyClient::new(reqwest::Client::new(), &base)
        .generate(&request())
        .await
        .unwrap_err();
    assert!(matches!(err, MessageError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_proxy_is_network_error() {
    // Bind then drop to get a port nothing listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = ProxyClient::new(reqwest::Client::new(), &format!("http://127.0.0.1:{port}"))
        .with_retry(RetryPolicy::none());

    let err = client.generate(&request()).await.unwrap_err();
    assert!(matches!(err, MessageError::Network(_)));
}

// ============================================================================
// Open-Meteo
// ============================================================================

fn forecast_payload() -> Value {
    json!({
        "latitude": 55.95,
        "longitude": -3.19,
        "current": {
            "time": "2025-06-15T10:00",
            "temperature_2m": 13.4,
            "relative_humidity_2m": 81,
            "precipitation": 0.3,
            "weather_code": 61
        },
        "daily": {
            "time": ["2025-06-15", "2025-06-16"],
            "temperature_2m_max": [16.1, 18.0],
            "precipitation_sum": [2.4, 0.0]
        }
    })
}

#[tokio::test]
async fn test_open_meteo_query_and_decode() {
    let seen: Arc<Mutex<Option<HashMap<String, String>>>> = Arc::new(Mutex::new(None));
    let recorder = seen.clone();
    let app = axum::Router::new().route(
        "/v1/forecast",
        get(move |Query(params): Query<HashMap<String, String>>| {
            let recorder = recorder.clone();
            async move {
                *recorder.lock().unwrap() = Some(params);
                Json(forecast_payload())
            }
        }),
    );
    let base = spawn_app(app).await;
    let client = OpenMeteoClient::with_base_url(reqwest::Client::new(), base);

    let report = client.weather_for("Edinburgh, Scotland").await.unwrap();

    assert_eq!(report.current.temperature, 13.4);
    assert_eq!(report.current.humidity, 81.0);
    assert_eq!(report.current.weather_code, 61);
    assert_eq!(report.daily.time.len(), 2);
    assert_eq!(report.daily.precipitation_sum, vec![2.4, 0.0]);

    let params = seen.lock().unwrap().clone().unwrap();
    assert_eq!(params["current"], "temperature_2m,relative_humidity_2m,precipitation,weather_code");
    assert_eq!(params["daily"], "temperature_2m_max,precipitation_sum");
    assert_eq!(params["timezone"], "auto");
    assert!(params["latitude"].starts_with("55.95"));
}

#[tokio::test]
async fn test_open_meteo_status_error() {
    let app = axum::Router::new().route(
        "/v1/forecast",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
    );
    let base = spawn_app(app).await;
    let client = OpenMeteoClient::with_base_url(reqwest::Client::new(), base);

    let err = client.weather_for("London").await.unwrap_err();
    assert!(matches!(err, WeatherError::Status(503)));
}

#[tokio::test]
async fn test_open_meteo_bad_payload() {
    let app = axum::Router::new().route("/v1/forecast", get(|| async { Json(json!({"current": {}})) }));
    let base = spawn_app(app).await;
    let client = OpenMeteoClient::with_base_url(reqwest::Client::new(), base);

    let err = client.weather_for("London").await.unwrap_err();
    assert!(matches!(err, WeatherError::Decode(_)));
}

#[tokio::test]
async fn test_unknown_place_never_hits_network() {
    // Port 9 is discard; a request would fail with Network, not Unresolved
    let client = OpenMeteoClient::with_base_url(reqwest::Client::new(), "http://127.0.0.1:9");
    let err = client.weather_for("Atlantis").await.unwrap_err();
    assert!(matches!(err, WeatherError::Unresolved(_)));
}

// ============================================================================
// Gemini
// ============================================================================

#[tokio::test]
async fn test_gemini_request_and_reply() {
    let seen: Arc<Mutex<Option<(String, Value)>>> = Arc::new(Mutex::new(None));
    let recorder = seen.clone();
    let app = axum::Router::new().fallback(move |uri: Uri, Json(body): Json<Value>| {
        let recorder = recorder.clone();
        async move {
            *recorder.lock().unwrap() = Some((uri.to_string(), body));
            Json(json!({"candidates": [{"content": {"parts": [{"text": "Hello from the fig"}]}}]}))
        }
    });
    let base = spawn_app(app).await;
    let client = GeminiClient::with_base_url(
        reqwest::Client::new(),
        "test-key".to_string(),
        "gemini-2.5-flash-lite".to_string(),
        format!("{base}/v1beta/models"),
    );

    let text = client.generate_text("sys\n\nuser").await.unwrap();
    assert_eq!(text.as_deref(), Some("Hello from the fig"));

    let (uri, body) = seen.lock().unwrap().clone().unwrap();
    assert_eq!(uri, "/v1beta/models/gemini-2.5-flash-lite:generateContent?key=test-key");
    assert_eq!(body["contents"][0]["parts"][0]["text"], "sys\n\nuser");
    assert!((body["generationConfig"]["temperature"].as_f64().unwrap() - 0.8).abs() < 1e-6);
}

#[tokio::test]
async fn test_gemini_error_keeps_status() {
    let app = axum::Router::new().fallback(|| async {
        (
            StatusCode::FORBIDDEN,
            Json(json!({"error": {"code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED"}})),
        )
    });
    let base = spawn_app(app).await;
    let client = GeminiClient::with_base_url(
        reqwest::Client::new(),
        "bad".to_string(),
        "gemini-2.5-flash-lite".to_string(),
        base,
    );

    let err = client.generate_text("hi").await.unwrap_err();
    assert_eq!(err, UpstreamError::new(403, "API key not valid"));
}
