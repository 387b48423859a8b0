// Shared helpers for the integration tests.
#![allow(dead_code)]

use std::sync::Once;

use axum::body::Body;
use axum::http::{Request, Response};
use serde_json::{json, Value};
use wiremock::MockServer;

use stargaze::config::{
    ApodConfig, ClientConfig, Config, ExplainConfig, ServerConfig, DEFAULT_EXPLAIN_MODEL,
    DEFAULT_GATEWAY_URL,
};

pub const NASA_KEY: &str = "test-nasa-key";
pub const GEMINI_KEY: &str = "test-gemini-key";
pub const APOD_PATH: &str = "/planetary/apod";
pub const CHAT_PATH: &str = "/v1beta/openai/chat/completions";

static INIT: Once = Once::new();

/// Initialize tracing subscriber once for tests
pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Configuration pointing both upstreams at `server`. `None` leaves the
/// respective credential unset.
pub fn config_for(server: &MockServer, nasa_key: Option<&str>, gemini_key: Option<&str>) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        apod: ApodConfig {
            api_key: nasa_key.map(String::from),
            base_url: format!("{}{}", server.uri(), APOD_PATH),
            timeout_secs: Some(5),
        },
        explain: ExplainConfig {
            api_key: gemini_key.map(String::from),
            model: DEFAULT_EXPLAIN_MODEL.to_string(),
            base_url: format!("{}/v1beta/openai", server.uri()),
            timeout_secs: Some(5),
        },
        client: ClientConfig {
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
        },
    }
}

pub fn apod_record(date: &str) -> Value {
    json!({
        "copyright": "Jane Doe",
        "date": date,
        "explanation": format!("Light from {date} crossed the \"Local Group\" & arrived here."),
        "hdurl": format!("https://apod.nasa.gov/apod/image/{date}_hd.jpg"),
        "media_type": "image",
        "service_version": "v1",
        "title": format!("Deep Field {date}"),
        "url": format!("https://apod.nasa.gov/apod/image/{date}.jpg")
    })
}

pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1,
        "model": DEFAULT_EXPLAIN_MODEL,
        "choices": [
            {
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": content
                },
                "finish_reason": "stop"
            }
        ],
        "usage": {
            "prompt_tokens": 1,
            "completion_tokens": 1,
            "total_tokens": 2
        }
    })
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
