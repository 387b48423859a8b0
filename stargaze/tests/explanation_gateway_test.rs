mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stargaze::api::{create_router, AppState};
use stargaze::llm::MISSING_API_KEY;
use stargaze::models::{
    ImageRecord, FALLBACK_COLLECTION_SUMMARY, FALLBACK_KEY_FEATURE, FALLBACK_SCIENTIFIC_CONTEXT,
};

use common::{
    apod_record, body_json, completion_body, config_for, get, init_test_logger, post_json,
    APOD_PATH, CHAT_PATH, GEMINI_KEY, NASA_KEY,
};

async fn mount_completion(server: &MockServer, content: &str) {
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .and(header("authorization", format!("Bearer {GEMINI_KEY}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(content)))
        .expect(1)
        .mount(server)
        .await;
}

fn user_prompt(request: &wiremock::Request) -> String {
    let body: Value = serde_json::from_slice(&request.body).unwrap();
    let messages = body["messages"].as_array().unwrap();
    messages
        .iter()
        .find(|m| m["role"] == "user")
        .and_then(|m| m["content"].as_str())
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn fenced_json_is_returned_verbatim() {
    init_test_logger();
    let server = MockServer::start().await;
    let record = json!({
        "explanation": "Billions of stars swirl together.",
        "keyFeatures": ["Spiral arms", "Dust lanes"],
        "scientificContext": "Galaxies are the building blocks of the universe."
    });
    mount_completion(&server, &format!("```json\n{record}\n```")).await;

    let app = create_router(AppState::new(config_for(&server, None, Some(GEMINI_KEY))));
    let response = app
        .oneshot(post_json("/api/explain", &json!({ "image": apod_record("2024-03-14") })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, record);
}

#[tokio::test]
async fn prose_answer_degrades_to_fallback_record() {
    let server = MockServer::start().await;
    let prose = "This image shows a beautiful nebula full of young stars.";
    mount_completion(&server, prose).await;

    let app = create_router(AppState::new(config_for(&server, None, Some(GEMINI_KEY))));
    let response = app
        .oneshot(post_json("/api/explain", &json!({ "image": apod_record("2024-03-14") })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({
            "explanation": prose,
            "keyFeatures": [FALLBACK_KEY_FEATURE],
            "scientificContext": FALLBACK_SCIENTIFIC_CONTEXT
        })
    );
}

#[tokio::test]
async fn wrong_json_shape_also_degrades() {
    let server = MockServer::start().await;
    let answer = r#"{"explanation": "Only one field"}"#;
    mount_completion(&server, answer).await;

    let app = create_router(AppState::new(config_for(&server, None, Some(GEMINI_KEY))));
    let response = app
        .oneshot(post_json("/api/explain", &json!({ "image": apod_record("2024-03-14") })))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["explanation"], answer);
    assert_eq!(body["keyFeatures"], json!([FALLBACK_KEY_FEATURE]));
}

#[tokio::test]
async fn whitespace_answer_degrades_instead_of_failing() {
    let server = MockServer::start().await;
    mount_completion(&server, "  \n").await;

    let app = create_router(AppState::new(config_for(&server, None, Some(GEMINI_KEY))));
    let response = app
        .oneshot(post_json("/api/explain", &json!({ "image": apod_record("2024-03-14") })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({
            "explanation": "  \n",
            "keyFeatures": [FALLBACK_KEY_FEATURE],
            "scientificContext": FALLBACK_SCIENTIFIC_CONTEXT
        })
    );
}

#[tokio::test]
async fn empty_answer_is_an_upstream_failure() {
    let server = MockServer::start().await;
    mount_completion(&server, "").await;

    let app = create_router(AppState::new(config_for(&server, None, Some(GEMINI_KEY))));
    let response = app
        .oneshot(post_json("/api/explain", &json!({ "image": apod_record("2024-03-14") })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Failed to generate explanation" })
    );
}

#[tokio::test]
async fn missing_image_is_a_validation_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("{}")))
        .expect(0)
        .mount(&server)
        .await;

    let app = create_router(AppState::new(config_for(&server, None, Some(GEMINI_KEY))));

    for body in [json!({}), json!({ "image": null })] {
        let response = app.clone().oneshot(post_json("/api/explain", &body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Image data is required" })
        );
    }
}

#[tokio::test]
async fn malformed_image_is_a_validation_error() {
    let server = MockServer::start().await;
    let app = create_router(AppState::new(config_for(&server, None, Some(GEMINI_KEY))));

    let response = app
        .oneshot(post_json("/api/explain", &json!({ "image": { "title": "no date" } })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_credential_fails_without_calling_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("{}")))
        .expect(0)
        .mount(&server)
        .await;

    let app = create_router(AppState::new(config_for(&server, Some(NASA_KEY), None)));
    let response = app
        .oneshot(post_json("/api/explain", &json!({ "image": apod_record("2024-03-14") })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await, json!({ "error": MISSING_API_KEY }));
}

#[tokio::test]
async fn upstream_failure_is_reported_generically_and_not_retried() {
    init_test_logger();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("quota exhausted for project 42"))
        .expect(1)
        .mount(&server)
        .await;

    let app = create_router(AppState::new(config_for(&server, None, Some(GEMINI_KEY))));
    let response = app
        .oneshot(post_json("/api/explain", &json!({ "image": apod_record("2024-03-14") })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Failed to generate explanation" })
    );
}

#[tokio::test]
async fn fetched_record_round_trips_into_the_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(APOD_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(apod_record("2024-03-14")))
        .expect(1)
        .mount(&server)
        .await;
    mount_completion(&server, "plain text").await;

    let app = create_router(AppState::new(config_for(
        &server,
        Some(NASA_KEY),
        Some(GEMINI_KEY),
    )));

    let fetched = app
        .clone()
        .oneshot(get("/api/nasa?date=2024-03-14"))
        .await
        .unwrap();
    let fetched = body_json(fetched).await;

    // Re-serialize through the typed record, as a client would.
    let record: ImageRecord = serde_json::from_value(fetched.clone()).unwrap();
    let reserialized = serde_json::to_value(&record).unwrap();
    for field in ["date", "title", "explanation"] {
        assert_eq!(reserialized[field], fetched[field], "{field}");
    }

    let response = app
        .oneshot(post_json("/api/explain", &json!({ "image": reserialized })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let requests = server.received_requests().await.unwrap();
    let chat = requests
        .iter()
        .find(|r| r.url.path() == CHAT_PATH)
        .unwrap();
    let prompt = user_prompt(chat);
    for field in ["date", "title", "explanation"] {
        let value = fetched[field].as_str().unwrap();
        assert!(prompt.contains(value), "prompt is missing {field}: {value}");
    }
}

#[tokio::test]
async fn summary_uses_one_call() {
    let server = MockServer::start().await;
    mount_completion(&server, "  A week of nebulae and galaxies.  ").await;

    let app = create_router(AppState::new(config_for(&server, None, Some(GEMINI_KEY))));
    let response = app
        .oneshot(post_json(
            "/api/summary",
            &json!({ "images": [apod_record("2024-03-01"), apod_record("2024-03-02")] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "summary": "A week of nebulae and galaxies." })
    );

    let requests = server.received_requests().await.unwrap();
    let prompt = user_prompt(&requests[0]);
    assert!(prompt.contains("Deep Field 2024-03-01"));
    assert!(prompt.contains("Deep Field 2024-03-02"));
}

#[tokio::test]
async fn empty_summary_answer_uses_fallback() {
    let server = MockServer::start().await;
    mount_completion(&server, "").await;

    let app = create_router(AppState::new(config_for(&server, None, Some(GEMINI_KEY))));
    let response = app
        .oneshot(post_json(
            "/api/summary",
            &json!({ "images": [apod_record("2024-03-01")] }),
        ))
        .await
        .unwrap();

    assert_eq!(
        body_json(response).await,
        json!({ "summary": FALLBACK_COLLECTION_SUMMARY })
    );
}

#[tokio::test]
async fn summary_requires_images() {
    let server = MockServer::start().await;
    let app = create_router(AppState::new(config_for(&server, None, Some(GEMINI_KEY))));

    let response = app
        .oneshot(post_json("/api/summary", &json!({ "images": [] })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(server.received_requests().await.unwrap().is_empty());
}
