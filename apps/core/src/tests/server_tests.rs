//! Server Tests
//!
//! Drives the router in-process with `tower::ServiceExt::oneshot`.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;
use url::Url;
use wiremock::matchers::{header as header_matcher, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::error::AppError;
use crate::server::{router, AppState, RouterOptions};
use crate::storage::MemoryStore;
use crate::transcription::{SpeechToText, WhisperClient};

const BOUNDARY: &str = "mindwise-test-boundary";
const UPLOAD_LIMIT: usize = 1024 * 1024;

/// Records what it receives and answers with a fixed transcript.
struct RecordingProvider {
    received: Mutex<Vec<(String, Vec<u8>)>>,
}

#[async_trait]
impl SpeechToText for RecordingProvider {
    async fn transcribe(&self, file_name: &str, audio: Vec<u8>) -> Result<String, AppError> {
        self.received
            .lock()
            .unwrap()
            .push((file_name.to_string(), audio));
        Ok("I felt calm after my walk".to_string())
    }
}

struct BrokenProvider;

#[async_trait]
impl SpeechToText for BrokenProvider {
    async fn transcribe(&self, _file_name: &str, _audio: Vec<u8>) -> Result<String, AppError> {
        Err(AppError::Transcription("provider returned 401: invalid api key".into()))
    }
}

struct TestApp {
    app: Router,
    uploads: TempDir,
}

fn test_app(provider: Arc<dyn SpeechToText>, limit: usize) -> TestApp {
    let uploads = tempdir().expect("Failed to create temp dir");
    let state = AppState::new(Arc::new(MemoryStore::new()), provider, uploads.path());
    TestApp {
        app: router(
            state,
            RouterOptions {
                max_upload_bytes: limit,
                ..RouterOptions::default()
            },
        ),
        uploads,
    }
}

fn default_app() -> TestApp {
    test_app(
        Arc::new(RecordingProvider {
            received: Mutex::new(Vec::new()),
        }),
        UPLOAD_LIMIT,
    )
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn multipart_upload(field: &str, file_name: &str, audio: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: audio/wav\r\n\r\n");
    body.extend_from_slice(audio);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/transcribe")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn uploads_left(dir: &TempDir) -> usize {
    std::fs::read_dir(dir.path()).unwrap().count()
}

async fn sign_up_and_login(app: &Router, email: &str) {
    let (status, _) = send(
        app,
        post_json(
            "/signup",
            json!({
                "email": email,
                "phone": "555-0100",
                "password": "pw",
                "confirm_password": "pw"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        app,
        post_json("/login", json!({ "email": email, "password": "pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], email);
}

#[tokio::test]
async fn test_index_and_health() {
    let test = default_app();

    let response = test.app.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(String::from_utf8_lossy(&bytes).contains("/transcribe"));

    let response = test.app.clone().oneshot(get("/login")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = test.app.clone().oneshot(get("/health")).await.unwrap();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn test_transcribe_returns_text_and_cleans_up() {
    let provider = Arc::new(RecordingProvider {
        received: Mutex::new(Vec::new()),
    });
    let test = test_app(provider.clone(), UPLOAD_LIMIT);

    let (status, body) = send(&test.app, multipart_upload("audio", "note.wav", b"RIFF....WAVE")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "text": "I felt calm after my walk" }));

    let received = provider.received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].0, "note.wav");
    assert_eq!(received[0].1, b"RIFF....WAVE");
    assert_eq!(uploads_left(&test.uploads), 0);
}

#[tokio::test]
async fn test_transcribe_failure_is_generic() {
    let test = test_app(Arc::new(BrokenProvider), UPLOAD_LIMIT);

    let (status, body) = send(&test.app, multipart_upload("audio", "note.wav", b"audio")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Transcription failed" }));
    assert_eq!(uploads_left(&test.uploads), 0);
}

#[tokio::test]
async fn test_transcribe_without_audio_field() {
    let test = default_app();

    let (status, body) = send(&test.app, multipart_upload("voice", "note.wav", b"audio")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Transcription failed");
}

#[tokio::test]
async fn test_transcribe_non_multipart_body_is_json_error() {
    let test = default_app();

    let request = Request::builder()
        .method("POST")
        .uri("/transcribe")
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .body(Body::from(&b"RIFF....WAVE"[..]))
        .unwrap();
    let (status, body) = send(&test.app, request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Transcription failed" }));
    assert_eq!(uploads_left(&test.uploads), 0);
}

#[tokio::test]
async fn test_transcribe_without_content_type_is_json_error() {
    let test = default_app();

    let request = Request::builder()
        .method("POST")
        .uri("/transcribe")
        .body(Body::from("audio"))
        .unwrap();
    let (status, body) = send(&test.app, request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Transcription failed" }));
}

#[tokio::test]
async fn test_transcribe_over_limit_is_rejected() {
    let test = test_app(
        Arc::new(RecordingProvider {
            received: Mutex::new(Vec::new()),
        }),
        64,
    );

    let (status, _) = send(&test.app, multipart_upload("audio", "note.wav", &[0u8; 4096])).await;

    assert!(!status.is_success());
    assert_eq!(uploads_left(&test.uploads), 0);
}

#[tokio::test]
async fn test_transcribe_through_whisper_client() {
    // Arrange
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/audio/transcriptions"))
        .and(header_matcher("authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_string("today was a good day\n"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let base = Url::parse(&format!("{}/v1", mock_server.uri())).unwrap();
    let whisper = WhisperClient::new(base, Some("sk-test".into()), "whisper-1");
    let test = test_app(Arc::new(whisper), UPLOAD_LIMIT);

    // Act
    let (status, body) = send(&test.app, multipart_upload("audio", "note.wav", b"audio")).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["text"], "today was a good day");
    assert_eq!(uploads_left(&test.uploads), 0);
}

#[tokio::test]
async fn test_chat_crisis_reply_has_links() {
    let test = default_app();

    let (status, body) = send(
        &test.app,
        post_json("/chat", json!({ "message": "I keep thinking about suicide" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["matched"], "suicide");
    assert!(!body["links"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_chat_blank_message_is_bad_request() {
    let test = default_app();

    let (status, body) = send(&test.app, post_json("/chat", json!({ "message": "   " }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_search_and_categories() {
    let test = default_app();

    let (status, body) = send(&test.app, get("/search")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 17);

    let (_, body) = send(&test.app, get("/search?q=anxiety&category=all")).await;
    let ids: Vec<u64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 7, 14]);

    let (_, body) = send(&test.app, get("/search?category=crisis")).await;
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (_, body) = send(&test.app, get("/categories")).await;
    assert_eq!(body[0], "anxiety");
}

#[tokio::test]
async fn test_signup_errors() {
    let test = default_app();
    sign_up_and_login(&test.app, "ana@example.com").await;

    let (status, body) = send(
        &test.app,
        post_json(
            "/signup",
            json!({
                "email": "ana@example.com",
                "phone": "555-0100",
                "password": "pw",
                "confirm_password": "pw"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Email already registered");

    let (status, body) = send(
        &test.app,
        post_json(
            "/signup",
            json!({
                "email": "ben@example.com",
                "phone": "555-0100",
                "password": "pw",
                "confirm_password": "wp"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Passwords do not match");
}

#[tokio::test]
async fn test_signup_missing_field_is_json_bad_request() {
    let test = default_app();

    let (status, body) = send(
        &test.app,
        post_json("/signup", json!({ "email": "a@b.com", "password": "x" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("phone"));
}

#[tokio::test]
async fn test_malformed_json_bodies_are_json_bad_requests() {
    let test = default_app();

    let broken = Request::builder()
        .method("POST")
        .uri("/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"message\": "))
        .unwrap();
    let (status, body) = send(&test.app, broken).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let no_content_type = Request::builder()
        .method("POST")
        .uri("/login")
        .body(Body::from(json!({ "email": "a@b.com", "password": "x" }).to_string()))
        .unwrap();
    let (status, body) = send(&test.app, no_content_type).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_cors_allows_any_origin_by_default() {
    let test = default_app();

    let request = Request::builder()
        .uri("/categories")
        .header(header::ORIGIN, "https://app.example.com")
        .body(Body::empty())
        .unwrap();
    let response = test.app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn test_cors_echoes_configured_origin_only() {
    let state = AppState::new(
        Arc::new(MemoryStore::new()),
        Arc::new(BrokenProvider),
        std::env::temp_dir(),
    );
    let app = router(
        state,
        RouterOptions {
            allowed_origins: vec!["https://app.example.com".to_string()],
            ..RouterOptions::default()
        },
    );

    let allowed = Request::builder()
        .uri("/categories")
        .header(header::ORIGIN, "https://app.example.com")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(allowed).await.unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://app.example.com"
    );

    let other = Request::builder()
        .uri("/categories")
        .header(header::ORIGIN, "https://evil.example.com")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(other).await.unwrap();
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn test_journal_requires_session() {
    let test = default_app();

    let response = test.app.clone().oneshot(get("/journal")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/login");

    let response = test
        .app
        .clone()
        .oneshot(post_json("/journal", json!({ "content": "hello" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_journal_flow() {
    let test = default_app();
    sign_up_and_login(&test.app, "ana@example.com").await;

    let (status, body) = send(
        &test.app,
        post_json("/journal", json!({ "content": "I feel so happy today" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["entry"]["content"], "I feel so happy today");
    assert_eq!(body["analysis"]["label"], "positive");

    send(
        &test.app,
        post_json("/journal", json!({ "content": "It was an ordinary day" })),
    )
    .await;

    let (status, body) = send(&test.app, get("/journal")).await;
    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["content"], "It was an ordinary day");

    let (status, _) = send(&test.app, post_json("/journal", json!({ "content": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&test.app, get("/session")).await;
    assert_eq!(body["email"], "ana@example.com");

    let response = test
        .app
        .clone()
        .oneshot(post_json("/logout", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let (_, body) = send(&test.app, get("/session")).await;
    assert!(body.is_null());
}

#[tokio::test]
async fn test_journal_prompt() {
    let test = default_app();

    let (status, body) = send(&test.app, get("/journal/prompt")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(crate::journal::PROMPTS.contains(&body["prompt"].as_str().unwrap()));
}
