//! Integration tests for the bridge HTTP API, with wiremock standing in for
//! the hosted inference service.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::Router;
use http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hf_bridge::{routes, AppState, Config, HfClient};

async fn test_app(upstream: &MockServer) -> Router {
    let mut config = Config::default();
    config.hf.base_url = upstream.uri();

    let hf = HfClient::new(&config.hf, &config.models).unwrap();
    routes::router().with_state(Arc::new(AppState::new(config, hf)))
}

async fn post(app: &Router, uri: &str, body: Value) -> http::Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    app.clone().oneshot(request).await.unwrap()
}

async fn body_json(response: http::Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_root_returns_details() {
    let upstream = MockServer::start().await;
    let app = test_app(&upstream).await;

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn test_health_endpoint() {
    let upstream = MockServer::start().await;
    let app = test_app(&upstream).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_summarization_uses_default_model_and_summary_key() {
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/facebook/bart-large-cnn"))
        .and(body_partial_json(json!({ "inputs": "Long article..." })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "summary_text": "Short." }])),
        )
        .mount(&upstream)
        .await;

    let app = test_app(&upstream).await;
    let response = post(&app, "/summarization", json!({ "text": "Long article..." })).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body, json!({ "summary": "Short." }));
}

#[tokio::test]
async fn test_question_answering_answer_key() {
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/deepset/roberta-base-squad2"))
        .and(body_partial_json(json!({
            "inputs": {
                "question": "What is the capital of France?",
                "context": "Paris is the capital of France."
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "Paris",
            "score": 0.98,
            "start": 0,
            "end": 5
        })))
        .mount(&upstream)
        .await;

    let app = test_app(&upstream).await;
    let response = post(
        &app,
        "/question-answering",
        json!({
            "context": "Paris is the capital of France.",
            "question": "What is the capital of France?"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["answer"]["answer"], "Paris");
    assert!(body.get("result").is_none());
}

#[tokio::test]
async fn test_translation_forwards_locales() {
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/facebook/nllb-200-distilled-600M"))
        .and(body_partial_json(json!({
            "inputs": "Hello",
            "parameters": { "src_lang": "en", "tgt_lang": "fr" }
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "translation_text": "Bonjour" }])),
        )
        .mount(&upstream)
        .await;

    let app = test_app(&upstream).await;
    let response = post(
        &app,
        "/translation",
        json!({ "text": "Hello", "source": "en", "target": "fr" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body, json!({ "translation": "Bonjour" }));
}

#[tokio::test]
async fn test_zero_shot_forwards_labels_and_flag() {
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/facebook/bart-large-mnli"))
        .and(body_partial_json(json!({
            "inputs": "I love this",
            "parameters": {
                "candidate_labels": ["positive", "negative"],
                "multi_label": false
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "labels": ["positive", "negative"],
            "scores": [0.99, 0.01]
        })))
        .mount(&upstream)
        .await;

    let app = test_app(&upstream).await;
    let response = post(
        &app,
        "/zero-shot-classification",
        json!({
            "text": "I love this",
            "labels": ["positive", "negative"],
            "is_multi_label": false
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["result"]["labels"][0], "positive");
}

#[tokio::test]
async fn test_request_model_overrides_default() {
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/custom-org/custom-embed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[0.1, 0.2, 0.3]])))
        .mount(&upstream)
        .await;

    let app = test_app(&upstream).await;
    let response = post(
        &app,
        "/feature-extraction",
        json!({ "text": "hello", "model": "custom-org/custom-embed" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["result"][0][1], 0.2);
}

#[tokio::test]
async fn test_chat_completion_result_key() {
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(
            "/models/meta-llama/Llama-3.1-8B-Instruct/v1/chat/completions",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "message": { "role": "assistant", "content": "Hi!" },
                "finish_reason": "stop"
            }]
        })))
        .mount(&upstream)
        .await;

    let app = test_app(&upstream).await;
    let response = post(
        &app,
        "/chat-completion",
        json!({ "messages": [{ "role": "user", "content": "Hello" }] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body["result"]["choices"][0]["message"]["content"],
        "Hi!"
    );
}

#[tokio::test]
async fn test_chat_completion_empty_messages_is_dispatched() {
    let upstream = MockServer::start().await;

    // An empty conversation is structurally valid; whether it makes sense is
    // the upstream's call.
    Mock::given(method("POST"))
        .and(path(
            "/models/meta-llama/Llama-3.1-8B-Instruct/v1/chat/completions",
        ))
        .and(body_partial_json(json!({ "messages": [] })))
        .respond_with(
            ResponseTemplate::new(400).set_body_string("conversation must not be empty"),
        )
        .mount(&upstream)
        .await;

    let app = test_app(&upstream).await;
    let response = post(&app, "/chat-completion", json!({ "messages": [] })).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert_eq!(body["error"]["upstream_status"], 400);
}

#[tokio::test]
async fn test_upstream_error_is_propagated() {
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Model is currently loading"))
        .mount(&upstream)
        .await;

    let app = test_app(&upstream).await;
    let response = post(&app, "/text-classification", json!({ "text": "meh" })).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert_eq!(body["error"]["type"], "upstream_error");
    assert_eq!(body["error"]["upstream_status"], 503);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Model is currently loading"));
}

#[tokio::test]
async fn test_missing_required_field_is_rejected() {
    let upstream = MockServer::start().await;
    let app = test_app(&upstream).await;

    let response = post(&app, "/summarization", json!({})).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = post(
        &app,
        "/question-answering",
        json!({ "context": "Paris is the capital of France." }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Nothing must reach the upstream for rejected payloads.
    assert!(upstream.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_fields_are_ignored() {
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/facebook/bart-large-cnn"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "summary_text": "Short." }])),
        )
        .mount(&upstream)
        .await;

    let app = test_app(&upstream).await;
    let response = post(
        &app,
        "/summarization",
        json!({ "text": "Long article...", "min_length": 10 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_text_to_image_returns_binary_body() {
    let upstream = MockServer::start().await;

    let png_bytes = vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
    Mock::given(method("POST"))
        .and(path("/models/stabilityai/stable-diffusion-xl-base-1.0"))
        .and(body_partial_json(json!({ "inputs": "a cat in a hat" })))
        .respond_with(ResponseTemplate::new(200).set_body_raw(png_bytes.clone(), "image/png"))
        .mount(&upstream)
        .await;

    let app = test_app(&upstream).await;
    let response = post(&app, "/text-to-image", json!({ "prompt": "a cat in a hat" })).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/png"
    );
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(bytes.as_ref(), png_bytes.as_slice());
}

#[tokio::test]
async fn test_text_to_speech_returns_audio_content_type() {
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/espnet/kan-bayashi_ljspeech_vits"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0x66, 0x4c, 0x61, 0x43], "audio/flac"))
        .mount(&upstream)
        .await;

    let app = test_app(&upstream).await;
    let response = post(&app, "/text-to-speech", json!({ "text": "Hello there" })).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "audio/flac"
    );
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(!bytes.is_empty());
}

#[tokio::test]
async fn test_empty_media_payload_is_an_error() {
    let upstream = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(Vec::new(), "image/png"))
        .mount(&upstream)
        .await;

    let app = test_app(&upstream).await;
    let response = post(&app, "/text-to-image", json!({ "prompt": "a cat" })).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"]["type"], "media_error");
}
