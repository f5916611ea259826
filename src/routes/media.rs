//! Image and speech synthesis endpoints.
//!
//! The upstream bytes are streamed straight into the response body with the
//! upstream content-type; nothing is ever staged on the filesystem, so
//! concurrent requests cannot trample each other's output.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::header;
use axum::response::Response;
use axum::routing::post;
use axum::{Json, Router};

use crate::error::{Error, Result};
use crate::hf::MediaPayload;
use crate::models::{PromptRequest, TextRequest};
use crate::AppState;

/// POST /text-to-image - synthesize an image from a prompt.
async fn text_to_image(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PromptRequest>,
) -> Result<Response> {
    let payload = state
        .hf
        .text_to_image(&request.prompt, request.selector.model.as_deref())
        .await?;

    media_response(payload, "image/png")
}

/// POST /text-to-speech - synthesize a voice pronouncing a text.
async fn text_to_speech(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TextRequest>,
) -> Result<Response> {
    let payload = state
        .hf
        .text_to_speech(&request.text, request.selector.model.as_deref())
        .await?;

    media_response(payload, "audio/flac")
}

fn media_response(payload: MediaPayload, fallback_content_type: &'static str) -> Result<Response> {
    let content_type = payload
        .content_type
        .unwrap_or_else(|| fallback_content_type.to_string());

    Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(payload.bytes))
        .map_err(|e| Error::Media(e.to_string()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/text-to-image", post(text_to_image))
        .route("/text-to-speech", post(text_to_speech))
}
