//! Text task endpoints.
//!
//! Every handler is a leaf: validate the shape, make the one upstream call,
//! wrap the result under the endpoint's fixed envelope key. The key is part
//! of each endpoint's contract (`answer` for question answering, `summary`
//! for summarization, `translation` for translation, `result` everywhere
//! else) and never varies at runtime.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::error::Result;
use crate::models::{
    PromptRequest, QaRequest, SimilarityRequest, TextRequest, TranslationRequest, ZeroShotRequest,
};
use crate::AppState;

/// POST /feature-extraction - embed a text into numeric vector(s).
async fn feature_extraction(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TextRequest>,
) -> Result<Json<Value>> {
    let result = state
        .hf
        .feature_extraction(&request.text, request.selector.model.as_deref())
        .await?;

    Ok(Json(json!({ "result": result })))
}

/// POST /fill-mask - fill in the masked token of a text.
async fn fill_mask(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TextRequest>,
) -> Result<Json<Value>> {
    let result = state
        .hf
        .fill_mask(&request.text, request.selector.model.as_deref())
        .await?;

    Ok(Json(json!({ "result": result })))
}

/// POST /question-answering - answer a question from a given context.
async fn question_answering(
    State(state): State<Arc<AppState>>,
    Json(request): Json<QaRequest>,
) -> Result<Json<Value>> {
    let answer = state
        .hf
        .question_answering(
            &request.question,
            &request.context,
            request.selector.model.as_deref(),
        )
        .await?;

    Ok(Json(json!({ "answer": answer })))
}

/// POST /sentence-similarity - score a sentence against a comparison set.
///
/// Scores come back aligned to the order of `sentences`.
async fn sentence_similarity(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SimilarityRequest>,
) -> Result<Json<Value>> {
    let result = state
        .hf
        .sentence_similarity(
            &request.sentence,
            &request.sentences,
            request.selector.model.as_deref(),
        )
        .await?;

    Ok(Json(json!({ "result": result })))
}

/// POST /summarization - summarize a text.
async fn summarization(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TextRequest>,
) -> Result<Json<Value>> {
    let summary = state
        .hf
        .summarization(&request.text, request.selector.model.as_deref())
        .await?;

    Ok(Json(json!({ "summary": summary })))
}

/// POST /text-classification - classify a text (e.g. sentiment analysis).
async fn text_classification(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TextRequest>,
) -> Result<Json<Value>> {
    let result = state
        .hf
        .text_classification(&request.text, request.selector.model.as_deref())
        .await?;

    Ok(Json(json!({ "result": result })))
}

/// POST /text-generation - continue a prompt.
async fn text_generation(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PromptRequest>,
) -> Result<Json<Value>> {
    let result = state
        .hf
        .text_generation(&request.prompt, request.selector.model.as_deref())
        .await?;

    Ok(Json(json!({ "result": result })))
}

/// POST /token-classification - tag tokens of a text (NER, parsing).
async fn token_classification(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TextRequest>,
) -> Result<Json<Value>> {
    let result = state
        .hf
        .token_classification(&request.text, request.selector.model.as_deref())
        .await?;

    Ok(Json(json!({ "result": result })))
}

/// POST /translation - translate a text between two locales.
async fn translation(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TranslationRequest>,
) -> Result<Json<Value>> {
    let translation = state
        .hf
        .translation(
            &request.text,
            &request.source,
            &request.target,
            request.selector.model.as_deref(),
        )
        .await?;

    Ok(Json(json!({ "translation": translation })))
}

/// POST /zero-shot-classification - classify a text against candidate labels.
async fn zero_shot_classification(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ZeroShotRequest>,
) -> Result<Json<Value>> {
    let result = state
        .hf
        .zero_shot_classification(
            &request.text,
            &request.labels,
            request.is_multi_label,
            request.selector.model.as_deref(),
        )
        .await?;

    Ok(Json(json!({ "result": result })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/feature-extraction", post(feature_extraction))
        .route("/fill-mask", post(fill_mask))
        .route("/question-answering", post(question_answering))
        .route("/sentence-similarity", post(sentence_similarity))
        .route("/summarization", post(summarization))
        .route("/text-classification", post(text_classification))
        .route("/text-generation", post(text_generation))
        .route("/token-classification", post(token_classification))
        .route("/translation", post(translation))
        .route("/zero-shot-classification", post(zero_shot_classification))
}
