//! Request shapes, one per inference task.
//!
//! Validation is structural only: a missing or mistyped field is rejected at
//! the `Json` extractor boundary, unknown fields are ignored, and no semantic
//! checks (empty strings, locale formats) are performed here. The upstream
//! service owns those contracts.

use serde::{Deserialize, Serialize};

/// Optional model override, embedded in every request shape.
///
/// Absent means "use the configured default for the task".
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ModelSelector {
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    #[serde(flatten)]
    pub selector: ModelSelector,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TextRequest {
    pub text: String,
    #[serde(flatten)]
    pub selector: ModelSelector,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PromptRequest {
    pub prompt: String,
    #[serde(flatten)]
    pub selector: ModelSelector,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QaRequest {
    pub context: String,
    pub question: String,
    #[serde(flatten)]
    pub selector: ModelSelector,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimilarityRequest {
    /// The sentence compared against every entry of `sentences`.
    pub sentence: String,
    pub sentences: Vec<String>,
    #[serde(flatten)]
    pub selector: ModelSelector,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TranslationRequest {
    pub text: String,
    pub source: String,
    pub target: String,
    #[serde(flatten)]
    pub selector: ModelSelector,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ZeroShotRequest {
    pub text: String,
    pub labels: Vec<String>,
    pub is_multi_label: bool,
    #[serde(flatten)]
    pub selector: ModelSelector,
}
