//! Client for the hosted Hugging Face Inference API.
//!
//! One async method per task. JSON tasks POST to `/models/{id}` with an
//! `{"inputs": ..., "parameters": ...}` body; chat goes through the
//! OpenAI-compatible route under the same model prefix; image and speech
//! tasks return the raw response body. Upstream failures come back verbatim
//! as [`Error::Upstream`], never retried or reinterpreted.

use std::time::Duration;

use bytes::Bytes;
use reqwest::header;
use reqwest::Client;
use serde_json::{json, Value};

use crate::config::{HfConfig, ModelsConfig};
use crate::error::{Error, Result};
use crate::models::ChatMessage;

/// A binary task result: the raw body plus the upstream content-type.
pub struct MediaPayload {
    pub bytes: Bytes,
    pub content_type: Option<String>,
}

pub struct HfClient {
    http_client: Client,
    base_url: String,
    token: Option<String>,
    defaults: ModelsConfig,
}

impl HfClient {
    pub fn new(
        config: &HfConfig,
        defaults: &ModelsConfig,
    ) -> std::result::Result<Self, reqwest::Error> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            defaults: defaults.clone(),
        })
    }

    pub async fn chat_completion(
        &self,
        messages: &[ChatMessage],
        model: Option<&str>,
    ) -> Result<Value> {
        let model = model.unwrap_or(&self.defaults.chat_completion);
        let url = format!("{}/models/{}/v1/chat/completions", self.base_url, model);
        let body = json!({ "model": model, "messages": messages });

        let response = self.send(&url, &body).await?;
        response
            .json()
            .await
            .map_err(|e| Error::InvalidResponse(e.to_string()))
    }

    pub async fn feature_extraction(&self, text: &str, model: Option<&str>) -> Result<Value> {
        let model = model.unwrap_or(&self.defaults.feature_extraction);
        self.task_json(model, json!({ "inputs": text })).await
    }

    pub async fn fill_mask(&self, text: &str, model: Option<&str>) -> Result<Value> {
        let model = model.unwrap_or(&self.defaults.fill_mask);
        self.task_json(model, json!({ "inputs": text })).await
    }

    pub async fn question_answering(
        &self,
        question: &str,
        context: &str,
        model: Option<&str>,
    ) -> Result<Value> {
        let model = model.unwrap_or(&self.defaults.question_answering);
        let body = json!({ "inputs": { "question": question, "context": context } });
        self.task_json(model, body).await
    }

    pub async fn sentence_similarity(
        &self,
        sentence: &str,
        other_sentences: &[String],
        model: Option<&str>,
    ) -> Result<Value> {
        let model = model.unwrap_or(&self.defaults.sentence_similarity);
        let body = json!({
            "inputs": { "source_sentence": sentence, "sentences": other_sentences }
        });
        self.task_json(model, body).await
    }

    pub async fn summarization(&self, text: &str, model: Option<&str>) -> Result<String> {
        let model = model.unwrap_or(&self.defaults.summarization);
        let value = self.task_json(model, json!({ "inputs": text })).await?;
        first_text_field(&value, "summary_text")
    }

    pub async fn text_classification(&self, text: &str, model: Option<&str>) -> Result<Value> {
        let model = model.unwrap_or(&self.defaults.text_classification);
        self.task_json(model, json!({ "inputs": text })).await
    }

    pub async fn text_generation(&self, prompt: &str, model: Option<&str>) -> Result<String> {
        let model = model.unwrap_or(&self.defaults.text_generation);
        let value = self.task_json(model, json!({ "inputs": prompt })).await?;
        first_text_field(&value, "generated_text")
    }

    pub async fn text_to_image(&self, prompt: &str, model: Option<&str>) -> Result<MediaPayload> {
        let model = model.unwrap_or(&self.defaults.text_to_image);
        self.task_media(model, json!({ "inputs": prompt })).await
    }

    pub async fn text_to_speech(&self, text: &str, model: Option<&str>) -> Result<MediaPayload> {
        let model = model.unwrap_or(&self.defaults.text_to_speech);
        self.task_media(model, json!({ "inputs": text })).await
    }

    pub async fn token_classification(&self, text: &str, model: Option<&str>) -> Result<Value> {
        let model = model.unwrap_or(&self.defaults.token_classification);
        self.task_json(model, json!({ "inputs": text })).await
    }

    pub async fn translation(
        &self,
        text: &str,
        source: &str,
        target: &str,
        model: Option<&str>,
    ) -> Result<String> {
        let model = model.unwrap_or(&self.defaults.translation);
        let body = json!({
            "inputs": text,
            "parameters": { "src_lang": source, "tgt_lang": target }
        });
        let value = self.task_json(model, body).await?;
        first_text_field(&value, "translation_text")
    }

    pub async fn zero_shot_classification(
        &self,
        text: &str,
        labels: &[String],
        multi_label: bool,
        model: Option<&str>,
    ) -> Result<Value> {
        let model = model.unwrap_or(&self.defaults.zero_shot_classification);
        let body = json!({
            "inputs": text,
            "parameters": { "candidate_labels": labels, "multi_label": multi_label }
        });
        self.task_json(model, body).await
    }

    /// POST a task body to `/models/{id}` and parse the JSON reply.
    async fn task_json(&self, model: &str, body: Value) -> Result<Value> {
        let url = format!("{}/models/{}", self.base_url, model);
        let response = self.send(&url, &body).await?;

        response
            .json()
            .await
            .map_err(|e| Error::InvalidResponse(e.to_string()))
    }

    /// POST a task body to `/models/{id}` and keep the reply as raw bytes.
    async fn task_media(&self, model: &str, body: Value) -> Result<MediaPayload> {
        let url = format!("{}/models/{}", self.base_url, model);
        let response = self.send(&url, &body).await?;

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::InvalidResponse(e.to_string()))?;

        if bytes.is_empty() {
            return Err(Error::Media("upstream returned an empty payload".to_string()));
        }

        Ok(MediaPayload {
            bytes,
            content_type,
        })
    }

    async fn send(&self, url: &str, body: &Value) -> Result<reqwest::Response> {
        tracing::debug!("Forwarding request to {}", url);

        let mut builder = self.http_client.post(url).json(body);
        if let Some(ref token) = self.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Upstream { status, message });
        }

        Ok(response)
    }
}

/// Pull a text field out of the upstream list form, e.g.
/// `[{"summary_text": "..."}]`.
fn first_text_field(value: &Value, field: &str) -> Result<String> {
    value
        .get(0)
        .and_then(|entry| entry.get(field))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| Error::InvalidResponse(format!("missing {} in upstream payload", field)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_text_field() {
        let value = json!([{ "summary_text": "short" }]);
        assert_eq!(first_text_field(&value, "summary_text").unwrap(), "short");
    }

    #[test]
    fn test_first_text_field_missing() {
        let value = json!({ "error": "model loading" });
        let err = first_text_field(&value, "translation_text").unwrap_err();
        assert!(err.to_string().contains("translation_text"));
    }
}
