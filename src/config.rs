//! Configuration for the bridge.

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub hf: HfConfig,
    #[serde(default)]
    pub models: ModelsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Hugging Face Inference API connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct HfConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token for the upstream API. Anonymous calls work for public
    /// models but are rate limited aggressively.
    #[serde(default)]
    pub token: Option<String>,
    /// Upstream request timeout. Cold models can sit in the loading queue
    /// for minutes, hence the generous default.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for HfConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            timeout_secs: default_timeout(),
        }
    }
}

/// Default model per task, used when a request does not name one.
///
/// The upstream URL embeds the model id, so "let the service pick" is
/// resolved here. Defaults mirror the hosted API's recommended checkpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelsConfig {
    #[serde(default = "default_chat_model")]
    pub chat_completion: String,
    #[serde(default = "default_embedding_model")]
    pub feature_extraction: String,
    #[serde(default = "default_fill_mask_model")]
    pub fill_mask: String,
    #[serde(default = "default_qa_model")]
    pub question_answering: String,
    #[serde(default = "default_embedding_model")]
    pub sentence_similarity: String,
    #[serde(default = "default_summarization_model")]
    pub summarization: String,
    #[serde(default = "default_text_classification_model")]
    pub text_classification: String,
    #[serde(default = "default_text_generation_model")]
    pub text_generation: String,
    #[serde(default = "default_text_to_image_model")]
    pub text_to_image: String,
    #[serde(default = "default_text_to_speech_model")]
    pub text_to_speech: String,
    #[serde(default = "default_token_classification_model")]
    pub token_classification: String,
    #[serde(default = "default_translation_model")]
    pub translation: String,
    #[serde(default = "default_zero_shot_model")]
    pub zero_shot_classification: String,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            chat_completion: default_chat_model(),
            feature_extraction: default_embedding_model(),
            fill_mask: default_fill_mask_model(),
            question_answering: default_qa_model(),
            sentence_similarity: default_embedding_model(),
            summarization: default_summarization_model(),
            text_classification: default_text_classification_model(),
            text_generation: default_text_generation_model(),
            text_to_image: default_text_to_image_model(),
            text_to_speech: default_text_to_speech_model(),
            token_classification: default_token_classification_model(),
            translation: default_translation_model(),
            zero_shot_classification: default_zero_shot_model(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default values
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_base_url() -> String {
    "https://api-inference.huggingface.co".to_string()
}
fn default_timeout() -> u64 {
    300
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_chat_model() -> String {
    "meta-llama/Llama-3.1-8B-Instruct".to_string()
}
fn default_embedding_model() -> String {
    "sentence-transformers/all-MiniLM-L6-v2".to_string()
}
fn default_fill_mask_model() -> String {
    "google-bert/bert-base-uncased".to_string()
}
fn default_qa_model() -> String {
    "deepset/roberta-base-squad2".to_string()
}
fn default_summarization_model() -> String {
    "facebook/bart-large-cnn".to_string()
}
fn default_text_classification_model() -> String {
    "distilbert/distilbert-base-uncased-finetuned-sst-2-english".to_string()
}
fn default_text_generation_model() -> String {
    "openai-community/gpt2".to_string()
}
fn default_text_to_image_model() -> String {
    "stabilityai/stable-diffusion-xl-base-1.0".to_string()
}
fn default_text_to_speech_model() -> String {
    "espnet/kan-bayashi_ljspeech_vits".to_string()
}
fn default_token_classification_model() -> String {
    "dslim/bert-base-NER".to_string()
}
fn default_translation_model() -> String {
    "facebook/nllb-200-distilled-600M".to_string()
}
fn default_zero_shot_model() -> String {
    "facebook/bart-large-mnli".to_string()
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Configuration sources (in order of precedence):
    /// 1. Environment variables (HFBRIDGE__SECTION__KEY format)
    /// 2. config.toml file (if present)
    /// 3. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let config = ConfigLoader::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("HFBRIDGE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
