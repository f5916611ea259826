pub mod request;

pub use request::{
    ChatMessage, ChatRequest, ModelSelector, PromptRequest, QaRequest, SimilarityRequest,
    TextRequest, TranslationRequest, ZeroShotRequest,
};
