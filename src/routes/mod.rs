//! HTTP surface: one POST endpoint per inference task.

pub mod chat;
pub mod health;
pub mod media;
pub mod nlp;

use std::sync::Arc;

use axum::Router;

use crate::AppState;

/// Build the full router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(health::router())
        .merge(chat::router())
        .merge(nlp::router())
        .merge(media::router())
}
