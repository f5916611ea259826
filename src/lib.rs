pub mod config;
pub mod error;
pub mod hf;
pub mod models;
pub mod routes;

pub use config::Config;
pub use error::{Error, Result};
pub use hf::HfClient;

/// Shared application state.
///
/// Built once at startup and handed to every handler behind an `Arc`; the
/// client is never mutated after construction.
pub struct AppState {
    pub config: Config,
    pub hf: HfClient,
}

impl AppState {
    pub fn new(config: Config, hf: HfClient) -> Self {
        Self { config, hf }
    }
}
