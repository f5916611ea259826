pub mod client;

pub use client::{HfClient, MediaPayload};
