//! Client for the school REST API (courses, tutors, orders).
//!
//! Every request carries the API key as the `api_key` query parameter.

mod client;

pub use client::{extract_error_message, SchoolApiClient};

/// Failure talking to the school API
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid order payload: {0}")]
    InvalidPayload(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}
