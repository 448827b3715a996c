//! Error types for the smoke harness

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SmokeError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected status {expected}, got {got}: {body}")]
    UnexpectedStatus {
        expected: u16,
        got: u16,
        body: String,
    },

    #[error("missing field `{0}` in response")]
    MissingField(String),

    #[error("response mismatch: {0}")]
    Mismatch(String),
}

pub type Result<T> = std::result::Result<T, SmokeError>;
