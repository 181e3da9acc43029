// src/error.rs

//! Unified error handling for the cleaner application.

use thiserror::Error;

/// Result type alias for cleaner operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Authentication against the API failed
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The API returned a non-success status or result envelope
    #[error("API error for {path}: {detail}")]
    Api { path: String, detail: String },

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Language detection error
    #[error("Language detection error: {0}")]
    Detection(String),
}

impl AppError {
    /// Create an authentication error.
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Create an API error for a request path.
    pub fn api(path: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Api {
            path: path.into(),
            detail: detail.into(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a language detection error.
    pub fn detection(message: impl Into<String>) -> Self {
        Self::Detection(message.into())
    }
}
