//! Error types for the flash-card backend

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for studydeck operations
pub type Result<T> = std::result::Result<T, Error>;

/// Backend errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Declared media type is not in the supported set
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// Text extraction failed for a supported media type
    #[error("Failed to extract text from {media_type}: {message}")]
    ExtractionFailed { media_type: String, message: String },

    /// The external AI call itself failed (network, quota, timeout)
    #[error("Flash card generation failed: {0}")]
    GenerationFailed(String),

    /// The AI response did not contain a parseable JSON object
    #[error("AI response was not in the expected JSON format")]
    MalformedAiResponse,

    /// A generated card violated a record-level invariant
    #[error("Generated card is invalid: {0}")]
    InvalidGeneratedCard(String),

    /// Document or card lookup miss
    #[error("Not found: {0}")]
    NotFound(String),

    /// Field-level input violation on a CRUD request
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Missing or unknown bearer token
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an extraction error
    pub fn extraction(media_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExtractionFailed {
            media_type: media_type.into(),
            message: message.into(),
        }
    }

    /// Create a generation error
    pub fn generation(message: impl Into<String>) -> Self {
        Self::GenerationFailed(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            Error::Config(msg) => (StatusCode::BAD_REQUEST, "config_error", msg.clone()),
            Error::UnsupportedMediaType(mt) => (
                StatusCode::BAD_REQUEST,
                "unsupported_media_type",
                format!("Unsupported media type: {}", mt),
            ),
            Error::ExtractionFailed { media_type, message } => (
                StatusCode::BAD_REQUEST,
                "extraction_failed",
                format!("Failed to extract text from {}: {}", media_type, message),
            ),
            Error::GenerationFailed(_) => (
                // Internal cause is logged at the call site, not leaked here.
                StatusCode::BAD_REQUEST,
                "generation_failed",
                "Failed to generate flash cards".to_string(),
            ),
            Error::MalformedAiResponse => (
                StatusCode::BAD_REQUEST,
                "malformed_ai_response",
                "AI response was not in the expected JSON format".to_string(),
            ),
            Error::InvalidGeneratedCard(msg) => (
                StatusCode::BAD_REQUEST,
                "invalid_generated_card",
                format!("Generated card is invalid: {}", msg),
            ),
            Error::NotFound(what) => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("Not found: {}", what),
            ),
            Error::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_failed", msg.clone()),
            Error::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone()),
            Error::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
