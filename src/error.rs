// src/error.rs
//! Application error types with structured error handling.
//!
//! Each variant names the failure and where it happened. Only configuration
//! problems and LLM stage failures are fatal for a run; image failures are
//! recorded inline by the image adapter and never surface as `AppError`
//! to the orchestrator.

use crate::model::ImageProvider;
use thiserror::Error;

/// Which side of the pipeline an LLM failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceFailureKind {
    /// The service answered with a non-success HTTP status.
    HttpStatus(u16),
    /// The service answered 200 but produced no usable text.
    EmptyCompletion,
    /// The service refused to answer (safety block or similar).
    Blocked,
}

impl std::fmt::Display for ServiceFailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::EmptyCompletion => write!(f, "empty_completion"),
            Self::Blocked => write!(f, "blocked"),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("{provider} image API returned HTTP {status}: {body}")]
    ImageService {
        provider: ImageProvider,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("LLM service error during {stage} ({kind}): {message}")]
    LlmService {
        stage: String,
        kind: ServiceFailureKind,
        message: String,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("Could not decode base64 payload: {0}")]
    Base64Decode(#[from] base64::DecodeError),

    #[error("Template render error for template {name}: {message}")]
    TemplateRenderError { name: String, message: String },

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error(transparent)]
    ValidationError(#[from] crate::types::ValidationError),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}
