/// Unified error types for Locus Links
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Main error type for the link service
#[derive(Error, Debug)]
pub enum LinkError {
    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// JSON error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Convert LinkError to HTTP response
impl IntoResponse for LinkError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            LinkError::Validation(_) => (
                StatusCode::BAD_REQUEST,
                "InvalidRequest",
                self.to_string(),
            ),
            LinkError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                "NotFound",
                self.to_string(),
            ),
            LinkError::Config(_) | LinkError::Internal(_) | LinkError::Io(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "InternalServerError",
                "Internal server error".to_string(), // Don't leak details
            ),
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for service operations
pub type LinkResult<T> = Result<T, LinkError>;

/// Why a reference could only be guessed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedReason {
    /// Input was the empty string
    Empty,
    /// No segment had the canonical identifier shape
    NoCanonicalIdentifier,
    /// Input could not be parsed as a URL
    MalformedUrl,
    /// URL parsed but carries no network host
    MissingHost,
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            UnresolvedReason::Empty => "empty input",
            UnresolvedReason::NoCanonicalIdentifier => "no canonical identifier",
            UnresolvedReason::MalformedUrl => "malformed url",
            UnresolvedReason::MissingHost => "url has no host",
        };
        f.write_str(text)
    }
}

/// A resolution that fell back to its documented default.
///
/// Resolver operations never fail loudly. The strict variants return this
/// so callers can tell a confident answer from a guess; `fallback` is the
/// value the lenient variant would have returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("could not resolve {input:?} ({reason}), using {fallback:?}")]
pub struct Unresolved {
    pub input: String,
    pub fallback: String,
    pub reason: UnresolvedReason,
}

impl Unresolved {
    pub fn new(input: &str, fallback: impl Into<String>, reason: UnresolvedReason) -> Self {
        Self {
            input: input.to_string(),
            fallback: fallback.into(),
            reason,
        }
    }

    /// Consume the error, keeping only the default value
    pub fn into_fallback(self) -> String {
        self.fallback
    }
}

/// Outcome of a strict resolution: confident value or a guessed default
pub type Resolution = Result<String, Unresolved>;

/// Helpers for collapsing a [`Resolution`] into a plain value
pub trait ResolutionExt {
    /// The resolved value, or the documented fallback when guessed
    fn or_fallback(self) -> String;

    /// True when the value was resolved without guessing
    fn is_confident(&self) -> bool;
}

impl ResolutionExt for Resolution {
    fn or_fallback(self) -> String {
        self.unwrap_or_else(Unresolved::into_fallback)
    }

    fn is_confident(&self) -> bool {
        self.is_ok()
    }
}
