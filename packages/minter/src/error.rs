//! Error types for the minter.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::fmt;

/// Minter error type.
#[derive(Debug)]
pub enum Error {
    /// Configuration error (missing secret, bad endpoint, etc.).
    Config(String),
    /// Wallet provider communication error or missing account.
    Provider(String),
    /// Image generation backend error.
    Generate(String),
    /// Storage backend error.
    Storage(String),
    /// A mint workflow is already in flight.
    Busy,
}

impl Error {
    /// HTTP status the error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Provider(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Generate(_) => StatusCode::BAD_GATEWAY,
            Error::Storage(_) => StatusCode::BAD_GATEWAY,
            Error::Busy => StatusCode::CONFLICT,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "config error: {msg}"),
            Error::Provider(msg) => write!(f, "wallet provider error: {msg}"),
            Error::Generate(msg) => write!(f, "image generation error: {msg}"),
            Error::Storage(msg) => write!(f, "storage upload error: {msg}"),
            Error::Busy => write!(f, "a mint is already in flight"),
        }
    }
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = serde_json::json!({
            "success": false,
            "error": self.to_string()
        });
        (status, Json(body)).into_response()
    }
}
