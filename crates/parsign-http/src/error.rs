//! HTTP error types for the parsign transport

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use parsign_core::{ParamError, ValidationError};
use thiserror::Error;

use crate::envelope::ApiEnvelope;

/// Errors for signed API calls, client and server side
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered with a non-"0" status code. The message is the
    /// backend's, verbatim.
    #[error("Business failure {code}: {message}")]
    Business { code: String, message: String },

    #[error("Server error (HTTP 500)")]
    Server,

    #[error("HTTP error {0}")]
    Http(u16),

    #[error("Request timeout")]
    Timeout,

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed envelope: {0}")]
    Envelope(String),

    #[error("Signature verification failed")]
    BadSignature,

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Parameter error: {0}")]
    Param(#[from] ParamError),
}

impl ApiError {
    /// Whether a retry of the same logical request can succeed
    ///
    /// Transport problems, timeouts, and 5xx replies are retryable; business
    /// failures and verification errors are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Server | ApiError::Timeout | ApiError::Transport(_) => true,
            ApiError::Http(status) => *status >= 500,
            _ => false,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Server-side rejections keep the envelope convention so clients can
        // run one decode path for every reply
        let (status, code, message) = match &self {
            // Business failures travel as HTTP 200 with their own code
            ApiError::Business { code, message } => {
                (StatusCode::OK, code.clone(), message.clone())
            }
            ApiError::BadSignature => (
                StatusCode::UNAUTHORIZED,
                "1001".to_string(),
                self.to_string(),
            ),
            ApiError::Validation(ValidationError::StaleTimestamp { .. }) => (
                StatusCode::UNAUTHORIZED,
                "1003".to_string(),
                self.to_string(),
            ),
            ApiError::Validation(_) | ApiError::Param(_) | ApiError::Envelope(_) => (
                StatusCode::BAD_REQUEST,
                "1002".to_string(),
                self.to_string(),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "1000".to_string(),
                self.to_string(),
            ),
        };

        (status, Json(ApiEnvelope::err(code, message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(ApiError::Server.is_retryable());
        assert!(ApiError::Timeout.is_retryable());
        assert!(ApiError::Http(502).is_retryable());

        assert!(!ApiError::Http(404).is_retryable());
        assert!(!ApiError::BadSignature.is_retryable());
        assert!(!ApiError::Business {
            code: "7".to_string(),
            message: "full".to_string()
        }
        .is_retryable());
    }
}
