//! Error types for parsign-core

use thiserror::Error;

use crate::params::ParamError;
use crate::validation::ValidationError;

/// Errors that can occur while assembling or checking signed requests
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Parameter error: {0}")]
    Param(#[from] ParamError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
