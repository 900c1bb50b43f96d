//! The uniform response envelope
//!
//! Every backend endpoint replies with the same wrapper: a string status
//! code, a human-readable message, and an optional payload. The envelope is
//! built once from the HTTP response body, resolved immediately, and
//! discarded.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The status code the backend uses for success. Everything else is a
/// business failure.
pub const SUCCESS_CODE: &str = "0";

/// Uniform reply wrapper for all backend endpoints
///
/// Some endpoints put their payload in `data`; older ones inline it next to
/// the status fields, which lands in `extra` via the flatten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope {
    #[serde(rename = "respCode")]
    pub resp_code: String,

    #[serde(rename = "respMessage", default)]
    pub resp_message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiEnvelope {
    /// Build a success envelope carrying a payload
    pub fn ok(data: Value) -> Self {
        Self {
            resp_code: SUCCESS_CODE.to_string(),
            resp_message: "success".to_string(),
            data: Some(data),
            extra: Map::new(),
        }
    }

    /// Build a failure envelope
    pub fn err(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            resp_code: code.into(),
            resp_message: message.into(),
            data: None,
            extra: Map::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.resp_code == SUCCESS_CODE
    }

    /// Resolve the envelope into its payload
    ///
    /// - code `"0"` with a `data` field: that value (`null` counts as no
    ///   payload)
    /// - code `"0"` without `data`: the remaining fields merged as an
    ///   object, or no payload when there are none
    /// - any other code: a business failure carrying the message verbatim
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Business` for every non-`"0"` code. Business
    /// failures are never coerced into a default payload.
    pub fn into_payload(self) -> Result<Option<Value>, ApiError> {
        if !self.is_success() {
            return Err(ApiError::Business {
                code: self.resp_code,
                message: self.resp_message,
            });
        }

        if let Some(data) = self.data {
            return Ok(match data {
                Value::Null => None,
                other => Some(other),
            });
        }

        if self.extra.is_empty() {
            Ok(None)
        } else {
            Ok(Some(Value::Object(self.extra)))
        }
    }
}
