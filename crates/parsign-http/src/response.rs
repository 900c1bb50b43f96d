//! Response helpers for the envelope convention

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;

use crate::envelope::ApiEnvelope;

/// Wrapper rendering an [`ApiEnvelope`] as an HTTP reply
///
/// The backend convention carries business outcomes - success and failure
/// alike - as HTTP 200 with the status inside the envelope; only transport
/// and verification problems use HTTP status codes (see
/// `ApiError::into_response`).
pub struct EnvelopeJson(pub ApiEnvelope);

impl IntoResponse for EnvelopeJson {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.0)).into_response()
    }
}

/// Build a success reply carrying a payload
pub fn envelope_ok(data: Value) -> EnvelopeJson {
    EnvelopeJson(ApiEnvelope::ok(data))
}

/// Build a business-failure reply
pub fn envelope_err(code: impl Into<String>, message: impl Into<String>) -> EnvelopeJson {
    EnvelopeJson(ApiEnvelope::err(code, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_helpers_build_expected_codes() {
        let EnvelopeJson(ok) = envelope_ok(json!({"x": 1}));
        assert!(ok.is_success());

        let EnvelopeJson(err) = envelope_err("1007", "activity is full");
        assert_eq!(err.resp_code, "1007");
        assert_eq!(err.resp_message, "activity is full");
    }
}
