//! Signed route handlers
//!
//! Each handler only runs after `VerifiedParams` has recomputed the
//! signature and checked the replay window; by the time the parameter set
//! arrives here it is authentic.

use axum::Json;
use parsign_http::{envelope_err, envelope_ok, EnvelopeJson, VerifiedParams};
use serde::Serialize;
use serde_json::json;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check endpoint (unauthenticated)
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Sign-up sheet for one activity
pub async fn show_signup(VerifiedParams(params): VerifiedParams) -> EnvelopeJson {
    let activity_id = params
        .get("activity_id")
        .map(|v| v.to_string())
        .unwrap_or_default();

    if activity_id.is_empty() {
        return envelope_err("1004", "activity_id is required");
    }

    tracing::info!(%activity_id, "signup lookup");

    envelope_ok(json!({
        "activity_id": activity_id,
        "title": "Friday pickup run",
        "signup_open": true,
        "member_count": 7,
        "capacity": 12,
    }))
}

/// Groups the caller belongs to
pub async fn my_groups(VerifiedParams(_params): VerifiedParams) -> EnvelopeJson {
    envelope_ok(json!({
        "groups": [
            {"group_id": 88, "name": "Riverside courts", "member_count": 9},
            {"group_id": 91, "name": "Sunday five-a-side", "member_count": 11},
        ]
    }))
}

/// Create a group for an activity
pub async fn create_group(VerifiedParams(params): VerifiedParams) -> EnvelopeJson {
    let activity_id = params
        .get("activity_id")
        .map(|v| v.to_string())
        .unwrap_or_default();

    if activity_id.is_empty() {
        return envelope_err("1004", "activity_id is required");
    }

    tracing::info!(%activity_id, "creating group");

    envelope_ok(json!({
        "group_id": 88,
        "activity_id": activity_id,
    }))
}

/// Post a message into a group
pub async fn send_message(VerifiedParams(params): VerifiedParams) -> EnvelopeJson {
    let group_id = params
        .get("group_id")
        .map(|v| v.to_string())
        .unwrap_or_default();
    let content = params
        .get("content")
        .map(|v| v.to_string())
        .unwrap_or_default();

    if group_id.is_empty() {
        return envelope_err("1004", "group_id is required");
    }
    if content.is_empty() {
        return envelope_err("1005", "message content is required");
    }

    tracing::info!(%group_id, "message accepted");

    envelope_ok(json!({
        "message_id": 1024,
        "group_id": group_id,
    }))
}
