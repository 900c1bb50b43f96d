//! Axum extractors for verified signed requests

use async_trait::async_trait;
use axum::extract::{FromRef, FromRequest, Query, Request};
use axum::http::{header, Method};
use axum::{Form, Json};
use chrono::Utc;
use parsign_canonical::verify_signature;
use parsign_core::{
    check_replay_window, validate_signed, ParameterSet, SigningConfig, REPLAY_WINDOW_SECS,
    TIMESTAMP_FIELD,
};
use serde_json::Value;
use std::collections::HashMap;

use crate::error::ApiError;

/// Verification state shared by signed routes
#[derive(Debug, Clone)]
pub struct SignerState {
    pub secret: Option<String>,
    pub signing: SigningConfig,
    /// Maximum accepted timestamp age in seconds
    pub replay_window: i64,
}

impl SignerState {
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret,
            signing: SigningConfig::default(),
            replay_window: REPLAY_WINDOW_SECS,
        }
    }

    pub fn with_signing(mut self, signing: SigningConfig) -> Self {
        self.signing = signing;
        self
    }

    pub fn with_replay_window(mut self, seconds: i64) -> Self {
        self.replay_window = seconds;
        self
    }
}

/// Axum extractor for signature-verified parameter sets
///
/// Reads the parameter set from the query string (GET) or a JSON body
/// (everything else), checks the wire shape, enforces the replay window,
/// and recomputes the signature with the server's secret. Handlers only see
/// requests that verified; everything else is rejected in the envelope
/// convention.
///
/// # Example
///
/// ```ignore
/// use axum::{routing::get, Router};
/// use parsign_http::{SignerState, VerifiedParams};
///
/// async fn show_signup(VerifiedParams(params): VerifiedParams) {
///     // params carried a valid signature
/// }
///
/// let state = SignerState::new(Some("secret".to_string()));
/// let app = Router::new()
///     .route("/api/core/show_signup", get(show_signup))
///     .with_state(state);
/// ```
pub struct VerifiedParams(pub ParameterSet);

#[async_trait]
impl<S> FromRequest<S> for VerifiedParams
where
    S: Send + Sync,
    SignerState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let signer = SignerState::from_ref(state);

        // GET carries the set in the query string; POST as a JSON or
        // form-urlencoded body
        let params = if req.method() == Method::GET {
            let Query(map) = Query::<HashMap<String, String>>::try_from_uri(req.uri())
                .map_err(|e| ApiError::Envelope(e.to_string()))?;
            map.into_iter().collect::<ParameterSet>()
        } else if is_form(&req) {
            let Form(map) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| ApiError::Envelope(e.to_string()))?;
            map.into_iter().collect::<ParameterSet>()
        } else {
            let Json(value) = Json::<Value>::from_request(req, state)
                .await
                .map_err(|e| ApiError::Envelope(e.to_string()))?;
            ParameterSet::from_json(&value)?
        };

        validate_signed(&params, &signer.signing)?;

        // validate_signed guarantees the field is present and non-null
        let timestamp = params
            .get(TIMESTAMP_FIELD)
            .map(|v| v.to_string())
            .unwrap_or_default();
        check_replay_window(&timestamp, Utc::now().timestamp(), signer.replay_window)?;

        let mut inbound = params.clone();
        let provided = inbound
            .remove(&signer.signing.signature_field)
            .map(|v| v.to_string())
            .unwrap_or_default();

        if !verify_signature(&inbound, signer.secret.as_deref(), &provided, &signer.signing) {
            tracing::debug!("rejecting request with bad signature");
            return Err(ApiError::BadSignature);
        }

        Ok(VerifiedParams(params))
    }
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}
