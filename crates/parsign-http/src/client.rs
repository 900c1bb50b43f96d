//! Reqwest-based signed API client
//!
//! Wraps the signer in the transport contract the backend expects: GET
//! sends the signed set as query parameters, POST as a JSON or
//! form-urlencoded body. Every attempt - including every retry - rebuilds
//! the request from the business parameters so the nonce, timestamp, and
//! signature are regenerated together.

use parsign_canonical::SignedRequest;
use parsign_core::{ParameterSet, SigningConfig, SESSION_FIELD};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tokio::time::sleep;

use crate::envelope::ApiEnvelope;
use crate::error::ApiError;

/// How the signed parameter set travels on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wire {
    Query,
    Json,
    Form,
}

/// Configuration for a [`SignedClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL without a trailing slash
    pub base_url: String,
    /// Shared secret for signing; `None` for backends that accept unkeyed
    /// digests
    pub secret: Option<String>,
    /// Fixed session token injected into every request under `rdsession`,
    /// when the deployment expects one
    pub session: Option<String>,
    pub timeout: Duration,
    /// Attempts per logical request, first try included
    pub max_retries: u32,
    pub signing: SigningConfig,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            secret: None,
            session: None,
            timeout: Duration::from_secs(30),
            max_retries: 3,
            signing: SigningConfig::default(),
        }
    }

    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    pub fn with_session(mut self, session: impl Into<String>) -> Self {
        self.session = Some(session.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    pub fn with_signing(mut self, signing: SigningConfig) -> Self {
        self.signing = signing;
        self
    }
}

/// Signed API client
///
/// # Example
///
/// ```ignore
/// use parsign_http::{ClientConfig, SignedClient};
/// use parsign_core::ParameterSet;
///
/// let client = SignedClient::new(
///     ClientConfig::new("http://localhost:8080")
///         .with_secret("e2ffab74c3d1f8477a801a7377b66125"),
/// );
///
/// let mut params = ParameterSet::new();
/// params.insert("activity_id", 673123);
/// let payload = client.get("api/core/show_signup", &params).await?;
/// ```
pub struct SignedClient {
    client: Client,
    config: ClientConfig,
}

impl SignedClient {
    /// Create a client with the given configuration
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(config.timeout)
                .build()
                .unwrap(),
            config,
        }
    }

    /// Create a client around an existing reqwest `Client`
    pub fn with_client(client: Client, config: ClientConfig) -> Self {
        Self { client, config }
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// GET with the signed set as query parameters
    pub async fn get(
        &self,
        path: &str,
        params: &ParameterSet,
    ) -> Result<Option<Value>, ApiError> {
        self.execute(Wire::Query, path, params).await
    }

    /// POST with the signed set as a JSON body
    pub async fn post(
        &self,
        path: &str,
        params: &ParameterSet,
    ) -> Result<Option<Value>, ApiError> {
        self.execute(Wire::Json, path, params).await
    }

    /// POST with the signed set form-urlencoded
    pub async fn post_form(
        &self,
        path: &str,
        params: &ParameterSet,
    ) -> Result<Option<Value>, ApiError> {
        self.execute(Wire::Form, path, params).await
    }

    /// Run one logical request with retries
    ///
    /// Retryable failures (transport, timeout, 5xx) back off linearly -
    /// one second times the attempt number, the original client's schedule -
    /// and re-sign from scratch. Business failures return immediately.
    async fn execute(
        &self,
        wire: Wire,
        path: &str,
        params: &ParameterSet,
    ) -> Result<Option<Value>, ApiError> {
        let mut last_error = None;

        for attempt in 1..=self.config.max_retries {
            match self.execute_once(wire, path, params).await {
                Ok(payload) => return Ok(payload),
                Err(error) if error.is_retryable() && attempt < self.config.max_retries => {
                    tracing::warn!(
                        path,
                        attempt,
                        max = self.config.max_retries,
                        %error,
                        "request attempt failed, retrying"
                    );
                    sleep(Duration::from_secs(attempt as u64)).await;
                    last_error = Some(error);
                }
                Err(error) => return Err(error),
            }
        }

        // Unreachable while max_retries >= 1; the loop always returns
        Err(last_error.unwrap_or(ApiError::Timeout))
    }

    /// One attempt: fresh nonce/timestamp/signature, one HTTP exchange
    async fn execute_once(
        &self,
        wire: Wire,
        path: &str,
        params: &ParameterSet,
    ) -> Result<Option<Value>, ApiError> {
        let signed = self.build_attempt(params);
        let url = self.url_for(path);

        tracing::debug!(%url, nonce = signed.nonce(), "sending signed request");

        let request = match wire {
            Wire::Query => self.client.get(&url).query(&wire_pairs(signed.params())),
            Wire::Json => self.client.post(&url).json(&signed.params().to_json()),
            Wire::Form => self.client.post(&url).form(&wire_pairs(signed.params())),
        };

        let response = request.send().await.map_err(map_transport)?;
        let status = response.status();

        if status.is_success() {
            let envelope: ApiEnvelope = response
                .json()
                .await
                .map_err(|e| ApiError::Envelope(e.to_string()))?;
            envelope.into_payload()
        } else if status.as_u16() == 500 {
            Err(ApiError::Server)
        } else {
            Err(ApiError::Http(status.as_u16()))
        }
    }

    /// Assemble the outbound set for one attempt
    fn build_attempt(&self, params: &ParameterSet) -> SignedRequest {
        let mut full = params.clone();
        if let Some(session) = &self.config.session {
            full.insert(SESSION_FIELD, session.clone());
        }
        SignedRequest::build(full, self.config.secret.as_deref(), &self.config.signing)
    }

    fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Render the signed set as wire key/value pairs
///
/// Null entries are omitted: they are not part of the signature, and the
/// query/form encodings have no way to carry them.
fn wire_pairs(params: &ParameterSet) -> Vec<(String, String)> {
    params
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (key.clone(), value.to_string()))
        .collect()
}

fn map_transport(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::Transport(error)
    }
}
