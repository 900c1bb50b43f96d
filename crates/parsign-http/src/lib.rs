//! # Parsign HTTP
//!
//! HTTP transport and response contract for the parsign request protocol.
//!
//! This crate provides:
//! - The uniform response envelope and its resolution rules
//! - A reqwest client that signs every attempt and retries with backoff
//! - An axum extractor that verifies inbound signatures server-side
//!
//! ## Client example
//!
//! ```ignore
//! use parsign_core::ParameterSet;
//! use parsign_http::{ClientConfig, SignedClient};
//!
//! let client = SignedClient::new(
//!     ClientConfig::new("http://localhost:8080")
//!         .with_secret("e2ffab74c3d1f8477a801a7377b66125")
//!         .with_session("axdTx2Xlq4Xbl7xL"),
//! );
//!
//! let mut params = ParameterSet::new();
//! params.insert("activity_id", 673123);
//! params.insert("fromId", 6);
//!
//! let payload = client.get("api/core/show_signup", &params).await?;
//! ```
//!
//! ## Server example
//!
//! ```ignore
//! use axum::{routing::get, Router};
//! use parsign_http::{envelope_ok, EnvelopeJson, SignerState, VerifiedParams};
//!
//! async fn show_signup(VerifiedParams(params): VerifiedParams) -> EnvelopeJson {
//!     envelope_ok(serde_json::json!({"open": true}))
//! }
//!
//! let state = SignerState::new(Some("secret".to_string()));
//! let app = Router::new()
//!     .route("/api/core/show_signup", get(show_signup))
//!     .with_state(state);
//! ```

mod client;
mod envelope;
mod error;
mod extractors;
mod response;

pub use client::{ClientConfig, SignedClient};
pub use envelope::{ApiEnvelope, SUCCESS_CODE};
pub use error::ApiError;
pub use extractors::{SignerState, VerifiedParams};
pub use response::{envelope_err, envelope_ok, EnvelopeJson};
