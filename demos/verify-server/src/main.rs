//! Parsign verification demo server
//!
//! A local stand-in for the reference backend. Every business route sits
//! behind signature verification and replies in the envelope convention, so
//! a `SignedClient` can be pointed at it end to end.
//!
//! Usage:
//!   # Documented test secret (matches the fixtures)
//!   cargo run --package verify-server
//!
//!   # Custom secret
//!   PARSIGN_SECRET=... cargo run --package verify-server

mod handlers;

use axum::routing::{get, post};
use axum::Router;
use parsign_http::SignerState;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Secret used when PARSIGN_SECRET is unset; matches the documented test
/// vectors and the fixture set
const DEFAULT_SECRET: &str = "e2ffab74c3d1f8477a801a7377b66125";

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "verify_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let secret = match std::env::var("PARSIGN_SECRET") {
        Ok(secret) => {
            tracing::info!("Using secret from PARSIGN_SECRET");
            secret
        }
        Err(_) => {
            tracing::info!("Using the documented test secret");
            DEFAULT_SECRET.to_string()
        }
    };

    let state = SignerState::new(Some(secret));

    // Build router
    let app = Router::new()
        // Signed business endpoints
        .route("/api/core/show_signup", get(handlers::show_signup))
        .route("/api/app/group/list/my", get(handlers::my_groups))
        .route("/api/app/group/create", post(handlers::create_group))
        .route("/api/app/group/message/send", post(handlers::send_message))
        // Unauthenticated
        .route("/health", get(handlers::health))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server
    let addr = SocketAddr::from(([127, 0, 0, 1], 8080));
    tracing::info!("verify server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
