//! # Parsign Core
//!
//! Parameter model and signing policy for the parsign request protocol.
//!
//! This crate provides:
//! - Scalar parameter types (`ParamValue`, `ParameterSet`)
//! - The per-backend signing policy (`SigningConfig`)
//! - Per-attempt system parameters (nonce, timestamp)
//! - Wire-shape validation for signed requests
//!
//! The canonical serializer and the hash itself live in `parsign-canonical`;
//! this crate is deliberately free of any hashing so receiving sides can
//! validate request shape without pulling in the signer.
//!
//! ## Example
//!
//! ```rust
//! use parsign_core::{ParameterSet, SigningConfig};
//!
//! let mut params = ParameterSet::new();
//! params.insert("activity_id", 673123);
//! params.insert("fromId", 6);
//!
//! let config = SigningConfig::default();
//! assert_eq!(config.signature_field, "signture");
//! ```

pub mod attempt;
pub mod config;
pub mod error;
pub mod params;
pub mod validation;

// Re-exports for convenience
pub use attempt::*;
pub use config::*;
pub use error::*;
pub use params::*;
pub use validation::*;
