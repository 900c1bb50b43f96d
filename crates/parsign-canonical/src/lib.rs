//! # Parsign Canonical
//!
//! Deterministic parameter serialization and MD5 signing for the parsign
//! request protocol.
//!
//! This crate provides:
//! - The canonical `key=value&...` serializer with byte-order key sorting
//! - The backend's symbol/emoji value filter
//! - A from-scratch MD5 implementation (the backend's digest routine)
//! - Signing, constant-time verification, and signed-request assembly
//!
//! ## Canonical serialization rules
//!
//! 1. Signature field and null entries dropped; empty string, `0`, `false`
//!    kept
//! 2. Values rendered in natural text form
//! 3. Secret injected under the reserved `secret` key (default mode)
//! 4. Keys sorted by ascending byte order
//! 5. Symbol/emoji characters stripped from every value
//! 6. Pairs joined as `key=value` with `&`, no URL encoding
//!
//! ## Example
//!
//! ```rust
//! use parsign_canonical::{canonical_string, sign};
//! use parsign_core::{ParameterSet, SigningConfig};
//!
//! let mut params = ParameterSet::new();
//! params.insert("username", "test");
//! params.insert("password", "pass");
//! params.insert("timestamp", "1000");
//!
//! let config = SigningConfig::default();
//! let canonical = canonical_string(&params, Some("ABC123"), &config);
//! assert_eq!(
//!     canonical,
//!     "password=pass&secret=ABC123&timestamp=1000&username=test"
//! );
//!
//! let signature = sign(&params, Some("ABC123"), &config);
//! assert_eq!(signature.len(), 32);
//! ```

mod canonical;
mod filter;
mod md5;
mod sign;

pub use canonical::*;
pub use filter::*;
pub use md5::*;
pub use sign::*;
