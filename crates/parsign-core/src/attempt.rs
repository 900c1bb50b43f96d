//! Per-attempt system parameters
//!
//! Every request attempt carries a fresh nonce and timestamp. A retried
//! request must draw both again before it is re-signed; reusing the pair
//! would let the backend's replay check reject the retry.

use crate::config::NONCE_LEN;
use chrono::Utc;
use rand::Rng;

/// Generate a fixed-length decimal nonce
///
/// Draws [`NONCE_LEN`] independent uniform digits. There is no uniqueness
/// guarantee beyond the digit space; the nonce only has to be unlikely to
/// repeat within the backend's replay window.
///
/// # Example
///
/// ```rust
/// use parsign_core::random_nonce;
///
/// let nonce = random_nonce();
/// assert_eq!(nonce.len(), 6);
/// assert!(nonce.chars().all(|c| c.is_ascii_digit()));
/// ```
pub fn random_nonce() -> String {
    let mut rng = rand::thread_rng();
    (0..NONCE_LEN)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// Current wall-clock time in whole seconds since the Unix epoch
///
/// Second resolution, not milliseconds: the backend's replay check parses
/// this as a 10-digit value.
pub fn timestamp_seconds() -> String {
    Utc::now().timestamp().to_string()
}
