//! Request signing, verification, and signed-request assembly

use crate::canonical::canonical_string;
use crate::md5::md5;
use parsign_core::{
    attempt, DigestCase, ParameterSet, SigningConfig, NONCE_FIELD, TIMESTAMP_FIELD,
};

/// Sign a parameter set
///
/// Computes the MD5 of the canonical string and renders it in the configured
/// case. Deterministic: the same parameters, secret, and config always
/// produce the same signature - the only per-attempt variation comes from
/// the nonce and timestamp entries the caller put into `params`.
///
/// # Example
///
/// ```rust
/// use parsign_canonical::sign;
/// use parsign_core::{ParameterSet, SigningConfig};
///
/// let mut params = ParameterSet::new();
/// params.insert("activity_id", 673123);
/// params.insert("fromId", 6);
/// params.insert("inviteId", 0);
/// params.insert("random", "482910");
/// params.insert("timestamp", "1700000000");
///
/// let signature = sign(
///     &params,
///     Some("e2ffab74c3d1f8477a801a7377b66125"),
///     &SigningConfig::default(),
/// );
/// assert_eq!(signature, "5A5CE2AEB5C34D0CC96A743DF11A38E1");
/// ```
pub fn sign(params: &ParameterSet, secret: Option<&str>, config: &SigningConfig) -> String {
    let canonical = canonical_string(params, secret, config);
    let digest = md5(&canonical);
    match config.digest_case {
        DigestCase::Upper => digest.to_uppercase(),
        DigestCase::Lower => digest,
    }
}

/// Sign with the reference backend's default config
pub fn sign_default(params: &ParameterSet, secret: Option<&str>) -> String {
    sign(params, secret, &SigningConfig::default())
}

/// Recompute and compare a signature in constant time
///
/// The configured case is authoritative: a lowercase digest presented to an
/// uppercase backend does not verify.
pub fn verify_signature(
    params: &ParameterSet,
    secret: Option<&str>,
    provided: &str,
    config: &SigningConfig,
) -> bool {
    constant_time_compare(&sign(params, secret, config), provided)
}

/// Constant-time string comparison to prevent timing attacks
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}

/// A parameter set carrying the three per-attempt system entries
///
/// Built once per request attempt. There is no mutation API: a retried
/// request must be rebuilt so the nonce/timestamp/signature triple is
/// regenerated together, never reused piecemeal.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedRequest {
    params: ParameterSet,
    nonce: String,
    timestamp: String,
    signature: String,
}

impl SignedRequest {
    /// Assemble a signed request from business parameters
    ///
    /// Draws a fresh nonce and timestamp, inserts them, then computes the
    /// signature over everything except itself and attaches it under the
    /// configured signature field.
    pub fn build(params: ParameterSet, secret: Option<&str>, config: &SigningConfig) -> Self {
        Self::build_with_attempt(
            params,
            secret,
            config,
            attempt::random_nonce(),
            attempt::timestamp_seconds(),
        )
    }

    /// Assemble with caller-supplied system parameters
    ///
    /// For tests and fixture generation, where the nonce and timestamp must
    /// be pinned.
    pub fn build_with_attempt(
        mut params: ParameterSet,
        secret: Option<&str>,
        config: &SigningConfig,
        nonce: String,
        timestamp: String,
    ) -> Self {
        params.insert(NONCE_FIELD, nonce.clone());
        params.insert(TIMESTAMP_FIELD, timestamp.clone());

        let signature = sign(&params, secret, config);
        params.insert(config.signature_field.clone(), signature.clone());

        Self {
            params,
            nonce,
            timestamp,
            signature,
        }
    }

    /// The complete outbound parameter set, system entries included
    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn into_params(self) -> ParameterSet {
        self.params
    }

    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }
}
