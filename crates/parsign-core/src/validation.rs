//! Wire-shape checks for signed parameter sets
//!
//! Format checks a receiving side runs before recomputing the signature:
//! the system fields must be present and well-formed. Cryptographic
//! verification itself lives in the canonical crate; these checks let a
//! backend reject malformed requests with a precise message first.

use crate::config::{DigestCase, SigningConfig, NONCE_FIELD, NONCE_LEN, TIMESTAMP_FIELD};
use crate::params::ParameterSet;
use thiserror::Error;

/// Errors that can occur during signed-request validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Nonce must be exactly {expected} ASCII digits, got '{got}'")]
    BadNonce { got: String, expected: usize },

    #[error("Timestamp must be decimal seconds since epoch, got '{got}'")]
    BadTimestamp { got: String },

    #[error("Signature must be 32 hex characters, got '{got}'")]
    BadSignature { got: String },

    #[error("Signature must be {expected} hex, got '{got}'")]
    WrongDigestCase { got: String, expected: &'static str },

    #[error("Timestamp is {age}s old, outside the {window}s replay window")]
    StaleTimestamp { age: i64, window: i64 },
}

/// Validate the shape of a signed parameter set
///
/// Checks that `random`, `timestamp`, and the configured signature field are
/// present and well-formed. Does not recompute the signature.
///
/// # Errors
///
/// Returns `ValidationError` naming the first malformed field.
pub fn validate_signed(
    params: &ParameterSet,
    config: &SigningConfig,
) -> Result<(), ValidationError> {
    let nonce = require_field(params, NONCE_FIELD)?;
    validate_nonce(&nonce)?;

    let timestamp = require_field(params, TIMESTAMP_FIELD)?;
    validate_timestamp(&timestamp)?;

    let signature = require_field(params, &config.signature_field)?;
    validate_signature_format(&signature, config.digest_case)?;

    Ok(())
}

fn require_field(params: &ParameterSet, field: &str) -> Result<String, ValidationError> {
    match params.get(field) {
        Some(value) if !value.is_null() => Ok(value.to_string()),
        _ => Err(ValidationError::MissingField(field.to_string())),
    }
}

/// Validate a nonce: exactly [`NONCE_LEN`] ASCII digits
pub fn validate_nonce(nonce: &str) -> Result<(), ValidationError> {
    if nonce.len() != NONCE_LEN || !nonce.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::BadNonce {
            got: nonce.to_string(),
            expected: NONCE_LEN,
        });
    }
    Ok(())
}

/// Validate a timestamp: non-negative decimal seconds
pub fn validate_timestamp(timestamp: &str) -> Result<(), ValidationError> {
    match timestamp.parse::<i64>() {
        Ok(seconds) if seconds >= 0 => Ok(()),
        _ => Err(ValidationError::BadTimestamp {
            got: timestamp.to_string(),
        }),
    }
}

/// Validate a digest's format against the configured casing
pub fn validate_signature_format(
    signature: &str,
    case: DigestCase,
) -> Result<(), ValidationError> {
    if signature.len() != 32 || !signature.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ValidationError::BadSignature {
            got: signature.to_string(),
        });
    }

    let conforms = match case {
        DigestCase::Upper => !signature.bytes().any(|b| b.is_ascii_lowercase()),
        DigestCase::Lower => !signature.bytes().any(|b| b.is_ascii_uppercase()),
    };
    if !conforms {
        return Err(ValidationError::WrongDigestCase {
            got: signature.to_string(),
            expected: match case {
                DigestCase::Upper => "uppercase",
                DigestCase::Lower => "lowercase",
            },
        });
    }

    Ok(())
}

/// Check a timestamp against the replay window
///
/// Backend-side only: clients supply the timestamp but never enforce the
/// window. Future timestamps (negative age) are tolerated up to the same
/// window to absorb clock skew.
pub fn check_replay_window(
    timestamp: &str,
    now_seconds: i64,
    window: i64,
) -> Result<(), ValidationError> {
    validate_timestamp(timestamp)?;
    let seconds: i64 = timestamp.parse().expect("validated above");

    let age = now_seconds - seconds;
    if age.abs() > window {
        return Err(ValidationError::StaleTimestamp { age, window });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::REPLAY_WINDOW_SECS;

    fn signed_params() -> ParameterSet {
        let mut params = ParameterSet::new();
        params.insert("activity_id", 673123);
        params.insert("random", "482910");
        params.insert("timestamp", "1700000000");
        params.insert("signture", "5A5CE2AEB5C34D0CC96A743DF11A38E1");
        params
    }

    #[test]
    fn test_valid_signed_shape() {
        let params = signed_params();
        assert!(validate_signed(&params, &SigningConfig::default()).is_ok());
    }

    #[test]
    fn test_missing_nonce() {
        let mut params = signed_params();
        params.remove("random");
        assert_eq!(
            validate_signed(&params, &SigningConfig::default()),
            Err(ValidationError::MissingField("random".to_string()))
        );
    }

    #[test]
    fn test_missing_signature_uses_configured_name() {
        let mut params = signed_params();
        params.remove("signture");
        params.insert("sig", "5A5CE2AEB5C34D0CC96A743DF11A38E1");

        // Default config expects "signture"
        assert_eq!(
            validate_signed(&params, &SigningConfig::default()),
            Err(ValidationError::MissingField("signture".to_string()))
        );

        // With the field renamed, the same set passes
        let config = SigningConfig::default().with_signature_field("sig");
        assert!(validate_signed(&params, &config).is_ok());
    }

    #[test]
    fn test_bad_nonce_shapes() {
        assert!(validate_nonce("482910").is_ok());
        assert!(validate_nonce("48291").is_err());
        assert!(validate_nonce("4829100").is_err());
        assert!(validate_nonce("48291a").is_err());
        assert!(validate_nonce("").is_err());
    }

    #[test]
    fn test_bad_timestamp_shapes() {
        assert!(validate_timestamp("1700000000").is_ok());
        assert!(validate_timestamp("0").is_ok());
        assert!(validate_timestamp("-5").is_err());
        assert!(validate_timestamp("17e9").is_err());
        assert!(validate_timestamp("").is_err());
    }

    #[test]
    fn test_signature_format() {
        let upper = "5A5CE2AEB5C34D0CC96A743DF11A38E1";
        assert!(validate_signature_format(upper, DigestCase::Upper).is_ok());
        assert!(matches!(
            validate_signature_format(upper, DigestCase::Lower),
            Err(ValidationError::WrongDigestCase { .. })
        ));

        let lower = upper.to_lowercase();
        assert!(validate_signature_format(&lower, DigestCase::Lower).is_ok());

        assert!(matches!(
            validate_signature_format("not-hex", DigestCase::Upper),
            Err(ValidationError::BadSignature { .. })
        ));
        assert!(matches!(
            validate_signature_format(&"A".repeat(31), DigestCase::Upper),
            Err(ValidationError::BadSignature { .. })
        ));
    }

    #[test]
    fn test_digit_only_signature_passes_either_case() {
        // All-digit digests carry no case information
        let digits = "12345678901234567890123456789012";
        assert!(validate_signature_format(digits, DigestCase::Upper).is_ok());
        assert!(validate_signature_format(digits, DigestCase::Lower).is_ok());
    }

    #[test]
    fn test_replay_window() {
        let now = 1_700_000_000;

        assert!(check_replay_window("1700000000", now, REPLAY_WINDOW_SECS).is_ok());
        assert!(check_replay_window("1699999701", now, REPLAY_WINDOW_SECS).is_ok());

        let err = check_replay_window("1699999000", now, REPLAY_WINDOW_SECS).unwrap_err();
        assert_eq!(
            err,
            ValidationError::StaleTimestamp {
                age: 1000,
                window: REPLAY_WINDOW_SECS
            }
        );
    }

    #[test]
    fn test_replay_window_tolerates_skew() {
        let now = 1_700_000_000;
        // Slightly in the future: clock skew, accepted
        assert!(check_replay_window("1700000060", now, REPLAY_WINDOW_SECS).is_ok());
        // Far in the future: rejected
        assert!(check_replay_window("1700001000", now, REPLAY_WINDOW_SECS).is_err());
    }
}
