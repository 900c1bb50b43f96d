//! Signing policy configuration
//!
//! The reference backend family pins one variant of the scheme (uppercase
//! digest, secret as a pseudo-parameter, U+2600..=U+2B55 symbol block). The
//! sibling variants observed in the field differ only in these knobs, so
//! they are explicit configuration rather than separate code paths.

use std::ops::RangeInclusive;

/// Reserved signature field name. "signture" is the backend's own spelling
/// and must match it byte-for-byte.
pub const SIGNATURE_FIELD: &str = "signture";

/// Reserved pseudo-parameter key the shared secret is sorted in under.
pub const SECRET_FIELD: &str = "secret";

/// Field name for the per-attempt nonce.
pub const NONCE_FIELD: &str = "random";

/// Field name for the per-attempt timestamp.
pub const TIMESTAMP_FIELD: &str = "timestamp";

/// Field name for the fixed session token some deployments expect on every
/// request.
pub const SESSION_FIELD: &str = "rdsession";

/// Number of decimal digits in a nonce.
pub const NONCE_LEN: usize = 6;

/// Backend-documented replay window in seconds. The backend rejects
/// timestamps older than this; clients only supply the value.
pub const REPLAY_WINDOW_SECS: i64 = 5 * 60;

/// Symbol block the reference backend strips from values before hashing.
pub const DEFAULT_SYMBOL_RANGE: RangeInclusive<u32> = 0x2600..=0x2B55;

/// Hex casing of the final digest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DigestCase {
    /// Uppercase hex (the reference backend)
    #[default]
    Upper,
    /// Lowercase hex (sibling backend variant)
    Lower,
}

/// How the shared secret enters the canonical string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SecretMode {
    /// Sorted into the pairs under [`SECRET_FIELD`] (the reference backend)
    #[default]
    Parameter,
    /// Appended raw after the joined pairs
    Suffix,
}

/// Complete signing policy for one target backend
///
/// # Example
///
/// ```rust
/// use parsign_core::{DigestCase, SigningConfig};
///
/// // The reference backend
/// let config = SigningConfig::default();
/// assert_eq!(config.signature_field, "signture");
///
/// // A sibling backend that compares lowercase digests
/// let config = SigningConfig::default().with_digest_case(DigestCase::Lower);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SigningConfig {
    /// Key excluded from the hash input (and attached to outgoing requests)
    pub signature_field: String,
    /// Key the secret is injected under in `SecretMode::Parameter`
    pub secret_field: String,
    pub digest_case: DigestCase,
    pub secret_mode: SecretMode,
    /// Inclusive code-point range stripped from values before hashing
    pub symbol_range: RangeInclusive<u32>,
}

impl Default for SigningConfig {
    fn default() -> Self {
        Self {
            signature_field: SIGNATURE_FIELD.to_string(),
            secret_field: SECRET_FIELD.to_string(),
            digest_case: DigestCase::default(),
            secret_mode: SecretMode::default(),
            symbol_range: DEFAULT_SYMBOL_RANGE,
        }
    }
}

impl SigningConfig {
    pub fn with_signature_field(mut self, name: impl Into<String>) -> Self {
        self.signature_field = name.into();
        self
    }

    pub fn with_secret_field(mut self, name: impl Into<String>) -> Self {
        self.secret_field = name.into();
        self
    }

    pub fn with_digest_case(mut self, case: DigestCase) -> Self {
        self.digest_case = case;
        self
    }

    pub fn with_secret_mode(mut self, mode: SecretMode) -> Self {
        self.secret_mode = mode;
        self
    }

    pub fn with_symbol_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.symbol_range = range;
        self
    }
}
