//! Canonical parameter serialization
//!
//! The deterministic `key=value&...` string both sides hash. Everything
//! about it is pinned: which entries are dropped, how values render, where
//! the secret goes, and the byte-order key sort.

use crate::filter::strip_symbols;
use parsign_core::{ParameterSet, SecretMode, SigningConfig};

/// Build the canonical string for a parameter set
///
/// # Rules
///
/// 1. The configured signature field and null-valued entries are dropped.
///    Falsy-but-defined values (empty string, `0`, `false`) are kept.
/// 2. Remaining values render in their natural text form.
/// 3. With `SecretMode::Parameter` the secret joins the set under the
///    configured secret key and sorts in like any other pair; with
///    `SecretMode::Suffix` it is appended raw after the joined pairs.
/// 4. Keys sort by ascending byte order - plain lexicographic, not
///    locale-aware, not case-insensitive.
/// 5. Every value loses its symbol/emoji characters (see
///    [`strip_symbols`](crate::strip_symbols)).
/// 6. Pairs join as `key=value` with `&`: no trailing separator, no URL
///    encoding.
///
/// Never fails - every representable parameter set has a canonical string.
///
/// # Example
///
/// ```rust
/// use parsign_canonical::canonical_string;
/// use parsign_core::{ParameterSet, SigningConfig};
///
/// let mut params = ParameterSet::new();
/// params.insert("timestamp", "1000");
/// params.insert("username", "test");
/// params.insert("password", "pass");
///
/// let canonical = canonical_string(&params, Some("ABC123"), &SigningConfig::default());
/// assert_eq!(
///     canonical,
///     "password=pass&secret=ABC123&timestamp=1000&username=test"
/// );
/// ```
pub fn canonical_string(
    params: &ParameterSet,
    secret: Option<&str>,
    config: &SigningConfig,
) -> String {
    let mut pairs: Vec<(&str, String)> = params
        .iter()
        .filter(|(key, value)| key.as_str() != config.signature_field && !value.is_null())
        .map(|(key, value)| {
            let text = value.to_string();
            (key.as_str(), strip_symbols(&text, config).into_owned())
        })
        .collect();

    if let (Some(secret), SecretMode::Parameter) = (secret, config.secret_mode) {
        // The injected secret wins over any caller-supplied entry under the
        // same key
        pairs.retain(|(key, _)| *key != config.secret_field);
        pairs.push((config.secret_field.as_str(), secret.to_string()));
    }

    // The parameter set iterates in order already; re-sort so the injected
    // secret lands in its byte-order position
    pairs.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

    let joined = pairs
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&");

    match (secret, config.secret_mode) {
        (Some(secret), SecretMode::Suffix) => format!("{}{}", joined, secret),
        _ => joined,
    }
}
