//! Value filtering applied before hashing
//!
//! The backend strips pictographic characters from every value before
//! computing its digest, and a client must strip the exact same set or
//! signatures stop matching bit-for-bit. The backend's filter is written in
//! UTF-16 terms: surrogate pairs (everything above U+FFFF, which covers the
//! emoji planes) plus one block of symbols and dingbats. This is a wire
//! compatibility rule, not a general Unicode-safety measure.

use parsign_core::SigningConfig;
use std::borrow::Cow;

/// Strip the backend's filtered character set from a value
///
/// Removes every char above U+FFFF and every char inside
/// `config.symbol_range`. Returns the input unchanged (borrowed) when
/// nothing matches, which is the common case for identifiers and numbers.
///
/// # Example
///
/// ```rust
/// use parsign_canonical::strip_symbols;
/// use parsign_core::SigningConfig;
///
/// let config = SigningConfig::default();
/// assert_eq!(strip_symbols("hi😀there", &config), "hithere");
/// assert_eq!(strip_symbols("plain", &config), "plain");
/// ```
pub fn strip_symbols<'a>(value: &'a str, config: &SigningConfig) -> Cow<'a, str> {
    if !value.chars().any(|c| is_stripped(c, config)) {
        return Cow::Borrowed(value);
    }

    Cow::Owned(
        value
            .chars()
            .filter(|c| !is_stripped(*c, config))
            .collect(),
    )
}

fn is_stripped(c: char, config: &SigningConfig) -> bool {
    let code = c as u32;
    code > 0xFFFF || config.symbol_range.contains(&code)
}
