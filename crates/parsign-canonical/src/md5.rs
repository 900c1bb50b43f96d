//! MD5 digest, implemented from first principles
//!
//! The backend family this protocol targets compares digests produced by its
//! own MD5 routine, so the hash is implemented here directly instead of
//! through a crypto crate: every step is auditable against RFC 1321 and
//! against the backend's behavior, and the dependency surface stays empty.
//!
//! MD5 is not collision-resistant; the protocol uses it as a keyed checksum
//! inside a short replay window, not as a security primitive.
//!
//! Determinism notes: all additions wrap at 2^32 (`wrapping_add`), rotations
//! are unsigned (`rotate_left`), and words are little-endian at every
//! boundary (block expansion, length suffix, digest rendering).

use std::fmt::Write;

/// Per-operation additive constants (the RFC 1321 T table)
const K: [u32; 64] = [
    0xd76aa478, 0xe8c7b756, 0x242070db, 0xc1bdceee,
    0xf57c0faf, 0x4787c62a, 0xa8304613, 0xfd469501,
    0x698098d8, 0x8b44f7af, 0xffff5bb1, 0x895cd7be,
    0x6b901122, 0xfd987193, 0xa679438e, 0x49b40821,
    0xf61e2562, 0xc040b340, 0x265e5a51, 0xe9b6c7aa,
    0xd62f105d, 0x02441453, 0xd8a1e681, 0xe7d3fbc8,
    0x21e1cde6, 0xc33707d6, 0xf4d50d87, 0x455a14ed,
    0xa9e3e905, 0xfcefa3f8, 0x676f02d9, 0x8d2a4c8a,
    0xfffa3942, 0x8771f681, 0x6d9d6122, 0xfde5380c,
    0xa4beea44, 0x4bdecfa9, 0xf6bb4b60, 0xbebfbc70,
    0x289b7ec6, 0xeaa127fa, 0xd4ef3085, 0x04881d05,
    0xd9d4d039, 0xe6db99e5, 0x1fa27cf8, 0xc4ac5665,
    0xf4292244, 0x432aff97, 0xab9423a7, 0xfc93a039,
    0x655b59c3, 0x8f0ccc92, 0xffeff47d, 0x85845dd1,
    0x6fa87e4f, 0xfe2ce6e0, 0xa3014314, 0x4e0811a1,
    0xf7537e82, 0xbd3af235, 0x2ad7d2bb, 0xeb86d391,
];

/// Per-operation left-rotation amounts
const S: [u32; 64] = [
    7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22,
    5, 9, 14, 20, 5, 9, 14, 20, 5, 9, 14, 20, 5, 9, 14, 20,
    4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23,
    6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21,
];

/// Standard initialization vector (A, B, C, D)
const INIT: [u32; 4] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476];

/// Running digest state: four 32-bit words, one instance per invocation
struct Md5State {
    words: [u32; 4],
}

impl Md5State {
    fn new() -> Self {
        Self { words: INIT }
    }

    /// Absorb one 64-byte block into the running state
    fn process_block(&mut self, block: &[u8]) {
        debug_assert_eq!(block.len(), 64);

        // Sixteen 32-bit little-endian words
        let mut m = [0u32; 16];
        for (i, chunk) in block.chunks_exact(4).enumerate() {
            m[i] = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }

        let [mut a, mut b, mut c, mut d] = self.words;

        for i in 0..64 {
            // Round function and message index schedule
            let (f, g) = match i {
                0..=15 => ((b & c) | (!b & d), i),
                16..=31 => ((d & b) | (!d & c), (5 * i + 1) % 16),
                32..=47 => (b ^ c ^ d, (3 * i + 5) % 16),
                _ => (c ^ (b | !d), (7 * i) % 16),
            };

            let rotated = a
                .wrapping_add(f)
                .wrapping_add(K[i])
                .wrapping_add(m[g])
                .rotate_left(S[i]);
            let next_b = b.wrapping_add(rotated);

            a = d;
            d = c;
            c = b;
            b = next_b;
        }

        self.words[0] = self.words[0].wrapping_add(a);
        self.words[1] = self.words[1].wrapping_add(b);
        self.words[2] = self.words[2].wrapping_add(c);
        self.words[3] = self.words[3].wrapping_add(d);
    }

    /// Read out the digest: the four state words, each little-endian
    fn digest(&self) -> [u8; 16] {
        let mut out = [0u8; 16];
        for (i, word) in self.words.iter().enumerate() {
            out[i * 4..i * 4 + 4].copy_from_slice(&word.to_le_bytes());
        }
        out
    }
}

/// Compute the MD5 digest of a byte sequence
///
/// Total over all inputs, including the empty slice. Each call owns its own
/// state; concurrent calls share nothing.
pub fn md5_bytes(input: &[u8]) -> [u8; 16] {
    // Padded copy: one 1 bit, zeros to 56 mod 64, then the original bit
    // length as a 64-bit little-endian integer
    let mut message = Vec::with_capacity(input.len() + 72);
    message.extend_from_slice(input);
    message.push(0x80);
    while message.len() % 64 != 56 {
        message.push(0);
    }
    let bit_len = (input.len() as u64).wrapping_mul(8);
    message.extend_from_slice(&bit_len.to_le_bytes());

    let mut state = Md5State::new();
    for block in message.chunks_exact(64) {
        state.process_block(block);
    }
    state.digest()
}

/// MD5 of a string's UTF-8 bytes, as 32 lowercase hex characters
///
/// The UTF-8 step matters: signed payloads routinely carry multi-byte
/// characters and the backend hashes bytes, not code points. Case
/// normalization is the caller's responsibility.
///
/// # Example
///
/// ```rust
/// use parsign_canonical::md5;
///
/// assert_eq!(md5("abc"), "900150983cd24fb0d6963f7d28e17f72");
/// assert_eq!(md5(""), "d41d8cd98f00b204e9800998ecf8427e");
/// ```
pub fn md5(input: &str) -> String {
    hex_encode(&md5_bytes(input.as_bytes()))
}

/// Convert bytes to lowercase hex
fn hex_encode(bytes: &[u8]) -> String {
    let mut hex = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        write!(hex, "{:02x}", byte).unwrap();
    }
    hex
}

/// Validate an MD5 digest string format (32 hex characters, either case)
pub fn is_valid_digest(digest: &str) -> bool {
    digest.len() == 32 && digest.bytes().all(|b| b.is_ascii_hexdigit())
}
