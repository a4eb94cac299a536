//! SHA-256 based hashing used for identity commitments and Fiat-Shamir challenges.

use sha2::{Digest, Sha256};

/// Output length of the underlying digest (256 bits).
pub const DIGEST_BYTES: usize = 32;

/// Number of bytes produced for wide scalar reduction.
pub const WIDE_REDUCTION_BYTES: usize = 64;

/// Computes `SHA256(data)`.
pub fn sha256(data: &[u8]) -> [u8; DIGEST_BYTES] {
    Sha256::digest(data).into()
}

/// Computes `SHA256(a ‖ b)` without materializing the concatenation.
pub fn sha256_concat(a: &[u8], b: &[u8]) -> [u8; DIGEST_BYTES] {
    let mut hasher = Sha256::new();
    hasher.update(a);
    hasher.update(b);
    hasher.finalize().into()
}

/// Expands a message into 64 uniform-looking bytes for wide reduction.
///
/// Output is `SHA256(dst ‖ 0x00 ‖ msg) ‖ SHA256(dst ‖ 0x01 ‖ msg)`, so reducing it
/// modulo a ~255-bit order leaves a negligible bias.
pub fn expand_wide(msg: &[u8], dst: &[u8]) -> [u8; WIDE_REDUCTION_BYTES] {
    let mut wide = [0u8; WIDE_REDUCTION_BYTES];
    for (counter, chunk) in wide.chunks_exact_mut(DIGEST_BYTES).enumerate() {
        let mut hasher = Sha256::new();
        hasher.update(dst);
        hasher.update([counter as u8]);
        hasher.update(msg);
        chunk.copy_from_slice(&hasher.finalize());
    }
    wide
}
