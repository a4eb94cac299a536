//! Fiat-Shamir transcript for the non-interactive pseudonym proof.
//!
//! The challenge is `ε = H(x ‖ y ‖ Y)` where every element is in its fixed-length
//! compressed encoding and `H` is SHA-256 wide-reduced into `Z_q` under a
//! protocol-specific domain separation tag.

use super::{Bls12381, Scalar};
use crate::PairingGroup;

/// Domain separation tag for challenge generation.
const CHALLENGE_DST: &[u8] = b"pseudonym-auth-v1-schnorr-challenge";

/// Transcript wrapper for the Fiat-Shamir transformation.
///
/// Both the device and the base station build the same transcript from public
/// values, so neither party chooses the challenge.
#[derive(Clone, Debug, Default)]
pub struct Transcript {
    buffer: Vec<u8>,
}

impl Transcript {
    /// Creates an empty transcript.
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Appends the serialized pseudonym pair `(x, y)`.
    pub fn append_pseudonym(&mut self, x: &[u8], y: &[u8]) {
        self.buffer.extend_from_slice(x);
        self.buffer.extend_from_slice(y);
    }

    /// Appends the serialized prover commitment `Y`.
    pub fn append_commitment(&mut self, commitment: &[u8]) {
        self.buffer.extend_from_slice(commitment);
    }

    /// Returns the bytes hashed into the challenge.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Derives the challenge scalar `ε`.
    pub fn challenge_scalar(&self) -> Scalar {
        Bls12381::hash_to_scalar(&self.buffer, CHALLENGE_DST)
    }
}

/// Computes `ε = H(x ‖ y ‖ Y)` directly from serialized values.
pub fn challenge_from_bytes(x: &[u8], y: &[u8], commitment: &[u8]) -> Scalar {
    let mut transcript = Transcript::new();
    transcript.append_pseudonym(x, y);
    transcript.append_commitment(commitment);
    transcript.challenge_scalar()
}
