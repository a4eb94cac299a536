use core::fmt;

use crate::primitives::hash::{self, DIGEST_BYTES};
use crate::{Bls12381, G1Element, PairingGroup};

/// Length of a registration commitment in bytes.
pub const COMMITMENT_BYTES: usize = DIGEST_BYTES;

/// Registration commitment `H(H(id) ‖ dg)`.
///
/// Binds an identity string to a device public key. Lookups recompute the digest
/// from the presented `(id, dg)` and compare; the identity alone proves nothing.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistrationCommitment([u8; COMMITMENT_BYTES]);

impl RegistrationCommitment {
    /// Computes the commitment for an identity and its public key.
    pub fn compute(id: &[u8], public_key: &G1Element) -> Self {
        let id_digest = hash::sha256(id);
        Self(hash::sha256_concat(
            &id_digest,
            &Bls12381::g1_to_bytes(public_key),
        ))
    }

    /// Wraps a stored digest.
    pub fn from_bytes(bytes: [u8; COMMITMENT_BYTES]) -> Self {
        Self(bytes)
    }

    /// Returns the digest bytes.
    pub fn as_bytes(&self) -> &[u8; COMMITMENT_BYTES] {
        &self.0
    }

    /// Recomputes the commitment for `(id, public_key)` and compares.
    pub fn matches(&self, id: &[u8], public_key: &G1Element) -> bool {
        *self == Self::compute(id, public_key)
    }
}

impl fmt::Display for RegistrationCommitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for RegistrationCommitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RegistrationCommitment({self})")
    }
}
