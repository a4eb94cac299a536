//! Core cryptographic primitives for the pseudonym protocol.
//!
//! - **crypto**: the pairing group trait, group-order helpers and secure randomness
//! - **groups**: the BLS12-381 backend
//! - **hash**: SHA-256 helpers for commitments and hash-to-scalar
//! - **transcript**: Fiat-Shamir challenge derivation

/// Cryptographic traits and randomness.
pub mod crypto;
/// Pairing group implementations.
pub mod groups;
/// SHA-256 based hashing.
pub mod hash;
/// Transcript for the Fiat-Shamir transform.
pub mod transcript;

pub use crypto::{PairingGroup, SecureRng, SEED_BYTES};
pub use groups::{Bls12381, G1Element, G2Element, GtElement, Scalar};
pub use transcript::Transcript;
