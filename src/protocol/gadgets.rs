//! Data structures exchanged during pseudonym generation.
//!
//! All encodings are fixed-length. Points are 48-byte compressed `G1` elements and
//! scalars are 32-byte canonical little-endian values.

use crate::primitives::transcript;
use crate::primitives::groups::bls12381::{G1_COMPRESSED_BYTES, SCALAR_BYTES};
use crate::{Bls12381, Error, G1Element, PairingGroup, Result, Scalar};

/// Protocol version for serialization compatibility.
pub(crate) const PROTOCOL_VERSION: u8 = 1;

/// Encoded length of a [`Pseudonym`].
pub const PSEUDONYM_BYTES: usize = 2 * G1_COMPRESSED_BYTES;

/// Encoded length of a [`ProofTranscript`].
pub const PROOF_TRANSCRIPT_BYTES: usize = 1 + G1_COMPRESSED_BYTES + 2 * SCALAR_BYTES;

/// Decodes a `G1` element and rejects the identity.
pub(crate) fn g1_non_identity(bytes: &[u8], what: &str) -> Result<G1Element> {
    let element = Bls12381::g1_from_bytes(bytes)?;
    if Bls12381::is_g1_identity(&element) {
        return Err(Error::InvalidGroupElement(format!(
            "{what} is the identity element"
        )));
    }
    Ok(element)
}

/// Session pseudonym `(x, y)` with `x = γ·g` and `y = d·x`.
///
/// `x` is rerandomized by the base station every session, so two pseudonyms of
/// the same device cannot be linked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pseudonym {
    x: G1Element,
    y: G1Element,
}

impl Pseudonym {
    /// Creates a pseudonym from its two points.
    pub fn new(x: G1Element, y: G1Element) -> Self {
        Self { x, y }
    }

    /// Returns the base-station randomized point `x`.
    pub fn x(&self) -> &G1Element {
        &self.x
    }

    /// Returns the device point `y = d·x`.
    pub fn y(&self) -> &G1Element {
        &self.y
    }

    /// Serializes the pseudonym as `x ‖ y`.
    ///
    /// These are exactly the bytes hashed into the Fiat-Shamir challenge.
    pub fn to_bytes(&self) -> [u8; PSEUDONYM_BYTES] {
        let mut out = [0u8; PSEUDONYM_BYTES];
        out[..G1_COMPRESSED_BYTES].copy_from_slice(&Bls12381::g1_to_bytes(&self.x));
        out[G1_COMPRESSED_BYTES..].copy_from_slice(&Bls12381::g1_to_bytes(&self.y));
        out
    }

    /// Deserializes a pseudonym, rejecting identity points.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PSEUDONYM_BYTES {
            return Err(Error::InvalidEncoding(format!(
                "Pseudonym must be {} bytes, got {}",
                PSEUDONYM_BYTES,
                bytes.len()
            )));
        }

        let (x, y) = bytes.split_at(G1_COMPRESSED_BYTES);
        Ok(Self {
            x: g1_non_identity(x, "Pseudonym x")?,
            y: g1_non_identity(y, "Pseudonym y")?,
        })
    }
}

/// Non-interactive proof `(Y, Z, ε)` that `y = d·x` for the device key `d`.
///
/// The challenge `ε` is carried for audit only; verification always recomputes it
/// from `(x, y, Y)` and rejects a transcript whose stored value differs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProofTranscript {
    version: u8,
    commitment: G1Element,
    response: Scalar,
    challenge: Scalar,
}

impl ProofTranscript {
    /// Creates a transcript from the prover commitment `Y`, response `Z` and challenge `ε`.
    pub fn new(commitment: G1Element, response: Scalar, challenge: Scalar) -> Self {
        Self {
            version: PROTOCOL_VERSION,
            commitment,
            response,
            challenge,
        }
    }

    /// Returns the encoding version.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Returns the prover commitment `Y = δ·x`.
    pub fn commitment(&self) -> &G1Element {
        &self.commitment
    }

    /// Returns the response `Z = δ + ε·d`.
    pub fn response(&self) -> &Scalar {
        &self.response
    }

    /// Returns the challenge `ε`.
    pub fn challenge(&self) -> &Scalar {
        &self.challenge
    }

    /// Serializes the transcript.
    ///
    /// Format: `[version (1 byte)][Y (48 bytes)][Z (32 bytes)][ε (32 bytes)]`
    pub fn to_bytes(&self) -> [u8; PROOF_TRANSCRIPT_BYTES] {
        let mut out = [0u8; PROOF_TRANSCRIPT_BYTES];
        let (version, rest) = out.split_at_mut(1);
        let (y, rest) = rest.split_at_mut(G1_COMPRESSED_BYTES);
        let (z, e) = rest.split_at_mut(SCALAR_BYTES);

        version[0] = self.version;
        y.copy_from_slice(&Bls12381::g1_to_bytes(&self.commitment));
        z.copy_from_slice(&Bls12381::scalar_to_bytes(&self.response));
        e.copy_from_slice(&Bls12381::scalar_to_bytes(&self.challenge));
        out
    }

    /// Deserializes a transcript.
    ///
    /// Rejects wrong lengths, unknown versions, an identity commitment and
    /// non-canonical scalars.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PROOF_TRANSCRIPT_BYTES {
            return Err(Error::InvalidEncoding(format!(
                "Proof transcript must be {} bytes, got {}",
                PROOF_TRANSCRIPT_BYTES,
                bytes.len()
            )));
        }

        let version = bytes[0];
        if version != PROTOCOL_VERSION {
            return Err(Error::InvalidEncoding(format!(
                "Unsupported proof transcript version: {version}"
            )));
        }

        let (y, rest) = bytes[1..].split_at(G1_COMPRESSED_BYTES);
        let (z, e) = rest.split_at(SCALAR_BYTES);

        Ok(Self {
            version,
            commitment: g1_non_identity(y, "Proof commitment")?,
            response: Bls12381::scalar_from_bytes(z)?,
            challenge: Bls12381::scalar_from_bytes(e)?,
        })
    }
}

/// A pseudonym whose proof has been checked by the base station.
///
/// Only the protocol verifier constructs this type, so holding one means the
/// Schnorr equation held. Certificates are issued over it and nothing else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifiedPseudonym {
    pseudonym: Pseudonym,
    transcript: ProofTranscript,
}

impl VerifiedPseudonym {
    pub(crate) fn new(pseudonym: Pseudonym, transcript: ProofTranscript) -> Self {
        Self {
            pseudonym,
            transcript,
        }
    }

    /// Returns the verified pseudonym.
    pub fn pseudonym(&self) -> &Pseudonym {
        &self.pseudonym
    }

    /// Returns the proof transcript kept for audit.
    pub fn transcript(&self) -> &ProofTranscript {
        &self.transcript
    }

    /// Splits into pseudonym and transcript.
    pub fn into_parts(self) -> (Pseudonym, ProofTranscript) {
        (self.pseudonym, self.transcript)
    }
}

/// Computes `ε = H(x ‖ y ‖ Y)` for a pseudonym and prover commitment.
pub fn challenge(pseudonym: &Pseudonym, commitment: &G1Element) -> Scalar {
    transcript::challenge_from_bytes(
        &Bls12381::g1_to_bytes(pseudonym.x()),
        &Bls12381::g1_to_bytes(pseudonym.y()),
        &Bls12381::g1_to_bytes(commitment),
    )
}
