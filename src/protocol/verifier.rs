use rand_core::CryptoRngCore;
use tracing::{debug, warn};
use zeroize::Zeroize;

use super::{ProofTranscript, Pseudonym, VerifiedPseudonym, challenge};
use crate::{Bls12381, Error, G1Element, PairingGroup, Result, SystemContext};

/// Base-station side of one pseudonym exchange.
///
/// Opening a session samples `γ` and publishes `x = γ·g`. The session then accepts
/// exactly one proof for that `x`; a proof made for any other session point is
/// rejected.
#[derive(Debug)]
pub struct PseudonymSession {
    x: G1Element,
}

impl PseudonymSession {
    /// Samples a fresh `γ` and computes the session point `x = γ·g`.
    ///
    /// `γ` is dropped as soon as `x` is computed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateProofInput`] if `γ` is zero or `x` is the identity.
    pub fn open<R: CryptoRngCore>(ctx: &SystemContext, rng: &mut R) -> Result<Self> {
        let mut gamma = Bls12381::random_scalar(rng);
        if Bls12381::scalar_is_zero(&gamma) {
            return Err(Error::DegenerateProofInput(
                "session randomizer is zero".to_string(),
            ));
        }

        let x = Bls12381::scalar_mul_g1(ctx.params().generator(), &gamma);
        gamma.zeroize();

        if Bls12381::is_g1_identity(&x) {
            return Err(Error::DegenerateProofInput(
                "session point x is the identity".to_string(),
            ));
        }

        debug!(x = %hex::encode(Bls12381::g1_to_bytes(&x)), "pseudonym session opened");
        Ok(Self { x })
    }

    /// Returns the session point `x` sent to the device.
    pub fn offer(&self) -> &G1Element {
        &self.x
    }

    /// Verifies the device's answer and, on success, mints a [`VerifiedPseudonym`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProofVerification`] if the pseudonym is not for this
    /// session or the proof does not verify, and [`Error::DegenerateProofInput`]
    /// for identity points.
    pub fn verify(
        self,
        pseudonym: Pseudonym,
        transcript: ProofTranscript,
    ) -> Result<VerifiedPseudonym> {
        if pseudonym.x() != &self.x {
            warn!("pseudonym was not formed over this session's point");
            return Err(Error::ProofVerification(
                "pseudonym x does not match the session point".to_string(),
            ));
        }

        verify_proof(&pseudonym, &transcript)?;
        Ok(VerifiedPseudonym::new(pseudonym, transcript))
    }
}

/// Verifies a proof transcript against a pseudonym.
///
/// Recomputes `ε = H(x ‖ y ‖ Y)`, requires it to equal the carried challenge and
/// then checks the Schnorr equation via [`verify_response`].
///
/// # Errors
///
/// Returns [`Error::DegenerateProofInput`] for identity points and
/// [`Error::ProofVerification`] if either check fails.
pub fn verify_proof(pseudonym: &Pseudonym, transcript: &ProofTranscript) -> Result<()> {
    let epsilon = challenge(pseudonym, transcript.commitment());
    if &epsilon != transcript.challenge() {
        warn!("proof challenge does not match the transcript hash");
        return Err(Error::ProofVerification(
            "challenge was not derived from (x, y, Y)".to_string(),
        ));
    }

    verify_response(pseudonym, transcript)
}

/// Interactive protocol: checks `Z·x = Y + ε·y` for the carried challenge.
///
/// # Errors
///
/// Returns [`Error::DegenerateProofInput`] if `x` or `y` is the identity and
/// [`Error::ProofVerification`] if the equation does not hold.
pub fn verify_response(pseudonym: &Pseudonym, transcript: &ProofTranscript) -> Result<()> {
    if Bls12381::is_g1_identity(pseudonym.x()) {
        return Err(Error::DegenerateProofInput(
            "session point x is the identity".to_string(),
        ));
    }

    if Bls12381::is_g1_identity(pseudonym.y()) {
        return Err(Error::DegenerateProofInput(
            "pseudonym y is the identity".to_string(),
        ));
    }

    let lhs = Bls12381::scalar_mul_g1(pseudonym.x(), transcript.response());
    let ey = Bls12381::scalar_mul_g1(pseudonym.y(), transcript.challenge());
    let rhs = Bls12381::g1_add(transcript.commitment(), &ey);

    if lhs != rhs {
        warn!("pseudonym proof equation does not hold");
        return Err(Error::ProofVerification(
            "Z·x != Y + ε·y".to_string(),
        ));
    }

    Ok(())
}
