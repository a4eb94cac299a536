//! Pseudonym protocol: a Schnorr proof of knowledge made non-interactive with
//! Fiat-Shamir.
//!
//! The base station opens a [`PseudonymSession`] and sends `x = γ·g`. The device
//! answers through a [`DeviceProver`] with `y = d·x` and a proof `(Y, Z, ε)`.
//! The session checks `Z·x = Y + ε·y` and only then yields a
//! [`VerifiedPseudonym`], the sole input accepted for certificate issuance.

mod gadgets;
mod prover;
mod verifier;

pub use gadgets::{
    PROOF_TRANSCRIPT_BYTES, PSEUDONYM_BYTES, ProofTranscript, Pseudonym, VerifiedPseudonym,
    challenge,
};
pub(crate) use gadgets::{PROTOCOL_VERSION, g1_non_identity};
pub use prover::{DeviceProver, Nonce};
use rand_core::CryptoRngCore;
use tracing::{debug, info};
pub use verifier::{PseudonymSession, verify_proof, verify_response};

use crate::{DeviceIdentity, Result, SystemContext};

/// Runs one full pseudonym exchange in process.
///
/// Opens a session, lets the device prove over the session point and verifies
/// the result. Any failure is terminal for this attempt.
///
/// # Errors
///
/// Returns [`Error::DegenerateProofInput`](crate::Error::DegenerateProofInput) for
/// degenerate randomness and
/// [`Error::ProofVerification`](crate::Error::ProofVerification) if the proof fails.
///
/// # Examples
///
/// ```rust
/// use pseudonym_auth::{SecureRng, SystemContext, generate_pseudonym, register};
///
/// let mut rng = SecureRng::new();
/// let ctx = SystemContext::initialize(128, &mut rng).unwrap();
/// let (device, _) = register(&ctx, b"Device123", &mut rng).unwrap();
///
/// let verified = generate_pseudonym(&ctx, &device, &mut rng).unwrap();
/// assert_ne!(verified.pseudonym().x(), ctx.params().generator());
/// ```
pub fn generate_pseudonym<R: CryptoRngCore>(
    ctx: &SystemContext,
    device: &DeviceIdentity,
    rng: &mut R,
) -> Result<VerifiedPseudonym> {
    let session = PseudonymSession::open(ctx, rng)?;
    let (pseudonym, transcript) = DeviceProver::new(device).prove(session.offer(), rng)?;
    let verified = session.verify(pseudonym, transcript)?;

    info!("pseudonym proof verified");
    debug!(
        device = %String::from_utf8_lossy(device.id()),
        "pseudonym proof verified for device"
    );

    Ok(verified)
}
