//! One complete device cycle: pseudonym, certificate, verification.

use rand_core::CryptoRngCore;
use tracing::{debug, info, warn};

use crate::{
    Certificate, CertificateAuthority, CertificateVerifier, DeviceIdentity, ProofTranscript,
    Pseudonym, Result, SystemContext, VerifiedPseudonym, generate_pseudonym,
};

/// Outcome of a successful device authentication.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Authentication {
    verified: VerifiedPseudonym,
    certificate: Certificate,
}

impl Authentication {
    /// Returns the certified pseudonym.
    pub fn pseudonym(&self) -> &Pseudonym {
        self.verified.pseudonym()
    }

    /// Returns the proof transcript kept for audit.
    pub fn transcript(&self) -> &ProofTranscript {
        self.verified.transcript()
    }

    /// Returns the issued certificate.
    pub fn certificate(&self) -> &Certificate {
        &self.certificate
    }
}

/// Authenticates a registered device against the base station in `ctx`.
///
/// Each stage consumes the previous stage's output and the first failure
/// short-circuits, so no certificate exists for an unverified pseudonym and no
/// device counts as authenticated after a pairing mismatch.
///
/// # Errors
///
/// Returns the error of the failing stage; [`Error::stage`](crate::Error::stage)
/// names it.
pub fn authenticate_device<R: CryptoRngCore>(
    ctx: &SystemContext,
    device: &DeviceIdentity,
    rng: &mut R,
) -> Result<Authentication> {
    let result = run_cycle(ctx, device, rng);

    // The device id stays below info so default logs cannot link sessions.
    debug!(
        device = %String::from_utf8_lossy(device.id()),
        ok = result.is_ok(),
        "authentication attempt"
    );
    match &result {
        Ok(_) => info!("device authenticated"),
        Err(e) => warn!(stage = %e.stage(), error = %e, "authentication failed"),
    }

    result
}

fn run_cycle<R: CryptoRngCore>(
    ctx: &SystemContext,
    device: &DeviceIdentity,
    rng: &mut R,
) -> Result<Authentication> {
    let verified = generate_pseudonym(ctx, device, rng)?;
    let certificate = CertificateAuthority::new(ctx).issue(&verified);
    CertificateVerifier::from_context(ctx).verify(verified.pseudonym(), &certificate)?;

    Ok(Authentication {
        verified,
        certificate,
    })
}
