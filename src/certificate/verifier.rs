use tracing::warn;

use super::Certificate;
use crate::authority::{BaseStationPublicKeys, PublicKey, SystemParameters};
use crate::{
    Bls12381, Error, G1Element, G2Element, PairingGroup, Pseudonym, Result, SystemContext,
};

/// Checks certificates against the base station's public keys.
///
/// Holds only public values and can be shared freely between threads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CertificateVerifier {
    generator_g2: G2Element,
    h1: G2Element,
    h2: G2Element,
}

impl CertificateVerifier {
    /// Creates a verifier from published parameters and keys.
    pub fn new(params: &SystemParameters, keys: &BaseStationPublicKeys) -> Self {
        Self {
            generator_g2: *params.generator_g2(),
            h1: *keys.h1.h_g2(),
            h2: *keys.h2.h_g2(),
        }
    }

    /// Creates a verifier for the keys of `ctx`.
    pub fn from_context(ctx: &SystemContext) -> Self {
        Self::new(ctx.params(), &ctx.public_keys())
    }

    /// Verifies `e(ζx, g̃) = e(x, h̃1)` and `e(ζy, g̃) = e(y, h̃2)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CertificateVerification`] if any input point is the
    /// identity or either equation fails.
    pub fn verify(&self, pseudonym: &Pseudonym, certificate: &Certificate) -> Result<()> {
        let points = [
            pseudonym.x(),
            pseudonym.y(),
            certificate.zeta_x(),
            certificate.zeta_y(),
        ];
        if points.iter().any(|p| Bls12381::is_g1_identity(p)) {
            return Err(Error::CertificateVerification(
                "certificate or pseudonym contains the identity".to_string(),
            ));
        }

        if !self.check(
            pseudonym.x(),
            pseudonym.y(),
            certificate.zeta_x(),
            certificate.zeta_y(),
        ) {
            warn!("certificate pairing equations do not hold");
            return Err(Error::CertificateVerification(
                "pairing equations do not hold".to_string(),
            ));
        }

        Ok(())
    }

    pub(crate) fn check(
        &self,
        x: &G1Element,
        y: &G1Element,
        zeta_x: &G1Element,
        zeta_y: &G1Element,
    ) -> bool {
        let x_ok = Bls12381::pairing(zeta_x, &self.generator_g2) == Bls12381::pairing(x, &self.h1);
        let y_ok = Bls12381::pairing(zeta_y, &self.generator_g2) == Bls12381::pairing(y, &self.h2);
        x_ok && y_ok
    }

    pub(crate) fn generator_g2(&self) -> &G2Element {
        &self.generator_g2
    }

    pub(crate) fn h1(&self) -> &G2Element {
        &self.h1
    }

    pub(crate) fn h2(&self) -> &G2Element {
        &self.h2
    }
}

/// Boolean form of the certificate check over raw values.
///
/// `g2` is the `G2` generator `g̃`; the `G2` halves of `h1` and `h2` are used.
pub fn verify_certificate(
    x: &G1Element,
    y: &G1Element,
    zeta_x: &G1Element,
    zeta_y: &G1Element,
    h1: &PublicKey,
    h2: &PublicKey,
    g2: &G2Element,
) -> bool {
    let verifier = CertificateVerifier {
        generator_g2: *g2,
        h1: *h1.h_g2(),
        h2: *h2.h_g2(),
    };
    verifier
        .verify(&Pseudonym::new(*x, *y), &Certificate::new(*zeta_x, *zeta_y))
        .is_ok()
}
