use rand_core::CryptoRngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{ProofTranscript, Pseudonym, challenge};
use crate::{Bls12381, DeviceIdentity, Error, G1Element, PairingGroup, Result, Scalar};

/// Device side of the pseudonym exchange.
///
/// Given the base station's fresh point `x`, the prover answers with the
/// pseudonym `y = d·x` and a Schnorr proof that the same `d` is behind `dg = g^d`.
///
/// # Security
///
/// - The nonce `δ` is sampled fresh for every proof and never reused
/// - The device key `d` never leaves [`DeviceIdentity`]
pub struct DeviceProver<'a> {
    device: &'a DeviceIdentity,
}

impl<'a> DeviceProver<'a> {
    /// Creates a prover for a registered device.
    pub fn new(device: &'a DeviceIdentity) -> Self {
        Self { device }
    }

    /// Returns the device being proven for.
    pub fn device(&self) -> &DeviceIdentity {
        self.device
    }

    /// Computes the pseudonym `(x, y = d·x)` for the session point `x`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateProofInput`] if `x` is the identity.
    pub fn pseudonym(&self, x: &G1Element) -> Result<Pseudonym> {
        if Bls12381::is_g1_identity(x) {
            return Err(Error::DegenerateProofInput(
                "session point x is the identity".to_string(),
            ));
        }

        let y = Bls12381::scalar_mul_g1(x, self.device.secret());
        Ok(Pseudonym::new(*x, y))
    }

    /// Generates the non-interactive proof for the session point `x`.
    ///
    /// Runs [`commit`](Self::commit), derives `ε = H(x ‖ y ‖ Y)` and
    /// [`respond`](Self::respond)s.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateProofInput`] if `x` is the identity or the
    /// sampled nonce is zero.
    pub fn prove<R: CryptoRngCore>(
        &self,
        x: &G1Element,
        rng: &mut R,
    ) -> Result<(Pseudonym, ProofTranscript)> {
        let pseudonym = self.pseudonym(x)?;
        let (commitment, nonce) = self.commit(pseudonym.x(), rng)?;

        let epsilon = challenge(&pseudonym, &commitment);
        let response = self.respond(&nonce, &epsilon);

        Ok((pseudonym, ProofTranscript::new(commitment, response, epsilon)))
    }

    /// Interactive protocol: generates the commitment `Y = δ·x` (first message).
    ///
    /// Returns the commitment and the secret nonce `δ` (must be kept secret).
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateProofInput`] if the sampled nonce is zero.
    pub fn commit<R: CryptoRngCore>(
        &self,
        x: &G1Element,
        rng: &mut R,
    ) -> Result<(G1Element, Nonce)> {
        let delta = Bls12381::random_scalar(rng);
        if Bls12381::scalar_is_zero(&delta) {
            return Err(Error::DegenerateProofInput("proof nonce is zero".to_string()));
        }

        let commitment = Bls12381::scalar_mul_g1(x, &delta);
        Ok((commitment, Nonce::new(delta)))
    }

    /// Interactive protocol: computes the response `Z = δ + ε·d` (third message).
    pub fn respond(&self, nonce: &Nonce, challenge: &Scalar) -> Scalar {
        let ed = Bls12381::scalar_mul_scalar(challenge, self.device.secret());
        Bls12381::scalar_add(nonce.delta(), &ed)
    }
}

/// Secret nonce `δ` used in the commitment phase.
///
/// Automatically zeroized when dropped.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Nonce {
    delta: Scalar,
}

impl Nonce {
    /// Creates a new nonce from a scalar.
    pub fn new(delta: Scalar) -> Self {
        Self { delta }
    }

    /// Returns a reference to the nonce scalar.
    pub fn delta(&self) -> &Scalar {
        &self.delta
    }
}

impl core::fmt::Debug for Nonce {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Nonce(..)")
    }
}
