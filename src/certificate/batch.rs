//! Batch verification of certificates.
//!
//! All certificates of one base station share `g̃`, `h̃1` and `h̃2`, so the `2n`
//! pairing equations collapse into a single three-term multi-pairing:
//!
//! ```text
//! e(Σ αᵢ·ζxᵢ + Σ βᵢ·ζyᵢ, g̃) · e(-Σ αᵢ·xᵢ, h̃1) · e(-Σ βᵢ·yᵢ, h̃2) = 1
//! ```
//!
//! # Security
//!
//! The coefficients `αᵢ, βᵢ` are fresh random scalars, so a set of invalid
//! certificates passes the combined check only with negligible probability. When
//! the combined check fails every entry is verified individually to pinpoint the
//! bad ones.

use rand_core::CryptoRngCore;
use tracing::{debug, warn};

use super::{Certificate, CertificateVerifier};
use crate::{Bls12381, Error, PairingGroup, Pseudonym, Result};

/// Maximum number of certificates that can be verified in a single batch.
const MAX_BATCH_SIZE: usize = 1000;

/// Batch verifier for certificates issued by one base station.
///
/// # Capacity Limits
///
/// The batch verifier has a maximum capacity of 1000 certificates. Attempting to
/// add more returns an error; split larger workloads into several batches.
pub struct BatchVerifier {
    verifier: CertificateVerifier,
    entries: Vec<(Pseudonym, Certificate)>,
}

impl BatchVerifier {
    /// Creates an empty batch for the given verifier.
    #[must_use]
    pub fn new(verifier: CertificateVerifier) -> Self {
        Self {
            verifier,
            entries: Vec::new(),
        }
    }

    /// Creates an empty batch with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(verifier: CertificateVerifier, capacity: usize) -> Self {
        Self {
            verifier,
            entries: Vec::with_capacity(capacity.min(MAX_BATCH_SIZE)),
        }
    }

    /// Returns the number of certificates in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the batch contains no certificates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the remaining capacity before reaching the batch size limit.
    #[must_use]
    pub fn remaining_capacity(&self) -> usize {
        MAX_BATCH_SIZE.saturating_sub(self.entries.len())
    }

    /// Adds a certificate and the pseudonym it claims to certify.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CertificateVerification`] if the batch is full or any
    /// point is the identity.
    pub fn add(&mut self, pseudonym: Pseudonym, certificate: Certificate) -> Result<()> {
        if self.entries.len() >= MAX_BATCH_SIZE {
            return Err(Error::CertificateVerification(format!(
                "Batch size limit exceeded (max {MAX_BATCH_SIZE})"
            )));
        }

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

        self.entries.push((pseudonym, certificate));
        Ok(())
    }

    /// Verifies every certificate in the batch.
    ///
    /// Returns one result per certificate, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the batch is empty.
    pub fn verify<R: CryptoRngCore>(&self, rng: &mut R) -> Result<Vec<Result<()>>> {
        if self.entries.is_empty() {
            return Err(Error::CertificateVerification(
                "Cannot verify empty batch".to_string(),
            ));
        }

        if self.entries.len() == 1 {
            return Ok(self.verify_individually());
        }

        if self.verify_combined(rng) {
            debug!(certificates = self.entries.len(), "batch verified");
            return Ok(self.entries.iter().map(|_| Ok(())).collect());
        }

        warn!(
            certificates = self.entries.len(),
            "batch check failed, verifying individually"
        );
        Ok(self.verify_individually())
    }

    fn verify_individually(&self) -> Vec<Result<()>> {
        self.entries
            .iter()
            .map(|(pseudonym, certificate)| self.verifier.verify(pseudonym, certificate))
            .collect()
    }

    fn verify_combined<R: CryptoRngCore>(&self, rng: &mut R) -> bool {
        let mut zeta_sum = Bls12381::g1_identity();
        let mut x_sum = Bls12381::g1_identity();
        let mut y_sum = Bls12381::g1_identity();

        for (pseudonym, certificate) in &self.entries {
            let alpha = Bls12381::random_scalar(rng);
            let beta = Bls12381::random_scalar(rng);

            zeta_sum = Bls12381::g1_add(
                &zeta_sum,
                &Bls12381::scalar_mul_g1(certificate.zeta_x(), &alpha),
            );
            zeta_sum = Bls12381::g1_add(
                &zeta_sum,
                &Bls12381::scalar_mul_g1(certificate.zeta_y(), &beta),
            );
            x_sum = Bls12381::g1_add(&x_sum, &Bls12381::scalar_mul_g1(pseudonym.x(), &alpha));
            y_sum = Bls12381::g1_add(&y_sum, &Bls12381::scalar_mul_g1(pseudonym.y(), &beta));
        }

        let neg_x = Bls12381::g1_negate(&x_sum);
        let neg_y = Bls12381::g1_negate(&y_sum);

        let result = Bls12381::multi_pairing(&[
            (&zeta_sum, self.verifier.generator_g2()),
            (&neg_x, self.verifier.h1()),
            (&neg_y, self.verifier.h2()),
        ]);

        Bls12381::is_gt_identity(&result)
    }
}
