use tracing::{debug, info};

use crate::primitives::groups::bls12381::G1_COMPRESSED_BYTES;
use crate::protocol::{PROTOCOL_VERSION, g1_non_identity};
use crate::{Bls12381, Error, G1Element, PairingGroup, Result, SystemContext, VerifiedPseudonym};

/// Encoded length of a [`Certificate`].
pub const CERTIFICATE_BYTES: usize = 1 + 2 * G1_COMPRESSED_BYTES;

/// Base-station certificate `(ζx = b1·x, ζy = b2·y)` over one pseudonym.
///
/// A certificate is bound to exactly the pseudonym it was issued for and fails
/// verification against any other `(x, y)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Certificate {
    version: u8,
    zeta_x: G1Element,
    zeta_y: G1Element,
}

impl Certificate {
    /// Creates a certificate from its two points.
    pub fn new(zeta_x: G1Element, zeta_y: G1Element) -> Self {
        Self {
            version: PROTOCOL_VERSION,
            zeta_x,
            zeta_y,
        }
    }

    /// Returns the encoding version.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Returns `ζx = b1·x`.
    pub fn zeta_x(&self) -> &G1Element {
        &self.zeta_x
    }

    /// Returns `ζy = b2·y`.
    pub fn zeta_y(&self) -> &G1Element {
        &self.zeta_y
    }

    /// Serializes the certificate.
    ///
    /// Format: `[version (1 byte)][ζx (48 bytes)][ζy (48 bytes)]`
    pub fn to_bytes(&self) -> [u8; CERTIFICATE_BYTES] {
        let mut out = [0u8; CERTIFICATE_BYTES];
        out[0] = self.version;
        out[1..1 + G1_COMPRESSED_BYTES].copy_from_slice(&Bls12381::g1_to_bytes(&self.zeta_x));
        out[1 + G1_COMPRESSED_BYTES..].copy_from_slice(&Bls12381::g1_to_bytes(&self.zeta_y));
        out
    }

    /// Deserializes a certificate, rejecting identity points.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != CERTIFICATE_BYTES {
            return Err(Error::InvalidEncoding(format!(
                "Certificate must be {} bytes, got {}",
                CERTIFICATE_BYTES,
                bytes.len()
            )));
        }

        let version = bytes[0];
        if version != PROTOCOL_VERSION {
            return Err(Error::InvalidEncoding(format!(
                "Unsupported certificate version: {version}"
            )));
        }

        let (zeta_x, zeta_y) = bytes[1..].split_at(G1_COMPRESSED_BYTES);
        Ok(Self {
            version,
            zeta_x: g1_non_identity(zeta_x, "Certificate ζx")?,
            zeta_y: g1_non_identity(zeta_y, "Certificate ζy")?,
        })
    }
}

/// Issues certificates with the base station's private keys.
#[derive(Clone, Copy, Debug)]
pub struct CertificateAuthority<'a> {
    ctx: &'a SystemContext,
}

impl<'a> CertificateAuthority<'a> {
    /// Creates an authority signing with the keys held by `ctx`.
    pub fn new(ctx: &'a SystemContext) -> Self {
        Self { ctx }
    }

    /// Signs a verified pseudonym: `ζx = b1·x`, `ζy = b2·y`.
    ///
    /// Deterministic given the keys. Only a [`VerifiedPseudonym`] is accepted,
    /// so an unchecked pseudonym cannot be certified.
    pub fn issue(&self, verified: &VerifiedPseudonym) -> Certificate {
        let pseudonym = verified.pseudonym();
        let zeta_x = Bls12381::scalar_mul_g1(pseudonym.x(), self.ctx.key1().secret());
        let zeta_y = Bls12381::scalar_mul_g1(pseudonym.y(), self.ctx.key2().secret());
        let certificate = Certificate::new(zeta_x, zeta_y);

        debug!(
            zeta_x = %hex::encode(Bls12381::g1_to_bytes(&zeta_x)),
            zeta_y = %hex::encode(Bls12381::g1_to_bytes(&zeta_y)),
            "certificate computed"
        );
        info!("certificate issued");

        certificate
    }
}
