use core::sync::atomic::{compiler_fence, Ordering};

use bls12_381::{
    multi_miller_loop, G1Affine, G1Projective, G2Affine, G2Prepared, G2Projective, Gt,
    Scalar as BlsScalar,
};
use ff::Field;
use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::primitives::crypto::field;
use crate::primitives::hash;
use crate::{Error, PairingGroup, Result};

/// Number of bytes in a canonical scalar encoding.
pub const SCALAR_BYTES: usize = 32;

/// Number of bytes in a compressed `G1` point.
pub const G1_COMPRESSED_BYTES: usize = 48;

/// Number of bytes in a compressed `G2` point.
pub const G2_COMPRESSED_BYTES: usize = 96;

/// The prime order `r` of the BLS12-381 groups, big-endian hex.
const ORDER_HEX: &str = "73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001";

/// BLS12-381 pairing groups.
///
/// An asymmetric (Type-3) pairing `e: G1 × G2 → GT` with 128-bit security and a
/// 255-bit prime order.
#[derive(Clone, Debug)]
pub struct Bls12381;

/// Scalar in `Z_q` for BLS12-381.
///
/// Scalars are zeroized when dropped.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Scalar(BlsScalar);

/// Element of `G1`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct G1Element(G1Projective);

/// Element of `G2`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct G2Element(G2Projective);

/// Element of the target group `GT`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GtElement(Gt);

impl Scalar {
    /// Wraps a `bls12_381` scalar.
    pub fn new(value: BlsScalar) -> Self {
        Self(value)
    }

    /// Returns a reference to the inner `bls12_381` scalar.
    pub fn inner(&self) -> &BlsScalar {
        &self.0
    }
}

impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.0 = BlsScalar::ZERO;
        compiler_fence(Ordering::SeqCst);
    }
}

impl Drop for Scalar {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for Scalar {}

impl G1Element {
    /// Wraps a `G1` point.
    pub fn new(value: G1Projective) -> Self {
        Self(value)
    }

    /// Returns a reference to the inner point.
    pub fn inner(&self) -> &G1Projective {
        &self.0
    }
}

impl G2Element {
    /// Wraps a `G2` point.
    pub fn new(value: G2Projective) -> Self {
        Self(value)
    }

    /// Returns a reference to the inner point.
    pub fn inner(&self) -> &G2Projective {
        &self.0
    }
}

impl GtElement {
    /// Returns a reference to the inner target group element.
    pub fn inner(&self) -> &Gt {
        &self.0
    }
}

fn fixed<const N: usize>(bytes: &[u8]) -> Option<[u8; N]> {
    bytes.try_into().ok()
}

impl PairingGroup for Bls12381 {
    type Scalar = Scalar;
    type G1 = G1Element;
    type G2 = G2Element;
    type Gt = GtElement;

    const SCALAR_BYTES: usize = SCALAR_BYTES;
    const G1_BYTES: usize = G1_COMPRESSED_BYTES;
    const G2_BYTES: usize = G2_COMPRESSED_BYTES;
    const SECURITY_BITS: u32 = 128;

    fn name() -> &'static str {
        "BLS12-381"
    }

    fn order() -> BigUint {
        field::modulus_from_hex(ORDER_HEX)
            .unwrap_or_else(|_| unreachable!("BLS12-381 order is a valid constant"))
    }

    fn random_scalar<R: CryptoRngCore>(rng: &mut R) -> Self::Scalar {
        Scalar(BlsScalar::random(&mut *rng))
    }

    fn random_g1<R: CryptoRngCore>(rng: &mut R) -> Self::G1 {
        G1Element(<G1Projective as group::Group>::random(&mut *rng))
    }

    fn random_g2<R: CryptoRngCore>(rng: &mut R) -> Self::G2 {
        G2Element(<G2Projective as group::Group>::random(&mut *rng))
    }

    fn scalar_mul_g1(e: &Self::G1, s: &Self::Scalar) -> Self::G1 {
        G1Element(e.0 * s.0)
    }

    fn scalar_mul_g2(e: &Self::G2, s: &Self::Scalar) -> Self::G2 {
        G2Element(e.0 * s.0)
    }

    fn g1_add(a: &Self::G1, b: &Self::G1) -> Self::G1 {
        G1Element(a.0 + b.0)
    }

    fn g1_negate(a: &Self::G1) -> Self::G1 {
        G1Element(-a.0)
    }

    fn gt_add(a: &Self::Gt, b: &Self::Gt) -> Self::Gt {
        GtElement(a.0 + b.0)
    }

    fn g1_identity() -> Self::G1 {
        G1Element(G1Projective::identity())
    }

    fn is_g1_identity(e: &Self::G1) -> bool {
        bool::from(e.0.is_identity())
    }

    fn is_g2_identity(e: &Self::G2) -> bool {
        bool::from(e.0.is_identity())
    }

    fn is_gt_identity(e: &Self::Gt) -> bool {
        e.0 == Gt::identity()
    }

    fn scalar_add(a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar {
        Scalar(a.0 + b.0)
    }

    fn scalar_mul_scalar(a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar {
        Scalar(a.0 * b.0)
    }

    fn scalar_is_zero(s: &Self::Scalar) -> bool {
        bool::from(s.0.is_zero())
    }

    fn scalar_to_bytes(s: &Self::Scalar) -> Vec<u8> {
        s.0.to_bytes().to_vec()
    }

    fn scalar_from_bytes(bytes: &[u8]) -> Result<Self::Scalar> {
        let arr = fixed::<SCALAR_BYTES>(bytes).ok_or_else(|| {
            Error::InvalidScalar(format!(
                "Expected {} bytes, got {}",
                SCALAR_BYTES,
                bytes.len()
            ))
        })?;

        Option::<BlsScalar>::from(BlsScalar::from_bytes(&arr))
            .map(Scalar)
            .ok_or_else(|| Error::InvalidScalar("Bytes do not represent a canonical scalar".into()))
    }

    fn g1_to_bytes(e: &Self::G1) -> Vec<u8> {
        G1Affine::from(&e.0).to_compressed().to_vec()
    }

    fn g1_from_bytes(bytes: &[u8]) -> Result<Self::G1> {
        let arr = fixed::<G1_COMPRESSED_BYTES>(bytes).ok_or_else(|| {
            Error::InvalidGroupElement(format!(
                "Expected {} bytes for G1, got {}",
                G1_COMPRESSED_BYTES,
                bytes.len()
            ))
        })?;

        Option::<G1Affine>::from(G1Affine::from_compressed(&arr))
            .map(|p| G1Element(G1Projective::from(p)))
            .ok_or_else(|| {
                Error::InvalidGroupElement("Bytes do not represent a valid G1 point".into())
            })
    }

    fn g2_to_bytes(e: &Self::G2) -> Vec<u8> {
        G2Affine::from(&e.0).to_compressed().to_vec()
    }

    fn g2_from_bytes(bytes: &[u8]) -> Result<Self::G2> {
        let arr = fixed::<G2_COMPRESSED_BYTES>(bytes).ok_or_else(|| {
            Error::InvalidGroupElement(format!(
                "Expected {} bytes for G2, got {}",
                G2_COMPRESSED_BYTES,
                bytes.len()
            ))
        })?;

        Option::<G2Affine>::from(G2Affine::from_compressed(&arr))
            .map(|p| G2Element(G2Projective::from(p)))
            .ok_or_else(|| {
                Error::InvalidGroupElement("Bytes do not represent a valid G2 point".into())
            })
    }

    fn pairing(a: &Self::G1, b: &Self::G2) -> Self::Gt {
        GtElement(bls12_381::pairing(
            &G1Affine::from(&a.0),
            &G2Affine::from(&b.0),
        ))
    }

    fn multi_pairing(pairs: &[(&Self::G1, &Self::G2)]) -> Self::Gt {
        let prepared = pairs
            .iter()
            .map(|(a, b)| (G1Affine::from(&a.0), G2Prepared::from(G2Affine::from(&b.0))))
            .collect::<Vec<_>>();
        let terms = prepared.iter().map(|(a, b)| (a, b)).collect::<Vec<_>>();

        GtElement(multi_miller_loop(&terms).final_exponentiation())
    }

    fn hash_to_scalar(msg: &[u8], dst: &[u8]) -> Self::Scalar {
        let wide = hash::expand_wide(msg, dst);
        Scalar(BlsScalar::from_bytes_wide(&wide))
    }
}
