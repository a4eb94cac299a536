use core::fmt::Debug;

use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use zeroize::Zeroize;

use crate::Result;

/// Trait for bilinear pairing groups used by the pseudonym protocol.
///
/// This is the boundary to the pairing arithmetic: a group triple
/// `(G1, G2, GT)` of prime order `q` with a bilinear map `e: G1 × G2 → GT`.
/// Symmetric curves implement it with `G2 = G1`. All protocol code reaches
/// group operations through this trait only.
///
/// Group operations are written additively: `scalar_mul_g1(P, s)` is `s·P`
/// and `gt_add` is the group operation of `GT`.
pub trait PairingGroup: Clone + Debug + Send + Sync + 'static {
    /// Scalar type, an element of `Z_q`.
    ///
    /// Scalars must be zeroizable since private keys and nonces are scalars.
    type Scalar: Clone + Debug + Eq + PartialEq + Zeroize + Send + Sync;

    /// Element of the first source group.
    type G1: Clone + Debug + Eq + PartialEq + Send + Sync;

    /// Element of the second source group.
    type G2: Clone + Debug + Eq + PartialEq + Send + Sync;

    /// Element of the target group.
    type Gt: Clone + Debug + Eq + PartialEq + Send + Sync;

    /// Length of a serialized scalar.
    const SCALAR_BYTES: usize;

    /// Length of a serialized `G1` element.
    const G1_BYTES: usize;

    /// Length of a serialized `G2` element.
    const G2_BYTES: usize;

    /// Security level of the curve in bits.
    const SECURITY_BITS: u32;

    /// Returns the name of this group implementation.
    fn name() -> &'static str;

    /// Returns the prime group order `q`.
    fn order() -> BigUint;

    /// Samples a uniformly random scalar.
    fn random_scalar<R: CryptoRngCore>(rng: &mut R) -> Self::Scalar;

    /// Samples a uniformly random `G1` element.
    fn random_g1<R: CryptoRngCore>(rng: &mut R) -> Self::G1;

    /// Samples a uniformly random `G2` element.
    fn random_g2<R: CryptoRngCore>(rng: &mut R) -> Self::G2;

    /// Computes `s·P` in `G1`.
    fn scalar_mul_g1(e: &Self::G1, s: &Self::Scalar) -> Self::G1;

    /// Computes `s·P` in `G2`.
    fn scalar_mul_g2(e: &Self::G2, s: &Self::Scalar) -> Self::G2;

    /// Computes `a + b` in `G1`.
    fn g1_add(a: &Self::G1, b: &Self::G1) -> Self::G1;

    /// Computes `-a` in `G1`.
    fn g1_negate(a: &Self::G1) -> Self::G1;

    /// Computes the group operation of `GT`.
    fn gt_add(a: &Self::Gt, b: &Self::Gt) -> Self::Gt;

    /// Returns the identity of `G1`.
    fn g1_identity() -> Self::G1;

    /// Checks whether a `G1` element is the identity.
    fn is_g1_identity(e: &Self::G1) -> bool;

    /// Checks whether a `G2` element is the identity.
    fn is_g2_identity(e: &Self::G2) -> bool;

    /// Checks whether a `GT` element is the identity.
    fn is_gt_identity(e: &Self::Gt) -> bool;

    /// Adds two scalars: `a + b mod q`.
    fn scalar_add(a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar;

    /// Multiplies two scalars: `a · b mod q`.
    fn scalar_mul_scalar(a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar;

    /// Checks if a scalar is zero.
    fn scalar_is_zero(s: &Self::Scalar) -> bool;

    /// Serializes a scalar to its canonical fixed-length encoding.
    fn scalar_to_bytes(s: &Self::Scalar) -> Vec<u8>;

    /// Deserializes a scalar, rejecting non-canonical encodings.
    fn scalar_from_bytes(b: &[u8]) -> Result<Self::Scalar>;

    /// Serializes a `G1` element to its compressed fixed-length encoding.
    fn g1_to_bytes(e: &Self::G1) -> Vec<u8>;

    /// Deserializes a `G1` element and checks subgroup membership.
    fn g1_from_bytes(b: &[u8]) -> Result<Self::G1>;

    /// Serializes a `G2` element to its compressed fixed-length encoding.
    fn g2_to_bytes(e: &Self::G2) -> Vec<u8>;

    /// Deserializes a `G2` element and checks subgroup membership.
    fn g2_from_bytes(b: &[u8]) -> Result<Self::G2>;

    /// Evaluates the pairing `e(a, b)`.
    fn pairing(a: &Self::G1, b: &Self::G2) -> Self::Gt;

    /// Evaluates `Σ e(a_i, b_i)` with a single final exponentiation.
    fn multi_pairing(pairs: &[(&Self::G1, &Self::G2)]) -> Self::Gt;

    /// Derives a scalar from arbitrary bytes under a domain separation tag.
    fn hash_to_scalar(msg: &[u8], dst: &[u8]) -> Self::Scalar;
}
