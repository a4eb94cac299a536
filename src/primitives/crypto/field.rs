use num_bigint::BigUint;

use crate::{Error, Result};

/// Interprets little-endian scalar bytes as an unsigned integer.
pub fn biguint_from_le(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_le(bytes)
}

/// Parses a big-endian hexadecimal modulus.
///
/// Used for the published group orders of supported curves, which are
/// compile-time constants.
pub fn modulus_from_hex(hex_be: &str) -> Result<BigUint> {
    BigUint::parse_bytes(hex_be.as_bytes(), 16)
        .filter(|m| m.bits() > 1)
        .ok_or_else(|| Error::ParameterGeneration(format!("invalid modulus constant: {hex_be}")))
}

/// Computes `(a + b·c) mod modulus`.
///
/// Reference arithmetic for the Schnorr response `Z = δ + ε·d`, used to
/// cross-check the field implementation of the curve backend.
pub fn mul_add_mod(a: &BigUint, b: &BigUint, c: &BigUint, modulus: &BigUint) -> BigUint {
    (a + b * c) % modulus
}
