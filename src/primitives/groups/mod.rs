/// BLS12-381 pairing groups (128-bit security, 255-bit order).
pub mod bls12381;

pub use bls12381::{Bls12381, G1Element, G2Element, GtElement, Scalar};
