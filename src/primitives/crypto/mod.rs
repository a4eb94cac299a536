/// Group-order arithmetic helpers.
pub mod field;
/// Pairing group trait and operations.
pub mod group;
/// Cryptographically secure random number generation.
pub mod rng;

pub use group::PairingGroup;
pub use rng::{SecureRng, SEED_BYTES};
