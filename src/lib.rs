//! Privacy-preserving device authentication with pseudonyms and pairing-based
//! certificates.
//!
//! A base station issues unlinkable, session-specific credentials to registered
//! devices and later verifies them without learning any device's long-term key.
//!
//! # Protocol
//!
//! 1. **Setup**: the base station samples `g ∈ G1` and two key pairs
//!    `(b1, h1 = b1·g)`, `(b2, h2 = b2·g)` ([`SystemContext::initialize`]).
//! 2. **Registration**: a device samples `d`, publishes `dg = d·g` and the base
//!    station keeps `H(H(id) ‖ dg)` ([`register`], [`DeviceRegistry`]).
//! 3. **Pseudonym**: the base station sends `x = γ·g`; the device answers with
//!    `y = d·x` and a Fiat-Shamir Schnorr proof `(Y, Z, ε)` checked as
//!    `Z·x = Y + ε·y` ([`generate_pseudonym`]).
//! 4. **Certificate**: over a [`VerifiedPseudonym`] only, the base station issues
//!    `ζx = b1·x`, `ζy = b2·y` ([`CertificateAuthority::issue`]).
//! 5. **Verification**: `e(ζx, g̃) = e(x, h̃1)` and `e(ζy, g̃) = e(y, h̃2)`
//!    ([`CertificateVerifier::verify`]).
//!
//! Group arithmetic runs on BLS12-381. Because that pairing is asymmetric, every
//! base-station public key is also published in `G2` against a second generator
//! `g̃`.
//!
//! # Example
//!
//! ```rust
//! use pseudonym_auth::{
//!     CertificateAuthority, CertificateVerifier, SecureRng, SystemContext,
//!     generate_pseudonym, register,
//! };
//!
//! let mut rng = SecureRng::new();
//! let ctx = SystemContext::initialize(128, &mut rng).unwrap();
//!
//! let (device, _commitment) = register(&ctx, b"Device123", &mut rng).unwrap();
//! let verified = generate_pseudonym(&ctx, &device, &mut rng).unwrap();
//! let certificate = CertificateAuthority::new(&ctx).issue(&verified);
//!
//! let verifier = CertificateVerifier::from_context(&ctx);
//! assert!(verifier.verify(verified.pseudonym(), &certificate).is_ok());
//! ```
//!
//! # Security
//!
//! - `γ` and `δ` are sampled fresh for every session; reuse links sessions or leaks `d`
//! - Private keys are zeroized on drop and never serialized or logged
//! - Certificates can only be issued over a [`VerifiedPseudonym`]

/// Parameter authority: system parameters and base-station keys.
pub mod authority;
/// Pseudonym certificates.
pub mod certificate;
/// Protocol configuration.
pub mod config;
/// Error types.
pub mod error;
/// End-to-end device authentication.
pub mod flow;
/// Core cryptographic primitives.
pub mod primitives;
/// Schnorr pseudonym protocol.
pub mod protocol;
/// Device registration.
pub mod registry;

pub use authority::{
    BaseStationKeyPair, BaseStationPublicKeys, PublicKey, SecretKey, SystemContext,
    SystemParameters,
};
pub use certificate::{
    BatchVerifier, Certificate, CertificateAuthority, CertificateVerifier, verify_certificate,
};
pub use config::ProtocolConfig;
pub use error::{Error, Stage};
pub use flow::{Authentication, authenticate_device};
pub use primitives::{
    Bls12381, G1Element, G2Element, GtElement, PairingGroup, SEED_BYTES, Scalar, SecureRng,
    Transcript,
};
pub use protocol::{
    DeviceProver, ProofTranscript, Pseudonym, PseudonymSession, VerifiedPseudonym,
    generate_pseudonym,
};
pub use registry::{
    CommitmentStore, DeviceIdentity, DeviceRegistry, InMemoryCommitmentStore,
    RegistrationCommitment, register,
};

/// Result type alias for operations that can fail.
pub type Result<T> = core::result::Result<T, Error>;
