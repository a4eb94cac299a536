//! Pseudonym certificates: issuance under the base-station keys and pairing-based
//! verification.

mod batch;
mod issuer;
mod verifier;

pub use batch::BatchVerifier;
pub use issuer::{CERTIFICATE_BYTES, Certificate, CertificateAuthority};
pub use verifier::{CertificateVerifier, verify_certificate};
