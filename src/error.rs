//! Error types for pseudonymous device authentication.

use core::fmt;

/// Protocol stage an error is attributed to.
///
/// Every [`Error`] maps onto exactly one stage so audit logs can record where a
/// device's registration or verification attempt stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// System parameter and base-station key generation.
    Setup,
    /// Device key generation and identity commitment.
    Registration,
    /// Schnorr pseudonym exchange.
    Pseudonym,
    /// Certificate issuance.
    Certification,
    /// Pairing-based certificate verification.
    Verification,
    /// Decoding of serialized values.
    Encoding,
    /// Loading or validating configuration.
    Configuration,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Setup => "setup",
            Stage::Registration => "registration",
            Stage::Pseudonym => "pseudonym",
            Stage::Certification => "certification",
            Stage::Verification => "verification",
            Stage::Encoding => "encoding",
            Stage::Configuration => "configuration",
        };
        f.write_str(name)
    }
}

/// Main error types for the library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The pairing group cannot be set up at the requested security level.
    #[error("Parameter generation failed: {0}")]
    ParameterGeneration(String),

    /// An identity or other hash input is empty or out of bounds.
    #[error("Invalid hash input: {0}")]
    HashInput(String),

    /// A sampled scalar or derived point collapsed to the identity.
    #[error("Degenerate proof input: {0}")]
    DegenerateProofInput(String),

    /// The Schnorr equation `Z·x = Y + ε·y` does not hold.
    #[error("Pseudonym proof verification failed: {0}")]
    ProofVerification(String),

    /// The pairing equations over a certificate do not hold.
    #[error("Certificate verification failed: {0}")]
    CertificateVerification(String),

    /// A scalar encoding is invalid or out of range.
    #[error("Invalid scalar: {0}")]
    InvalidScalar(String),

    /// A group element encoding is invalid or not in the prime-order subgroup.
    #[error("Invalid group element: {0}")]
    InvalidGroupElement(String),

    /// A serialized value has the wrong length or an unsupported version.
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// The registration commitment store rejected an operation.
    #[error("Registry error: {0}")]
    Registry(String),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns the protocol stage this error belongs to.
    pub fn stage(&self) -> Stage {
        match self {
            Error::ParameterGeneration(_) => Stage::Setup,
            Error::HashInput(_) | Error::Registry(_) => Stage::Registration,
            Error::DegenerateProofInput(_) | Error::ProofVerification(_) => Stage::Pseudonym,
            Error::CertificateVerification(_) => Stage::Verification,
            Error::InvalidScalar(_) | Error::InvalidGroupElement(_) | Error::InvalidEncoding(_) => {
                Stage::Encoding
            }
            Error::Config(_) => Stage::Configuration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_to_stages() {
        assert_eq!(
            Error::ParameterGeneration("x".into()).stage(),
            Stage::Setup
        );
        assert_eq!(Error::HashInput("x".into()).stage(), Stage::Registration);
        assert_eq!(
            Error::DegenerateProofInput("x".into()).stage(),
            Stage::Pseudonym
        );
        assert_eq!(
            Error::ProofVerification("x".into()).stage(),
            Stage::Pseudonym
        );
        assert_eq!(
            Error::CertificateVerification("x".into()).stage(),
            Stage::Verification
        );
        assert_eq!(Error::InvalidScalar("x".into()).stage(), Stage::Encoding);
        assert_eq!(Error::InvalidEncoding("x".into()).stage(), Stage::Encoding);
        assert_eq!(Error::Config("x".into()).stage(), Stage::Configuration);
    }

    #[test]
    fn display_includes_context() {
        let err = Error::ProofVerification("challenge mismatch".into());
        assert_eq!(
            err.to_string(),
            "Pseudonym proof verification failed: challenge mismatch"
        );
        assert_eq!(Stage::Certification.to_string(), "certification");
    }
}
