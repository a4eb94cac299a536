//! Parameter authority: system parameters and base-station key pairs.
//!
//! The base station runs this once at startup. The resulting [`SystemContext`] is
//! immutable and is passed by reference into every later operation, so several
//! independent base stations can coexist in one process.

use core::fmt;

use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use tracing::{debug, info};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::config::ProtocolConfig;
use crate::{Bls12381, Error, G1Element, G2Element, PairingGroup, Result, Scalar};

/// Default upper bound on device identity length in bytes.
pub const DEFAULT_MAX_IDENTITY_LEN: usize = 256;

/// Public system parameters: the group order `q` and the generators.
///
/// `generator` is the `g ∈ G1` every pseudonym is derived from. Because the
/// backend pairing is asymmetric, a second generator `g̃ ∈ G2` anchors the
/// verification equations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SystemParameters {
    order: BigUint,
    security_bits: u32,
    generator: G1Element,
    generator_g2: G2Element,
}

impl SystemParameters {
    /// Samples fresh generators for the requested security level.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParameterGeneration`] if the curve cannot provide
    /// `security_bits` of security or a sampled generator is the identity.
    pub fn generate<R: CryptoRngCore>(security_bits: u32, rng: &mut R) -> Result<Self> {
        if security_bits == 0 || security_bits > Bls12381::SECURITY_BITS {
            return Err(Error::ParameterGeneration(format!(
                "{} provides at most {}-bit security, requested {}",
                Bls12381::name(),
                Bls12381::SECURITY_BITS,
                security_bits
            )));
        }

        let order = Bls12381::order();
        let generator = Bls12381::random_g1(rng);
        let generator_g2 = Bls12381::random_g2(rng);
        if Bls12381::is_g1_identity(&generator) || Bls12381::is_g2_identity(&generator_g2) {
            return Err(Error::ParameterGeneration(
                "sampled generator is the identity".to_string(),
            ));
        }

        Ok(Self {
            order,
            security_bits,
            generator,
            generator_g2,
        })
    }

    /// Returns the group order `q`.
    pub fn order(&self) -> &BigUint {
        &self.order
    }

    /// Returns the security level the parameters were generated for.
    pub fn security_bits(&self) -> u32 {
        self.security_bits
    }

    /// Returns the generator `g ∈ G1`.
    pub fn generator(&self) -> &G1Element {
        &self.generator
    }

    /// Returns the generator `g̃ ∈ G2`.
    pub fn generator_g2(&self) -> &G2Element {
        &self.generator_g2
    }
}

/// Base-station private key `b ∈ Z_q`.
///
/// Zeroized on drop and redacted from debug output.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey(Scalar);

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(..)")
    }
}

/// Base-station public key, published in both source groups.
///
/// `h = b·g ∈ G1` is the key of the data model; `h̃ = b·g̃ ∈ G2` is its twin
/// used on the right-hand side of the pairing equations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicKey {
    h: G1Element,
    h_g2: G2Element,
}

impl PublicKey {
    /// Returns `h = b·g ∈ G1`.
    pub fn h(&self) -> &G1Element {
        &self.h
    }

    /// Returns `h̃ = b·g̃ ∈ G2`.
    pub fn h_g2(&self) -> &G2Element {
        &self.h_g2
    }

    /// Checks `e(h, g̃) = e(g, h̃)`, i.e. both halves share one private key.
    pub fn is_consistent(&self, params: &SystemParameters) -> bool {
        Bls12381::pairing(&self.h, params.generator_g2())
            == Bls12381::pairing(params.generator(), &self.h_g2)
    }
}

/// A base-station key pair `(b, h = g^b)`.
///
/// The public key is always derived from the private key; there is no way to
/// set one without the other.
#[derive(Clone, Debug)]
pub struct BaseStationKeyPair {
    secret: SecretKey,
    public: PublicKey,
}

impl BaseStationKeyPair {
    /// Samples a fresh key pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParameterGeneration`] if the sampled private key is zero.
    pub fn generate<R: CryptoRngCore>(params: &SystemParameters, rng: &mut R) -> Result<Self> {
        Self::from_secret(params, Bls12381::random_scalar(rng))
    }

    /// Derives the key pair for a given private key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParameterGeneration`] if `secret` is zero.
    pub fn from_secret(params: &SystemParameters, secret: Scalar) -> Result<Self> {
        if Bls12381::scalar_is_zero(&secret) {
            return Err(Error::ParameterGeneration(
                "base-station private key is zero".to_string(),
            ));
        }

        let public = PublicKey {
            h: Bls12381::scalar_mul_g1(params.generator(), &secret),
            h_g2: Bls12381::scalar_mul_g2(params.generator_g2(), &secret),
        };

        Ok(Self {
            secret: SecretKey(secret),
            public,
        })
    }

    /// Returns the public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    pub(crate) fn secret(&self) -> &Scalar {
        &self.secret.0
    }
}

/// The base station's two public keys, everything a verifier needs besides
/// the system parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BaseStationPublicKeys {
    /// Public key `h1` matching `b1`, which signs `x`.
    pub h1: PublicKey,
    /// Public key `h2` matching `b2`, which signs `y`.
    pub h2: PublicKey,
}

/// Immutable protocol context created once per base station.
///
/// Holds the system parameters, both base-station key pairs and the identity
/// length bound. It is `Send + Sync` and needs no locking after construction.
#[derive(Clone, Debug)]
pub struct SystemContext {
    params: SystemParameters,
    key1: BaseStationKeyPair,
    key2: BaseStationKeyPair,
    max_identity_len: usize,
}

impl SystemContext {
    /// Generates system parameters and two independent base-station key pairs.
    ///
    /// Parameter generation is one-shot: any failure is returned to the caller,
    /// never retried.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pseudonym_auth::{SecureRng, SystemContext};
    ///
    /// let mut rng = SecureRng::from_seed([42u8; 32]);
    /// let ctx = SystemContext::initialize(128, &mut rng).unwrap();
    /// assert_eq!(ctx.params().security_bits(), 128);
    /// ```
    pub fn initialize<R: CryptoRngCore>(security_bits: u32, rng: &mut R) -> Result<Self> {
        let params = SystemParameters::generate(security_bits, rng)?;
        let key1 = BaseStationKeyPair::generate(&params, rng)?;
        let key2 = BaseStationKeyPair::generate(&params, rng)?;

        info!(
            group = Bls12381::name(),
            security_bits, "system parameters initialized"
        );
        debug!(
            g = %hex::encode(Bls12381::g1_to_bytes(params.generator())),
            h1 = %hex::encode(Bls12381::g1_to_bytes(key1.public_key().h())),
            h2 = %hex::encode(Bls12381::g1_to_bytes(key2.public_key().h())),
            "base-station public keys"
        );

        Ok(Self {
            params,
            key1,
            key2,
            max_identity_len: DEFAULT_MAX_IDENTITY_LEN,
        })
    }

    /// Initializes from configuration, using the configured seed if present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an invalid configuration and
    /// [`Error::ParameterGeneration`] if setup fails.
    pub fn from_config(config: &ProtocolConfig) -> Result<Self> {
        let mut rng = config.rng()?;
        Self::from_config_with_rng(config, &mut rng)
    }

    /// Initializes from configuration, drawing setup randomness from `rng`.
    ///
    /// Callers that keep using `rng` for later sessions pass the generator
    /// returned by [`ProtocolConfig::rng`], so a seeded run stays one stream.
    ///
    /// # Errors
    ///
    /// Same as [`from_config`](Self::from_config).
    pub fn from_config_with_rng<R: CryptoRngCore>(
        config: &ProtocolConfig,
        rng: &mut R,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self::initialize(config.security_bits, rng)?
            .with_max_identity_len(config.max_identity_len))
    }

    /// Overrides the maximum accepted identity length.
    #[must_use]
    pub fn with_max_identity_len(mut self, max_identity_len: usize) -> Self {
        self.max_identity_len = max_identity_len;
        self
    }

    /// Returns the system parameters.
    pub fn params(&self) -> &SystemParameters {
        &self.params
    }

    /// Returns both base-station public keys.
    pub fn public_keys(&self) -> BaseStationPublicKeys {
        BaseStationPublicKeys {
            h1: *self.key1.public_key(),
            h2: *self.key2.public_key(),
        }
    }

    /// Returns the maximum accepted identity length in bytes.
    pub fn max_identity_len(&self) -> usize {
        self.max_identity_len
    }

    pub(crate) fn key1(&self) -> &BaseStationKeyPair {
        &self.key1
    }

    pub(crate) fn key2(&self) -> &BaseStationKeyPair {
        &self.key2
    }
}
