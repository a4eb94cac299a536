//! Device registration.
//!
//! A device samples its key pair `(d, dg = g^d)` and the base station records the
//! commitment `H(H(id) ‖ dg)`. The private key stays inside [`DeviceIdentity`] and
//! is never serialized.

mod commitment;
mod store;

use core::fmt;

pub use commitment::{COMMITMENT_BYTES, RegistrationCommitment};
use rand_core::CryptoRngCore;
pub use store::{CommitmentStore, InMemoryCommitmentStore, MAX_STORED_COMMITMENTS};
use tracing::{debug, info, warn};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{Bls12381, Error, G1Element, PairingGroup, Result, Scalar, SystemContext};

/// Device private key `d`. Zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DeviceSecret(Scalar);

impl fmt::Debug for DeviceSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DeviceSecret(..)")
    }
}

/// A registered device: identity, private key `d` and public key `dg = g^d`.
#[derive(Debug)]
pub struct DeviceIdentity {
    id: Vec<u8>,
    secret: DeviceSecret,
    public_key: G1Element,
}

impl DeviceIdentity {
    /// Builds a device identity from a known private key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HashInput`] for an empty or oversized identity and
    /// [`Error::DegenerateProofInput`] if `secret` is zero.
    pub fn from_secret(ctx: &SystemContext, id: &[u8], secret: Scalar) -> Result<Self> {
        validate_identity(ctx, id)?;

        if Bls12381::scalar_is_zero(&secret) {
            return Err(Error::DegenerateProofInput(
                "device private key is zero".to_string(),
            ));
        }

        let public_key = Bls12381::scalar_mul_g1(ctx.params().generator(), &secret);

        Ok(Self {
            id: id.to_vec(),
            secret: DeviceSecret(secret),
            public_key,
        })
    }

    /// Returns the identity bytes.
    pub fn id(&self) -> &[u8] {
        &self.id
    }

    /// Returns the public key `dg`.
    pub fn public_key(&self) -> &G1Element {
        &self.public_key
    }

    /// Recomputes this device's registration commitment.
    pub fn commitment(&self) -> RegistrationCommitment {
        RegistrationCommitment::compute(&self.id, &self.public_key)
    }

    pub(crate) fn secret(&self) -> &Scalar {
        &self.secret.0
    }
}

/// Checks an identity against the configured bounds.
///
/// # Errors
///
/// Returns [`Error::HashInput`] if `id` is empty or longer than
/// [`SystemContext::max_identity_len`].
pub fn validate_identity(ctx: &SystemContext, id: &[u8]) -> Result<()> {
    if id.is_empty() {
        return Err(Error::HashInput("device identity is empty".to_string()));
    }

    if id.len() > ctx.max_identity_len() {
        return Err(Error::HashInput(format!(
            "device identity is {} bytes, maximum is {}",
            id.len(),
            ctx.max_identity_len()
        )));
    }

    Ok(())
}

/// Generates a key pair for `id` and computes its registration commitment.
///
/// The commitment is returned, not stored; see [`DeviceRegistry`] for a stored table.
///
/// # Errors
///
/// Returns [`Error::HashInput`] for an invalid identity and
/// [`Error::DegenerateProofInput`] if the sampled key is zero.
///
/// # Examples
///
/// ```rust
/// use pseudonym_auth::{SecureRng, SystemContext, register};
///
/// let mut rng = SecureRng::new();
/// let ctx = SystemContext::initialize(128, &mut rng).unwrap();
/// let (device, commitment) = register(&ctx, b"Device123", &mut rng).unwrap();
/// assert!(commitment.matches(device.id(), device.public_key()));
/// ```
pub fn register<R: CryptoRngCore>(
    ctx: &SystemContext,
    id: &[u8],
    rng: &mut R,
) -> Result<(DeviceIdentity, RegistrationCommitment)> {
    validate_identity(ctx, id)?;

    let device = DeviceIdentity::from_secret(ctx, id, Bls12381::random_scalar(rng))?;
    let commitment = device.commitment();

    debug!(
        dg = %hex::encode(Bls12381::g1_to_bytes(device.public_key())),
        %commitment,
        "device key generated"
    );

    Ok((device, commitment))
}

/// Base-station device table backed by a [`CommitmentStore`].
#[derive(Debug, Default)]
pub struct DeviceRegistry<S = InMemoryCommitmentStore> {
    store: S,
}

impl DeviceRegistry<InMemoryCommitmentStore> {
    /// Creates a registry over an empty [`InMemoryCommitmentStore`].
    pub fn in_memory() -> Self {
        Self::new(InMemoryCommitmentStore::new())
    }
}

impl<S: CommitmentStore> DeviceRegistry<S> {
    /// Creates a registry over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Registers a new device and stores its commitment.
    ///
    /// # Errors
    ///
    /// Propagates [`register`] errors and returns [`Error::Registry`] if the store
    /// rejects the commitment.
    pub fn enroll<R: CryptoRngCore>(
        &mut self,
        ctx: &SystemContext,
        id: &[u8],
        rng: &mut R,
    ) -> Result<DeviceIdentity> {
        let (device, commitment) = register(ctx, id, rng)?;
        self.store.insert(device.id(), commitment)?;

        info!(
            device = %String::from_utf8_lossy(device.id()),
            %commitment,
            registered = self.store.len(),
            "device registered"
        );

        Ok(device)
    }

    /// Confirms that `(id, public_key)` matches a stored commitment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Registry`] if `id` is unknown or the recomputed
    /// commitment differs.
    pub fn recognize(&self, id: &[u8], public_key: &G1Element) -> Result<()> {
        let device = String::from_utf8_lossy(id);
        let stored = self
            .store
            .get(id)
            .ok_or_else(|| Error::Registry(format!("Device '{device}' not registered")))?;

        if !stored.matches(id, public_key) {
            warn!(%device, "public key does not match registration commitment");
            return Err(Error::Registry(format!(
                "Commitment mismatch for device '{device}'"
            )));
        }

        Ok(())
    }

    /// Removes a device's commitment.
    pub fn revoke(&mut self, id: &[u8]) -> Option<RegistrationCommitment> {
        self.store.remove(id)
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the registry and returns the store.
    pub fn into_store(self) -> S {
        self.store
    }
}
