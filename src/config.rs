use serde::{Deserialize, Serialize};

use crate::authority::DEFAULT_MAX_IDENTITY_LEN;
use crate::{Error, Result, SEED_BYTES, SecureRng};

/// Environment variable holding the TOML configuration path.
pub const CONFIG_PATH_ENV: &str = "PSEUDONYM_CONFIG_PATH";

/// TOML configuration path used when [`CONFIG_PATH_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config/pseudonym.toml";

/// Prefix of environment variables overriding configuration keys.
pub const ENV_PREFIX: &str = "PSEUDONYM_";

/// Protocol configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    /// Requested security level in bits.
    pub security_bits: u32,
    /// Maximum accepted device identity length in bytes.
    pub max_identity_len: usize,
    /// Optional hex-encoded 32-byte seed for deterministic runs.
    ///
    /// Leave unset in production; a seeded context is reproducible by anyone
    /// who knows the seed.
    pub seed: Option<String>,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            security_bits: 128,
            max_identity_len: DEFAULT_MAX_IDENTITY_LEN,
            seed: None,
        }
    }
}

impl ProtocolConfig {
    /// Loads configuration from `.env` file, TOML file, and environment variables.
    ///
    /// Configuration priority (highest to lowest):
    /// 1. Environment variables with `PSEUDONYM_` prefix (e.g., `PSEUDONYM_SECURITY_BITS=128`)
    /// 2. TOML configuration file (if exists)
    /// 3. `.env` file (if exists)
    /// 4. Built-in defaults
    ///
    /// The TOML file path can be set via `PSEUDONYM_CONFIG_PATH`. If not set, defaults
    /// to `./config/pseudonym.toml`. A missing file is silently skipped.
    ///
    /// # Environment Variable Examples
    /// ```bash
    /// PSEUDONYM_SECURITY_BITS=128
    /// PSEUDONYM_MAX_IDENTITY_LEN=64
    /// PSEUDONYM_SEED=abababababababababababababababababababababababababababababababab
    /// ```
    ///
    /// # Errors
    /// Returns an error if the configuration is malformed.
    #[allow(clippy::result_large_err)]
    pub fn from_env() -> figment::error::Result<Self> {
        use figment::Figment;
        use figment::providers::{Env, Format, Serialized, Toml};

        let _ = dotenvy::dotenv();

        let config_path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(&config_path))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
    }

    /// Loads and validates configuration, mapping failures to [`Error::Config`].
    ///
    /// # Errors
    /// Returns [`Error::Config`] if loading or validation fails.
    pub fn load() -> Result<Self> {
        let config = Self::from_env().map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns [`Error::Config`] describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        if self.security_bits == 0 {
            return Err(Error::Config("security_bits cannot be zero".to_string()));
        }

        if self.max_identity_len == 0 {
            return Err(Error::Config("max_identity_len cannot be zero".to_string()));
        }

        self.seed_bytes()?;
        Ok(())
    }

    /// Builds the generator for this configuration: ChaCha20 over the seed when
    /// one is configured, the operating system otherwise.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the seed is malformed.
    pub fn rng(&self) -> Result<SecureRng> {
        Ok(match self.seed_bytes()? {
            Some(seed) => SecureRng::from_seed(seed),
            None => SecureRng::new(),
        })
    }

    /// Decodes the configured seed, if any.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the seed is not 64 hex characters.
    pub fn seed_bytes(&self) -> Result<Option<[u8; SEED_BYTES]>> {
        let Some(seed) = &self.seed else {
            return Ok(None);
        };

        let bytes = hex::decode(seed.trim())
            .map_err(|e| Error::Config(format!("seed is not valid hex: {e}")))?;
        let seed: [u8; SEED_BYTES] = bytes.try_into().map_err(|b: Vec<u8>| {
            Error::Config(format!("seed must be {SEED_BYTES} bytes, got {}", b.len()))
        })?;

        Ok(Some(seed))
    }
}
