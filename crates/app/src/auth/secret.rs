//! Signing secret bootstrap.

use std::fmt;

use rand::{RngCore, rngs::OsRng};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};
use zeroize::Zeroize;

use crate::auth::{SecretError, SecretStore};

/// Number of random bytes in a generated signing secret.
pub const SIGNING_SECRET_BYTES: usize = 32;

/// Symmetric key used to sign and verify every token.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningSecret {
    bytes: Vec<u8>,
}

impl SigningSecret {
    /// Wrap secret bytes loaded from a store.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Generate a fresh secret from the operating system RNG.
    ///
    /// # Errors
    ///
    /// Returns an error if the RNG cannot produce bytes.
    pub fn generate() -> Result<Self, rand::Error> {
        let mut bytes = vec![0_u8; SIGNING_SECRET_BYTES];

        OsRng.try_fill_bytes(&mut bytes)?;

        Ok(Self { bytes })
    }

    /// Raw key material for HMAC signing.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(**redacted**)")?;
        Ok(())
    }
}

impl Drop for SigningSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

/// Owns the process signing secret and initialises it exactly once.
///
/// Concurrent first callers of [`SecretManager::init_secret`] share a single
/// fetch-or-create round-trip; readers never observe a partial value.
#[derive(Debug, Default)]
pub struct SecretManager {
    secret: OnceCell<SigningSecret>,
}

impl SecretManager {
    /// Manager with no secret committed yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the secret from `store`, creating and persisting one if absent.
    ///
    /// Idempotent: once a secret is committed later calls return it without
    /// touching the store.
    ///
    /// # Errors
    ///
    /// Returns an error if random generation or persisting a new secret fails.
    /// Nothing is committed in that case and a later call retries.
    pub async fn init_secret(&self, store: &dyn SecretStore) -> Result<&SigningSecret, SecretError> {
        self.secret.get_or_try_init(|| load_or_create(store)).await
    }

    /// The committed secret, if initialised.
    #[must_use]
    pub fn secret(&self) -> Option<&SigningSecret> {
        self.secret.get()
    }
}

async fn load_or_create(store: &dyn SecretStore) -> Result<SigningSecret, SecretError> {
    match store.get_jwt_secret().await {
        Ok(bytes) if !bytes.is_empty() => {
            debug!("loaded signing secret from store");

            return Ok(SigningSecret::from_bytes(bytes));
        }
        Ok(_) => warn!("stored signing secret is empty, generating a new one"),
        Err(error) => warn!("signing secret unavailable, generating a new one: {error}"),
    }

    let secret = SigningSecret::generate().map_err(SecretError::Entropy)?;

    store
        .create_jwt_secret(secret.as_bytes())
        .await
        .map_err(SecretError::Store)?;

    info!("persisted new signing secret");

    Ok(secret)
}
