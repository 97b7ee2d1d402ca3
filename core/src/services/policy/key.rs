//! HMAC key derivation for token signing and verification

use base64::{engine::general_purpose::STANDARD, Engine as _};
use jsonwebtoken::{DecodingKey, EncodingKey};
use rand::RngCore;

use crate::errors::PolicyError;

/// Minimum key length in bytes for HMAC-SHA-512
pub const MIN_KEY_LENGTH: usize = 64;

/// Symmetric key used to sign and verify tokens
///
/// The key material is the UTF-8 encoding of the configured secret. Two keys
/// are equal when their material is equal.
pub struct SigningKey {
    material: Vec<u8>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("length", &self.material.len())
            .finish_non_exhaustive()
    }
}

impl PartialEq for SigningKey {
    fn eq(&self, other: &Self) -> bool {
        self.material == other.material
    }
}

impl Eq for SigningKey {}

impl SigningKey {
    /// Derives a signing key from a secret string
    ///
    /// # Arguments
    ///
    /// * `name` - Name of the secret, used in error reporting
    /// * `secret` - The secret string
    ///
    /// # Returns
    ///
    /// * `Ok(SigningKey)` - Key derived successfully
    /// * `Err(PolicyError::WeakKey)` - Secret shorter than [`MIN_KEY_LENGTH`] bytes
    pub fn from_secret(name: &str, secret: &str) -> Result<Self, PolicyError> {
        let material = secret.as_bytes().to_vec();
        if material.len() < MIN_KEY_LENGTH {
            return Err(PolicyError::WeakKey {
                secret: name.to_string(),
                length: material.len(),
                required: MIN_KEY_LENGTH,
            });
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(&material),
            decoding_key: DecodingKey::from_secret(&material),
            material,
        })
    }

    /// Gets the key used for signing
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    /// Gets the key used for verification
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    /// Length of the key material in bytes
    pub fn len(&self) -> usize {
        self.material.len()
    }

    pub fn is_empty(&self) -> bool {
        self.material.is_empty()
    }
}

/// Generates a random secret strong enough for HMAC-SHA-512
///
/// Only meant for operator guidance; nothing in this crate uses it as a key.
pub fn generate_secret() -> String {
    let mut key = [0u8; MIN_KEY_LENGTH];
    rand::thread_rng().fill_bytes(&mut key);
    STANDARD.encode(key)
}
