//! RS256 key pair loading for token signing and verification.

use jsonwebtoken::{DecodingKey, EncodingKey};
use std::fs;
use std::path::Path;

use crate::errors::{DomainError, TokenError};

/// The asymmetric key material every token operation shares
///
/// Loaded once at process start and immutable afterwards; the private key
/// signs issued tokens, the public key verifies presented ones. A malformed
/// key is a fatal startup error, never a per-request one.
#[derive(Clone)]
pub struct Rs256KeyPair {
    /// Private key for signing
    encoding_key: EncodingKey,
    /// Public key for verification
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for Rs256KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rs256KeyPair").finish_non_exhaustive()
    }
}

impl Rs256KeyPair {
    /// Loads a key pair from PEM files
    ///
    /// # Arguments
    ///
    /// * `private_key_path` - Path to the PEM-encoded RSA private key
    /// * `public_key_path` - Path to the PEM-encoded RSA public key
    ///
    /// # Returns
    ///
    /// * `Ok(Rs256KeyPair)` - Keys loaded and parsed
    /// * `Err(DomainError)` - A file was unreadable or not a valid RSA PEM
    pub fn from_files<P: AsRef<Path>>(
        private_key_path: P,
        public_key_path: P,
    ) -> Result<Self, DomainError> {
        let private_key_pem = fs::read(private_key_path.as_ref()).map_err(|e| {
            DomainError::Token(TokenError::KeyLoad {
                message: format!("failed to read private key: {}", e),
            })
        })?;

        let public_key_pem = fs::read(public_key_path.as_ref()).map_err(|e| {
            DomainError::Token(TokenError::KeyLoad {
                message: format!("failed to read public key: {}", e),
            })
        })?;

        Self::from_pem_bytes(&private_key_pem, &public_key_pem)
    }

    /// Builds a key pair from PEM strings (embedded keys, tests)
    pub fn from_pem_strings(
        private_key_pem: &str,
        public_key_pem: &str,
    ) -> Result<Self, DomainError> {
        Self::from_pem_bytes(private_key_pem.as_bytes(), public_key_pem.as_bytes())
    }

    fn from_pem_bytes(private_key_pem: &[u8], public_key_pem: &[u8]) -> Result<Self, DomainError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_key_pem).map_err(|e| {
            DomainError::Token(TokenError::KeyLoad {
                message: format!("invalid private key format: {}", e),
            })
        })?;

        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem).map_err(|e| {
            DomainError::Token(TokenError::KeyLoad {
                message: format!("invalid public key format: {}", e),
            })
        })?;

        Ok(Self {
            encoding_key,
            decoding_key,
        })
    }

    /// Returns the signing key
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    /// Returns the verification key
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}
