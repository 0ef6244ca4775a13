//! Bcrypt-backed password verification.

use tg_core::errors::DomainError;
use tg_core::services::auth::PasswordVerifier;

/// Verifies passwords against bcrypt hashes
#[derive(Debug, Clone, Default)]
pub struct BcryptPasswordVerifier;

impl BcryptPasswordVerifier {
    /// Create a new verifier
    pub fn new() -> Self {
        Self
    }
}

impl PasswordVerifier for BcryptPasswordVerifier {
    fn verify(&self, password: &str, password_hash: &str) -> Result<bool, DomainError> {
        bcrypt::verify(password, password_hash)
            .map_err(|e| DomainError::infrastructure(format!("unusable password hash: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_matching_password() {
        let hash = bcrypt::hash("hunter2", 4).unwrap();
        let verifier = BcryptPasswordVerifier::new();

        assert!(verifier.verify("hunter2", &hash).unwrap());
        assert!(!verifier.verify("hunter3", &hash).unwrap());
    }

    #[test]
    fn test_unusable_hash_is_an_error() {
        let verifier = BcryptPasswordVerifier::new();

        assert!(verifier.verify("hunter2", "not-a-bcrypt-hash").is_err());
    }
}
