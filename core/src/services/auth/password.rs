//! Password verification seam.
//!
//! Credential storage owns the hashes; the login flow only needs a yes/no
//! answer. The bcrypt-backed implementation lives in the infrastructure
//! crate.

use crate::errors::DomainError;

/// Verifies a presented password against a stored hash
pub trait PasswordVerifier: Send + Sync {
    /// # Returns
    ///
    /// * `Ok(true)` - The password matches the hash
    /// * `Ok(false)` - The password does not match
    /// * `Err(DomainError)` - The stored hash is unusable
    fn verify(&self, password: &str, password_hash: &str) -> Result<bool, DomainError>;
}
