//! Authentication and token configuration

use serde::{Deserialize, Serialize};

/// Token signing and lifetime configuration
///
/// The signing key pair is asymmetric (RS256): the private key signs issued
/// tokens, the public key verifies presented ones. Both are PEM files whose
/// paths come from the environment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Path to the PEM-encoded RSA private key used for signing
    pub private_key_path: String,

    /// Path to the PEM-encoded RSA public key used for verification
    pub public_key_path: String,

    /// Access token lifetime in minutes
    pub access_token_expire_minutes: i64,

    /// Refresh token lifetime in days
    pub refresh_token_expire_days: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            private_key_path: String::from("keys/token_private_key.pem"),
            public_key_path: String::from("keys/token_public_key.pem"),
            access_token_expire_minutes: 30,
            refresh_token_expire_days: 1,
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            private_key_path: std::env::var("AUTH_PRIVATE_KEY_PATH")
                .unwrap_or(defaults.private_key_path),
            public_key_path: std::env::var("AUTH_PUBLIC_KEY_PATH")
                .unwrap_or(defaults.public_key_path),
            access_token_expire_minutes: std::env::var("AUTH_ACCESS_TOKEN_EXPIRE_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.access_token_expire_minutes),
            refresh_token_expire_days: std::env::var("AUTH_REFRESH_TOKEN_EXPIRE_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.refresh_token_expire_days),
        }
    }

    /// Set access token lifetime in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expire_minutes = minutes;
        self
    }

    /// Set refresh token lifetime in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expire_days = days;
        self
    }
}
