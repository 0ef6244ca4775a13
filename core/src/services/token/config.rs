//! Configuration for the token services.

/// Token lifetime configuration
///
/// The access lifetime must be configured shorter than the refresh lifetime;
/// the refresh flow assumes it when reusing the refresh token alongside each
/// newly minted access token.
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Access token lifetime in minutes
    pub access_token_expire_minutes: i64,
    /// Refresh token lifetime in days
    pub refresh_token_expire_days: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            access_token_expire_minutes: 30,
            refresh_token_expire_days: 1,
        }
    }
}

impl From<&tg_shared::config::AuthConfig> for TokenServiceConfig {
    fn from(config: &tg_shared::config::AuthConfig) -> Self {
        Self {
            access_token_expire_minutes: config.access_token_expire_minutes,
            refresh_token_expire_days: config.refresh_token_expire_days,
        }
    }
}
