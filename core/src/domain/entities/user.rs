//! User entity as seen by the token lifecycle.
//!
//! Credential storage owns the full user record; the core only needs the
//! fields that become claims plus the status consulted by the refresh flow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::token::UserClaims;

/// Role of a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    Admin,
    User,
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserType::Admin => write!(f, "ADMIN"),
            UserType::User => write!(f, "USER"),
        }
    }
}

/// Lifecycle status of a user account
///
/// Only `Active` accounts may refresh tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    Active,
    Suspended,
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserStatus::Active => write!(f, "ACTIVE"),
            UserStatus::Suspended => write!(f, "SUSPENDED"),
        }
    }
}

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Email address used for login
    pub email: String,

    /// Password hash; never embedded in claims
    pub password_hash: String,

    /// User first name
    pub first_name: String,

    /// User last name
    pub last_name: String,

    /// Role of the account
    pub user_type: UserType,

    /// Lifecycle status of the account
    pub user_status: UserStatus,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new active user
    pub fn new(
        email: impl Into<String>,
        password_hash: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        user_type: UserType,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            password_hash: password_hash.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            user_type,
            user_status: UserStatus::Active,
            created_at: Utc::now(),
        }
    }

    /// Checks whether the account is active
    pub fn is_active(&self) -> bool {
        self.user_status == UserStatus::Active
    }

    /// Builds the claims set embedded in tokens issued for this user
    pub fn to_claims(&self) -> UserClaims {
        UserClaims {
            user_id: self.id.to_string(),
            email: Some(self.email.clone()),
            user_type: Some(self.user_type),
            user_status: Some(self.user_status),
            first_name: Some(self.first_name.clone()),
            last_name: Some(self.last_name.clone()),
        }
    }
}
