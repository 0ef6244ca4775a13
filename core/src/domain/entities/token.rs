//! Token entities for the signed bearer credential wire format.

use serde::{Deserialize, Serialize};

use crate::domain::entities::user::{UserStatus, UserType};

/// Value of the JWT header `typ` field on every issued token
pub const TOKEN_HEADER_TYPE: &str = "Bearer";

/// The two kinds of tokens the authority issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Short-lived token carrying the full claims set
    Access,
    /// Long-lived token carrying the user id only
    Refresh,
}

/// User-supplied claims embedded in a token payload
///
/// Wire names are fixed identifiers; everything except `userId` is optional
/// so a refresh token can carry the user id alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaims {
    /// Unique user identifier; the join key back to the user record
    #[serde(rename = "userId")]
    pub user_id: String,

    /// User email address
    #[serde(rename = "userEmail", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// User type, consulted for authorization decisions downstream
    #[serde(rename = "userType", skip_serializing_if = "Option::is_none")]
    pub user_type: Option<UserType>,

    /// User account status at issuance time
    #[serde(rename = "userStatus", skip_serializing_if = "Option::is_none")]
    pub user_status: Option<UserStatus>,

    /// User first name
    #[serde(rename = "userFirstName", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    /// User last name
    #[serde(rename = "userLastName", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl UserClaims {
    /// Creates a claims set carrying only the user id
    ///
    /// Refresh tokens embed nothing else; the remaining claims are
    /// re-derived from the current user record at refresh time.
    pub fn identity_only(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: None,
            user_type: None,
            user_status: None,
            first_name: None,
            last_name: None,
        }
    }

    /// Reduces this claims set to the user id alone
    pub fn to_identity_only(&self) -> Self {
        Self::identity_only(self.user_id.clone())
    }
}

/// Full wire payload of a signed token
///
/// `jti`, `iat` and `exp` are managed by the codec; the user claims are
/// opaque payload carried alongside them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Unique token identifier, generated at signing time; the revocation key
    pub jti: String,

    /// Issued-at timestamp (epoch seconds)
    pub iat: i64,

    /// Expiration timestamp (epoch seconds)
    pub exp: i64,

    /// User-supplied claims
    #[serde(flatten)]
    pub user: UserClaims,
}

impl Claims {
    /// Checks whether the embedded expiry has passed
    ///
    /// A token is expired only when its expiry is strictly before now;
    /// a token expiring at exactly the current second is still valid.
    pub fn is_expired(&self) -> bool {
        self.exp < chrono::Utc::now().timestamp()
    }

    /// Gets the user id claim
    pub fn user_id(&self) -> &str {
        &self.user.user_id
    }
}

/// Token pair handed to the caller after issuance or refresh
///
/// Immutable value: created once per issuance/refresh call, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Signed, self-contained access token
    pub access_token: String,

    /// Absolute expiry of the access token (epoch seconds)
    pub access_token_expires_at: i64,

    /// Signed, self-contained refresh token
    pub refresh_token: String,
}

impl Token {
    /// Creates a new token pair
    pub fn new(
        access_token: String,
        access_token_expires_at: i64,
        refresh_token: String,
    ) -> Self {
        Self {
            access_token,
            access_token_expires_at,
            refresh_token,
        }
    }
}
