//! Authentication flows composed on top of the token authority
//!
//! - login: credential check, then pair issuance
//! - refresh: claims re-derivation from the current user record
//! - logout: verified, atomic invalidation of a token pair

mod login;
mod logout;
mod password;
mod refresh;

pub use login::LoginService;
pub use logout::LogoutService;
pub use password::PasswordVerifier;
pub use refresh::RefreshService;
