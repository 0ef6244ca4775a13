//! Revocation ledger interface and in-memory implementation.

pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;

pub mod mock;

pub use mock::MockInvalidTokenRepository;
pub use r#trait::InvalidTokenRepository;
