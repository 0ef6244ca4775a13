//! Token lifecycle services
//!
//! This module owns the signed-token wire format and the issuance rules:
//! - RS256 key pair loading for asymmetric signing
//! - encoding, signing, parsing and expiry policy (the codec)
//! - the token authority: pair issuance, refresh, verification and the
//!   revocation checks composed on top of the codec

mod codec;
mod config;
mod keys;
mod service;

pub use codec::{IssuedToken, TokenCodec};
pub use config::TokenServiceConfig;
pub use keys::Rs256KeyPair;
pub use service::TokenService;
