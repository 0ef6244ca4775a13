//! Business services composing the domain layer.

pub mod auth;
pub mod token;
