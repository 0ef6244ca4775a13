//! # TokenGate Core
//!
//! Core business logic and domain layer for the TokenGate backend.
//! This crate contains domain entities, the token codec and authority,
//! repository interfaces, and error types that form the foundation of
//! the application architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;
