//! MySQL repository implementations.

mod invalid_token_repository_impl;
mod user_repository_impl;

pub use invalid_token_repository_impl::MySqlInvalidTokenRepository;
pub use user_repository_impl::MySqlUserRepository;
