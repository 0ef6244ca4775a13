//! Revocation ledger trait: the durable set of invalidated token ids.

use async_trait::async_trait;

use crate::errors::DomainError;

/// Repository trait for the revocation ledger
///
/// Implementations must provide read-after-write consistency per token id:
/// once `invalidate_tokens` has returned, every subsequent `is_invalidated`
/// call for those ids answers `true`, across all concurrent callers. A
/// ledger entry never expires; pruning is an external housekeeping concern.
///
/// Backends that cannot be reached must fail with
/// `DomainError::Infrastructure` rather than answering either way.
#[async_trait]
pub trait InvalidTokenRepository: Send + Sync {
    /// Record token ids as invalidated
    ///
    /// Idempotent bulk insert: an id that is already present is a no-op,
    /// not an error. The whole batch is applied atomically and is durable
    /// before the call returns.
    ///
    /// # Arguments
    /// * `token_ids` - The token ids to record
    ///
    /// # Returns
    /// * `Ok(u64)` - Number of ids newly recorded by THIS call (ids that
    ///   were already present are not counted). Callers that need to know
    ///   whether a concurrent writer got there first compare this against
    ///   the batch size.
    /// * `Err(DomainError)` - Storage failure; nothing may be assumed about
    ///   the ids' status
    async fn invalidate_tokens(&self, token_ids: &[String]) -> Result<u64, DomainError>;

    /// Check whether a token id has been invalidated
    ///
    /// # Arguments
    /// * `token_id` - The token id to look up
    ///
    /// # Returns
    /// * `Ok(true)` - The id is present in the ledger
    /// * `Ok(false)` - The id has never been invalidated
    /// * `Err(DomainError)` - Storage failure
    async fn is_invalidated(&self, token_id: &str) -> Result<bool, DomainError>;
}
