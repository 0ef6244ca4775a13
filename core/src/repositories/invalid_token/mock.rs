//! In-memory implementation of the revocation ledger for testing.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::DomainError;

use super::r#trait::InvalidTokenRepository;

/// In-memory revocation ledger
///
/// Backed by a `HashSet` behind an async `RwLock`; the write lock makes each
/// `invalidate_tokens` batch atomic with respect to concurrent callers.
#[derive(Clone)]
pub struct MockInvalidTokenRepository {
    ids: Arc<RwLock<HashSet<String>>>,
}

impl MockInvalidTokenRepository {
    /// Create a new empty ledger
    pub fn new() -> Self {
        Self {
            ids: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    /// Number of ids currently recorded
    pub async fn len(&self) -> usize {
        self.ids.read().await.len()
    }

    /// Whether the ledger is empty
    pub async fn is_empty(&self) -> bool {
        self.ids.read().await.is_empty()
    }
}

impl Default for MockInvalidTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InvalidTokenRepository for MockInvalidTokenRepository {
    async fn invalidate_tokens(&self, token_ids: &[String]) -> Result<u64, DomainError> {
        let mut ids = self.ids.write().await;

        let mut newly_recorded = 0;
        for token_id in token_ids {
            if ids.insert(token_id.clone()) {
                newly_recorded += 1;
            }
        }

        Ok(newly_recorded)
    }

    async fn is_invalidated(&self, token_id: &str) -> Result<bool, DomainError> {
        let ids = self.ids.read().await;
        Ok(ids.contains(token_id))
    }
}
