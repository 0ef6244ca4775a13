//! MySQL implementation of the revocation ledger.
//!
//! Backed by a single `invalid_tokens` table:
//!
//! ```sql
//! CREATE TABLE invalid_tokens (
//!     token_id   VARCHAR(36) NOT NULL PRIMARY KEY,
//!     created_at TIMESTAMP   NOT NULL DEFAULT CURRENT_TIMESTAMP
//! );
//! ```
//!
//! The primary key makes inserts idempotent (`INSERT IGNORE`) and gives
//! per-id read-after-write consistency; racing writers serialize on the row
//! lock, so the second logout of a pair observes the first one's insert.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, Row};

use tg_core::errors::DomainError;
use tg_core::repositories::InvalidTokenRepository;

/// MySQL implementation of `InvalidTokenRepository`
pub struct MySqlInvalidTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlInvalidTokenRepository {
    /// Create a new MySQL revocation ledger
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvalidTokenRepository for MySqlInvalidTokenRepository {
    async fn invalidate_tokens(&self, token_ids: &[String]) -> Result<u64, DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::infrastructure(format!("failed to open transaction: {}", e))
        })?;

        let now = Utc::now();
        let mut newly_recorded = 0u64;
        for token_id in token_ids {
            let result =
                sqlx::query("INSERT IGNORE INTO invalid_tokens (token_id, created_at) VALUES (?, ?)")
                    .bind(token_id)
                    .bind(now)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| {
                        DomainError::infrastructure(format!(
                            "failed to record invalid token: {}",
                            e
                        ))
                    })?;
            newly_recorded += result.rows_affected();
        }

        tx.commit().await.map_err(|e| {
            DomainError::infrastructure(format!("failed to commit invalidation: {}", e))
        })?;

        tracing::debug!(
            submitted = token_ids.len(),
            newly_recorded,
            "recorded invalid tokens"
        );
        Ok(newly_recorded)
    }

    async fn is_invalidated(&self, token_id: &str) -> Result<bool, DomainError> {
        let row =
            sqlx::query("SELECT EXISTS(SELECT 1 FROM invalid_tokens WHERE token_id = ?) AS present")
                .bind(token_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::infrastructure(format!("failed to check invalid token: {}", e))
                })?;

        let present: i8 = row
            .try_get("present")
            .map_err(|e| DomainError::infrastructure(format!("failed to read result: {}", e)))?;

        Ok(present == 1)
    }
}
