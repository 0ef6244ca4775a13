//! MySQL implementation of the user lookup repository.
//!
//! Expects a `users` table:
//!
//! ```sql
//! CREATE TABLE users (
//!     id          VARCHAR(36)  NOT NULL PRIMARY KEY,
//!     email       VARCHAR(255) NOT NULL UNIQUE,
//!     password    VARCHAR(255) NOT NULL,
//!     first_name  VARCHAR(100) NOT NULL,
//!     last_name   VARCHAR(100) NOT NULL,
//!     user_type   VARCHAR(20)  NOT NULL,
//!     user_status VARCHAR(20)  NOT NULL DEFAULT 'ACTIVE',
//!     created_at  TIMESTAMP    NOT NULL DEFAULT CURRENT_TIMESTAMP
//! );
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use tg_core::domain::entities::user::{User, UserStatus, UserType};
use tg_core::errors::DomainError;
use tg_core::repositories::UserRepository;

const SELECT_USER: &str = r#"
    SELECT id, email, password, first_name, last_name, user_type, user_status, created_at
    FROM users
"#;

/// MySQL implementation of `UserRepository`
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a `User` entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::infrastructure(format!("failed to get id: {}", e)))?;

        let user_type_str: String = row
            .try_get("user_type")
            .map_err(|e| DomainError::infrastructure(format!("failed to get user_type: {}", e)))?;
        let user_type = match user_type_str.as_str() {
            "ADMIN" => UserType::Admin,
            "USER" => UserType::User,
            other => {
                return Err(DomainError::infrastructure(format!(
                    "unknown user_type: {}",
                    other
                )))
            }
        };

        let user_status_str: String = row.try_get("user_status").map_err(|e| {
            DomainError::infrastructure(format!("failed to get user_status: {}", e))
        })?;
        let user_status = match user_status_str.as_str() {
            "ACTIVE" => UserStatus::Active,
            "SUSPENDED" => UserStatus::Suspended,
            other => {
                return Err(DomainError::infrastructure(format!(
                    "unknown user_status: {}",
                    other
                )))
            }
        };

        Ok(User {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::infrastructure(format!("invalid user UUID: {}", e)))?,
            email: row
                .try_get("email")
                .map_err(|e| DomainError::infrastructure(format!("failed to get email: {}", e)))?,
            password_hash: row.try_get("password").map_err(|e| {
                DomainError::infrastructure(format!("failed to get password: {}", e))
            })?,
            first_name: row.try_get("first_name").map_err(|e| {
                DomainError::infrastructure(format!("failed to get first_name: {}", e))
            })?,
            last_name: row.try_get("last_name").map_err(|e| {
                DomainError::infrastructure(format!("failed to get last_name: {}", e))
            })?,
            user_type,
            user_status,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at").map_err(|e| {
                DomainError::infrastructure(format!("failed to get created_at: {}", e))
            })?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!("{} WHERE id = ? LIMIT 1", SELECT_USER);

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::infrastructure(format!("failed to find user by id: {}", e))
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!("{} WHERE email = ? LIMIT 1", SELECT_USER);

        let result = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::infrastructure(format!("failed to find user by email: {}", e))
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }
}
