//! User store
//!
//! One method per database operation the HTTP layer needs:
//! - list/get/create/update/delete map to a single statement each
//! - update uses COALESCE so unset fields keep their stored value
//! - update/delete report a missing row as `NotFound` instead of succeeding silently

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{NewUser, User, UserChanges};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    fn user_not_found(id: i32) -> Self {
        Self::NotFound {
            resource: "user",
            id: id.to_string(),
        }
    }
}

/// Storage seam used by the route handlers.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Connectivity probe.
    async fn ping(&self) -> Result<(), DbError>;

    /// All users, ordered by id.
    async fn list(&self) -> Result<Vec<User>, DbError>;

    async fn get(&self, id: i32) -> Result<User, DbError>;

    /// Insert a user, returning the stored row with its generated id.
    async fn create(&self, user: NewUser) -> Result<User, DbError>;

    async fn update(&self, id: i32, changes: UserChanges) -> Result<User, DbError>;

    async fn delete(&self, id: i32) -> Result<(), DbError>;

    /// Release all connections. Called once at shutdown.
    async fn close(&self);
}

/// PostgreSQL-backed user store
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn ping(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<User>, DbError> {
        let users = sqlx::query_as::<_, User>("SELECT id, email, name FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    async fn get(&self, id: i32) -> Result<User, DbError> {
        sqlx::query_as::<_, User>("SELECT id, email, name FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::user_not_found(id))
    }

    async fn create(&self, user: NewUser) -> Result<User, DbError> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, name) VALUES ($1, $2)
            RETURNING id, email, name
            "#,
        )
        .bind(user.email.as_str())
        .bind(user.name.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update(&self, id: i32, changes: UserChanges) -> Result<User, DbError> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET email = COALESCE($2, email),
                name = COALESCE($3, name)
            WHERE id = $1
            RETURNING id, email, name
            "#,
        )
        .bind(id)
        .bind(changes.email.as_ref().map(|e| e.as_str()))
        .bind(changes.name.as_deref())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::user_not_found(id))
    }

    async fn delete(&self, id: i32) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::user_not_found(id));
        }

        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
