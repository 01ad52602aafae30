//! Database layer - connection pool, migrations and the user store
//!
//! - The pool is created once by the caller and injected; there is no global client
//! - Uniqueness is left to DB constraints, no check-then-insert
//! - Missing rows surface as `DbError::NotFound` for every by-id operation

pub mod pool;
pub mod repos;

#[cfg(test)]
pub(crate) mod memory;

pub use pool::{create_pool, create_pool_with_options, run_migrations, DEFAULT_MAX_CONNECTIONS, MIGRATOR};
pub use sqlx::PgPool;
pub use repos::*;
