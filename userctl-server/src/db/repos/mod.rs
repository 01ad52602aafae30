//! Store implementations for database access
//!
//! Handlers only see the `UserStore` trait; `PgUserStore` is the
//! production implementation over a sqlx pool.

pub mod users;

pub use users::{DbError, PgUserStore, UserStore};
