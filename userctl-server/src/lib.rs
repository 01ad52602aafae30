//! userctl-server: HTTP CRUD service for user records
//!
//! Exposes list/create/get/update/delete over `/users` plus a
//! database-aware liveness probe at `/`, backed by PostgreSQL.

pub mod db;
pub mod http;
pub mod models;

pub use db::{DbError, PgUserStore, UserStore};
pub use http::{run_server, ServerConfig};
