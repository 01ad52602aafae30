//! In-memory `UserStore` for router tests

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::repos::{DbError, UserStore};
use crate::models::{NewUser, User, UserChanges};

#[derive(Default)]
struct Table {
    next_id: i32,
    rows: BTreeMap<i32, User>,
}

/// Mirrors the `users` table: serial ids, unique email.
///
/// `set_available(false)` makes every call fail the way a dropped
/// database would.
pub(crate) struct MemoryUserStore {
    table: RwLock<Table>,
    available: AtomicBool,
}

impl MemoryUserStore {
    pub(crate) fn new() -> Self {
        Self {
            table: RwLock::new(Table::default()),
            available: AtomicBool::new(true),
        }
    }

    pub(crate) fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub(crate) async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    fn check(&self) -> Result<(), DbError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(DbError::Sqlx(sqlx::Error::PoolTimedOut))
        }
    }
}

fn duplicate_email() -> DbError {
    DbError::Sqlx(sqlx::Error::Protocol(
        "duplicate key value violates unique constraint \"users_email_key\"".into(),
    ))
}

fn not_found(id: i32) -> DbError {
    DbError::NotFound {
        resource: "user",
        id: id.to_string(),
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn ping(&self) -> Result<(), DbError> {
        self.check()
    }

    async fn list(&self) -> Result<Vec<User>, DbError> {
        self.check()?;
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn get(&self, id: i32) -> Result<User, DbError> {
        self.check()?;
        self.table
            .read()
            .await
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn create(&self, user: NewUser) -> Result<User, DbError> {
        self.check()?;
        let mut table = self.table.write().await;

        if table.rows.values().any(|u| u.email == user.email.as_str()) {
            return Err(duplicate_email());
        }

        table.next_id += 1;
        let row = User {
            id: table.next_id,
            email: user.email.into_string(),
            name: user.name,
        };
        table.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: i32, changes: UserChanges) -> Result<User, DbError> {
        self.check()?;
        let mut table = self.table.write().await;

        if let Some(email) = &changes.email {
            let taken = table
                .rows
                .values()
                .any(|u| u.id != id && u.email == email.as_str());
            if taken {
                return Err(duplicate_email());
            }
        }

        let row = table.rows.get_mut(&id).ok_or_else(|| not_found(id))?;
        changes.apply_to(row);
        Ok(row.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), DbError> {
        self.check()?;
        self.table
            .write()
            .await
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }

    async fn close(&self) {
        self.set_available(false);
    }
}
