use async_trait::async_trait;
use sqlx::PgPool;
use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};
use uuid::Uuid;

use crate::models::User;

/// UserDirectory
///
/// Read-only lookup of user records. The session provider calls this after a token
/// has been verified, so a deleted user loses their session immediately and the
/// role is always the current one.
///
/// **Send + Sync + async_trait** are required so `Arc<dyn UserDirectory>` can be
/// shared across Axum's handler tasks.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn get_user(&self, id: Uuid) -> Option<User>;
}

/// DirectoryState
///
/// The concrete type used to share the directory across the application state.
pub type DirectoryState = Arc<dyn UserDirectory>;

/// PostgresUserDirectory
///
/// Reads the `profiles` table. Database errors are logged and reported as "not
/// found": a lookup failure must never be mistaken for a valid session.
pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn get_user(&self, id: Uuid) -> Option<User> {
        sqlx::query_as::<_, User>("SELECT id, email, role FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("get_user error: {:?}", e);
                None
            })
    }
}

/// InMemoryUserDirectory
///
/// Directory backed by a map. Used for local runs without `DATABASE_URL` and in tests.
#[derive(Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let directory = Self::new();
        for user in users {
            directory.insert(user);
        }
        directory
    }

    pub fn insert(&self, user: User) {
        self.users
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user.id, user);
    }

    pub fn remove(&self, id: Uuid) -> Option<User> {
        self.users
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn get_user(&self, id: Uuid) -> Option<User> {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }
}
