//! # Storage Module
//!
//! String-keyed, JSON-valued durable store. Components receive a
//! `KeyValueStore` instead of reading ambient global state.
//!
//! ## Keys
//! - `users`: list of accounts
//! - `currentUser`: session marker, absent when logged out
//! - `journal_<email>`: journal entries for one user, newest first
//!
//! Writes replace the whole value of a key: last write wins.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::AppError;

pub const USERS_KEY: &str = "users";
pub const CURRENT_USER_KEY: &str = "currentUser";

pub fn journal_key(user_key: &str) -> String {
    format!("journal_{}", user_key)
}

#[async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    /// Returns the raw JSON text stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> Result<(), AppError>;

    async fn remove(&self, key: &str) -> Result<(), AppError>;
}

/// Reads and decodes the JSON value under `key`.
pub async fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, AppError> {
    match store.get(key).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

pub async fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), AppError> {
    let raw = serde_json::to_string(value)?;
    store.set(key, raw).await
}
