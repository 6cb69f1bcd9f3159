use async_trait::async_trait;
use parking_lot::Mutex;
use sqlx::sqlite::SqlitePool;
use std::collections::HashMap;

use crate::api::provider::{CapabilityError, KeyValueStore};

/// Key-value cache backed by the `kv_store` table
#[derive(Clone)]
pub struct SqlKeyValueStore {
    pool: SqlitePool,
}

impl SqlKeyValueStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KeyValueStore for SqlKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CapabilityError> {
        let row = sqlx::query_as::<_, (String,)>("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| CapabilityError::Store(format!("Failed to read '{}': {}", key, e)))?;

        Ok(row.map(|r| r.0))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CapabilityError> {
        sqlx::query(
            "INSERT INTO kv_store (key, value, date_updated) VALUES (?, ?, CURRENT_TIMESTAMP) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, date_updated = CURRENT_TIMESTAMP",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| CapabilityError::Store(format!("Failed to write '{}': {}", key, e)))?;

        Ok(())
    }
}

/// Process-local store for runs without a database
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CapabilityError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CapabilityError> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
