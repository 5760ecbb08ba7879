//! Async scoped key/value store
//!
//! SQLite calls are synchronous, so every operation hops onto tokio's
//! blocking pool and the caller's event loop keeps running.

use async_trait::async_trait;
use serde_json::Value;

use crate::database::Database;
use crate::error::StorageError;
use crate::Result;

/// Key/value storage partitioned by scope.
///
/// `get` on a scope/key that was never written yields `Ok(None)`; only a
/// failing backend produces `Err`.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, scope: &str, key: &str) -> Result<Option<Value>>;

    async fn set(&self, scope: &str, key: &str, value: Value) -> Result<()>;
}

/// SQLite-backed [`KeyValueStore`]
#[derive(Clone)]
pub struct ScopedStore {
    db: Database,
}

impl ScopedStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    async fn blocking<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || f(&db))
            .await
            .map_err(|e| StorageError::Task(e.to_string()))?
    }
}

#[async_trait]
impl KeyValueStore for ScopedStore {
    async fn get(&self, scope: &str, key: &str) -> Result<Option<Value>> {
        let (scope, key) = (scope.to_string(), key.to_string());
        let raw = self
            .blocking(move |db| db.get_value(&scope, &key))
            .await?;

        raw.map(|text| serde_json::from_str(&text).map_err(StorageError::from))
            .transpose()
    }

    async fn set(&self, scope: &str, key: &str, value: Value) -> Result<()> {
        let text = serde_json::to_string(&value)?;
        let (owned_scope, owned_key) = (scope.to_string(), key.to_string());

        self.blocking(move |db| db.set_value(&owned_scope, &owned_key, &text))
            .await?;

        tracing::debug!(scope = %scope, key = %key, kind = value_kind(&value), "Stored value");
        Ok(())
    }
}

// Values can carry tokens; only their shape goes to the log.
fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Object(_) => "object",
        Value::Array(_) => "array",
        Value::String(_) => "string",
        Value::Number(_) => "number",
        Value::Bool(_) => "bool",
        Value::Null => "null",
    }
}
