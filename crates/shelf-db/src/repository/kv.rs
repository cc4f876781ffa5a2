//! # Key-Value Repository
//!
//! String keys mapping to string values, the storage model of the device's
//! local storage. Higher-level repositories serialize into it.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;

/// Repository for raw key-value access.
#[derive(Debug, Clone)]
pub struct KeyValueRepository {
    pool: SqlitePool,
}

impl KeyValueRepository {
    pub fn new(pool: SqlitePool) -> Self {
        KeyValueRepository { pool }
    }

    /// Reads the value stored under `key`.
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let mut conn = self.pool.acquire().await?;
        get_in(&mut conn, key).await
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        let mut conn = self.pool.acquire().await?;
        set_in(&mut conn, key, value).await
    }

    /// Deletes `key`. Returns whether it existed.
    pub async fn remove(&self, key: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM key_value WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        debug!(key = %key, removed = result.rows_affected(), "Removed key");
        Ok(result.rows_affected() > 0)
    }

    /// All stored keys, sorted.
    pub async fn keys(&self) -> DbResult<Vec<String>> {
        let keys = sqlx::query_scalar("SELECT key FROM key_value ORDER BY key")
            .fetch_all(&self.pool)
            .await?;
        Ok(keys)
    }
}

// =============================================================================
// Connection-level helpers (usable inside a transaction)
// =============================================================================

pub(crate) async fn get_in(conn: &mut SqliteConnection, key: &str) -> DbResult<Option<String>> {
    let value: Option<String> = sqlx::query_scalar("SELECT value FROM key_value WHERE key = ?1")
        .bind(key)
        .fetch_optional(&mut *conn)
        .await?;

    debug!(key = %key, found = value.is_some(), "Read key");
    Ok(value)
}

pub(crate) async fn set_in(conn: &mut SqliteConnection, key: &str, value: &str) -> DbResult<()> {
    sqlx::query(
        r#"
        INSERT INTO key_value (key, value, updated_at)
        VALUES (?1, ?2, ?3)
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(key)
    .bind(value)
    .bind(Utc::now().to_rfc3339())
    .execute(&mut *conn)
    .await?;

    debug!(key = %key, bytes = value.len(), "Wrote key");
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};

    #[tokio::test]
    async fn test_get_set_remove() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let kv = db.key_values();

        assert_eq!(kv.get("@missing").await.unwrap(), None);

        kv.set("@greeting", "hello").await.unwrap();
        assert_eq!(kv.get("@greeting").await.unwrap().as_deref(), Some("hello"));

        kv.set("@greeting", "bye").await.unwrap();
        assert_eq!(kv.get("@greeting").await.unwrap().as_deref(), Some("bye"));
        assert_eq!(kv.keys().await.unwrap(), vec!["@greeting".to_string()]);

        assert!(kv.remove("@greeting").await.unwrap());
        assert!(!kv.remove("@greeting").await.unwrap());
        assert_eq!(kv.get("@greeting").await.unwrap(), None);
    }
}
