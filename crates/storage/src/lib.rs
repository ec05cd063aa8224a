//! Offline cache for catalog and cart data.
//!
//! Records are JSON documents grouped into named collections and keyed by
//! their `_id` field. The client core mirrors catalog fetches and cart edits
//! here and reads them back when the catalog service is unreachable.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Row, Sqlite,
};
use std::{
    fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::debug;

/// Field every cached record is keyed by.
pub const RECORD_KEY_FIELD: &str = "_id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreName {
    Products,
    Categories,
    Cart,
}

impl StoreName {
    pub const ALL: [StoreName; 3] = [StoreName::Products, StoreName::Categories, StoreName::Cart];

    pub fn as_str(self) -> &'static str {
        match self {
            StoreName::Products => "products",
            StoreName::Categories => "categories",
            StoreName::Cart => "cart",
        }
    }
}

impl fmt::Display for StoreName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreName {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        StoreName::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow!("unknown offline store '{s}'"))
    }
}

/// Key/value persistence consumed by the client core as a fallback data
/// source and as a mirror of cart and catalog mutations.
#[async_trait]
pub trait OfflineStore: Send + Sync {
    /// All records of a collection, in first-insert order.
    async fn get(&self, store: StoreName) -> Result<Vec<Value>>;
    /// Insert or replace the record with the same `_id`.
    async fn put(&self, store: StoreName, record: &Value) -> Result<()>;
    /// Remove the record with the given key; missing keys are ignored.
    async fn delete(&self, store: StoreName, key: &str) -> Result<()>;
    async fn clear(&self, store: StoreName) -> Result<()>;
}

pub fn record_key(record: &Value) -> Result<&str> {
    record
        .get(RECORD_KEY_FIELD)
        .and_then(Value::as_str)
        .filter(|key| !key.is_empty())
        .ok_or_else(|| anyhow!("record has no string '{RECORD_KEY_FIELD}' field"))
}

#[derive(Debug, Clone)]
pub struct CachedRecord {
    pub key: String,
    pub body: Value,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    pub async fn list_records(&self, store: StoreName) -> Result<Vec<CachedRecord>> {
        let rows = sqlx::query(
            "SELECT record_key, body, updated_at
             FROM offline_records
             WHERE store_name = ?
             ORDER BY rowid ASC",
        )
        .bind(store.as_str())
        .fetch_all(&self.pool)
        .await
        .with_context(|| format!("failed to read offline store '{store}'"))?;

        rows.into_iter()
            .map(|row| -> Result<CachedRecord> {
                let key: String = row.try_get(0)?;
                let body: String = row.try_get(1)?;
                let updated_at: String = row.try_get(2)?;
                Ok(CachedRecord {
                    body: serde_json::from_str(&body)
                        .with_context(|| format!("corrupt record '{key}' in '{store}'"))?,
                    updated_at: DateTime::parse_from_rfc3339(&updated_at)
                        .with_context(|| format!("bad timestamp on record '{key}'"))?
                        .with_timezone(&Utc),
                    key,
                })
            })
            .collect()
    }

    pub async fn record_count(&self, store: StoreName) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM offline_records WHERE store_name = ?")
                .bind(store.as_str())
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}

#[async_trait]
impl OfflineStore for Storage {
    async fn get(&self, store: StoreName) -> Result<Vec<Value>> {
        Ok(self
            .list_records(store)
            .await?
            .into_iter()
            .map(|record| record.body)
            .collect())
    }

    async fn put(&self, store: StoreName, record: &Value) -> Result<()> {
        let key = record_key(record)?;
        let body = serde_json::to_string(record)?;
        sqlx::query(
            "INSERT INTO offline_records (store_name, record_key, body, updated_at)
             VALUES (?, ?, ?, ?)
             ON CONFLICT(store_name, record_key) DO UPDATE SET body=excluded.body, updated_at=excluded.updated_at",
        )
        .bind(store.as_str())
        .bind(key)
        .bind(body)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .with_context(|| format!("failed to put record '{key}' into '{store}'"))?;
        debug!(%store, key, "offline record stored");
        Ok(())
    }

    async fn delete(&self, store: StoreName, key: &str) -> Result<()> {
        let result =
            sqlx::query("DELETE FROM offline_records WHERE store_name = ? AND record_key = ?")
                .bind(store.as_str())
                .bind(key)
                .execute(&self.pool)
                .await
                .with_context(|| format!("failed to delete record '{key}' from '{store}'"))?;
        debug!(%store, key, removed = result.rows_affected(), "offline record deleted");
        Ok(())
    }

    async fn clear(&self, store: StoreName) -> Result<()> {
        sqlx::query("DELETE FROM offline_records WHERE store_name = ?")
            .bind(store.as_str())
            .execute(&self.pool)
            .await
            .with_context(|| format!("failed to clear offline store '{store}'"))?;
        Ok(())
    }
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url == "sqlite::memory:" || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
