use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use storage::{OfflineStore, StoreName};
use tracing::warn;

/// Reads a collection, skipping records that no longer decode.
pub(crate) async fn load<T: DeserializeOwned>(
    cache: &dyn OfflineStore,
    store: StoreName,
) -> Result<Vec<T>> {
    let records = cache.get(store).await?;
    let mut decoded = Vec::with_capacity(records.len());
    for record in records {
        match serde_json::from_value(record) {
            Ok(value) => decoded.push(value),
            Err(err) => warn!(%store, %err, "skipping undecodable offline record"),
        }
    }
    Ok(decoded)
}

pub(crate) async fn put<T: Serialize>(
    cache: &dyn OfflineStore,
    store: StoreName,
    record: &T,
) -> Result<()> {
    let value = serde_json::to_value(record)
        .with_context(|| format!("failed to encode record for '{store}'"))?;
    cache.put(store, &value).await
}

/// Writes every record, stopping at the first failure.
pub(crate) async fn put_all<T: Serialize>(
    cache: &dyn OfflineStore,
    store: StoreName,
    records: &[T],
) -> Result<()> {
    for record in records {
        put(cache, store, record).await?;
    }
    Ok(())
}
