//! Loading catalog data into the store.
//!
//! Each collection is resolved through a fallback chain: data already in
//! memory, then the catalog service, then the offline cache. Successful
//! service responses are mirrored into the cache so the next offline start
//! has something to show.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use shared::{action::Action, domain::CartLine, error::ServiceError};
use storage::{OfflineStore, StoreName};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::{cache, error::SyncError, services::CatalogService, store::Store};

/// Where a collection's data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Memory,
    Network,
    OfflineCache,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    pub categories: Source,
    pub products: Source,
}

pub async fn sync_products(
    store: &Store,
    catalog: &dyn CatalogService,
    cache: &dyn OfflineStore,
) -> Result<Source, SyncError> {
    if !store.get_state().products.is_empty() {
        debug!("products already in memory");
        return Ok(Source::Memory);
    }

    let (products, source) =
        network_or_cached(StoreName::Products, catalog.fetch_products().await, cache).await?;
    store.dispatch(Action::UpdateProducts { products });
    Ok(source)
}

/// Categories are refreshed on every call; there is no in-memory shortcut.
pub async fn sync_categories(
    store: &Store,
    catalog: &dyn CatalogService,
    cache: &dyn OfflineStore,
) -> Result<Source, SyncError> {
    let (categories, source) =
        network_or_cached(StoreName::Categories, catalog.fetch_categories().await, cache).await?;
    store.dispatch(Action::UpdateCategories { categories });
    Ok(source)
}

/// Syncs categories and products. Both are attempted even if the first fails.
pub async fn sync_catalog(
    store: &Store,
    catalog: &dyn CatalogService,
    cache: &dyn OfflineStore,
) -> Result<SyncReport, SyncError> {
    let categories = sync_categories(store, catalog, cache).await;
    let products = sync_products(store, catalog, cache).await;
    Ok(SyncReport {
        categories: categories?,
        products: products?,
    })
}

/// Loads the persisted cart into an empty in-memory cart. Returns the number
/// of lines restored.
pub async fn restore_cart(store: &Store, cache: &dyn OfflineStore) -> Result<usize, SyncError> {
    if !store.get_state().cart.is_empty() {
        return Ok(0);
    }

    let lines: Vec<CartLine> = cache::load(cache, StoreName::Cart)
        .await
        .map_err(|source| SyncError::Cache {
            store: StoreName::Cart,
            source,
        })?;
    let restored = lines.len();
    if restored > 0 {
        store.dispatch(Action::AddMultipleToCart { products: lines });
        info!(restored, "cart restored from offline cache");
    }
    Ok(restored)
}

async fn network_or_cached<T>(
    store_name: StoreName,
    fetched: Result<Vec<T>, ServiceError>,
    cache: &dyn OfflineStore,
) -> Result<(Vec<T>, Source), SyncError>
where
    T: Serialize + DeserializeOwned,
{
    match fetched {
        Ok(records) => {
            info!(store = %store_name, count = records.len(), "loaded from catalog service");
            if let Err(err) = cache::put_all(cache, store_name, &records).await {
                warn!(store = %store_name, %err, "failed to mirror catalog data into offline cache");
            }
            Ok((records, Source::Network))
        }
        Err(network) => {
            warn!(
                store = %store_name,
                %network,
                offline = network.is_offline(),
                "catalog service failed, reading offline cache"
            );
            match cache::load(cache, store_name).await {
                Ok(records) => {
                    info!(store = %store_name, count = records.len(), "loaded from offline cache");
                    Ok((records, Source::OfflineCache))
                }
                Err(cache_err) => Err(SyncError::Unavailable {
                    store: store_name,
                    network,
                    cache: cache_err,
                }),
            }
        }
    }
}

/// Background catalog sync bound to the lifetime of its owner.
///
/// Dropping the guard aborts the task, so a view that goes away stops
/// dispatching into the store.
pub struct SyncTask {
    handle: JoinHandle<Result<SyncReport, SyncError>>,
}

impl SyncTask {
    pub fn spawn(
        store: Store,
        catalog: Arc<dyn CatalogService>,
        cache: Arc<dyn OfflineStore>,
    ) -> Self {
        let handle = tokio::spawn(async move {
            sync_catalog(&store, catalog.as_ref(), cache.as_ref()).await
        });
        Self { handle }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub async fn join(mut self) -> Result<SyncReport, SyncError> {
        (&mut self.handle).await?
    }
}

impl Drop for SyncTask {
    fn drop(&mut self) {
        if !self.handle.is_finished() {
            debug!("aborting catalog sync");
            self.handle.abort();
        }
    }
}

#[cfg(test)]
#[path = "tests/sync_tests.rs"]
mod tests;
