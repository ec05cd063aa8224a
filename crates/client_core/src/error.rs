use shared::error::ServiceError;
use storage::StoreName;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("{store} unavailable: catalog service failed ({network}) and offline cache failed ({cache})")]
    Unavailable {
        store: StoreName,
        network: ServiceError,
        cache: anyhow::Error,
    },
    #[error("offline cache {store} failed: {source}")]
    Cache {
        store: StoreName,
        source: anyhow::Error,
    },
    #[error("catalog sync task ended abnormally: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("log in to check out")]
    NotLoggedIn,
    #[error("cart is empty")]
    EmptyCart,
    #[error("cart holds {units} units, checkout accepts at most {limit}")]
    TooManyUnits { units: u64, limit: u64 },
    #[error("checkout session request failed: {0}")]
    Service(#[from] ServiceError),
}
