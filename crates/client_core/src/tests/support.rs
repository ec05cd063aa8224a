use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value;
use shared::{
    domain::{CartLine, Category, CategoryId, Product, ProductId},
    error::ServiceError,
};
use storage::{OfflineStore, StoreName};

use crate::{
    services::{CatalogService, CheckoutService, CheckoutSession},
    state::State,
};

pub(crate) fn product(id: &str, name: &str, price: f64) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        price,
        ..Product::default()
    }
}

pub(crate) fn category(id: &str, name: &str) -> Category {
    Category {
        id: CategoryId::new(id),
        name: name.to_string(),
    }
}

pub(crate) fn line(id: &str, name: &str, purchase_quantity: u32) -> CartLine {
    CartLine::new(product(id, name, 1.0), purchase_quantity)
}

/// Two lines in a closed cart: Soup x1 and Bread x2.
pub(crate) fn soup_and_bread() -> State {
    State {
        cart: vec![line("1", "Soup", 1), line("2", "Bread", 2)],
        cart_open: false,
        ..State::default()
    }
}

pub(crate) async fn memory_storage() -> storage::Storage {
    storage::Storage::new("sqlite::memory:").await.expect("db")
}

pub(crate) struct TestCatalog {
    products: Result<Vec<Product>, ServiceError>,
    categories: Result<Vec<Category>, ServiceError>,
    pub(crate) product_fetches: AtomicUsize,
}

impl TestCatalog {
    pub(crate) fn ok(products: Vec<Product>, categories: Vec<Category>) -> Self {
        Self {
            products: Ok(products),
            categories: Ok(categories),
            product_fetches: AtomicUsize::new(0),
        }
    }

    pub(crate) fn offline() -> Self {
        Self {
            products: Err(ServiceError::unavailable("network down")),
            categories: Err(ServiceError::unavailable("network down")),
            product_fetches: AtomicUsize::new(0),
        }
    }

    pub(crate) fn product_fetches(&self) -> usize {
        self.product_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogService for TestCatalog {
    async fn fetch_products(&self) -> Result<Vec<Product>, ServiceError> {
        self.product_fetches.fetch_add(1, Ordering::SeqCst);
        self.products.clone()
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, ServiceError> {
        self.categories.clone()
    }
}

/// Offline store whose every operation fails.
pub(crate) struct BrokenStore;

#[async_trait]
impl OfflineStore for BrokenStore {
    async fn get(&self, store: StoreName) -> Result<Vec<Value>> {
        Err(anyhow!("disk gone while reading {store}"))
    }

    async fn put(&self, store: StoreName, _record: &Value) -> Result<()> {
        Err(anyhow!("disk gone while writing {store}"))
    }

    async fn delete(&self, store: StoreName, _key: &str) -> Result<()> {
        Err(anyhow!("disk gone while deleting from {store}"))
    }

    async fn clear(&self, store: StoreName) -> Result<()> {
        Err(anyhow!("disk gone while clearing {store}"))
    }
}

pub(crate) struct TestCheckout {
    pub(crate) requests: Mutex<Vec<Vec<ProductId>>>,
    fail_with: Option<ServiceError>,
}

impl TestCheckout {
    pub(crate) fn ok() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail_with: None,
        }
    }

    pub(crate) fn failing(err: ServiceError) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail_with: Some(err),
        }
    }
}

#[async_trait]
impl CheckoutService for TestCheckout {
    async fn create_session(
        &self,
        product_ids: Vec<ProductId>,
    ) -> Result<CheckoutSession, ServiceError> {
        self.requests.lock().expect("requests").push(product_ids);
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        Ok(CheckoutSession {
            session_id: "sess_test".into(),
            redirect_url: "https://pay.example/sess_test".into(),
        })
    }
}
