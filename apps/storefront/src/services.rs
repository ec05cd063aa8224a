use std::{io::ErrorKind, path::PathBuf};

use async_trait::async_trait;
use client_core::{AuthCheck, CatalogService, CheckoutService, CheckoutSession};
use serde::Deserialize;
use shared::{
    domain::{Category, Product, ProductId},
    error::{ErrorCode, ServiceError},
};
use tracing::debug;
use uuid::Uuid;

/// Catalog served from a JSON document shaped like the catalog query result:
/// `{"categories": [...], "products": [...]}`.
pub struct JsonFileCatalog {
    path: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    products: Vec<Product>,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read(&self) -> Result<CatalogDocument, ServiceError> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|err| {
            let message = format!("catalog {}: {err}", self.path.display());
            if err.kind() == ErrorKind::NotFound {
                ServiceError::unavailable(message)
            } else {
                ServiceError::internal(message)
            }
        })?;
        debug!(path = %self.path.display(), bytes = raw.len(), "catalog read");
        serde_json::from_str(&raw).map_err(|err| {
            ServiceError::new(
                ErrorCode::Validation,
                format!("catalog {}: {err}", self.path.display()),
            )
        })
    }
}

#[async_trait]
impl CatalogService for JsonFileCatalog {
    async fn fetch_products(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(self.read().await?.products)
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, ServiceError> {
        Ok(self.read().await?.categories)
    }
}

/// Logged in whenever a non-empty token is configured.
pub struct TokenAuth {
    token: Option<String>,
}

impl TokenAuth {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }
}

impl AuthCheck for TokenAuth {
    fn logged_in(&self) -> bool {
        self.token.as_deref().is_some_and(|token| !token.is_empty())
    }
}

/// Issues session references pointing at the configured payment page.
pub struct LocalCheckout {
    base_url: String,
}

impl LocalCheckout {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl CheckoutService for LocalCheckout {
    async fn create_session(
        &self,
        product_ids: Vec<ProductId>,
    ) -> Result<CheckoutSession, ServiceError> {
        if product_ids.is_empty() {
            return Err(ServiceError::new(ErrorCode::Validation, "no products to check out"));
        }
        let session_id = format!("cs_{}", Uuid::new_v4().simple());
        Ok(CheckoutSession {
            redirect_url: format!(
                "{}/checkout/{session_id}?units={}",
                self.base_url,
                product_ids.len()
            ),
            session_id,
        })
    }
}

#[cfg(test)]
#[path = "tests/services_tests.rs"]
mod tests;
