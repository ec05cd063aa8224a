use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::{
    domain::{Category, Product, ProductId},
    error::ServiceError,
};

/// Catalog query service. Results feed `UpdateProducts` / `UpdateCategories`.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn fetch_products(&self) -> Result<Vec<Product>, ServiceError>;
    async fn fetch_categories(&self) -> Result<Vec<Category>, ServiceError>;
}

pub trait AuthCheck: Send + Sync {
    fn logged_in(&self) -> bool;
}

impl AuthCheck for bool {
    fn logged_in(&self) -> bool {
        *self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub session_id: String,
    pub redirect_url: String,
}

/// Creates payment sessions for a list of product ids, one entry per unit.
#[async_trait]
pub trait CheckoutService: Send + Sync {
    async fn create_session(
        &self,
        product_ids: Vec<ProductId>,
    ) -> Result<CheckoutSession, ServiceError>;
}
