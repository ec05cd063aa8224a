//! Storefront state core: the cart/catalog reducer, the store that holds its
//! state, and the orchestration that feeds it from the catalog service and
//! the offline cache.

mod cache;
pub mod cart;
pub mod checkout;
pub mod error;
pub mod reducer;
pub mod services;
pub mod state;
pub mod store;
pub mod sync;

pub use error::{CheckoutError, SyncError};
pub use reducer::reduce;
pub use services::{AuthCheck, CatalogService, CheckoutService, CheckoutSession};
pub use state::{format_total, State};
pub use store::{Store, StoreEvent};
pub use sync::{SyncReport, SyncTask, Source};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
