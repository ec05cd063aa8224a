//! Cart edits that keep the offline cache in step with the store.
//!
//! The store is updated first; a cache failure is reported to the caller but
//! the in-memory cart keeps the change.

use anyhow::Result;
use shared::{
    action::Action,
    domain::{CartLine, Product, ProductId},
};
use storage::{OfflineStore, StoreName};
use tracing::info;

use crate::{cache, store::Store};

/// Adds one unit of `product`. A product already in the cart has its quantity
/// incremented instead of gaining a second line.
pub async fn add_to_cart(store: &Store, cache: &dyn OfflineStore, product: &Product) -> Result<CartLine> {
    let existing = store.get_state().find_cart_line(&product.id).cloned();

    let line = match existing {
        Some(line) => {
            let purchase_quantity = line.purchase_quantity.saturating_add(1);
            store.dispatch(Action::UpdateCartQuantity {
                id: product.id.clone(),
                purchase_quantity,
            });
            CartLine {
                purchase_quantity,
                ..line
            }
        }
        None => {
            let line = CartLine::new(product.clone(), 1);
            store.dispatch(Action::AddToCart {
                product: line.clone(),
            });
            line
        }
    };

    info!(product = %line.id(), quantity = line.purchase_quantity, "cart line saved");
    cache::put(cache, StoreName::Cart, &line).await?;
    Ok(line)
}

pub async fn remove_from_cart(store: &Store, cache: &dyn OfflineStore, id: &ProductId) -> Result<()> {
    store.dispatch(Action::RemoveFromCart { id: id.clone() });
    info!(product = %id, "cart line removed");
    cache.delete(StoreName::Cart, id.as_str()).await
}

/// Sets the quantity of a line. Zero removes the line.
pub async fn update_quantity(
    store: &Store,
    cache: &dyn OfflineStore,
    id: &ProductId,
    purchase_quantity: u32,
) -> Result<()> {
    if purchase_quantity == 0 {
        return remove_from_cart(store, cache, id).await;
    }

    let state = store.dispatch(Action::UpdateCartQuantity {
        id: id.clone(),
        purchase_quantity,
    });
    if let Some(line) = state.find_cart_line(id) {
        cache::put(cache, StoreName::Cart, line).await?;
    }
    Ok(())
}

pub async fn clear_cart(store: &Store, cache: &dyn OfflineStore) -> Result<()> {
    store.dispatch(Action::ClearCart);
    cache.clear(StoreName::Cart).await
}

#[cfg(test)]
#[path = "tests/cart_tests.rs"]
mod tests;
