use tracing::{info, warn};

use crate::{
    error::CheckoutError,
    services::{AuthCheck, CheckoutService, CheckoutSession},
    store::Store,
};

/// Largest number of units a single checkout session may carry.
pub const MAX_CHECKOUT_UNITS: u64 = 10_000;

/// Requests a payment session for the current cart.
pub async fn checkout(
    store: &Store,
    auth: &dyn AuthCheck,
    service: &dyn CheckoutService,
) -> Result<CheckoutSession, CheckoutError> {
    if !auth.logged_in() {
        return Err(CheckoutError::NotLoggedIn);
    }

    let state = store.get_state();
    let units = state.cart_item_count();
    if units == 0 {
        return Err(CheckoutError::EmptyCart);
    }
    if units > MAX_CHECKOUT_UNITS {
        warn!(units, limit = MAX_CHECKOUT_UNITS, "checkout rejected");
        return Err(CheckoutError::TooManyUnits {
            units,
            limit: MAX_CHECKOUT_UNITS,
        });
    }

    let product_ids = state.checkout_product_ids();
    let session = service.create_session(product_ids).await?;
    info!(session = %session.session_id, units, "checkout session created");
    Ok(session)
}

#[cfg(test)]
#[path = "tests/checkout_tests.rs"]
mod tests;
