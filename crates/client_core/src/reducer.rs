use shared::{action::Action, domain::CartLine};

use crate::state::State;

/// Applies `action` to `state` and returns the resulting state.
///
/// The input is never modified. Cart visibility follows the cart contents:
/// adding or re-quantifying a line opens the cart, clearing closes it, and a
/// removal leaves it open only while lines remain. `ToggleCart` flips the flag
/// regardless of contents, so an empty cart can still be toggled open.
///
/// Adds never merge lines with an existing id; callers that want
/// increment-on-repeat semantics dispatch `UpdateCartQuantity` instead.
pub fn reduce(state: &State, action: Action) -> State {
    match action {
        Action::UpdateProducts { products } => State {
            products,
            ..state.clone()
        },
        Action::UpdateCategories { categories } => State {
            categories,
            ..state.clone()
        },
        Action::UpdateCurrentCategory { current_category } => State {
            current_category: Some(current_category),
            ..state.clone()
        },
        Action::AddToCart { product } => {
            let mut cart = state.cart.clone();
            cart.push(product);
            State {
                cart,
                cart_open: true,
                ..state.clone()
            }
        }
        Action::AddMultipleToCart { products } => {
            let mut cart = state.cart.clone();
            cart.extend(products);
            State {
                cart,
                ..state.clone()
            }
        }
        Action::RemoveFromCart { id } => {
            let cart: Vec<CartLine> = state
                .cart
                .iter()
                .filter(|line| line.id() != &id)
                .cloned()
                .collect();
            State {
                cart_open: !cart.is_empty(),
                cart,
                ..state.clone()
            }
        }
        Action::UpdateCartQuantity {
            id,
            purchase_quantity,
        } => {
            let cart = state
                .cart
                .iter()
                .map(|line| {
                    if line.id() == &id {
                        CartLine {
                            purchase_quantity,
                            ..line.clone()
                        }
                    } else {
                        line.clone()
                    }
                })
                .collect();
            State {
                cart,
                cart_open: true,
                ..state.clone()
            }
        }
        Action::ClearCart => State {
            cart: Vec::new(),
            cart_open: false,
            ..state.clone()
        },
        Action::ToggleCart => State {
            cart_open: !state.cart_open,
            ..state.clone()
        },
        Action::Unrecognized => state.clone(),
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
