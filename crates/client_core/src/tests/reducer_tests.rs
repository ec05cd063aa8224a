use super::*;
use crate::test_support::{category, line, product, soup_and_bread};
use shared::domain::{CategoryId, ProductId};

fn catalog_state() -> State {
    State {
        categories: vec![category("1", "Food")],
        current_category: Some(CategoryId::new("1")),
        ..State::default()
    }
}

#[test]
fn unrecognized_action_is_identity() {
    let state = soup_and_bread();
    assert_eq!(reduce(&state, Action::Unrecognized), state);

    let decoded = Action::from_json(r#"{"type":"APPLY_COUPON"}"#).expect("decode");
    assert_eq!(reduce(&catalog_state(), decoded), catalog_state());
}

#[test]
fn update_products_replaces_catalog_without_touching_input() {
    let state = catalog_state();
    let next = reduce(
        &state,
        Action::UpdateProducts {
            products: vec![product("a", "Apple", 1.0), product("b", "Bread", 2.0)],
        },
    );

    assert_eq!(next.products.len(), 2);
    assert!(state.products.is_empty());
    assert_eq!(next.categories, state.categories);
    assert_eq!(next.current_category, state.current_category);
}

#[test]
fn update_products_is_idempotent() {
    let products = vec![product("a", "Apple", 1.0)];
    let once = reduce(
        &catalog_state(),
        Action::UpdateProducts {
            products: products.clone(),
        },
    );
    let twice = reduce(&once, Action::UpdateProducts { products });
    assert_eq!(once, twice);
}

#[test]
fn update_categories_replaces_list() {
    let state = catalog_state();
    let next = reduce(
        &state,
        Action::UpdateCategories {
            categories: vec![category("2", "Household"), category("3", "Toys")],
        },
    );

    assert_eq!(next.categories.len(), 2);
    assert_eq!(state.categories.len(), 1);
}

#[test]
fn update_current_category_selects() {
    let state = catalog_state();
    let next = reduce(
        &state,
        Action::UpdateCurrentCategory {
            current_category: CategoryId::new("2"),
        },
    );

    assert_eq!(next.current_category, Some(CategoryId::new("2")));
    assert_eq!(state.current_category, Some(CategoryId::new("1")));
}

#[test]
fn add_to_cart_appends_and_opens() {
    let state = soup_and_bread();
    let next = reduce(
        &state,
        Action::AddToCart {
            product: CartLine {
                purchase_quantity: 1,
                ..CartLine::default()
            },
        },
    );

    assert_eq!(next.cart.len(), 3);
    assert_eq!(state.cart.len(), 2);
    assert!(next.cart_open);
    assert_eq!(next.cart[..2], state.cart[..]);
}

#[test]
fn add_to_cart_does_not_merge_duplicate_ids() {
    let next = reduce(
        &soup_and_bread(),
        Action::AddToCart {
            product: line("1", "Soup", 1),
        },
    );

    let soups = next
        .cart
        .iter()
        .filter(|l| l.id() == &ProductId::new("1"))
        .count();
    assert_eq!(soups, 2);
}

#[test]
fn add_multiple_appends_in_order_and_keeps_visibility() {
    let state = soup_and_bread();
    let next = reduce(
        &state,
        Action::AddMultipleToCart {
            products: vec![line("3", "Milk", 1), line("4", "Eggs", 12)],
        },
    );

    let ids: Vec<_> = next.cart.iter().map(|l| l.id().as_str()).collect();
    assert_eq!(ids, ["1", "2", "3", "4"]);
    assert!(!next.cart_open);

    let open = State {
        cart_open: true,
        ..state
    };
    let next = reduce(&open, Action::AddMultipleToCart { products: vec![] });
    assert!(next.cart_open);
}

#[test]
fn remove_from_cart_closes_only_when_empty() {
    let state = soup_and_bread();
    let after_soup = reduce(
        &state,
        Action::RemoveFromCart {
            id: ProductId::new("1"),
        },
    );
    assert_eq!(after_soup.cart, vec![line("2", "Bread", 2)]);
    assert!(after_soup.cart_open);

    let after_bread = reduce(
        &after_soup,
        Action::RemoveFromCart {
            id: ProductId::new("2"),
        },
    );
    assert!(after_bread.cart.is_empty());
    assert!(!after_bread.cart_open);
    assert_eq!(state.cart.len(), 2);
}

#[test]
fn remove_from_cart_drops_every_matching_line() {
    let state = State {
        cart: vec![line("1", "Soup", 1), line("2", "Bread", 1), line("1", "Soup", 3)],
        ..State::default()
    };
    let next = reduce(
        &state,
        Action::RemoveFromCart {
            id: ProductId::new("1"),
        },
    );
    assert_eq!(next.cart, vec![line("2", "Bread", 1)]);
}

#[test]
fn remove_of_missing_id_keeps_lines_and_reflects_contents() {
    let next = reduce(
        &soup_and_bread(),
        Action::RemoveFromCart {
            id: ProductId::new("404"),
        },
    );
    assert_eq!(next.cart, soup_and_bread().cart);
    assert!(next.cart_open);

    let empty = reduce(
        &State::default(),
        Action::RemoveFromCart {
            id: ProductId::new("404"),
        },
    );
    assert!(!empty.cart_open);
}

#[test]
fn update_cart_quantity_changes_only_matching_line() {
    let state = soup_and_bread();
    let next = reduce(
        &state,
        Action::UpdateCartQuantity {
            id: ProductId::new("1"),
            purchase_quantity: 3,
        },
    );

    assert_eq!(next.cart[0].purchase_quantity, 3);
    assert_eq!(next.cart[1], state.cart[1]);
    assert!(next.cart_open);
    assert_eq!(state.cart[0].purchase_quantity, 1);
}

#[test]
fn update_cart_quantity_for_missing_id_still_opens() {
    let state = soup_and_bread();
    let next = reduce(
        &state,
        Action::UpdateCartQuantity {
            id: ProductId::new("404"),
            purchase_quantity: 9,
        },
    );
    assert_eq!(next.cart, state.cart);
    assert!(next.cart_open);
}

#[test]
fn clear_cart_empties_and_closes() {
    let state = State {
        cart_open: true,
        ..soup_and_bread()
    };
    let next = reduce(&state, Action::ClearCart);

    assert!(next.cart.is_empty());
    assert!(!next.cart_open);
    assert_eq!(state.cart.len(), 2);
}

#[test]
fn double_toggle_restores_visibility() {
    let state = soup_and_bread();
    let toggled = reduce(&state, Action::ToggleCart);
    assert!(toggled.cart_open);
    assert_eq!(reduce(&toggled, Action::ToggleCart).cart_open, state.cart_open);
}

#[test]
fn toggle_opens_an_empty_cart() {
    let next = reduce(&State::default(), Action::ToggleCart);
    assert!(next.cart.is_empty());
    assert!(next.cart_open);
}

#[test]
fn transitions_are_deterministic() {
    let state = soup_and_bread();
    let actions = [
        Action::AddToCart {
            product: line("3", "Milk", 1),
        },
        Action::RemoveFromCart {
            id: ProductId::new("2"),
        },
        Action::UpdateCartQuantity {
            id: ProductId::new("1"),
            purchase_quantity: 5,
        },
        Action::ClearCart,
        Action::ToggleCart,
    ];

    for action in actions {
        let first = reduce(&state, action.clone());
        let second = reduce(&state, action);
        assert_eq!(first, second);
        assert_eq!(state, soup_and_bread());
    }
}
