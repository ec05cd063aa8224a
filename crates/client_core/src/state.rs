use serde::{Deserialize, Serialize};
use shared::domain::{CartLine, Category, CategoryId, Product, ProductId};

/// View-model held by the [`Store`](crate::Store).
///
/// Values are never edited in place by the store; each dispatch derives a
/// fresh `State` through [`reduce`](crate::reduce).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub current_category: Option<CategoryId>,
    pub cart: Vec<CartLine>,
    pub cart_open: bool,
}

impl State {
    pub fn find_product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    pub fn find_cart_line(&self, id: &ProductId) -> Option<&CartLine> {
        self.cart.iter().find(|line| line.id() == id)
    }

    /// Products in the selected category, or the whole catalog when nothing
    /// is selected.
    pub fn visible_products(&self) -> Vec<&Product> {
        match &self.current_category {
            None => self.products.iter().collect(),
            Some(selected) => self
                .products
                .iter()
                .filter(|product| product.category.as_ref() == Some(selected))
                .collect(),
        }
    }

    pub fn cart_total(&self) -> f64 {
        self.cart.iter().map(CartLine::subtotal).sum()
    }

    pub fn cart_item_count(&self) -> u64 {
        self.cart
            .iter()
            .map(|line| u64::from(line.purchase_quantity))
            .sum()
    }

    /// One product id per purchased unit, in cart order.
    pub fn checkout_product_ids(&self) -> Vec<ProductId> {
        self.cart
            .iter()
            .flat_map(|line| {
                std::iter::repeat(line.id().clone()).take(line.purchase_quantity as usize)
            })
            .collect()
    }
}

pub fn format_total(total: f64) -> String {
    format!("{total:.2}")
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
