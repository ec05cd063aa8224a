use serde::{Deserialize, Serialize};

use crate::domain::{CartLine, Category, CategoryId, Product, ProductId};

/// Requests to transform storefront state.
///
/// On the wire an action is a JSON object whose `type` field carries the
/// discriminant, e.g. `{"type":"REMOVE_FROM_CART","_id":"42"}`. Any
/// discriminant outside this vocabulary decodes to [`Action::Unrecognized`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Action {
    UpdateProducts {
        products: Vec<Product>,
    },
    UpdateCategories {
        categories: Vec<Category>,
    },
    UpdateCurrentCategory {
        current_category: CategoryId,
    },
    AddToCart {
        product: CartLine,
    },
    AddMultipleToCart {
        products: Vec<CartLine>,
    },
    RemoveFromCart {
        #[serde(rename = "_id")]
        id: ProductId,
    },
    UpdateCartQuantity {
        #[serde(rename = "_id")]
        id: ProductId,
        purchase_quantity: u32,
    },
    ClearCart,
    ToggleCart,
    #[serde(other)]
    Unrecognized,
}

impl Action {
    pub const UPDATE_PRODUCTS: &'static str = "UPDATE_PRODUCTS";
    pub const UPDATE_CATEGORIES: &'static str = "UPDATE_CATEGORIES";
    pub const UPDATE_CURRENT_CATEGORY: &'static str = "UPDATE_CURRENT_CATEGORY";
    pub const ADD_TO_CART: &'static str = "ADD_TO_CART";
    pub const ADD_MULTIPLE_TO_CART: &'static str = "ADD_MULTIPLE_TO_CART";
    pub const REMOVE_FROM_CART: &'static str = "REMOVE_FROM_CART";
    pub const UPDATE_CART_QUANTITY: &'static str = "UPDATE_CART_QUANTITY";
    pub const CLEAR_CART: &'static str = "CLEAR_CART";
    pub const TOGGLE_CART: &'static str = "TOGGLE_CART";
    pub const UNRECOGNIZED: &'static str = "UNRECOGNIZED";

    /// Wire tag of this action.
    pub fn discriminant(&self) -> &'static str {
        match self {
            Action::UpdateProducts { .. } => Self::UPDATE_PRODUCTS,
            Action::UpdateCategories { .. } => Self::UPDATE_CATEGORIES,
            Action::UpdateCurrentCategory { .. } => Self::UPDATE_CURRENT_CATEGORY,
            Action::AddToCart { .. } => Self::ADD_TO_CART,
            Action::AddMultipleToCart { .. } => Self::ADD_MULTIPLE_TO_CART,
            Action::RemoveFromCart { .. } => Self::REMOVE_FROM_CART,
            Action::UpdateCartQuantity { .. } => Self::UPDATE_CART_QUANTITY,
            Action::ClearCart => Self::CLEAR_CART,
            Action::ToggleCart => Self::TOGGLE_CART,
            Action::Unrecognized => Self::UNRECOGNIZED,
        }
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}
