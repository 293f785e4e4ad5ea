//! # Cart Commands
//!
//! Commands for cart manipulation. Every command returns the full cart with
//! freshly computed discounts, so the storefront never displays a stale tier.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│ Finished │       │
//! │  │  Cart    │     │          │     │  Modal   │     │  Order   │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                              │
//! │                   add_to_cart       finish_order                       │
//! │                   update_item       (checkout.rs)                      │
//! │                   remove_item                                           │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, warn};
use vitrine_core::validation::validate_quantity;
use vitrine_core::{
    compute, Cart, CartEntry, CoreError, DiscountSummary, PolicyTable, ValidationError,
    MAX_ITEM_QUANTITY,
};

use crate::error::ApiError;
use crate::state::{CartState, CatalogState};

/// Cart response including entries and the discount breakdown.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub entries: Vec<CartEntry>,
    pub total_items: i64,
    pub summary: DiscountSummary,
}

impl CartResponse {
    pub fn build(cart: &Cart, policies: &PolicyTable) -> Self {
        CartResponse {
            entries: cart.entries().to_vec(),
            total_items: cart.total_item_count(),
            summary: compute(cart.entries(), policies),
        }
    }
}

fn respond(catalog: &CatalogState, cart: &CartState) -> CartResponse {
    let policies = catalog.policies();
    cart.with_cart(|c| CartResponse::build(c, &policies))
}

/// Gets the current cart contents.
///
/// ```text
/// ┌────────────────────────────────────────────────────────────────┐
/// │  CARRINHO                                          7 itens     │
/// ├────────────────────────────────────────────────────────────────┤
/// │  Shampoo Nutritivo        x3             R$ 30,00            │
/// │  Condicionador            x4             R$ 40,00            │
/// ├────────────────────────────────────────────────────────────────┤
/// │  LINHA X (7 itens) 10%                  -R$ 7,00             │
/// │  ──────────────────────────────────────────────────          │
/// │  TOTAL                                   R$ 63,00            │
/// └────────────────────────────────────────────────────────────────┘
/// ```
pub fn get_cart(catalog: &CatalogState, cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    respond(catalog, cart)
}

/// Adds one unit of a product to the cart.
///
/// ## Behavior
/// - If product already in cart: quantity increases by one
/// - If product not in cart: added as a new entry at the end
/// - Unknown or inactive products are rejected
/// - A product already at [`MAX_ITEM_QUANTITY`] is rejected
pub fn add_to_cart(
    catalog: &CatalogState,
    cart: &CartState,
    product_id: &str,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "add_to_cart command");

    let product = catalog
        .product(product_id)
        .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

    if !product.is_active {
        warn!(product_id = %product_id, "rejected inactive product");
        return Err(CoreError::ProductInactive(product.id).into());
    }

    cart.with_cart_mut(|c| {
        if c.quantity_of(product_id) >= MAX_ITEM_QUANTITY {
            warn!(product_id = %product_id, "rejected add above quantity limit");
            return Err(CoreError::Validation(ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: 1,
                max: MAX_ITEM_QUANTITY,
            }));
        }
        c.add_item(&product);
        Ok(())
    })?;
    Ok(respond(catalog, cart))
}

/// Sets the quantity of an entry. Zero or less removes it; unknown ids are
/// ignored. Quantities above [`MAX_ITEM_QUANTITY`] are rejected and leave the
/// cart untouched.
pub fn update_cart_item(
    catalog: &CatalogState,
    cart: &CartState,
    product_id: &str,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, quantity = %quantity, "update_cart_item command");
    if quantity > 0 {
        if let Err(err) = validate_quantity(quantity) {
            warn!(product_id = %product_id, quantity = %quantity, "rejected quantity");
            return Err(CoreError::Validation(err).into());
        }
    }
    cart.with_cart_mut(|c| c.update_quantity(product_id, quantity));
    Ok(respond(catalog, cart))
}

/// Takes one unit of a product out of the cart. The entry disappears when
/// its last unit is removed; unknown ids are ignored.
pub fn remove_from_cart(catalog: &CatalogState, cart: &CartState, product_id: &str) -> CartResponse {
    debug!(product_id = %product_id, "remove_from_cart command");
    cart.with_cart_mut(|c| c.remove_item(product_id));
    respond(catalog, cart)
}

/// Empties the cart and forgets the attached customer data.
pub fn clear_cart(catalog: &CatalogState, cart: &CartState) -> CartResponse {
    debug!("clear_cart command");
    cart.with_cart_mut(|c| c.clear());
    respond(catalog, cart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::error::ErrorCode;
    use vitrine_core::{DiscountPolicy, DiscountRate, Product};

    fn product(id: &str, price_cents: i64, is_active: bool) -> Product {
        Product {
            id: id.to_string(),
            code: format!("COD-{}", id),
            name: format!("Produto {}", id),
            description: None,
            price_cents,
            group: "LINHA X".to_string(),
            category: "Geral".to_string(),
            is_active,
        }
    }

    fn catalog() -> CatalogState {
        let catalog = Catalog::new(
            vec![product("a", 1000, true), product("off", 500, false)],
            vec![DiscountPolicy::new("LINHA X", 3, None, DiscountRate::from_bps(1000))],
        )
        .unwrap();
        CatalogState::new(catalog)
    }

    #[test]
    fn test_add_recomputes_tier() {
        let catalog = catalog();
        let cart = CartState::new();
        add_to_cart(&catalog, &cart, "a").unwrap();
        add_to_cart(&catalog, &cart, "a").unwrap();
        let response = add_to_cart(&catalog, &cart, "a").unwrap();

        assert_eq!(response.total_items, 3);
        assert_eq!(response.summary.total_discount.cents(), 300);
        assert_eq!(response.summary.grand_total.cents(), 2700);
    }

    #[test]
    fn test_add_rejects_unknown_and_inactive() {
        let catalog = catalog();
        let cart = CartState::new();

        let err = add_to_cart(&catalog, &cart, "nope").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = add_to_cart(&catalog, &cart, "off").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(cart.with_cart(|c| c.is_empty()));
    }

    #[test]
    fn test_update_remove_and_clear() {
        let catalog = catalog();
        let cart = CartState::new();
        add_to_cart(&catalog, &cart, "a").unwrap();

        let response = update_cart_item(&catalog, &cart, "a", 4).unwrap();
        assert_eq!(response.total_items, 4);

        let response = remove_from_cart(&catalog, &cart, "a");
        assert_eq!(response.total_items, 3);

        let response = update_cart_item(&catalog, &cart, "ghost", 9).unwrap();
        assert_eq!(response.total_items, 3);

        let response = clear_cart(&catalog, &cart);
        assert!(response.entries.is_empty());
        assert!(response.summary.grand_total.is_zero());
    }

    #[test]
    fn test_update_rejects_huge_quantity() {
        let catalog = catalog();
        let cart = CartState::new();
        add_to_cart(&catalog, &cart, "a").unwrap();
        update_cart_item(&catalog, &cart, "a", 2).unwrap();

        let err = update_cart_item(&catalog, &cart, "a", i64::MAX / 10).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "quantity must be between 1 and 9999");
        assert_eq!(cart.with_cart(|c| c.quantity_of("a")), 2);

        let response = update_cart_item(&catalog, &cart, "a", MAX_ITEM_QUANTITY).unwrap();
        assert_eq!(response.total_items, MAX_ITEM_QUANTITY);
        assert_eq!(response.summary.subtotal.cents(), 1000 * MAX_ITEM_QUANTITY);

        let err = add_to_cart(&catalog, &cart, "a").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(cart.with_cart(|c| c.quantity_of("a")), MAX_ITEM_QUANTITY);
    }

    #[test]
    fn test_response_serializes_camel_case() {
        let response = get_cart(&catalog(), &CartState::new());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["totalItems"], 0);
        assert!(json["entries"].as_array().unwrap().is_empty());
    }
}
