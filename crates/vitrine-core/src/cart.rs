//! # Cart Aggregate
//!
//! The single mutable object of a shopping session.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  User action            Operation                  State change         │
//! │  ───────────            ─────────                  ────────────         │
//! │  "+" on product    ──►  add_item(product)     ──►  qty + 1 / insert     │
//! │  "-" on product    ──►  remove_item(id)       ──►  qty - 1 / delete     │
//! │  type a quantity   ──►  update_quantity(id,n) ──►  qty = n / delete     │
//! │  "Limpar"/finish   ──►  clear()               ──►  no items, no client  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Entries are unique by product id
//! - Every entry has quantity >= 1; an entry that would reach 0 is removed
//! - Nothing derived (discounts, totals) is stored here; see
//!   [`crate::discount`]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{CustomerData, Product};

/// A product and how many units of it are in the cart.
///
/// The product is a snapshot taken when it was first added, so the cart keeps
/// showing consistent data if the catalog changes mid-session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartEntry {
    pub product: Product,
    pub quantity: i64,
}

impl CartEntry {
    /// Unit price × quantity, before discounts.
    pub fn line_total(&self) -> Money {
        self.product.price().multiply_quantity(self.quantity)
    }
}

/// The shopping cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    entries: Vec<CartEntry>,

    customer: Option<CustomerData>,

    /// When the cart was created/last cleared
    #[ts(as = "String")]
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            entries: Vec::new(),
            customer: None,
            created_at: Utc::now(),
        }
    }

    /// Adds one unit of `product`.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity + 1
    /// - Otherwise: new entry with quantity 1
    pub fn add_item(&mut self, product: &Product) {
        match self.entry_mut(&product.id) {
            Some(entry) => entry.quantity = entry.quantity.saturating_add(1),
            None => self.entries.push(CartEntry {
                product: product.clone(),
                quantity: 1,
            }),
        }
    }

    /// Removes one unit of a product.
    ///
    /// ## Behavior
    /// - Quantity > 1: quantity - 1
    /// - Quantity == 1: entry deleted
    /// - Product not in cart: no-op
    pub fn remove_item(&mut self, product_id: &str) {
        if let Some(entry) = self.entry_mut(product_id) {
            if entry.quantity > 1 {
                entry.quantity -= 1;
                return;
            }
        }
        self.entries.retain(|e| e.product.id != product_id);
    }

    /// Sets the quantity of a product in the cart.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: entry deleted
    /// - Otherwise: quantity set to exactly `quantity`
    /// - Product not in cart: no-op
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.entries.retain(|e| e.product.id != product_id);
        } else if let Some(entry) = self.entry_mut(product_id) {
            entry.quantity = quantity;
        }
    }

    /// Removes all entries and detaches the customer data.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.customer = None;
        self.created_at = Utc::now();
    }

    /// Attaches validated customer data for the current checkout.
    pub fn set_customer(&mut self, customer: CustomerData) {
        self.customer = Some(customer);
    }

    pub fn customer(&self) -> Option<&CustomerData> {
        self.customer.as_ref()
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Units of `product_id` in the cart (0 if absent).
    pub fn quantity_of(&self, product_id: &str) -> i64 {
        self.entries
            .iter()
            .find(|e| e.product.id == product_id)
            .map_or(0, |e| e.quantity)
    }

    /// Sum of all quantities.
    pub fn total_item_count(&self) -> i64 {
        self.entries
            .iter()
            .fold(0i64, |total, e| total.saturating_add(e.quantity))
    }

    /// Number of distinct products.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Sum of unit price × quantity, before discounts.
    pub fn subtotal(&self) -> Money {
        self.entries.iter().map(CartEntry::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn entry_mut(&mut self, product_id: &str) -> Option<&mut CartEntry> {
        self.entries.iter_mut().find(|e| e.product.id == product_id)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DeliveryWindow, PaymentPreference};

    fn test_product(id: &str, price_cents: i64, group: &str) -> Product {
        Product {
            id: id.to_string(),
            code: format!("COD-{}", id),
            name: format!("Product {}", id),
            description: None,
            price_cents,
            group: group.to_string(),
            category: "General".to_string(),
            is_active: true,
        }
    }

    fn test_customer() -> CustomerData {
        CustomerData {
            full_name: "Maria Silva".to_string(),
            tax_id: "123.456.789-00".to_string(),
            address: "Rua A, 1".to_string(),
            phone: "(11) 99999-0000".to_string(),
            payment: PaymentPreference::Pix,
            delivery: DeliveryWindow::Morning,
        }
    }

    #[test]
    fn test_add_item_inserts_then_increments() {
        let mut cart = Cart::new();
        let product = test_product("1", 999, "X");

        cart.add_item(&product);
        assert_eq!(cart.entry_count(), 1);
        assert_eq!(cart.quantity_of("1"), 1);

        cart.add_item(&product);
        cart.add_item(&product);
        assert_eq!(cart.entry_count(), 1);
        assert_eq!(cart.quantity_of("1"), 3);
        assert_eq!(cart.subtotal().cents(), 2997);
    }

    #[test]
    fn test_remove_item_decrements_then_deletes() {
        let mut cart = Cart::new();
        let product = test_product("1", 1000, "X");
        cart.add_item(&product);
        cart.add_item(&product);

        cart.remove_item("1");
        assert_eq!(cart.quantity_of("1"), 1);

        cart.remove_item("1");
        assert_eq!(cart.quantity_of("1"), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_absent_item_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 1000, "X"));
        let before = cart.clone();

        cart.remove_item("missing");
        assert_eq!(cart, before);
    }

    #[test]
    fn test_update_quantity_is_absolute() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 1000, "X"));

        cart.update_quantity("1", 7);
        assert_eq!(cart.quantity_of("1"), 7);

        cart.update_quantity("1", 2);
        assert_eq!(cart.quantity_of("1"), 2);
    }

    #[test]
    fn test_update_quantity_non_positive_deletes() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 1000, "X"));
        cart.add_item(&test_product("2", 1000, "X"));

        cart.update_quantity("1", 0);
        cart.update_quantity("2", -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_absent_item_is_noop() {
        let mut cart = Cart::new();
        cart.update_quantity("missing", 5);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 1000, "X"));
        cart.add_item(&test_product("2", 250, "Y"));
        cart.update_quantity("2", 4);

        assert_eq!(cart.total_item_count(), 5);
        assert_eq!(cart.subtotal().cents(), 2000);
    }

    #[test]
    fn test_clear_detaches_customer() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 1000, "X"));
        cart.set_customer(test_customer());
        assert!(cart.customer().is_some());

        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.customer().is_none());
        assert_eq!(cart.subtotal(), Money::zero());
    }

    #[test]
    fn test_entries_keep_insertion_order() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("b", 100, "X"));
        cart.add_item(&test_product("a", 100, "X"));
        cart.add_item(&test_product("b", 100, "X"));

        let ids: Vec<&str> = cart.entries().iter().map(|e| e.product.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
