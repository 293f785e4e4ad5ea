//! # vitrine-core: Pure Pricing Logic for the Vitrine Storefront
//!
//! This crate is the **heart** of Vitrine: the cart aggregate, the
//! per-group tiered discount engine and the order renderer, as pure code with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vitrine Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │        Catalog / Admin panel / Share & Download (external)      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ products, policies, order text         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  storefront (session commands)                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ vitrine-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   policy ──► cart ──► discount ──► order                        │   │
//! │  │   (tiers)   (entries) (per group)  (text)                       │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, DiscountPolicy, DiscountRate, CustomerData
//! - [`money`] - Money type with integer arithmetic and currency formatting
//! - [`policy`] - Discount policy resolver
//! - [`cart`] - Cart aggregate
//! - [`discount`] - Group discount calculator
//! - [`order`] - Order renderer
//! - [`checkout`] - Checkout state machine
//! - [`validation`] - Checks for collaborator input
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use vitrine_core::{compute, Cart, DiscountPolicy, DiscountRate, PolicyTable, Product};
//!
//! let shampoo = Product {
//!     id: "p1".into(), code: "SH-01".into(), name: "Shampoo".into(),
//!     description: None, price_cents: 1000, group: "LINHA X".into(),
//!     category: "Cabelo".into(), is_active: true,
//! };
//! let policies = PolicyTable::from_policies(vec![
//!     DiscountPolicy::new("LINHA X", 5, Some(9), DiscountRate::from_bps(1000)),
//! ]);
//!
//! let mut cart = Cart::new();
//! for _ in 0..5 {
//!     cart.add_item(&shampoo);
//! }
//!
//! let summary = compute(cart.entries(), &policies);
//! assert_eq!(summary.subtotal.cents(), 5000);
//! assert_eq!(summary.total_discount.cents(), 500);
//! assert_eq!(summary.grand_total.cents(), 4500);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod discount;
pub mod error;
pub mod money;
pub mod order;
pub mod policy;
pub mod types;
pub mod validation;

// =============================================================================
// Limits
// =============================================================================

/// Maximum quantity of a single product in the cart.
///
/// Keeps line totals and group subtotals far from the i64 bounds.
pub const MAX_ITEM_QUANTITY: i64 = 9_999;

/// Maximum unit price in cents (R$ 10.000.000,00).
pub const MAX_PRICE_CENTS: i64 = 1_000_000_000;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartEntry};
pub use checkout::{Checkout, CheckoutStep, CustomerForm};
pub use discount::{compute, DiscountSummary, GroupDiscountResult, LineDiscount};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{CurrencyFormat, Money};
pub use order::{OrderDocument, RenderOptions, SharePayload};
pub use policy::PolicyTable;
pub use types::*;
