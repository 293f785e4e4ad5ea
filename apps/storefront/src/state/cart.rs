//! # Cart and Checkout State
//!
//! Holds the session's cart aggregate and checkout state machine.
//!
//! ## Thread Safety
//! Both are wrapped in `Arc<Mutex<T>>` because several commands read and
//! modify them and only one command may modify them at a time.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Storefront Action        Command                 Cart State Change     │
//! │  ─────────────────        ───────                 ─────────────────     │
//! │                                                                         │
//! │  Click Product ──────────► add_to_cart() ───────► qty += 1 / new entry │
//! │                                                                         │
//! │  Change Quantity ────────► update_cart_item() ──► qty = n (≤0 deletes) │
//! │                                                                         │
//! │  Click Minus ────────────► remove_from_cart() ──► qty -= 1 (1 deletes) │
//! │                                                                         │
//! │  Click Clear ────────────► clear_cart() ────────► entries + customer   │
//! │                                                                         │
//! │  View Cart ──────────────► get_cart() ──────────► (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands that touch both holders lock the cart first, then the checkout.

use std::sync::{Arc, Mutex, PoisonError};

use vitrine_core::{Cart, Checkout};

/// Thread-safe cart state.
#[derive(Debug, Clone)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        CartState {
            cart: Arc::new(Mutex::new(Cart::new())),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let count = cart_state.with_cart(|cart| cart.total_item_count());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_cart_mut(|cart| cart.add_item(&product));
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe checkout state.
#[derive(Debug, Clone, Default)]
pub struct CheckoutState {
    checkout: Arc<Mutex<Checkout>>,
}

impl CheckoutState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the checkout.
    pub fn with_checkout<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Checkout) -> R,
    {
        let checkout = self.checkout.lock().unwrap_or_else(PoisonError::into_inner);
        f(&checkout)
    }

    /// Executes a function with write access to the checkout.
    pub fn with_checkout_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Checkout) -> R,
    {
        let mut checkout = self.checkout.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut checkout)
    }

    /// Drops the form and returns to the first step, whatever the current step.
    pub fn reset(&self) {
        self.with_checkout_mut(|c| *c = Checkout::default());
    }
}
