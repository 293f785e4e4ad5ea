//! # State Module
//!
//! Session state for the storefront.
//!
//! ## Multiple State Types
//! Each concern gets its own holder, so commands declare exactly the state
//! they need and independent states never block each other.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌─────────────┐ │
//! │  │ CatalogState │  │  CartState   │  │CheckoutState │  │ ConfigState │ │
//! │  │              │  │              │  │              │  │             │ │
//! │  │  RwLock<     │  │  Arc<Mutex<  │  │  Arc<Mutex<  │  │  store_name │ │
//! │  │   Catalog>   │  │    Cart>>    │  │   Checkout>> │  │  currency   │ │
//! │  │  products +  │  │              │  │              │  │  output_dir │ │
//! │  │  policies    │  │              │  │              │  │             │ │
//! │  └──────────────┘  └──────────────┘  └──────────────┘  └─────────────┘ │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CatalogState: many readers, occasional admin writer                 │
//! │  • CartState / CheckoutState: exclusive access per command             │
//! │  • ConfigState: read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod catalog;
mod config;

pub use cart::{CartState, CheckoutState};
pub use catalog::CatalogState;
pub use config::{ConfigError, ConfigState};
