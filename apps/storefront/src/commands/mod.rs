//! # Commands Module
//!
//! Storefront operations, one function per user action.
//!
//! ## Command Categories
//! - **Cart**: add, update, remove, clear, get
//! - **Checkout**: customer form, summary, share, download, finish
//! - **Policy**: admin edits of the discount table
//!
//! Commands take the state holders they need by reference and return
//! `Result<T, ApiError>` when they can fail.

pub mod cart;
pub mod checkout;
pub mod policy;

pub use cart::*;
pub use checkout::*;
pub use policy::*;
