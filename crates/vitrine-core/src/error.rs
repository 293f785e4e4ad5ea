//! # Error Types
//!
//! Domain-specific error types for vitrine-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vitrine-core errors (this file)                                       │
//! │  ├── CoreError        - Domain rule violations                         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  storefront errors (app crate)                                         │
//! │  └── ApiError         - What the caller sees (serialized)              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Caller                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart mutations and discount math never fail. Errors only come from the
//! checkout gate and from validating collaborator input.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id is not in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Product exists but is no longer offered.
    #[error("Product is not available: {0}")]
    ProductInactive(String),

    /// Checkout operation requested from the wrong step.
    ///
    /// ## When This Occurs
    /// - Rendering the order while still collecting customer data
    /// - Finalizing before the summary was reviewed
    #[error("Checkout is {current}, expected {expected}")]
    InvalidCheckoutStep {
        current: &'static str,
        expected: &'static str,
    },

    /// The summary was requested but the cart has no customer data, e.g.
    /// because the cart was cleared while reviewing.
    #[error("No customer data attached to the cart")]
    CustomerNotAttached,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// A band whose maximum is below its minimum.
    #[error("maximum quantity {max} is below minimum quantity {min}")]
    InvalidRange { min: i64, max: i64 },

    /// Two bands of the same group qualify for the same quantity.
    #[error("policies {first} and {second} overlap in group '{group}'")]
    Overlap {
        group: String,
        first: String,
        second: String,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
