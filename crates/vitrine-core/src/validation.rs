//! # Validation Module
//!
//! Input checks run at the edges of the core.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Where validation happens                           │
//! │                                                                         │
//! │  Catalog collaborator ──► validate_product()        ──┐                 │
//! │  Admin collaborator   ──► validate_policy()           ├──► core inputs  │
//! │                           find_policy_overlaps()    ──┘                 │
//! │                                                                         │
//! │  Checkout form        ──► validate_customer_form()  ──► CustomerData    │
//! │  Order lines          ──► validate_quantity()       ──► cart mutations  │
//! │                                                                         │
//! │  The cart and the calculator trust their inputs; they never re-check.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::checkout::CustomerForm;
use crate::error::ValidationError;
use crate::types::{CustomerData, DiscountPolicy, DiscountRate, Product};
use crate::{MAX_ITEM_QUANTITY, MAX_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Customer Data
// =============================================================================

/// Turns a checkout form into [`CustomerData`].
///
/// ## Rules
/// - Every text field must be non-empty after trimming
/// - Payment and delivery preferences must be chosen
/// - The first missing field is reported, in form order
///
/// ```rust
/// use vitrine_core::checkout::CustomerForm;
/// use vitrine_core::validation::validate_customer_form;
///
/// let form = CustomerForm::default();
/// let err = validate_customer_form(&form).unwrap_err();
/// assert_eq!(err.to_string(), "full_name is required");
/// ```
pub fn validate_customer_form(form: &CustomerForm) -> ValidationResult<CustomerData> {
    let full_name = required_text("full_name", &form.full_name)?;
    let tax_id = required_text("tax_id", &form.tax_id)?;
    let address = required_text("address", &form.address)?;
    let phone = required_text("phone", &form.phone)?;
    let payment = form.payment.ok_or_else(|| required("payment"))?;
    let delivery = form.delivery.ok_or_else(|| required("delivery"))?;

    Ok(CustomerData {
        full_name,
        tax_id,
        address,
        phone,
        payment,
        delivery,
    })
}

fn required_text(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(required(field));
    }
    Ok(value.to_string())
}

fn required(field: &str) -> ValidationError {
    ValidationError::Required {
        field: field.to_string(),
    }
}

// =============================================================================
// Catalog Input
// =============================================================================

/// Validates a price in cents.
///
/// Zero is allowed (free items); negative prices and prices above
/// [`MAX_PRICE_CENTS`] are not.
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates a requested quantity for one product.
///
/// ## Rules
/// - Must be positive
/// - Must not exceed [`MAX_ITEM_QUANTITY`]
///
/// ```rust
/// use vitrine_core::validation::validate_quantity;
///
/// assert!(validate_quantity(5).is_ok());
/// assert!(validate_quantity(0).is_err());
/// assert!(validate_quantity(i64::MAX / 10).is_err());
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a catalog product before it is offered.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    required_text("id", &product.id)?;
    required_text("code", &product.code)?;
    required_text("name", &product.name)?;
    required_text("group", &product.group)?;
    validate_price_cents(product.price_cents)
}

// =============================================================================
// Policy Input
// =============================================================================

/// Validates a single discount band.
///
/// ## Rules
/// - Group must not be empty
/// - Minimum quantity must be positive
/// - Maximum, when present, must not be below the minimum
/// - Rate must be between 0% and 100%
pub fn validate_policy(policy: &DiscountPolicy) -> ValidationResult<()> {
    required_text("group", &policy.group)?;

    if policy.min_quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "min_quantity".to_string(),
        });
    }

    if let Some(max) = policy.max_quantity {
        if max < policy.min_quantity {
            return Err(ValidationError::InvalidRange {
                min: policy.min_quantity,
                max,
            });
        }
    }

    if policy.rate.bps() > DiscountRate::FULL_BPS {
        return Err(ValidationError::OutOfRange {
            field: "rate".to_string(),
            min: 0,
            max: DiscountRate::FULL_BPS as i64,
        });
    }

    Ok(())
}

/// Lists every pair of bands in the same group whose ranges intersect.
///
/// The resolver still answers deterministically for overlapping bands; this
/// lets the admin collaborator warn before saving them.
pub fn find_policy_overlaps(policies: &[DiscountPolicy]) -> Vec<ValidationError> {
    let mut overlaps = Vec::new();
    for (i, first) in policies.iter().enumerate() {
        for second in &policies[i + 1..] {
            if first.group == second.group && bands_intersect(first, second) {
                overlaps.push(ValidationError::Overlap {
                    group: first.group.clone(),
                    first: first.id.clone(),
                    second: second.id.clone(),
                });
            }
        }
    }
    overlaps
}

fn bands_intersect(a: &DiscountPolicy, b: &DiscountPolicy) -> bool {
    let a_max = a.max_quantity.unwrap_or(i64::MAX);
    let b_max = b.max_quantity.unwrap_or(i64::MAX);
    a.min_quantity <= b_max && b.min_quantity <= a_max
}

/// Validates every policy, then rejects overlapping bands.
pub fn validate_policy_table(policies: &[DiscountPolicy]) -> ValidationResult<()> {
    for policy in policies {
        validate_policy(policy)?;
    }
    match find_policy_overlaps(policies).into_iter().next() {
        Some(overlap) => Err(overlap),
        None => Ok(()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
