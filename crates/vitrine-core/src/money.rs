//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A cart with three groups at 10% each can drift by a cent between      │
//! │  "sum of group totals" and "subtotal - sum of discounts".              │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Every figure is an i64 count of centavos, so the reconciliation     │
//! │    grand_total == subtotal - discounts holds exactly.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vitrine_core::money::Money;
//!
//! let price = Money::from_cents(1099); // R$ 10,99
//! let line = price * 3;                // R$ 32,97
//! assert_eq!(line.cents(), 3297);
//! assert_eq!(line.to_string(), "R$ 32,97");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::DiscountRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (centavos).
///
/// ## Where Money is Used
/// ```text
/// Product.price_cents ──► CartEntry.line_total ──► GroupDiscountResult.subtotal
///                                                          │
///                          DiscountRate ──► calculate_discount()
///                                                          │
///                                   DiscountSummary.grand_total ──► order text
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ```rust
    /// use vitrine_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (reais) portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity, saturating at the i64 bounds.
    ///
    /// ```rust
    /// use vitrine_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Calculates the discount amount for a rate, rounding half up to the
    /// nearest cent.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`, widened to i128 so
    /// large carts cannot overflow.
    ///
    /// ```rust
    /// use vitrine_core::money::Money;
    /// use vitrine_core::types::DiscountRate;
    ///
    /// let subtotal = Money::from_cents(5000);        // R$ 50,00
    /// let rate = DiscountRate::from_bps(1000);       // 10%
    /// assert_eq!(subtotal.calculate_discount(rate).cents(), 500);
    /// ```
    ///
    /// The result never exceeds `self` for non-negative amounts and rates
    /// up to 100%.
    pub fn calculate_discount(&self, rate: DiscountRate) -> Money {
        let discount_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(discount_cents as i64)
    }

    /// Formats the value with an explicit currency convention.
    ///
    /// ```rust
    /// use vitrine_core::money::{CurrencyFormat, Money};
    ///
    /// let usd = CurrencyFormat::new("$", ',', '.');
    /// assert_eq!(Money::from_cents(123456).format(&usd), "$ 1,234.56");
    /// ```
    pub fn format(&self, format: &CurrencyFormat) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let major = group_thousands(self.major().unsigned_abs(), format.thousands_separator);
        format!(
            "{}{} {}{}{:02}",
            sign,
            format.symbol,
            major,
            format.decimal_separator,
            self.minor()
        )
    }
}

/// Inserts `separator` every three digits, counting from the right.
fn group_thousands(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }
    grouped
}

// =============================================================================
// Currency Format
// =============================================================================

/// Fixed currency/locale convention used for every displayed amount.
///
/// The storefront sells in Brazilian reais, so the default is the pt-BR
/// convention: `R$ 1.234,56`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyFormat {
    /// Symbol printed before the amount.
    pub symbol: String,

    /// Separator between groups of three integer digits.
    pub thousands_separator: char,

    /// Separator before the two fraction digits.
    pub decimal_separator: char,
}

impl CurrencyFormat {
    /// Creates a currency format.
    pub fn new(symbol: impl Into<String>, thousands_separator: char, decimal_separator: char) -> Self {
        CurrencyFormat {
            symbol: symbol.into(),
            thousands_separator,
            decimal_separator,
        }
    }

    /// Brazilian real, pt-BR separators.
    pub fn brl() -> Self {
        CurrencyFormat::new("R$", '.', ',')
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        CurrencyFormat::brl()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display uses the default (pt-BR) convention.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(&CurrencyFormat::default()))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition and subtraction saturate at the i64 bounds.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

/// Multiplication by a quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor(), 99);
    }

    #[test]
    fn test_display_brl() {
        assert_eq!(Money::from_cents(1099).to_string(), "R$ 10,99");
        assert_eq!(Money::from_cents(500).to_string(), "R$ 5,00");
        assert_eq!(Money::from_cents(0).to_string(), "R$ 0,00");
        assert_eq!(Money::from_cents(-550).to_string(), "-R$ 5,50");
    }

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(Money::from_cents(123_456).to_string(), "R$ 1.234,56");
        assert_eq!(Money::from_cents(100_000_000).to_string(), "R$ 1.000.000,00");
        assert_eq!(Money::from_cents(99_999).to_string(), "R$ 999,99");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
        assert_eq!((a * i64::MAX).cents(), i64::MAX);
        assert_eq!((Money::from_cents(i64::MAX) + b).cents(), i64::MAX);
        assert_eq!((Money::from_cents(i64::MIN) - b).cents(), i64::MIN);

        let total: Money = [a, b, b].iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_discount_basic() {
        let amount = Money::from_cents(5000);
        let discount = amount.calculate_discount(DiscountRate::from_bps(1000));
        assert_eq!(discount.cents(), 500);
    }

    #[test]
    fn test_discount_rounds_half_up() {
        // R$ 0,05 at 10% = 0,5 centavo → 1 centavo
        let amount = Money::from_cents(5);
        assert_eq!(amount.calculate_discount(DiscountRate::from_bps(1000)).cents(), 1);

        // R$ 0,04 at 10% = 0,4 centavo → 0
        let amount = Money::from_cents(4);
        assert_eq!(amount.calculate_discount(DiscountRate::from_bps(1000)).cents(), 0);
    }

    #[test]
    fn test_discount_never_exceeds_amount() {
        let amount = Money::from_cents(1);
        let full = amount.calculate_discount(DiscountRate::from_bps(10_000));
        assert_eq!(full, amount);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::from_cents(100).is_positive());
        assert!(Money::from_cents(-100).is_negative());
    }
}
