//! # Domain Types
//!
//! Core domain types used throughout Vitrine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │ DiscountPolicy  │   │  CustomerData   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  group          │   │  full_name      │       │
//! │  │  code           │   │  min_quantity   │   │  tax_id         │       │
//! │  │  name           │   │  max_quantity   │   │  address        │       │
//! │  │  price_cents    │   │  rate           │   │  phone          │       │
//! │  │  group          │   └─────────────────┘   │  payment        │       │
//! │  │  category       │                         │  delivery       │       │
//! │  └─────────────────┘   ┌─────────────────┐   └─────────────────┘       │
//! │                        │  DiscountRate   │                              │
//! │                        │  bps (u32)      │                              │
//! │                        │  1000 = 10%     │                              │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products and policies are owned by external collaborators (catalog and
//! admin panel). The core only reads them.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Discount Rate
// =============================================================================

/// Discount rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000, so `1000` is 10% and `1250` is 12.5%.
/// Keeping the rate integral means `subtotal × rate` never leaves cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(transparent)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Basis points that make up 100%.
    pub const FULL_BPS: u32 = 10_000;

    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a rate from a fraction in `[0, 1]` (`0.10` = 10%).
    pub fn from_fraction(fraction: f64) -> Self {
        DiscountRate((fraction * Self::FULL_BPS as f64).round().max(0.0) as u32)
    }

    /// Creates a rate from a percentage (`10.0` = 10%), the unit the admin
    /// panel edits policies in.
    pub fn from_percentage(pct: f64) -> Self {
        DiscountRate((pct * 100.0).round().max(0.0) as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

/// Shows the rate the way the order text does: `10%`, `12,5%`.
impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let fraction = self.0 % 100;
        if fraction == 0 {
            write!(f, "{}%", whole)
        } else if fraction % 10 == 0 {
            write!(f, "{},{}%", whole, fraction / 10)
        } else {
            write!(f, "{},{:02}%", whole, fraction)
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the storefront catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier.
    pub id: String,

    /// Internal product code printed on the order.
    pub code: String,

    /// Display name.
    pub name: String,

    /// Optional long description for the product card.
    #[serde(default)]
    pub description: Option<String>,

    /// Unit price in cents.
    pub price_cents: i64,

    /// Pricing bucket. Discount tiers are resolved per group.
    pub group: String,

    /// Display/navigation bucket. Not used for pricing.
    pub category: String,

    /// Whether the product is offered (soft delete in the catalog).
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Product {
    /// Returns the unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Discount Policy
// =============================================================================

/// One quantity band of a group's progressive discount.
///
/// A group usually has several non-overlapping bands, e.g.
/// `[5, 9] → 10%`, `[10, ∞) → 15%`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountPolicy {
    pub id: String,

    /// Group the band applies to.
    pub group: String,

    /// Smallest aggregate quantity that qualifies (inclusive).
    pub min_quantity: i64,

    /// Largest aggregate quantity that qualifies (inclusive). `None` means
    /// unbounded above.
    pub max_quantity: Option<i64>,

    /// Rate applied to the whole group subtotal.
    pub rate: DiscountRate,
}

impl DiscountPolicy {
    /// Creates a policy with a fresh UUID v4 id.
    pub fn new(
        group: impl Into<String>,
        min_quantity: i64,
        max_quantity: Option<i64>,
        rate: DiscountRate,
    ) -> Self {
        DiscountPolicy {
            id: uuid::Uuid::new_v4().to_string(),
            group: group.into(),
            min_quantity,
            max_quantity,
            rate,
        }
    }

    /// Checks whether `quantity` falls inside this band.
    pub fn contains(&self, quantity: i64) -> bool {
        quantity >= self.min_quantity && self.max_quantity.map_or(true, |max| quantity <= max)
    }
}

// =============================================================================
// Customer Preferences
// =============================================================================

/// How the customer intends to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentPreference {
    /// Credit or debit card.
    Card,
    /// Bank slip (boleto).
    BankSlip,
    /// Instant transfer.
    Pix,
    /// Cash on delivery.
    Cash,
}

impl PaymentPreference {
    /// Label printed on the order.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentPreference::Card => "Cartão de Crédito/Débito",
            PaymentPreference::BankSlip => "Boleto Bancário",
            PaymentPreference::Pix => "PIX",
            PaymentPreference::Cash => "Dinheiro",
        }
    }
}

/// Preferred delivery window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryWindow {
    /// 08h - 12h.
    Morning,
    /// 12h - 16h.
    Afternoon,
    /// 16h - 19h.
    EndOfDay,
}

impl DeliveryWindow {
    /// Label printed on the order.
    pub fn label(&self) -> &'static str {
        match self {
            DeliveryWindow::Morning => "Manhã (08h - 12h)",
            DeliveryWindow::Afternoon => "Meio da Tarde (12h - 16h)",
            DeliveryWindow::EndOfDay => "Final do Dia (16h - 19h)",
        }
    }
}

// =============================================================================
// Customer Data
// =============================================================================

/// Validated contact and delivery data collected at checkout.
///
/// Only built through [`crate::validation::validate_customer_form`], so every
/// text field is non-empty and trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerData {
    pub full_name: String,
    /// CPF or CNPJ.
    pub tax_id: String,
    pub address: String,
    /// WhatsApp contact number.
    pub phone: String,
    pub payment: PaymentPreference,
    pub delivery: DeliveryWindow,
}

// =============================================================================
// Unit Tests
// =============================================================================
