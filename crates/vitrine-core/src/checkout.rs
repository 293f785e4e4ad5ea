//! # Checkout Flow
//!
//! Two-step state machine between the cart and a finished order.
//!
//! ```text
//! ┌────────────────────────────┐  continue_to_summary()  ┌──────────────────────┐
//! │  CollectingCustomerData    │ ──────────────────────► │  ReviewingSummary    │
//! │  (form being filled)       │   all fields non-empty  │  (order text ready)  │
//! │                            │ ◄────────────────────── │                      │
//! └────────────────────────────┘        back()           └──────────┬───────────┘
//!              ▲                     (form kept)                    │ finalize()
//!              │                                                    ▼
//!              └──────────────────── cart.clear(), form reset ──────┘
//! ```
//!
//! There is no "submitted" state: the order leaves the system as text through
//! the share/download sinks.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::types::{CustomerData, DeliveryWindow, PaymentPreference};
use crate::validation::validate_customer_form;

/// Raw checkout form, as typed by the customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub tax_id: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub payment: Option<PaymentPreference>,
    #[serde(default)]
    pub delivery: Option<DeliveryWindow>,
}

impl CustomerForm {
    /// Whether the form would pass validation.
    pub fn is_complete(&self) -> bool {
        validate_customer_form(self).is_ok()
    }
}

impl From<&CustomerData> for CustomerForm {
    fn from(data: &CustomerData) -> Self {
        CustomerForm {
            full_name: data.full_name.clone(),
            tax_id: data.tax_id.clone(),
            address: data.address.clone(),
            phone: data.phone.clone(),
            payment: Some(data.payment),
            delivery: Some(data.delivery),
        }
    }
}

/// Where the checkout currently is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    #[default]
    CollectingCustomerData,
    ReviewingSummary,
}

impl CheckoutStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::CollectingCustomerData => "collecting customer data",
            CheckoutStep::ReviewingSummary => "reviewing summary",
        }
    }
}

/// Checkout session for one cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Checkout {
    step: CheckoutStep,
    form: CustomerForm,
}

impl Checkout {
    pub fn new() -> Self {
        Checkout::default()
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    pub fn form(&self) -> &CustomerForm {
        &self.form
    }

    /// Replaces the form contents. Only allowed while collecting data.
    pub fn update_form(&mut self, form: CustomerForm) -> CoreResult<()> {
        self.expect_step(CheckoutStep::CollectingCustomerData)?;
        self.form = form;
        Ok(())
    }

    /// Validates the form and moves to the summary.
    ///
    /// On success the validated [`CustomerData`] is attached to `cart` and
    /// returned. On failure the step does not change and the first missing
    /// field is reported.
    pub fn continue_to_summary(&mut self, cart: &mut Cart) -> CoreResult<CustomerData> {
        self.expect_step(CheckoutStep::CollectingCustomerData)?;
        let customer = validate_customer_form(&self.form)?;
        cart.set_customer(customer.clone());
        self.step = CheckoutStep::ReviewingSummary;
        Ok(customer)
    }

    /// Returns from the summary to the form. The form keeps its contents.
    pub fn back(&mut self) -> CoreResult<()> {
        self.expect_step(CheckoutStep::ReviewingSummary)?;
        self.step = CheckoutStep::CollectingCustomerData;
        Ok(())
    }

    /// Completes the order: clears the cart and resets the form.
    pub fn finalize(&mut self, cart: &mut Cart) -> CoreResult<()> {
        self.expect_step(CheckoutStep::ReviewingSummary)?;
        cart.clear();
        *self = Checkout::default();
        Ok(())
    }

    fn expect_step(&self, expected: CheckoutStep) -> CoreResult<()> {
        if self.step != expected {
            return Err(CoreError::InvalidCheckoutStep {
                current: self.step.as_str(),
                expected: expected.as_str(),
            });
        }
        Ok(())
    }
}
