//! # Checkout Commands
//!
//! Drives the two-step checkout and hands the rendered order to the share
//! and download sinks.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  update_customer_form ──► continue_to_summary ──► share_order           │
//! │          ▲                       │                download_order        │
//! │          │                       │                      │               │
//! │          └────── back_to_form ◄──┘                      ▼               │
//! │                                                   finish_order          │
//! │                                                   (cart cleared)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs::OpenOptions;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};
use vitrine_core::order::{order_document, order_filename, render_with, share_payload};
use vitrine_core::{
    compute, CheckoutStep, CoreError, CustomerData, CustomerForm, DiscountSummary, OrderDocument,
    SharePayload,
};

use crate::error::ApiError;
use crate::state::{CartState, CatalogState, CheckoutState, ConfigState};

/// Current checkout step and form contents.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub step: CheckoutStep,
    pub form: CustomerForm,
}

/// Everything the summary screen shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPreview {
    pub customer: CustomerData,
    pub summary: DiscountSummary,
    pub text: String,
}

fn checkout_response(checkout: &CheckoutState) -> CheckoutResponse {
    checkout.with_checkout(|c| CheckoutResponse {
        step: c.step(),
        form: c.form().clone(),
    })
}

pub fn get_checkout(checkout: &CheckoutState) -> CheckoutResponse {
    debug!("get_checkout command");
    checkout_response(checkout)
}

/// Saves what the customer typed so far.
pub fn update_customer_form(
    checkout: &CheckoutState,
    form: CustomerForm,
) -> Result<CheckoutResponse, ApiError> {
    debug!("update_customer_form command");
    checkout.with_checkout_mut(|c| c.update_form(form))?;
    Ok(checkout_response(checkout))
}

/// Validates the form, attaches the customer to the cart and renders the
/// summary.
pub fn continue_to_summary(
    catalog: &CatalogState,
    cart: &CartState,
    checkout: &CheckoutState,
    config: &ConfigState,
) -> Result<OrderPreview, ApiError> {
    debug!("continue_to_summary command");

    let moved = cart.with_cart_mut(|c| checkout.with_checkout_mut(|k| k.continue_to_summary(c)));
    if let Err(err) = &moved {
        warn!("checkout blocked: {}", err);
    }
    moved?;

    preview(catalog, cart, checkout, config)
}

/// Returns to the form. The form keeps its contents.
pub fn back_to_form(checkout: &CheckoutState) -> Result<CheckoutResponse, ApiError> {
    debug!("back_to_form command");
    checkout.with_checkout_mut(|c| c.back())?;
    Ok(checkout_response(checkout))
}

/// Renders the order for the current cart and customer.
///
/// Only available on the summary step; discounts are recomputed against the
/// policy table as it is now.
pub fn preview(
    catalog: &CatalogState,
    cart: &CartState,
    checkout: &CheckoutState,
    config: &ConfigState,
) -> Result<OrderPreview, ApiError> {
    let step = checkout.with_checkout(|c| c.step());
    if step != CheckoutStep::ReviewingSummary {
        return Err(CoreError::InvalidCheckoutStep {
            current: step.as_str(),
            expected: CheckoutStep::ReviewingSummary.as_str(),
        }
        .into());
    }

    let policies = catalog.policies();
    let options = config.render_options();
    cart.with_cart(|c| -> Result<OrderPreview, ApiError> {
        let customer = c
            .customer()
            .cloned()
            .ok_or(CoreError::CustomerNotAttached)?;
        let summary = compute(c.entries(), &policies);
        let text = render_with(c.entries(), &customer, &summary, &options);
        Ok(OrderPreview {
            customer,
            summary,
            text,
        })
    })
}

/// Builds the payload for the native share dialog.
pub fn share_order(
    catalog: &CatalogState,
    cart: &CartState,
    checkout: &CheckoutState,
    config: &ConfigState,
) -> Result<SharePayload, ApiError> {
    debug!("share_order command");
    let preview = preview(catalog, cart, checkout, config)?;
    Ok(share_payload(preview.text, &config.render_options()))
}

/// Timestamps tried after the first one before a download gives up.
const MAX_NAME_RETRIES: i64 = 1_000;

/// Writes `pedido-<millis>.txt` into the configured output folder and
/// returns its path. Existing orders are never overwritten.
pub fn download_order(
    catalog: &CatalogState,
    cart: &CartState,
    checkout: &CheckoutState,
    config: &ConfigState,
) -> Result<PathBuf, ApiError> {
    debug!(output_dir = %config.output_dir.display(), "download_order command");
    let preview = preview(catalog, cart, checkout, config)?;
    let at = Utc::now();
    let document = order_document(preview.text, at);

    let path = write_new_order(&config.output_dir, document, at)?;

    info!(path = %path.display(), total = %preview.summary.grand_total, "order downloaded");
    Ok(path)
}

/// Creates the order file under `dir`. When the name is taken, the
/// timestamp is bumped one millisecond at a time until a free name is found.
fn write_new_order(dir: &Path, document: OrderDocument, at: DateTime<Utc>) -> io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;

    let mut filename = document.filename;
    for retry in 1..=MAX_NAME_RETRIES + 1 {
        let path = dir.join(&filename);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                file.write_all(document.text.as_bytes())?;
                return Ok(path);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!(filename = %filename, "order file name taken");
                filename = order_filename(at + Duration::milliseconds(retry));
            }
            Err(e) => return Err(e),
        }
    }

    Err(io::Error::new(
        ErrorKind::AlreadyExists,
        "no free order file name in the output folder",
    ))
}

/// Closes the checkout: clears the cart and resets the form.
pub fn finish_order(cart: &CartState, checkout: &CheckoutState) -> Result<(), ApiError> {
    debug!("finish_order command");
    cart.with_cart_mut(|c| checkout.with_checkout_mut(|k| k.finalize(c)))?;
    info!("order finished, cart cleared");
    Ok(())
}
