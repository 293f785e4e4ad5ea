//! # Vitrine Storefront
//!
//! Session layer on top of `vitrine-core`: loads the catalog, holds the cart
//! and checkout for one shopper, and delivers the finished order text.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Session                               │
//! │                                                                         │
//! │  main.rs ────► Parses arguments, sets up logging, reads VITRINE_*      │
//! │                                                                         │
//! │  lib.rs ─────► Storefront (state bundle) and the scripted order run    │
//! │                                                                         │
//! │  commands/ ──► add_to_cart, continue_to_summary, download_order, ...   │
//! │                                                                         │
//! │  state/ ─────► CatalogState, CartState, CheckoutState, ConfigState     │
//! │                                                                         │
//! │  catalog.rs ─► catalog.json / order.json parsing                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command only borrows the state it needs.

pub mod catalog;
pub mod commands;
pub mod error;
pub mod state;

use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use vitrine_core::validation::validate_quantity;
use vitrine_core::SharePayload;

use catalog::{Catalog, OrderLine, OrderRequest};
use error::ApiError;
use state::{CartState, CatalogState, CheckoutState, ConfigState};

/// Command line arguments.
#[derive(Debug, Clone, Parser)]
#[command(name = "vitrine", about = "Prices a storefront order and writes the order summary", long_about = None)]
pub struct Cli {
    /// Catalog JSON with products and discount policies
    #[arg(short, long, env = "VITRINE_CATALOG")]
    pub catalog: PathBuf,

    /// Order request JSON with cart lines and customer data
    #[arg(short, long)]
    pub order: PathBuf,

    /// Folder for the downloaded order (overrides VITRINE_OUTPUT_DIR)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Print the share payload instead of writing a file
    #[arg(long)]
    pub print_only: bool,
}

/// All session state, bundled for the binary and for tests.
#[derive(Debug, Clone)]
pub struct Storefront {
    pub catalog: CatalogState,
    pub cart: CartState,
    pub checkout: CheckoutState,
    pub config: ConfigState,
}

impl Storefront {
    pub fn new(catalog: Catalog, config: ConfigState) -> Self {
        Storefront {
            catalog: CatalogState::new(catalog),
            cart: CartState::new(),
            checkout: CheckoutState::new(),
            config,
        }
    }

    /// Empties the cart and returns the checkout to a blank form.
    pub fn reset(&self) {
        self.cart.with_cart_mut(|c| c.clear());
        self.checkout.reset();
    }
}

/// Where the finished order went.
#[derive(Debug, Clone)]
pub enum Delivery {
    Shared(SharePayload),
    Downloaded(PathBuf),
}

/// Plays an order request through the storefront the way a shopper would:
/// fill the cart, fill the form, review, deliver, finish.
///
/// Lines naming the same product are added up. The session is reset
/// afterwards, whether the order went through or not, so the same
/// `Storefront` can take the next order.
pub fn place_order(
    storefront: &Storefront,
    request: &OrderRequest,
    print_only: bool,
) -> Result<Delivery, ApiError> {
    let result = fill_and_deliver(storefront, request, print_only);
    if let Err(err) = &result {
        warn!(code = ?err.code, "order not placed, session reset: {}", err.message);
        storefront.reset();
    }
    result
}

fn fill_and_deliver(
    storefront: &Storefront,
    request: &OrderRequest,
    print_only: bool,
) -> Result<Delivery, ApiError> {
    let Storefront {
        catalog,
        cart,
        checkout,
        config,
    } = storefront;

    for line in merge_lines(&request.items)? {
        commands::add_to_cart(catalog, cart, &line.product_id)?;
        commands::update_cart_item(catalog, cart, &line.product_id, line.quantity)?;
    }

    commands::update_customer_form(checkout, request.customer.clone())?;
    let preview = commands::continue_to_summary(catalog, cart, checkout, config)?;
    info!(
        groups = preview.summary.groups.len(),
        subtotal = %preview.summary.subtotal,
        discount = %preview.summary.total_discount,
        total = %preview.summary.grand_total,
        "order summary ready"
    );

    let delivery = if print_only {
        Delivery::Shared(commands::share_order(catalog, cart, checkout, config)?)
    } else {
        Delivery::Downloaded(commands::download_order(catalog, cart, checkout, config)?)
    };

    commands::finish_order(cart, checkout)?;
    Ok(delivery)
}

/// One line per product, in first-appearance order, with quantities summed.
fn merge_lines(items: &[OrderLine]) -> Result<Vec<OrderLine>, ApiError> {
    let mut merged: Vec<OrderLine> = Vec::with_capacity(items.len());
    for line in items {
        if line.quantity <= 0 {
            return Err(ApiError::validation(format!(
                "quantity for {} must be positive",
                line.product_id
            )));
        }
        match merged.iter_mut().find(|m| m.product_id == line.product_id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(line.quantity),
            None => merged.push(line.clone()),
        }
    }

    for line in &merged {
        validate_quantity(line.quantity).map_err(|err| {
            ApiError::validation(format!("{} for {}", err, line.product_id))
        })?;
    }
    Ok(merged)
}

/// Loads inputs named on the command line and places the order.
pub fn run(cli: &Cli, mut config: ConfigState) -> Result<Delivery, ApiError> {
    if let Some(dir) = &cli.out_dir {
        config.output_dir = dir.clone();
    }

    let catalog = Catalog::load(&cli.catalog)?;
    info!(
        products = catalog.products.len(),
        policies = catalog.policies.len(),
        "catalog loaded"
    );
    let request = OrderRequest::load(&cli.order)?;

    let storefront = Storefront::new(catalog, config);
    place_order(&storefront, &request, cli.print_only)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=vitrine=trace` - Show trace for vitrine crates only
/// - Default: INFO, DEBUG for vitrine crates
///
/// Logs go to stderr; stdout carries the order text in `--print-only` mode.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,vitrine=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
