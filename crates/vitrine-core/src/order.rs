//! # Order Renderer
//!
//! Produces the canonical plain-text order record from the cart, the
//! customer data and the discount summary.
//!
//! ## Document Layout
//! ```text
//! ═══════════════════════════════
//!   PEDIDO <STORE NAME>
//! ═══════════════════════════════
//!
//! DADOS DO CLIENTE                 ◄── every CustomerData field
//! ITENS DO PEDIDO                  ◄── one block per cart entry
//! DESCONTOS POR GRUPO              ◄── only groups with rate > 0
//! Subtotal / Total Descontos / TOTAL FINAL
//! ```
//!
//! Rendering is pure: no clock, no I/O. The share and download sinks take the
//! text verbatim.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::CartEntry;
use crate::discount::DiscountSummary;
use crate::money::{CurrencyFormat, Money};
use crate::types::CustomerData;

const HEAVY_RULE: &str = "═══════════════════════════════";
const LIGHT_RULE: &str = "───────────────────────────────";

/// Prefix of every order file name.
pub const ORDER_FILE_PREFIX: &str = "pedido";

/// Presentation settings that do not change per order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    /// Shown in the header, upper-cased.
    pub store_name: String,
    pub currency: CurrencyFormat,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            store_name: "Vitrine".to_string(),
            currency: CurrencyFormat::default(),
        }
    }
}

/// Text plus the file name the download sink should use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderDocument {
    pub filename: String,
    pub text: String,
}

/// Payload for a native share dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SharePayload {
    pub title: String,
    pub text: String,
}

/// File name for an order rendered at `at`: `pedido-<unix millis>.txt`.
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use vitrine_core::order::order_filename;
///
/// let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
/// assert_eq!(order_filename(at), "pedido-1700000000123.txt");
/// ```
pub fn order_filename(at: DateTime<Utc>) -> String {
    format!("{}-{}.txt", ORDER_FILE_PREFIX, at.timestamp_millis())
}

/// Renders the order with default options (pt-BR, BRL).
pub fn render(entries: &[CartEntry], customer: &CustomerData, summary: &DiscountSummary) -> String {
    render_with(entries, customer, summary, &RenderOptions::default())
}

/// Renders the order text.
///
/// The caller is responsible for passing validated customer data (the
/// checkout gate does this) and a summary computed from the same entries.
pub fn render_with(
    entries: &[CartEntry],
    customer: &CustomerData,
    summary: &DiscountSummary,
    options: &RenderOptions,
) -> String {
    let money = |amount: Money| amount.format(&options.currency);
    let mut doc = Document::default();

    doc.line(HEAVY_RULE);
    doc.line(format!("  PEDIDO {}", options.store_name.to_uppercase()));
    doc.line(HEAVY_RULE);
    doc.blank();

    doc.line("DADOS DO CLIENTE");
    doc.line(LIGHT_RULE);
    doc.line(format!("Nome: {}", customer.full_name));
    doc.line(format!("CPF/CNPJ: {}", customer.tax_id));
    doc.line(format!("Endereço: {}", customer.address));
    doc.line(format!("WhatsApp: {}", customer.phone));
    doc.line(format!("Pagamento: {}", customer.payment.label()));
    doc.line(format!("Entrega: {}", customer.delivery.label()));
    doc.blank();

    doc.line("ITENS DO PEDIDO");
    doc.line(LIGHT_RULE);
    for entry in entries {
        let product = &entry.product;
        let line = summary.line(&product.id);
        let line_total = entry.line_total();
        let discount = line.map_or(Money::zero(), |l| l.discount);

        doc.blank();
        doc.line(product.name.as_str());
        doc.line(format!("  Cód: {}", product.code));
        doc.line(format!("  Qtd: {} x {}", entry.quantity, money(product.price())));
        if let Some(line) = line.filter(|l| !l.rate.is_zero()) {
            doc.line(format!(
                "  Desconto aplicado: {} (-{})",
                line.rate,
                money(line.discount)
            ));
        }
        doc.line(format!("  Subtotal: {}", money(line_total - discount)));
    }
    doc.blank();

    doc.line(LIGHT_RULE);
    doc.line(format!("Subtotal: {}", money(summary.subtotal)));

    let mut discounted = summary.discounted_groups().peekable();
    if discounted.peek().is_some() {
        doc.blank();
        doc.line("DESCONTOS POR GRUPO:");
        for group in discounted {
            doc.line(format!(
                "  {} ({} itens): {} (-{})",
                group.group,
                group.quantity,
                group.rate,
                money(group.discount)
            ));
        }
        doc.blank();
    }

    doc.line(format!("Total Descontos: -{}", money(summary.total_discount)));
    doc.line(LIGHT_RULE);
    doc.line(format!("TOTAL FINAL: {}", money(summary.grand_total)));
    doc.line(HEAVY_RULE);

    doc.finish()
}

/// Builds the download payload for an order rendered at `at`.
pub fn order_document(text: String, at: DateTime<Utc>) -> OrderDocument {
    OrderDocument {
        filename: order_filename(at),
        text,
    }
}

/// Builds the share payload.
pub fn share_payload(text: String, options: &RenderOptions) -> SharePayload {
    SharePayload {
        title: format!("Pedido {}", options.store_name),
        text,
    }
}

#[derive(Default)]
struct Document {
    text: String,
}

impl Document {
    fn line(&mut self, line: impl AsRef<str>) {
        self.text.push_str(line.as_ref());
        self.text.push('\n');
    }

    fn blank(&mut self) {
        self.text.push('\n');
    }

    fn finish(self) -> String {
        self.text
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
