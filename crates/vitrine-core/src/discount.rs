//! # Group Discount Calculator
//!
//! Derives every monetary figure of a cart from its entries and the policy
//! table. Nothing here is cached: callers recompute after each mutation.
//!
//! ## Algorithm
//! ```text
//! entries ──► partition by product.group (first-appearance order)
//!                 │
//!                 ▼
//!          per group: Σ quantity, Σ line totals
//!                 │
//!                 ▼
//!          rate = policies.resolve(group, Σ quantity)   ◄── tier is driven by
//!                 │                                         the whole group,
//!                 ▼                                         not one product
//!          discount = subtotal × rate   (integer cents, half up)
//!          total    = subtotal − discount
//!                 │
//!                 ▼
//!          grand_total = Σ group totals
//!                      = cart subtotal − Σ discounts   (exact)
//! ```
//!
//! Each group discount is then apportioned to the group's lines with the
//! largest-remainder method, so the itemized discounts on an order add up
//! to the group figure to the cent.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;

use crate::cart::CartEntry;
use crate::money::Money;
use crate::policy::PolicyTable;
use crate::types::DiscountRate;

/// Discount outcome for one product group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GroupDiscountResult {
    pub group: String,
    /// Units of the group across all cart entries.
    pub quantity: i64,
    pub rate: DiscountRate,
    /// Pre-discount subtotal.
    pub subtotal: Money,
    /// `subtotal × rate`, never more than `subtotal`.
    pub discount: Money,
    /// `subtotal − discount`.
    pub total: Money,
}

/// A cart entry's share of its group discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineDiscount {
    pub product_id: String,
    pub group: String,
    /// Rate of the group the entry belongs to.
    pub rate: DiscountRate,
    /// Unit price × quantity.
    pub line_total: Money,
    /// Allocated part of the group discount.
    pub discount: Money,
    /// `line_total − discount`.
    pub net_total: Money,
}

/// Everything the cart view and the order renderer need.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountSummary {
    /// One result per group, in order of first appearance in the cart.
    pub groups: Vec<GroupDiscountResult>,
    /// One allocation per cart entry, in cart order.
    pub lines: Vec<LineDiscount>,
    pub subtotal: Money,
    pub total_discount: Money,
    pub grand_total: Money,
}

impl DiscountSummary {
    /// Looks up a group by label.
    pub fn group(&self, group: &str) -> Option<&GroupDiscountResult> {
        self.groups.iter().find(|g| g.group == group)
    }

    /// Looks up a line by product id.
    pub fn line(&self, product_id: &str) -> Option<&LineDiscount> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    /// Groups that actually received a discount.
    pub fn discounted_groups(&self) -> impl Iterator<Item = &GroupDiscountResult> {
        self.groups.iter().filter(|g| !g.rate.is_zero())
    }

    /// Rate applied to `group` (0 when the group is not in the cart).
    pub fn rate_for(&self, group: &str) -> DiscountRate {
        self.group(group).map(|g| g.rate).unwrap_or_default()
    }
}

/// Computes group discounts and totals for a set of cart entries.
///
/// ```rust
/// use vitrine_core::cart::Cart;
/// use vitrine_core::discount::compute;
/// use vitrine_core::policy::PolicyTable;
/// use vitrine_core::types::{DiscountPolicy, DiscountRate, Product};
///
/// let product = Product {
///     id: "p1".into(), code: "A-1".into(), name: "Shampoo".into(),
///     description: None, price_cents: 1000, group: "X".into(),
///     category: "Hair".into(), is_active: true,
/// };
/// let mut cart = Cart::new();
/// cart.add_item(&product);
/// cart.update_quantity("p1", 5);
///
/// let policies = PolicyTable::from_policies(vec![
///     DiscountPolicy::new("X", 5, Some(9), DiscountRate::from_bps(1000)),
/// ]);
/// let summary = compute(cart.entries(), &policies);
/// assert_eq!(summary.total_discount.cents(), 500);
/// assert_eq!(summary.grand_total.cents(), 4500);
/// ```
pub fn compute(entries: &[CartEntry], policies: &PolicyTable) -> DiscountSummary {
    // Partition: group label → indices of its entries, first appearance first.
    let mut order: Vec<(&str, Vec<usize>)> = Vec::new();
    let mut slot: HashMap<&str, usize> = HashMap::new();
    for (i, entry) in entries.iter().enumerate() {
        let group = entry.product.group.as_str();
        let at = *slot.entry(group).or_insert_with(|| {
            order.push((group, Vec::new()));
            order.len() - 1
        });
        order[at].1.push(i);
    }

    let mut groups = Vec::with_capacity(order.len());
    let mut line_discounts = vec![Money::zero(); entries.len()];
    let mut line_rates = vec![DiscountRate::zero(); entries.len()];

    for (group, members) in &order {
        let quantity: i64 = members.iter().map(|&i| entries[i].quantity).sum();
        let subtotal: Money = members.iter().map(|&i| entries[i].line_total()).sum();
        let rate = policies.resolve(group, quantity);
        let discount = subtotal.calculate_discount(rate);

        let totals: Vec<Money> = members.iter().map(|&i| entries[i].line_total()).collect();
        for (&i, share) in members.iter().zip(allocate(discount, &totals)) {
            line_discounts[i] = share;
            line_rates[i] = rate;
        }

        groups.push(GroupDiscountResult {
            group: (*group).to_string(),
            quantity,
            rate,
            subtotal,
            discount,
            total: subtotal - discount,
        });
    }

    let lines = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let line_total = entry.line_total();
            LineDiscount {
                product_id: entry.product.id.clone(),
                group: entry.product.group.clone(),
                rate: line_rates[i],
                line_total,
                discount: line_discounts[i],
                net_total: line_total - line_discounts[i],
            }
        })
        .collect();

    let subtotal = groups.iter().map(|g| g.subtotal).sum();
    let total_discount = groups.iter().map(|g| g.discount).sum();
    let grand_total = groups.iter().map(|g| g.total).sum();

    DiscountSummary {
        groups,
        lines,
        subtotal,
        total_discount,
        grand_total,
    }
}

/// Splits `amount` across `weights` proportionally, in whole cents.
///
/// Every share gets the floor of its exact value; the cents left over go to
/// the shares with the largest remainders (earlier index on ties). The
/// shares always sum to `amount`.
fn allocate(amount: Money, weights: &[Money]) -> Vec<Money> {
    let total: i128 = weights.iter().map(|w| w.cents() as i128).sum();
    if total <= 0 || amount.is_zero() {
        return vec![Money::zero(); weights.len()];
    }

    let amount_cents = amount.cents() as i128;
    let mut shares: Vec<i128> = Vec::with_capacity(weights.len());
    let mut remainders: Vec<(i128, usize)> = Vec::with_capacity(weights.len());
    for (i, weight) in weights.iter().enumerate() {
        let exact = amount_cents * weight.cents() as i128;
        shares.push(exact / total);
        remainders.push((exact % total, i));
    }

    let leftover = amount_cents - shares.iter().sum::<i128>();
    remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    for &(_, i) in remainders.iter().take(leftover as usize) {
        shares[i] += 1;
    }

    shares
        .into_iter()
        .map(|cents| Money::from_cents(cents as i64))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Cart;
    use crate::types::{DiscountPolicy, Product};

    fn product(id: &str, price_cents: i64, group: &str) -> Product {
        Product {
            id: id.to_string(),
            code: format!("COD-{}", id),
            name: format!("Product {}", id),
            description: None,
            price_cents,
            group: group.to_string(),
            category: "General".to_string(),
            is_active: true,
        }
    }

    fn ten_percent_from_five(group: &str) -> PolicyTable {
        PolicyTable::from_policies(vec![DiscountPolicy::new(
            group,
            5,
            Some(9),
            DiscountRate::from_bps(1000),
        )])
    }

    #[test]
    fn test_empty_cart() {
        let summary = compute(&[], &ten_percent_from_five("X"));
        assert!(summary.groups.is_empty());
        assert!(summary.lines.is_empty());
        assert_eq!(summary.grand_total, Money::zero());
        assert_eq!(summary.subtotal, Money::zero());
    }

    #[test]
    fn test_single_product_reaches_tier() {
        let mut cart = Cart::new();
        cart.add_item(&product("p", 1000, "X"));
        cart.update_quantity("p", 5);

        let summary = compute(cart.entries(), &ten_percent_from_five("X"));
        let group = summary.group("X").unwrap();
        assert_eq!(group.quantity, 5);
        assert_eq!(group.subtotal.cents(), 5000);
        assert_eq!(group.discount.cents(), 500);
        assert_eq!(group.total.cents(), 4500);
        assert_eq!(summary.grand_total.cents(), 4500);
    }

    #[test]
    fn test_tier_driven_by_group_quantity() {
        let mut cart = Cart::new();
        cart.add_item(&product("a", 1000, "X"));
        cart.update_quantity("a", 3);
        cart.add_item(&product("b", 2000, "X"));
        cart.update_quantity("b", 4);

        let summary = compute(cart.entries(), &ten_percent_from_five("X"));
        let group = summary.group("X").unwrap();
        assert_eq!(group.quantity, 7);
        assert_eq!(group.rate.bps(), 1000);
        // 3 × 10,00 + 4 × 20,00 = 110,00 → 11,00 off
        assert_eq!(group.subtotal.cents(), 11_000);
        assert_eq!(group.discount.cents(), 1_100);
        assert_eq!(summary.line("a").unwrap().discount.cents(), 300);
        assert_eq!(summary.line("b").unwrap().discount.cents(), 800);
    }

    #[test]
    fn test_groups_are_independent() {
        let mut cart = Cart::new();
        cart.add_item(&product("a", 1000, "X"));
        cart.update_quantity("a", 5);
        cart.add_item(&product("b", 1000, "Y"));
        cart.update_quantity("b", 5);

        let summary = compute(cart.entries(), &ten_percent_from_five("X"));
        assert_eq!(summary.rate_for("X").bps(), 1000);
        assert!(summary.rate_for("Y").is_zero());
        assert_eq!(summary.discounted_groups().count(), 1);
        assert_eq!(summary.grand_total.cents(), 4500 + 5000);
    }

    #[test]
    fn test_groups_in_first_appearance_order() {
        let mut cart = Cart::new();
        cart.add_item(&product("a", 100, "Z"));
        cart.add_item(&product("b", 100, "A"));
        cart.add_item(&product("c", 100, "Z"));

        let summary = compute(cart.entries(), &PolicyTable::new());
        let labels: Vec<&str> = summary.groups.iter().map(|g| g.group.as_str()).collect();
        assert_eq!(labels, vec!["Z", "A"]);
    }

    #[test]
    fn test_reconciles_exactly() {
        let mut cart = Cart::new();
        cart.add_item(&product("a", 333, "X"));
        cart.update_quantity("a", 3);
        cart.add_item(&product("b", 1, "X"));
        cart.update_quantity("b", 2);
        cart.add_item(&product("c", 777, "Y"));

        let policies = PolicyTable::from_policies(vec![
            DiscountPolicy::new("X", 5, None, DiscountRate::from_bps(1250)),
            DiscountPolicy::new("Y", 1, None, DiscountRate::from_bps(333)),
        ]);
        let summary = compute(cart.entries(), &policies);

        assert_eq!(summary.subtotal, cart.subtotal());
        assert_eq!(summary.grand_total, summary.subtotal - summary.total_discount);
        for group in &summary.groups {
            let allocated: Money = summary
                .lines
                .iter()
                .filter(|l| l.group == group.group)
                .map(|l| l.discount)
                .sum();
            assert_eq!(allocated, group.discount);
        }
    }

    #[test]
    fn test_allocate_distributes_leftover_cents() {
        let shares = allocate(
            Money::from_cents(100),
            &[Money::from_cents(1), Money::from_cents(1), Money::from_cents(1)],
        );
        assert_eq!(
            shares,
            vec![Money::from_cents(34), Money::from_cents(33), Money::from_cents(33)]
        );
    }

    #[test]
    fn test_allocate_zero_weights() {
        let shares = allocate(Money::from_cents(10), &[Money::zero(), Money::zero()]);
        assert_eq!(shares, vec![Money::zero(), Money::zero()]);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut cart = Cart::new();
        cart.add_item(&product("a", 1234, "X"));
        cart.update_quantity("a", 6);
        let policies = ten_percent_from_five("X");

        assert_eq!(
            compute(cart.entries(), &policies),
            compute(cart.entries(), &policies)
        );
    }
}
