//! # Discount Policy Resolver
//!
//! Maps `(group, aggregate quantity)` to the discount rate of the band the
//! quantity falls in.
//!
//! ## Resolution Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Group "X" policies:   [1, 4] → 0%   [5, 9] → 10%   [10, ∞) → 15%       │
//! │                                                                         │
//! │  quantity 3  ──► [1, 4]   ──► 0%                                        │
//! │  quantity 7  ──► [5, 9]   ──► 10%                                       │
//! │  quantity 42 ──► [10, ∞)  ──► 15%                                       │
//! │                                                                         │
//! │  Overlapping bands (authoring mistake):                                 │
//! │    [5, 20] → 10%  and  [10, ∞) → 15%,  quantity 12                      │
//! │    both qualify ──► highest minimum wins ──► [10, ∞) ──► 15%            │
//! │                                                                         │
//! │  No qualifying band ──► 0%                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Bands sharing the same minimum are ordered by higher rate, then by the
//! smallest policy id. The result never depends on the order the
//! policies were stored in.

use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};

use crate::types::{DiscountPolicy, DiscountRate};

/// Returns the band of `group` that applies to `quantity`, if any.
pub fn select_policy<'a>(
    policies: &'a [DiscountPolicy],
    group: &str,
    quantity: i64,
) -> Option<&'a DiscountPolicy> {
    policies
        .iter()
        .filter(|p| p.group == group && p.contains(quantity))
        .max_by(|a, b| precedence(a, b))
}

/// Resolves the discount rate for `group` at `quantity`.
///
/// ```rust
/// use vitrine_core::policy::resolve_rate;
/// use vitrine_core::types::{DiscountPolicy, DiscountRate};
///
/// let policies = vec![DiscountPolicy::new("X", 5, Some(9), DiscountRate::from_bps(1000))];
/// assert_eq!(resolve_rate(&policies, "X", 7).bps(), 1000);
/// assert_eq!(resolve_rate(&policies, "X", 4).bps(), 0);
/// assert_eq!(resolve_rate(&policies, "Y", 7).bps(), 0);
/// ```
pub fn resolve_rate(policies: &[DiscountPolicy], group: &str, quantity: i64) -> DiscountRate {
    select_policy(policies, group, quantity)
        .map(|p| p.rate)
        .unwrap_or_default()
}

/// Total order among qualifying bands: the greater one wins.
fn precedence(a: &DiscountPolicy, b: &DiscountPolicy) -> Ordering {
    (a.min_quantity, a.rate, Reverse(a.id.as_str())).cmp(&(
        b.min_quantity,
        b.rate,
        Reverse(b.id.as_str()),
    ))
}

// =============================================================================
// Policy Table
// =============================================================================

/// The set of discount policies currently in force.
///
/// Owned by the admin collaborator; the calculator only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyTable {
    policies: Vec<DiscountPolicy>,
}

impl PolicyTable {
    /// Creates an empty table (every rate resolves to 0).
    pub fn new() -> Self {
        PolicyTable::default()
    }

    /// Wraps a list of policies.
    pub fn from_policies(policies: Vec<DiscountPolicy>) -> Self {
        PolicyTable { policies }
    }

    /// All policies, in storage order.
    pub fn policies(&self) -> &[DiscountPolicy] {
        &self.policies
    }

    /// Policies of one group, sorted by minimum quantity.
    pub fn policies_for(&self, group: &str) -> Vec<&DiscountPolicy> {
        let mut bands: Vec<&DiscountPolicy> =
            self.policies.iter().filter(|p| p.group == group).collect();
        bands.sort_by(|a, b| {
            a.min_quantity
                .cmp(&b.min_quantity)
                .then_with(|| a.id.cmp(&b.id))
        });
        bands
    }

    /// See [`resolve_rate`].
    pub fn resolve(&self, group: &str, quantity: i64) -> DiscountRate {
        resolve_rate(&self.policies, group, quantity)
    }

    /// Adds a policy.
    pub fn insert(&mut self, policy: DiscountPolicy) {
        self.policies.push(policy);
    }

    /// Replaces the policy with the same id. Returns false if absent.
    pub fn update(&mut self, policy: DiscountPolicy) -> bool {
        match self.policies.iter_mut().find(|p| p.id == policy.id) {
            Some(existing) => {
                *existing = policy;
                true
            }
            None => false,
        }
    }

    /// Removes a policy by id. Returns the removed policy, if any.
    pub fn remove(&mut self, id: &str) -> Option<DiscountPolicy> {
        let index = self.policies.iter().position(|p| p.id == id)?;
        Some(self.policies.remove(index))
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

impl From<Vec<DiscountPolicy>> for PolicyTable {
    fn from(policies: Vec<DiscountPolicy>) -> Self {
        PolicyTable::from_policies(policies)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn band(id: &str, group: &str, min: i64, max: Option<i64>, bps: u32) -> DiscountPolicy {
        DiscountPolicy {
            id: id.to_string(),
            group: group.to_string(),
            min_quantity: min,
            max_quantity: max,
            rate: DiscountRate::from_bps(bps),
        }
    }

    fn tiers() -> PolicyTable {
        PolicyTable::from_policies(vec![
            band("a", "X", 5, Some(9), 1000),
            band("b", "X", 10, None, 1500),
            band("c", "Y", 3, None, 500),
        ])
    }

    #[test]
    fn test_resolves_band_boundaries() {
        let table = tiers();
        assert_eq!(table.resolve("X", 4).bps(), 0);
        assert_eq!(table.resolve("X", 5).bps(), 1000);
        assert_eq!(table.resolve("X", 9).bps(), 1000);
        assert_eq!(table.resolve("X", 10).bps(), 1500);
        assert_eq!(table.resolve("X", 500).bps(), 1500);
    }

    #[test]
    fn test_unknown_group_resolves_to_zero() {
        assert!(tiers().resolve("Z", 100).is_zero());
        assert!(PolicyTable::new().resolve("X", 100).is_zero());
    }

    #[test]
    fn test_overlap_prefers_highest_minimum() {
        let table = PolicyTable::from_policies(vec![
            band("wide", "X", 5, Some(20), 2000),
            band("high", "X", 10, None, 1500),
        ]);
        // Both qualify at 12; the band starting at 10 wins even with a lower rate.
        assert_eq!(table.resolve("X", 12).bps(), 1500);
        // Only the wide band qualifies at 7.
        assert_eq!(table.resolve("X", 7).bps(), 2000);
    }

    #[test]
    fn test_overlap_is_independent_of_storage_order() {
        let forward = vec![band("a", "X", 5, None, 1000), band("b", "X", 5, Some(9), 1200)];
        let mut backward = forward.clone();
        backward.reverse();

        assert_eq!(resolve_rate(&forward, "X", 6), resolve_rate(&backward, "X", 6));
        // Same minimum: the higher rate wins.
        assert_eq!(resolve_rate(&forward, "X", 6).bps(), 1200);
    }

    #[test]
    fn test_identical_bands_break_on_id() {
        let policies = vec![band("b", "X", 5, None, 1000), band("a", "X", 5, None, 1000)];
        assert_eq!(select_policy(&policies, "X", 5).map(|p| p.id.as_str()), Some("a"));
    }

    #[test]
    fn test_policies_for_sorted_by_minimum() {
        let table = PolicyTable::from_policies(vec![
            band("b", "X", 10, None, 1500),
            band("a", "X", 5, Some(9), 1000),
        ]);
        let mins: Vec<i64> = table.policies_for("X").iter().map(|p| p.min_quantity).collect();
        assert_eq!(mins, vec![5, 10]);
    }

    #[test]
    fn test_edits_are_visible_to_next_resolution() {
        let mut table = tiers();
        assert_eq!(table.resolve("X", 6).bps(), 1000);

        assert!(table.update(band("a", "X", 5, Some(9), 1200)));
        assert_eq!(table.resolve("X", 6).bps(), 1200);

        assert!(table.remove("a").is_some());
        assert!(table.resolve("X", 6).is_zero());
        assert!(!table.update(band("missing", "X", 1, None, 100)));
    }
}
