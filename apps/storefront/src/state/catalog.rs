//! # Catalog State
//!
//! Products and discount policies shared by every command.
//!
//! Reads vastly outnumber writes (the admin panel edits policies now and
//! then), so the catalog sits behind an `RwLock`. Every discount computation
//! reads the current policy table, so an edit is visible to the next
//! `get_cart`.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;
use vitrine_core::validation::validate_policy;
use vitrine_core::{DiscountPolicy, PolicyTable, Product, ValidationError};

use crate::catalog::Catalog;

#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    catalog: Arc<RwLock<Catalog>>,
}

impl CatalogState {
    pub fn new(catalog: Catalog) -> Self {
        CatalogState {
            catalog: Arc::new(RwLock::new(catalog)),
        }
    }

    /// Executes a function with read access to the catalog.
    pub fn with_catalog<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Catalog) -> R,
    {
        let catalog = self.catalog.read().unwrap_or_else(PoisonError::into_inner);
        f(&catalog)
    }

    fn with_catalog_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Catalog) -> R,
    {
        let mut catalog = self.catalog.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut catalog)
    }

    /// Looks a product up by id (a clone, so no lock is held afterwards).
    pub fn product(&self, id: &str) -> Option<Product> {
        self.with_catalog(|c| c.product(id).cloned())
    }

    /// Products in display order.
    pub fn products(&self) -> Vec<Product> {
        self.with_catalog(|c| c.products.clone())
    }

    /// Snapshot of the current policy table.
    pub fn policies(&self) -> PolicyTable {
        self.with_catalog(|c| c.policies.clone())
    }

    /// Adds a policy, or replaces the one with the same id.
    pub fn upsert_policy(&self, policy: DiscountPolicy) -> Result<(), ValidationError> {
        validate_policy(&policy)?;
        info!(policy_id = %policy.id, group = %policy.group, rate = %policy.rate, "policy saved");
        self.with_catalog_mut(|c| {
            if !c.policies.update(policy.clone()) {
                c.policies.insert(policy);
            }
        });
        Ok(())
    }

    /// Deletes a policy. Returns `None` when the id is unknown.
    pub fn remove_policy(&self, id: &str) -> Option<DiscountPolicy> {
        let removed = self.with_catalog_mut(|c| c.policies.remove(id));
        if removed.is_some() {
            info!(policy_id = %id, "policy removed");
        }
        removed
    }
}
