//! # Policy Commands
//!
//! The admin panel's view of the discount table. Edits take effect on the
//! next cart computation.

use tracing::debug;
use vitrine_core::DiscountPolicy;

use crate::catalog::PolicyRecord;
use crate::error::ApiError;
use crate::state::CatalogState;

/// Lists policies, optionally only one group's bands (sorted by minimum).
pub fn list_policies(catalog: &CatalogState, group: Option<&str>) -> Vec<DiscountPolicy> {
    debug!(group = ?group, "list_policies command");
    let policies = catalog.policies();
    match group {
        Some(group) => policies.policies_for(group).into_iter().cloned().collect(),
        None => policies.policies().to_vec(),
    }
}

/// Creates a policy, or replaces the one with the same id.
pub fn save_policy(catalog: &CatalogState, record: PolicyRecord) -> Result<DiscountPolicy, ApiError> {
    debug!(group = %record.group, "save_policy command");
    let policy = DiscountPolicy::from(record);
    catalog
        .upsert_policy(policy.clone())
        .map_err(|e| ApiError::validation(e.to_string()))?;
    Ok(policy)
}

pub fn delete_policy(catalog: &CatalogState, policy_id: &str) -> Result<DiscountPolicy, ApiError> {
    debug!(policy_id = %policy_id, "delete_policy command");
    catalog
        .remove_policy(policy_id)
        .ok_or_else(|| ApiError::not_found("Policy", policy_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::error::ErrorCode;

    fn record(id: Option<&str>, min: i64, max: Option<i64>, percent: f64) -> PolicyRecord {
        PolicyRecord {
            id: id.map(str::to_string),
            group: "LINHA X".to_string(),
            min_quantity: min,
            max_quantity: max,
            percent,
        }
    }

    #[test]
    fn test_save_then_replace() {
        let catalog = CatalogState::new(Catalog::default());
        save_policy(&catalog, record(Some("x-5"), 5, Some(9), 10.0)).unwrap();
        save_policy(&catalog, record(None, 10, None, 15.0)).unwrap();
        assert_eq!(catalog.policies().resolve("LINHA X", 6).bps(), 1000);

        save_policy(&catalog, record(Some("x-5"), 5, Some(9), 8.0)).unwrap();
        assert_eq!(list_policies(&catalog, Some("LINHA X")).len(), 2);
        assert_eq!(catalog.policies().resolve("LINHA X", 6).bps(), 800);
        assert!(list_policies(&catalog, Some("LINHA Y")).is_empty());
    }

    #[test]
    fn test_save_rejects_invalid_band() {
        let catalog = CatalogState::new(Catalog::default());
        let err = save_policy(&catalog, record(None, 0, None, 10.0)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(list_policies(&catalog, None).is_empty());
    }

    #[test]
    fn test_delete() {
        let catalog = CatalogState::new(Catalog::default());
        save_policy(&catalog, record(Some("x-5"), 5, None, 10.0)).unwrap();
        assert_eq!(delete_policy(&catalog, "x-5").unwrap().id, "x-5");
        assert_eq!(delete_policy(&catalog, "x-5").unwrap_err().code, ErrorCode::NotFound);
    }
}
