//! # Catalog and Order Files
//!
//! JSON inputs for the storefront binary.
//!
//! ## Catalog file
//! ```json
//! {
//!   "products": [
//!     { "id": "p1", "code": "SH-01", "name": "Shampoo", "price_cents": 1000,
//!       "group": "LINHA X", "category": "Cabelo" }
//!   ],
//!   "policies": [
//!     { "group": "LINHA X", "minQuantity": 5, "maxQuantity": 9, "percent": 10 }
//!   ]
//! }
//! ```
//!
//! Policy rates are written as percentages, the unit the admin panel edits
//! them in. A policy without an `id` gets a fresh UUID.
//!
//! ## Order request file
//! ```json
//! {
//!   "items": [{ "productId": "p1", "quantity": 5 }],
//!   "customer": { "full_name": "Maria", "payment": "pix", "...": "..." }
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use vitrine_core::validation::{find_policy_overlaps, validate_policy, validate_product};
use vitrine_core::{
    CustomerForm, DiscountPolicy, DiscountRate, PolicyTable, Product, ValidationError,
};

/// Errors raised while reading catalog or order files.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Duplicate product id: {0}")]
    DuplicateProduct(String),

    #[error("Invalid catalog entry: {0}")]
    Invalid(#[from] ValidationError),
}

/// One policy band as written in the catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub group: String,
    pub min_quantity: i64,
    #[serde(default)]
    pub max_quantity: Option<i64>,
    /// Discount percentage, `10` = 10%.
    pub percent: f64,
}

impl From<PolicyRecord> for DiscountPolicy {
    fn from(record: PolicyRecord) -> Self {
        let rate = DiscountRate::from_percentage(record.percent);
        match record.id {
            Some(id) => DiscountPolicy {
                id,
                group: record.group,
                min_quantity: record.min_quantity,
                max_quantity: record.max_quantity,
                rate,
            },
            None => DiscountPolicy::new(
                record.group,
                record.min_quantity,
                record.max_quantity,
                rate,
            ),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    products: Vec<Product>,
    #[serde(default)]
    policies: Vec<PolicyRecord>,
}

/// Products in display order plus the discount policies.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub products: Vec<Product>,
    pub policies: PolicyTable,
}

impl Catalog {
    /// Builds a catalog, validating every product and policy.
    ///
    /// Overlapping bands are accepted (the resolver has a deterministic
    /// tie-break) but each overlap is logged.
    pub fn new(products: Vec<Product>, policies: Vec<DiscountPolicy>) -> Result<Self, CatalogError> {
        for (i, product) in products.iter().enumerate() {
            validate_product(product)?;
            if products[..i].iter().any(|p| p.id == product.id) {
                return Err(CatalogError::DuplicateProduct(product.id.clone()));
            }
        }
        for policy in &policies {
            validate_policy(policy)?;
        }
        for overlap in find_policy_overlaps(&policies) {
            warn!("{}", overlap);
        }

        Ok(Catalog {
            products,
            policies: PolicyTable::from_policies(policies),
        })
    }

    /// Parses a catalog from JSON text. `origin` only labels errors.
    pub fn from_json(json: &str, origin: &Path) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            serde_json::from_str(json).map_err(|source| CatalogError::Parse {
                path: origin.to_path_buf(),
                source,
            })?;
        let policies = file.policies.into_iter().map(DiscountPolicy::from).collect();
        Catalog::new(file.products, policies)
    }

    /// Reads and parses a catalog file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        debug!(path = %path.display(), "loading catalog");
        let json = read(path)?;
        Catalog::from_json(&json, path)
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

/// One requested product line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: String,
    pub quantity: i64,
}

/// Scripted storefront session: what to put in the cart and who is buying.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderRequest {
    #[serde(default)]
    pub items: Vec<OrderLine>,
    #[serde(default)]
    pub customer: CustomerForm,
}

impl OrderRequest {
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        debug!(path = %path.display(), "loading order request");
        let json = read(path)?;
        serde_json::from_str(&json).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn read(path: &Path) -> Result<String, CatalogError> {
    std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{
        "products": [
            { "id": "p1", "code": "SH-01", "name": "Shampoo", "price_cents": 1000,
              "group": "LINHA X", "category": "Cabelo" },
            { "id": "p2", "code": "CO-01", "name": "Condicionador", "price_cents": 1500,
              "group": "LINHA X", "category": "Cabelo", "is_active": false }
        ],
        "policies": [
            { "id": "x-5", "group": "LINHA X", "minQuantity": 5, "maxQuantity": 9, "percent": 10 },
            { "group": "LINHA X", "minQuantity": 10, "percent": 12.5 }
        ]
    }"#;

    #[test]
    fn test_parses_catalog() {
        let catalog = Catalog::from_json(CATALOG, Path::new("catalog.json")).unwrap();
        assert_eq!(catalog.products.len(), 2);
        assert!(catalog.product("p1").unwrap().is_active);
        assert!(!catalog.product("p2").unwrap().is_active);

        assert_eq!(catalog.policies.len(), 2);
        assert_eq!(catalog.policies.resolve("LINHA X", 7).bps(), 1000);
        assert_eq!(catalog.policies.resolve("LINHA X", 10).bps(), 1250);
        // The band without an id received a generated one.
        assert!(catalog.policies.policies().iter().all(|p| !p.id.is_empty()));
    }

    #[test]
    fn test_rejects_invalid_policy() {
        let json = r#"{ "policies": [
            { "group": "LINHA X", "minQuantity": 9, "maxQuantity": 5, "percent": 10 }
        ] }"#;
        let err = Catalog::from_json(json, Path::new("catalog.json")).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Invalid(ValidationError::InvalidRange { min: 9, max: 5 })
        ));
    }

    #[test]
    fn test_rejects_duplicate_products() {
        let json = r#"{ "products": [
            { "id": "p1", "code": "A", "name": "A", "price_cents": 100, "group": "G", "category": "C" },
            { "id": "p1", "code": "B", "name": "B", "price_cents": 100, "group": "G", "category": "C" }
        ] }"#;
        let err = Catalog::from_json(json, Path::new("catalog.json")).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateProduct(id) if id == "p1"));
    }

    #[test]
    fn test_malformed_json_names_the_file() {
        let err = Catalog::from_json("{", Path::new("loja.json")).unwrap_err();
        assert!(err.to_string().contains("loja.json"));
    }

    #[test]
    fn test_parses_order_request() {
        let json = r#"{
            "items": [{ "productId": "p1", "quantity": 3 }],
            "customer": { "full_name": "Maria", "payment": "pix", "delivery": "morning" }
        }"#;
        let request: OrderRequest = serde_json::from_str(json).unwrap();
        assert_eq!(
            request.items,
            vec![OrderLine { product_id: "p1".to_string(), quantity: 3 }]
        );
        assert_eq!(request.customer.full_name, "Maria");
        assert!(request.customer.tax_id.is_empty());
    }
}
