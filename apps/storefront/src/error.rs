//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Vitrine                                │
//! │                                                                         │
//! │  Command Function: Result<T, ApiError>                                  │
//! │         │                                                               │
//! │         ├── CoreError (checkout gate, unknown product) ──┐              │
//! │         ├── CatalogError (bad catalog/order file) ───────┼──► ApiError  │
//! │         ├── ConfigError (bad VITRINE_* variable) ────────┤              │
//! │         └── io::Error (download sink) ── logged ─────────┘              │
//! │                                                                         │
//! │  Callers receive { "code": "VALIDATION_ERROR", "message": "..." }       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use std::fmt;
use vitrine_core::CoreError;

use crate::catalog::CatalogError;
use crate::state::ConfigError;

/// API error returned from commands.
///
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: p-123"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Operation not allowed in the current checkout step
    CheckoutError,

    /// Catalog or order file could not be loaded
    CatalogError,

    /// Configuration is invalid
    ConfigError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::ProductInactive(id) => {
                ApiError::validation(format!("Product is not available for sale: {}", id))
            }
            CoreError::InvalidCheckoutStep { .. } | CoreError::CustomerNotAttached => {
                ApiError::new(ErrorCode::CheckoutError, err.to_string())
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Io { .. } => {
                tracing::error!("Catalog read failed: {}", err);
                ApiError::new(ErrorCode::CatalogError, err.to_string())
            }
            CatalogError::Invalid(e) => ApiError::validation(e.to_string()),
            _ => ApiError::new(ErrorCode::CatalogError, err.to_string()),
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        // Log the actual error but return a generic message
        tracing::error!("I/O failure: {}", err);
        ApiError::internal("Could not write the order file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::ValidationError;

    #[test]
    fn test_core_errors_map_to_codes() {
        let err: ApiError = CoreError::ProductNotFound("p9".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: p9");

        let err: ApiError = CoreError::Validation(ValidationError::Required {
            field: "phone".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "phone is required");

        let err: ApiError = CoreError::InvalidCheckoutStep {
            current: "collecting customer data",
            expected: "reviewing summary",
        }
        .into();
        assert_eq!(err.code, ErrorCode::CheckoutError);
    }

    #[test]
    fn test_serializes_screaming_snake_code() {
        let json = serde_json::to_string(&ApiError::validation("bad")).unwrap();
        assert_eq!(json, r#"{"code":"VALIDATION_ERROR","message":"bad"}"#);
    }
}
