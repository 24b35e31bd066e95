//! # Error Types
//!
//! Domain-specific error types for verdant-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  verdant-core errors (this file)                                       │
//! │  ├── CoreError        - Cart rule violations, malformed costs          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  verdant-cli errors (in app)                                           │
//! │  ├── ConfigError      - Bad environment values                         │
//! │  └── ApiError         - What callers see (serialized)                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → caller                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core cart errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A mutation referenced a name that is not in the cart.
    ///
    /// ## When This Occurs
    /// - Increment/decrement/update on a name that was never added
    /// - Any mutation on a cart that has not been loaded yet
    ///
    /// The cart is left untouched.
    #[error("Item not found in cart: {0}")]
    ItemNotFound(String),

    /// A cost could not be normalized to a non-negative amount.
    ///
    /// ## User Workflow
    /// ```text
    /// Item cost: "N/A"
    ///      │
    ///      ▼
    /// normalize_cost() ── no numeric content after prefix strip
    ///      │
    ///      ▼
    /// MalformedCost { raw: "N/A", reason: "..." }
    ///      │
    ///      ├── CostPolicy::Propagate → total fails with this error
    ///      └── CostPolicy::Exclude   → item skipped, listed in totals
    /// ```
    #[error("Malformed cost {raw:?}: {reason}")]
    MalformedCost { raw: String, reason: String },

    /// Cart has reached the maximum number of distinct items.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Item quantity would exceed the allowed maximum.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: u64, max: u32 },

    /// Cart data could not be decoded.
    #[error("Invalid cart data: {0}")]
    InvalidCartData(#[from] serde_json::Error),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    pub(crate) fn malformed_cost(raw: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::MalformedCost {
            raw: raw.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any cart state is touched.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::ItemNotFound("Shirt".to_string());
        assert_eq!(err.to_string(), "Item not found in cart: Shirt");

        let err = CoreError::malformed_cost("N/A", "no numeric content");
        assert_eq!(err.to_string(), "Malformed cost \"N/A\": no numeric content");

        let err = CoreError::QuantityTooLarge {
            requested: 1000,
            max: 999,
        };
        assert_eq!(err.to_string(), "Quantity 1000 exceeds maximum allowed (999)");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: 999,
        };
        assert_eq!(err.to_string(), "quantity must be between 1 and 999");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
