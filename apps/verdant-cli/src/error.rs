//! # API Error Type
//!
//! Unified error type for cart commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Verdant                                │
//! │                                                                         │
//! │  Command Function ── Result<CartResponse, ApiError>                     │
//! │         │                                                               │
//! │         ├── CoreError::ItemNotFound ─────► NOT_FOUND                    │
//! │         ├── CoreError::MalformedCost ────► MALFORMED_COST               │
//! │         ├── CoreError::Validation ───────► VALIDATION_ERROR             │
//! │         ├── ConfigError ─────────────────► CONFIG_ERROR                 │
//! │         └── poisoned lock / file read ───► INTERNAL                     │
//! │                                                                         │
//! │  Serialized: {"code":"NOT_FOUND","message":"Item not found: Fern"}      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use verdant_core::CoreError;

use crate::state::ConfigError;

/// API error returned from cart commands.
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
    /// Item not in cart
    NotFound,

    /// Input validation failed
    ValidationError,

    /// A cost could not be normalized
    MalformedCost,

    /// Cart limit reached
    CartError,

    /// Invalid environment configuration
    ConfigError,

    /// Internal failure
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

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::ItemNotFound(_) => ErrorCode::NotFound,
            CoreError::MalformedCost { .. } => ErrorCode::MalformedCost,
            CoreError::CartTooLarge { .. } => ErrorCode::CartError,
            CoreError::QuantityTooLarge { .. }
            | CoreError::InvalidCartData(_)
            | CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_codes() {
        let err: ApiError = CoreError::ItemNotFound("Fern".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Item not found in cart: Fern");

        let err: ApiError = CoreError::CartTooLarge { max: 100 }.into();
        assert_eq!(err.code, ErrorCode::CartError);
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::validation("bad operation");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "code": "VALIDATION_ERROR", "message": "bad operation" })
        );
    }
}
