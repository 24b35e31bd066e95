//! # Validation Module
//!
//! Input checks applied before an item enters the cart.
//!
//! Cost is deliberately not validated here: a malformed cost is a
//! [`CostPolicy`](crate::CostPolicy) decision taken when totals are read.

use crate::error::ValidationError;
use crate::types::LineItem;
use crate::MAX_ITEM_NAME_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates an item name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use verdant_core::validation::validate_item_name;
///
/// assert!(validate_item_name("Snake Plant").is_ok());
/// assert!(validate_item_name("  ").is_err());
/// ```
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_ITEM_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_ITEM_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a quantity value against a maximum.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed `max`
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cart: Load / Add Item                                                  │
/// │                                                                         │
/// │  Incoming quantity: 5                                                  │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(5, 999) ← THIS FUNCTION                             │
/// │       │                                                                 │
/// │       ├── qty == 0?  → Error: "quantity must be positive"              │
/// │       │                                                                 │
/// │       ├── qty > max? → Error: "quantity must be between 1 and 999"     │
/// │       │                                                                 │
/// │       └── OK → item enters the cart                                    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: u32, max: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > max {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: i64::from(max),
        });
    }

    Ok(())
}

/// Validates a whole line item (name and quantity).
pub fn validate_line_item(item: &LineItem, max_quantity: u32) -> ValidationResult<()> {
    validate_item_name(&item.name)?;
    validate_quantity(item.quantity, max_quantity)
}

/// Validates that one more distinct item fits in the cart.
pub fn validate_cart_size(current_items: usize, max: usize) -> ValidationResult<()> {
    if current_items >= max {
        return Err(ValidationError::OutOfRange {
            field: "cart items".to_string(),
            min: 0,
            max: i64::try_from(max).unwrap_or(i64::MAX),
        });
    }

    Ok(())
}
