//! # Domain Types
//!
//! Core cart types used throughout Verdant.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │      Cost       │   │   CartTotals    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name (key)     │   │  Text("$1.50")  │   │  item_count     │       │
//! │  │  image          │   │  Number(1.5)    │   │  total_quantity │       │
//! │  │  cost ──────────┼──►│                 │   │  total_cost     │       │
//! │  │  quantity ≥ 1   │   └─────────────────┘   │  excluded       │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    CartView     │   │   CostPolicy    │   │ QuantityChange  │       │
//! │  │  Loading        │   │  Propagate      │   │  Updated(q)     │       │
//! │  │  Empty          │   │  Exclude        │   │  Removed        │       │
//! │  │  Items(&[..])   │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::money::{normalize_cost, Money};

// =============================================================================
// Cost
// =============================================================================

/// A unit cost exactly as it arrived from the catalog.
///
/// Kept raw on purpose: it is normalized on every read through
/// [`normalize_cost`], never stored pre-parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum Cost {
    /// Currency-formatted text, e.g. `"$12.50"`.
    Text(String),
    /// A bare number, e.g. `12.5`.
    Number(f64),
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cost::Text(raw) => f.write_str(raw),
            Cost::Number(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for Cost {
    fn from(raw: &str) -> Self {
        Cost::Text(raw.to_string())
    }
}

impl From<String> for Cost {
    fn from(raw: String) -> Self {
        Cost::Text(raw)
    }
}

impl From<f64> for Cost {
    fn from(value: f64) -> Self {
        Cost::Number(value)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One distinct product in the cart.
///
/// `name` is the cart key: two items with the same name are the same entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    /// Display name, unique within the cart.
    pub name: String,

    /// Display asset reference. Opaque to the core.
    #[serde(default)]
    pub image: String,

    /// Unit cost, as supplied.
    pub cost: Cost,

    /// Quantity in cart (≥ 1 while present).
    pub quantity: u32,
}

impl LineItem {
    /// Creates a line item.
    pub fn new(
        name: impl Into<String>,
        image: impl Into<String>,
        cost: impl Into<Cost>,
        quantity: u32,
    ) -> Self {
        LineItem {
            name: name.into(),
            image: image.into(),
            cost: cost.into(),
            quantity,
        }
    }

    /// Returns the normalized unit cost. Re-parsed on every call.
    #[inline]
    pub fn unit_cost(&self) -> CoreResult<Money> {
        normalize_cost(&self.cost)
    }

    /// Calculates the line total (unit cost × quantity).
    ///
    /// ## Example
    /// ```rust
    /// use verdant_core::{LineItem, Money};
    ///
    /// let hat = LineItem::new("Hat", "hat.png", "$10.00", 3);
    /// assert_eq!(hat.line_total().unwrap(), Money::from_cents(3000));
    /// ```
    pub fn line_total(&self) -> CoreResult<Money> {
        self.line_total_at(self.unit_cost()?)
    }

    /// Line total for an already normalized unit cost.
    pub fn line_total_at(&self, unit: Money) -> CoreResult<Money> {
        unit.multiply_quantity(self.quantity).ok_or_else(|| {
            crate::CoreError::malformed_cost(self.cost.to_string(), "line total is out of range")
        })
    }
}

// =============================================================================
// Cost Policy
// =============================================================================

/// What a total does when one item's cost is malformed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CostPolicy {
    /// Fail the whole total with the first `MalformedCost`.
    #[default]
    Propagate,
    /// Skip malformed items and report them in [`CartTotals::excluded`].
    Exclude,
}

impl FromStr for CostPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "propagate" => Ok(CostPolicy::Propagate),
            "exclude" => Ok(CostPolicy::Exclude),
            _ => Err(ValidationError::NotAllowed {
                field: "cost policy".to_string(),
                allowed: vec!["propagate".to_string(), "exclude".to_string()],
            }),
        }
    }
}

// =============================================================================
// Totals
// =============================================================================

/// An item left out of a total under [`CostPolicy::Exclude`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ExcludedItem {
    pub name: String,
    pub reason: String,
}

/// Cart totals summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    /// Distinct line items.
    pub item_count: usize,
    /// Sum of quantities.
    pub total_quantity: u64,
    /// Sum of line totals.
    pub total_cost: Money,
    /// Items skipped because their cost did not normalize.
    pub excluded: Vec<ExcludedItem>,
}

// =============================================================================
// Cart View
// =============================================================================

/// What the presentation layer should show for the cart right now.
///
/// `Loading` and `Empty` are different states: a cart that has not been
/// populated yet is not an empty cart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CartView<'a> {
    /// The cart has not been populated yet.
    Loading,
    /// The cart is populated and holds nothing.
    Empty,
    /// The cart's items in insertion order.
    Items(&'a [LineItem]),
}

impl CartView<'_> {
    /// The serializable tag for this view.
    pub fn status(&self) -> CartStatus {
        match self {
            CartView::Loading => CartStatus::Loading,
            CartView::Empty => CartStatus::Empty,
            CartView::Items(_) => CartStatus::Items,
        }
    }
}

/// Serializable tag of a [`CartView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CartStatus {
    Loading,
    Empty,
    Items,
}

// =============================================================================
// Quantity Change
// =============================================================================

/// Outcome of a decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The item is still present with this quantity.
    Updated(u32),
    /// The item was at quantity 1 and has been removed.
    Removed,
}

// =============================================================================
// Unit Tests
// =============================================================================
