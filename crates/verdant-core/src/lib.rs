//! # verdant-core: Pure Cart Logic for Verdant
//!
//! This crate owns the shopping cart: the line items, the rules for changing
//! their quantities, and the totals derived from them. It has zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Verdant Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Presentation (cart page, external)                 │   │
//! │  │      Item list ──► +/- buttons ──► Remove ──► Grand total       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    verdant-cli (shell)                          │   │
//! │  │         SharedCart (Mutex) • AppConfig • tracing setup          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ verdant-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │ LineItem  │  │   Money   │  │ CartStore │  │   rules   │  │   │
//! │  │   │   Cost    │  │ normalize │  │  totals   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Line items, costs, cart views and totals
//! - [`money`] - Money type with integer arithmetic and cost normalization
//! - [`cart`] - The cart store and its derivations
//! - [`error`] - Domain error types
//! - [`validation`] - Item and quantity validation
//!
//! ## Example Usage
//!
//! ```rust
//! use verdant_core::{CartStore, CostPolicy, LineItem, Money};
//!
//! let mut store = CartStore::new();
//! store.load(vec![LineItem::new("Shirt", "shirt.png", "$20.00", 2)]).unwrap();
//!
//! assert_eq!(store.total_quantity(), 2);
//! assert_eq!(
//!     store.total_cost(CostPolicy::Propagate).unwrap(),
//!     Money::from_cents(4000)
//! );
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{cart_totals, total_cost, total_quantity, Cart, CartLimits, CartStore};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{normalize_cost, parse_cost, Money};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct line items allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line item.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: u32 = 999;

/// Maximum length of an item name.
pub const MAX_ITEM_NAME_LEN: usize = 200;
