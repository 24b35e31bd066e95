//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐  load_cart   ┌──────────┐  remove / dec(1)  ┌──────────┐  │
//! │  │ Loading  │─────────────►│ In Cart  │──────────────────►│  Empty   │  │
//! │  │          │              │          │◄──────────────────│          │  │
//! │  └──────────┘              └──────────┘    add_to_cart    └──────────┘  │
//! │                               │    ▲                                    │
//! │                    inc / dec  └────┘                                    │
//! │                    update_cart_item                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use verdant_core::{CartStatus, CartStore, CartTotals, LineItem, Money};

use crate::error::ApiError;
use crate::state::{AppConfig, SharedCart};

// =============================================================================
// Responses
// =============================================================================

/// One line as the presentation layer renders it.
///
/// Display strings come from the same normalized cents used for the totals,
/// so the rendered lines always add up to the rendered grand total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub unit_cost: Option<Money>,
    pub line_total: Option<Money>,
    pub unit_cost_display: Option<String>,
    pub line_total_display: Option<String>,
    /// Set when the cost did not normalize.
    pub cost_error: Option<String>,
}

impl CartLine {
    fn build(item: &LineItem, config: &AppConfig) -> Self {
        let (unit_cost, line_total, cost_error) = match item.unit_cost() {
            Ok(unit) => match item.line_total_at(unit) {
                Ok(line) => (Some(unit), Some(line), None),
                Err(err) => (Some(unit), None, Some(err.to_string())),
            },
            Err(err) => (None, None, Some(err.to_string())),
        };

        CartLine {
            name: item.name.clone(),
            image: item.image.clone(),
            quantity: item.quantity,
            unit_cost,
            line_total,
            unit_cost_display: unit_cost.map(|m| config.format_currency(m)),
            line_total_display: line_total.map(|m| config.format_currency(m)),
            cost_error,
        }
    }
}

/// Cart response including items and totals.
///
/// ```json
/// {
///   "status": "items",
///   "items": [{ "name": "Hat", "quantity": 3, "lineTotalDisplay": "$30.00", ... }],
///   "totals": { "itemCount": 1, "totalQuantity": 3, "totalCost": 3000, "excluded": [] },
///   "totalDisplay": "$30.00"
/// }
/// ```
///
/// While the cart is still loading, `items` is empty and both totals are null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub status: CartStatus,
    pub items: Vec<CartLine>,
    pub totals: Option<CartTotals>,
    pub total_display: Option<String>,
}

impl CartResponse {
    /// Builds a response from the store under the configured cost policy.
    pub fn build(store: &CartStore, config: &AppConfig) -> Result<Self, ApiError> {
        let view = store.view();
        let status = view.status();

        let Some(items) = store.items() else {
            return Ok(CartResponse {
                status,
                items: Vec::new(),
                totals: None,
                total_display: None,
            });
        };

        let totals = store.totals(config.cost_policy)?;
        Ok(CartResponse {
            status,
            items: items.iter().map(|item| CartLine::build(item, config)).collect(),
            total_display: Some(config.format_currency(totals.total_cost)),
            totals: Some(totals),
        })
    }
}

// =============================================================================
// Commands
// =============================================================================

/// Gets the current cart contents.
pub fn get_cart(cart: &SharedCart, config: &AppConfig) -> Result<CartResponse, ApiError> {
    debug!("get_cart command");
    cart.with_store(|store| CartResponse::build(store, config))
}

/// Populates the cart from a JSON array of line items.
pub fn load_cart(cart: &SharedCart, config: &AppConfig, json: &str) -> Result<CartResponse, ApiError> {
    debug!(bytes = json.len(), "load_cart command");
    cart.with_store_mut(|store| {
        store.load_json(json)?;
        CartResponse::build(store, config)
    })
}

/// Adds an item, merging quantities when the name is already in the cart.
pub fn add_to_cart(
    cart: &SharedCart,
    config: &AppConfig,
    item: LineItem,
) -> Result<CartResponse, ApiError> {
    debug!(name = %item.name, quantity = item.quantity, "add_to_cart command");
    cart.with_store_mut(|store| {
        store.add_item(item)?;
        CartResponse::build(store, config)
    })
}

/// Raises an item's quantity by one.
pub fn increment_item(
    cart: &SharedCart,
    config: &AppConfig,
    name: &str,
) -> Result<CartResponse, ApiError> {
    debug!(name, "increment_item command");
    cart.with_store_mut(|store| {
        store.increment_quantity(name)?;
        CartResponse::build(store, config)
    })
}

/// Lowers an item's quantity by one; at quantity one the item is removed.
pub fn decrement_item(
    cart: &SharedCart,
    config: &AppConfig,
    name: &str,
) -> Result<CartResponse, ApiError> {
    debug!(name, "decrement_item command");
    cart.with_store_mut(|store| {
        store.decrement_quantity(name)?;
        CartResponse::build(store, config)
    })
}

/// Sets an absolute quantity (0 to remove).
pub fn update_cart_item(
    cart: &SharedCart,
    config: &AppConfig,
    name: &str,
    quantity: u32,
) -> Result<CartResponse, ApiError> {
    debug!(name, quantity, "update_cart_item command");
    cart.with_store_mut(|store| {
        store.update_quantity(name, quantity)?;
        CartResponse::build(store, config)
    })
}

/// Removes an item from the cart. Removing a missing item is not an error.
pub fn remove_from_cart(
    cart: &SharedCart,
    config: &AppConfig,
    name: &str,
) -> Result<CartResponse, ApiError> {
    debug!(name, "remove_from_cart command");
    cart.with_store_mut(|store| {
        store.remove_item(name);
        CartResponse::build(store, config)
    })
}

/// Clears all items from the cart.
pub fn clear_cart(cart: &SharedCart, config: &AppConfig) -> Result<CartResponse, ApiError> {
    debug!("clear_cart command");
    cart.with_store_mut(|store| {
        store.clear();
        CartResponse::build(store, config)
    })
}

// =============================================================================
// Operation Scripts
// =============================================================================

/// A single cart operation given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Increment(String),
    Decrement(String),
    Remove(String),
    Update(String, u32),
    Clear,
}

/// Parses `inc NAME`, `dec NAME`, `rm NAME`, `set NAME QTY` and `clear`.
///
/// ## Example
/// ```rust
/// use verdant_cli_lib::commands::cart::{parse_operations, Operation};
///
/// let tokens: Vec<String> = ["inc", "Fern", "set", "Moss", "3"]
///     .iter()
///     .map(|s| s.to_string())
///     .collect();
/// assert_eq!(
///     parse_operations(&tokens).unwrap(),
///     vec![
///         Operation::Increment("Fern".to_string()),
///         Operation::Update("Moss".to_string(), 3),
///     ]
/// );
/// ```
pub fn parse_operations(tokens: &[String]) -> Result<Vec<Operation>, ApiError> {
    let mut operations = Vec::new();
    let mut tokens = tokens.iter();

    while let Some(verb) = tokens.next() {
        let operation = match verb.as_str() {
            "inc" | "increment" => Operation::Increment(next_name(&mut tokens, verb)?),
            "dec" | "decrement" => Operation::Decrement(next_name(&mut tokens, verb)?),
            "rm" | "remove" => Operation::Remove(next_name(&mut tokens, verb)?),
            "clear" => Operation::Clear,
            "set" | "update" => {
                let item = next_name(&mut tokens, verb)?;
                let quantity = tokens
                    .next()
                    .and_then(|raw| raw.parse::<u32>().ok())
                    .ok_or_else(|| {
                        ApiError::validation(format!("'{verb}' needs a non-negative quantity"))
                    })?;
                Operation::Update(item, quantity)
            }
            other => return Err(ApiError::validation(format!("unknown operation '{other}'"))),
        };
        operations.push(operation);
    }

    Ok(operations)
}

fn next_name<'a>(
    tokens: &mut impl Iterator<Item = &'a String>,
    verb: &str,
) -> Result<String, ApiError> {
    tokens
        .next()
        .cloned()
        .ok_or_else(|| ApiError::validation(format!("'{verb}' needs an item name")))
}

/// Applies one operation and returns the resulting cart.
pub fn apply(
    cart: &SharedCart,
    config: &AppConfig,
    operation: &Operation,
) -> Result<CartResponse, ApiError> {
    match operation {
        Operation::Increment(name) => increment_item(cart, config, name),
        Operation::Decrement(name) => decrement_item(cart, config, name),
        Operation::Remove(name) => remove_from_cart(cart, config, name),
        Operation::Update(name, quantity) => update_cart_item(cart, config, name, *quantity),
        Operation::Clear => clear_cart(cart, config),
    }
}
