//! # Cart
//!
//! The cart collection, its mutation rules and the totals derived from it.
//!
//! ## Item State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Line Item Quantity States                            │
//! │                                                                         │
//! │               add / load (q)                                            │
//! │   ┌────────┐ ───────────────► ┌──────────────┐ ◄──┐ increment (q+1)     │
//! │   │ Absent │                  │ Present(q≥1) │ ───┘ decrement (q>1)     │
//! │   └────────┘ ◄─────────────── └──────────────┘                          │
//! │        ▲      decrement (q=1)         │                                 │
//! │        └──────────────────────────────┘ remove / update(0)              │
//! │                                                                         │
//! │  Totals are never stored: every read walks the current items.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Items are unique by `name` (adding the same name merges quantities)
//! - Quantity is ≥ 1 for every stored item
//! - Quantity never exceeds [`CartLimits::max_item_quantity`]
//! - A failed mutation leaves every item untouched

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartTotals, CartView, CostPolicy, ExcludedItem, LineItem, QuantityChange};
use crate::validation::{validate_cart_size, validate_line_item};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Derivations
// =============================================================================

/// Sum of quantities across `items`. Zero for an empty slice.
pub fn total_quantity(items: &[LineItem]) -> u64 {
    items.iter().map(|item| u64::from(item.quantity)).sum()
}

/// Sum of `quantity × unit cost` across `items`.
///
/// Uses the same per-item [`LineItem::line_total`] the presentation layer
/// displays, so the displayed lines always add up to this value exactly.
pub fn total_cost(items: &[LineItem], policy: CostPolicy) -> CoreResult<Money> {
    cart_totals(items, policy).map(|totals| totals.total_cost)
}

/// Computes all totals for `items` in one pass.
///
/// ## Malformed Costs
/// - [`CostPolicy::Propagate`]: the first malformed cost fails the call
/// - [`CostPolicy::Exclude`]: the item adds nothing and is listed in
///   `excluded`; its quantity still counts toward `total_quantity`
///
/// An item whose line total would push the sum past the `Money` range
/// counts as malformed with reason "total is out of range".
pub fn cart_totals(items: &[LineItem], policy: CostPolicy) -> CoreResult<CartTotals> {
    let mut total = Money::zero();
    let mut excluded = Vec::new();

    for item in items {
        let running = item.line_total().and_then(|line| {
            total.checked_add(line).ok_or_else(|| {
                CoreError::malformed_cost(item.cost.to_string(), "total is out of range")
            })
        });

        match running {
            Ok(sum) => total = sum,
            Err(err) => match policy {
                CostPolicy::Propagate => return Err(err),
                CostPolicy::Exclude => {
                    warn!(name = %item.name, cost = %item.cost, error = %err, "excluding item from total");
                    excluded.push(ExcludedItem {
                        name: item.name.clone(),
                        reason: err.to_string(),
                    });
                }
            },
        }
    }

    Ok(CartTotals {
        item_count: items.len(),
        total_quantity: total_quantity(items),
        total_cost: total,
        excluded,
    })
}

// =============================================================================
// Limits
// =============================================================================

/// Bounds enforced by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLimits {
    pub max_item_quantity: u32,
    pub max_cart_items: usize,
}

impl Default for CartLimits {
    fn default() -> Self {
        CartLimits {
            max_item_quantity: MAX_ITEM_QUANTITY,
            max_cart_items: MAX_CART_ITEMS,
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// An initialized cart: line items in insertion order.
#[derive(Debug, Clone)]
pub struct Cart {
    items: Vec<LineItem>,
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// When the cart was created or last cleared.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Looks up an item by name.
    pub fn get(&self, name: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.name == name)
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|item| item.name == name)
    }

    /// Merges `item` into the cart and returns the resulting quantity.
    fn merge(&mut self, item: LineItem, limits: &CartLimits) -> CoreResult<u32> {
        if let Some(existing) = self.get_mut(&item.name) {
            let requested = u64::from(existing.quantity) + u64::from(item.quantity);
            existing.quantity = checked_quantity(requested, limits)?;
            return Ok(existing.quantity);
        }

        validate_cart_size(self.items.len(), limits.max_cart_items)
            .map_err(|_| CoreError::CartTooLarge {
                max: limits.max_cart_items,
            })?;

        let quantity = item.quantity;
        self.items.push(item);
        Ok(quantity)
    }

    fn remove(&mut self, name: &str) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|item| item.name != name);
        self.items.len() != initial_len
    }
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

fn checked_quantity(requested: u64, limits: &CartLimits) -> CoreResult<u32> {
    if requested > u64::from(limits.max_item_quantity) {
        return Err(CoreError::QuantityTooLarge {
            requested,
            max: limits.max_item_quantity,
        });
    }
    // Bounded by max_item_quantity above
    Ok(requested as u32)
}

// =============================================================================
// Cart Store
// =============================================================================

/// Owner of the cart and the only way to change it.
///
/// ## Initialization
/// ```text
/// CartStore::new() ──► view() == Loading      (not yet populated)
///        │
///        ▼
/// load(items) ───────► view() == Empty | Items (populated)
///        │
///        ▼
/// clear() ───────────► view() == Empty         (still populated)
/// ```
///
/// ## Example
/// ```rust
/// use verdant_core::{CartStore, CostPolicy, LineItem, QuantityChange};
///
/// let mut store = CartStore::new();
/// store.load(vec![
///     LineItem::new("Shirt", "shirt.png", "$20.00", 1),
///     LineItem::new("Hat", "hat.png", "$10.00", 3),
/// ]).unwrap();
///
/// assert_eq!(store.decrement_quantity("Shirt").unwrap(), QuantityChange::Removed);
/// assert_eq!(store.total_quantity(), 3);
/// assert_eq!(store.total_cost(CostPolicy::Propagate).unwrap().cents(), 3000);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    cart: Option<Cart>,
    limits: CartLimits,
}

impl CartStore {
    /// Creates an uninitialized store with default limits.
    pub fn new() -> Self {
        CartStore::default()
    }

    /// Creates an uninitialized store with custom limits.
    pub fn with_limits(limits: CartLimits) -> Self {
        CartStore { cart: None, limits }
    }

    /// Whether the cart has been populated.
    pub fn is_initialized(&self) -> bool {
        self.cart.is_some()
    }

    /// The initialized cart, if any.
    pub fn cart(&self) -> Option<&Cart> {
        self.cart.as_ref()
    }

    // -------------------------------------------------------------------------
    // Population
    // -------------------------------------------------------------------------

    /// Populates the cart from an external source, replacing any content.
    ///
    /// Items sharing a name are merged. If any item is invalid, or a limit
    /// is exceeded, nothing is loaded.
    pub fn load(&mut self, items: Vec<LineItem>) -> CoreResult<()> {
        let mut cart = Cart::new();
        for item in items {
            validate_line_item(&item, self.limits.max_item_quantity)?;
            cart.merge(item, &self.limits)?;
        }

        debug!(items = cart.items.len(), "cart loaded");
        self.cart = Some(cart);
        Ok(())
    }

    /// Populates the cart from a JSON array of line items.
    ///
    /// ```rust
    /// use verdant_core::CartStore;
    ///
    /// let mut store = CartStore::new();
    /// store
    ///     .load_json(r#"[{"name":"Fern","image":"fern.png","cost":"$15.00","quantity":2}]"#)
    ///     .unwrap();
    /// assert_eq!(store.total_quantity(), 2);
    /// ```
    pub fn load_json(&mut self, json: &str) -> CoreResult<()> {
        let items: Vec<LineItem> = serde_json::from_str(json)?;
        self.load(items)
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// What to show for the cart right now.
    pub fn view(&self) -> CartView<'_> {
        match &self.cart {
            None => CartView::Loading,
            Some(cart) if cart.items.is_empty() => CartView::Empty,
            Some(cart) => CartView::Items(&cart.items),
        }
    }

    /// Items in insertion order, `None` while uninitialized.
    pub fn items(&self) -> Option<&[LineItem]> {
        self.cart.as_ref().map(Cart::items)
    }

    /// Looks up an item by name.
    pub fn get(&self, name: &str) -> Option<&LineItem> {
        self.cart.as_ref().and_then(|cart| cart.get(name))
    }

    /// Number of distinct line items.
    pub fn item_count(&self) -> usize {
        self.items().map_or(0, <[LineItem]>::len)
    }

    /// Sum of quantities. Zero when empty or uninitialized.
    pub fn total_quantity(&self) -> u64 {
        total_quantity(self.items().unwrap_or_default())
    }

    /// Sum of line totals under `policy`.
    pub fn total_cost(&self, policy: CostPolicy) -> CoreResult<Money> {
        total_cost(self.items().unwrap_or_default(), policy)
    }

    /// All totals in one snapshot.
    pub fn totals(&self, policy: CostPolicy) -> CoreResult<CartTotals> {
        cart_totals(self.items().unwrap_or_default(), policy)
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Adds an item, merging by name. Initializes an uninitialized cart.
    ///
    /// Returns the item's quantity after the merge.
    pub fn add_item(&mut self, item: LineItem) -> CoreResult<u32> {
        validate_line_item(&item, self.limits.max_item_quantity)?;

        let limits = self.limits;
        let name = item.name.clone();
        let quantity = self.cart.get_or_insert_with(Cart::new).merge(item, &limits)?;

        debug!(name = %name, quantity, "item added");
        Ok(quantity)
    }

    /// Raises an item's quantity by one and returns the new quantity.
    pub fn increment_quantity(&mut self, name: &str) -> CoreResult<u32> {
        let limits = self.limits;
        let item = self.item_mut(name)?;
        item.quantity = checked_quantity(u64::from(item.quantity) + 1, &limits)?;

        debug!(name, quantity = item.quantity, "quantity incremented");
        Ok(item.quantity)
    }

    /// Lowers an item's quantity by one, removing it when it was at one.
    pub fn decrement_quantity(&mut self, name: &str) -> CoreResult<QuantityChange> {
        let item = self.item_mut(name)?;

        if item.quantity > 1 {
            item.quantity -= 1;
            debug!(name, quantity = item.quantity, "quantity decremented");
            return Ok(QuantityChange::Updated(item.quantity));
        }

        self.remove_item(name);
        Ok(QuantityChange::Removed)
    }

    /// Sets an absolute quantity. Zero removes the item.
    pub fn update_quantity(&mut self, name: &str, quantity: u32) -> CoreResult<QuantityChange> {
        let limits = self.limits;
        let item = self.item_mut(name)?;

        if quantity == 0 {
            self.remove_item(name);
            return Ok(QuantityChange::Removed);
        }

        item.quantity = checked_quantity(u64::from(quantity), &limits)?;
        debug!(name, quantity, "quantity updated");
        Ok(QuantityChange::Updated(quantity))
    }

    /// Removes an item if present. Returns whether anything was removed.
    ///
    /// Idempotent: removing a missing item, or removing from an
    /// uninitialized cart, is not an error.
    pub fn remove_item(&mut self, name: &str) -> bool {
        let removed = self.cart.as_mut().is_some_and(|cart| cart.remove(name));
        debug!(name, removed, "remove item");
        removed
    }

    /// Empties the cart. An uninitialized cart becomes initialized and empty.
    pub fn clear(&mut self) {
        self.cart = Some(Cart::new());
        debug!("cart cleared");
    }

    fn item_mut(&mut self, name: &str) -> CoreResult<&mut LineItem> {
        self.cart
            .as_mut()
            .and_then(|cart| cart.get_mut(name))
            .ok_or_else(|| CoreError::ItemNotFound(name.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
