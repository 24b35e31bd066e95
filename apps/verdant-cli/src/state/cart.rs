//! # Cart State
//!
//! Shares one [`CartStore`] between commands.
//!
//! ## Thread Safety
//! The store is wrapped in `Arc<Mutex<T>>` so that increment, decrement and
//! remove are atomic with respect to each other. Reads take the same lock,
//! which keeps every derivation in step with the last finished mutation.

use std::sync::{Arc, Mutex};

use verdant_core::{CartLimits, CartStore};

use crate::error::ApiError;

/// Cart store behind a mutex.
#[derive(Debug, Clone, Default)]
pub struct SharedCart {
    store: Arc<Mutex<CartStore>>,
}

impl SharedCart {
    /// Creates an uninitialized cart with the given limits.
    pub fn new(limits: CartLimits) -> Self {
        SharedCart {
            store: Arc::new(Mutex::new(CartStore::with_limits(limits))),
        }
    }

    /// Executes a function with read access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let count = cart.with_store(|store| Ok(store.item_count()))?;
    /// ```
    pub fn with_store<F, R>(&self, f: F) -> Result<R, ApiError>
    where
        F: FnOnce(&CartStore) -> Result<R, ApiError>,
    {
        let store = self
            .store
            .lock()
            .map_err(|_| ApiError::internal("cart state lock poisoned"))?;
        f(&store)
    }

    /// Executes a function with write access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart.with_store_mut(|store| Ok(store.increment_quantity("Fern")?))?;
    /// ```
    pub fn with_store_mut<F, R>(&self, f: F) -> Result<R, ApiError>
    where
        F: FnOnce(&mut CartStore) -> Result<R, ApiError>,
    {
        let mut store = self
            .store
            .lock()
            .map_err(|_| ApiError::internal("cart state lock poisoned"))?;
        f(&mut store)
    }
}
