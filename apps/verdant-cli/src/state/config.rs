//! # Configuration State
//!
//! Cart configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--policy`)
//! 2. Environment variables (`VERDANT_*`)
//! 3. Defaults (this file, from verdant-core constants)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use verdant_core::{CartLimits, CostPolicy, Money};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Quantity and size bounds for the cart
    pub limits: CartLimits,

    /// How totals treat malformed costs
    pub cost_policy: CostPolicy,

    /// Currency symbol (for display)
    pub currency_symbol: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            limits: CartLimits::default(),
            cost_policy: CostPolicy::default(),
            currency_symbol: "$".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `VERDANT_MAX_ITEM_QUANTITY`: Per-item quantity cap (e.g., "999")
    /// - `VERDANT_MAX_CART_ITEMS`: Distinct item cap (e.g., "100")
    /// - `VERDANT_COST_POLICY`: "propagate" or "exclude"
    /// - `VERDANT_CURRENCY_SYMBOL`: Display symbol (e.g., "€")
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(raw) = lookup("VERDANT_MAX_ITEM_QUANTITY") {
            config.limits.max_item_quantity = raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|max| *max > 0)
                .ok_or_else(|| ConfigError::InvalidValue("VERDANT_MAX_ITEM_QUANTITY".to_string()))?;
        }

        if let Some(raw) = lookup("VERDANT_MAX_CART_ITEMS") {
            config.limits.max_cart_items = raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|max| *max > 0)
                .ok_or_else(|| ConfigError::InvalidValue("VERDANT_MAX_CART_ITEMS".to_string()))?;
        }

        if let Some(raw) = lookup("VERDANT_COST_POLICY") {
            config.cost_policy = raw
                .parse::<CostPolicy>()
                .map_err(|_| ConfigError::InvalidValue("VERDANT_COST_POLICY".to_string()))?;
        }

        if let Some(symbol) = lookup("VERDANT_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        Ok(config)
    }

    /// Formats an amount with the configured currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use verdant_cli_lib::state::AppConfig;
    /// use verdant_core::Money;
    ///
    /// let config = AppConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.limits.max_item_quantity, 999);
        assert_eq!(config.cost_policy, CostPolicy::Propagate);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("VERDANT_MAX_ITEM_QUANTITY", "10"),
            ("VERDANT_MAX_CART_ITEMS", "5"),
            ("VERDANT_COST_POLICY", "exclude"),
            ("VERDANT_CURRENCY_SYMBOL", "€"),
        ]))
        .unwrap();

        assert_eq!(config.limits.max_item_quantity, 10);
        assert_eq!(config.limits.max_cart_items, 5);
        assert_eq!(config.cost_policy, CostPolicy::Exclude);
        assert_eq!(config.format_currency(Money::from_cents(4000)), "€40.00");
    }

    #[test]
    fn test_invalid_values() {
        for (key, value) in [
            ("VERDANT_MAX_ITEM_QUANTITY", "lots"),
            ("VERDANT_MAX_ITEM_QUANTITY", "0"),
            ("VERDANT_MAX_CART_ITEMS", "-1"),
            ("VERDANT_COST_POLICY", "ignore"),
        ] {
            let err = AppConfig::from_lookup(lookup_from(&[(key, value)])).unwrap_err();
            assert_eq!(err.to_string(), format!("Invalid value for {key}"));
        }
    }
}
